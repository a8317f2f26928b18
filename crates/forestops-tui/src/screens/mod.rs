//! One module per route. Each screen owns its records for as long as it is
//! on the navigation stack; popping it discards them.

mod dashboard;
mod data_management;
mod emergency_tasks;
mod health;
mod inspection_form;
mod inspections;
mod map;
mod resources;
mod tasks;
mod team;
mod users;
mod work_orders;

use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use forestops_core::theme::Theme;
use forestops_core::{Priority, Route};
use forestops_service::device::{FilePicker, LocationProvider, ShareService};
use forestops_service::ServiceError;
use ratatui::prelude::*;
use tracing::debug;

use crate::components::notice::Notice;

pub use dashboard::DashboardScreen;
pub use data_management::DataScreen;
pub use emergency_tasks::EmergencyScreen;
pub use health::HealthScreen;
pub use inspection_form::InspectionFormScreen;
pub use inspections::InspectionsScreen;
pub use map::MapScreen;
pub use resources::ResourcesScreen;
pub use tasks::TasksScreen;
pub use team::TeamScreen;
pub use users::UsersScreen;
pub use work_orders::WorkOrdersScreen;

/// Host capabilities handed to screens that need them.
pub struct Devices {
    pub location: Box<dyn LocationProvider>,
    pub picker: Box<dyn FilePicker>,
    pub share: Box<dyn ShareService>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub resource_refresh: Duration,
    pub health_refresh: Duration,
    pub download_delay: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            resource_refresh: Duration::from_secs(30),
            health_refresh: Duration::from_secs(5),
            download_delay: Duration::from_millis(2000),
        }
    }
}

/// What a screen asks the app to do after a key or tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    None,
    Notice(Notice),
    Navigate(Route),
    Back,
}

pub trait View {
    fn handle_key(&mut self, key: KeyEvent, devices: &mut Devices) -> Outcome;

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme);

    fn hints(&self) -> Vec<(&'static str, &'static str)>;

    /// Text entry is active, so plain letters belong to the screen.
    fn is_input_mode(&self) -> bool {
        false
    }

    /// No modal is open and no text is being typed; the app's global keys
    /// (menu, logout, Esc for back) apply.
    fn is_idle(&self) -> bool {
        true
    }

    fn next_deadline(&self) -> Option<Instant> {
        None
    }

    fn tick(&mut self, _now: Instant) -> Outcome {
        Outcome::None
    }
}

/// A mounted route.
pub struct Screen {
    route: Route,
    view: Box<dyn View>,
}

impl Screen {
    /// Build the view for a route. Some screens have something to say on
    /// arrival (e.g. a refused location permission).
    pub fn mount(
        route: Route,
        now: Instant,
        timing: &Timing,
        devices: &mut Devices,
    ) -> (Self, Option<Notice>) {
        let mut notice = None;
        let view: Box<dyn View> = match route {
            Route::Dashboard => Box::new(DashboardScreen::new()),
            Route::WorkOrders => Box::new(WorkOrdersScreen::new()),
            Route::InspectionOverview => Box::new(InspectionsScreen::new()),
            Route::TeamAssignment => Box::new(TeamScreen::new()),
            Route::TaskList => Box::new(TasksScreen::new()),
            Route::InspectionForm => Box::new(InspectionFormScreen::new()),
            Route::InteractiveMap => {
                let (screen, warning) = MapScreen::mount(devices.location.as_mut());
                notice = warning;
                Box::new(screen)
            }
            Route::EmergencyTasks => Box::new(EmergencyScreen::new()),
            Route::EmergencyResources => {
                Box::new(ResourcesScreen::new(timing.resource_refresh, now))
            }
            Route::DataManagement => Box::new(DataScreen::new(timing.download_delay)),
            Route::UserManagement => Box::new(UsersScreen::new()),
            Route::SystemHealth => Box::new(HealthScreen::new(timing.health_refresh, now)),
        };
        debug!(route = route.as_str(), "screen mounted");
        (Self { route, view }, notice)
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn view(&self) -> &dyn View {
        self.view.as_ref()
    }

    pub fn view_mut(&mut self) -> &mut dyn View {
        self.view.as_mut()
    }
}

/// Choice labels for a priority picker, low to high.
pub(crate) fn priority_options() -> Vec<&'static str> {
    Priority::PICKER.iter().map(|p| p.display_name()).collect()
}

pub(crate) fn parse_priority(value: &str) -> Priority {
    Priority::parse_str(value).unwrap_or_default()
}

/// Validation failures keep the form open behind a popup; anything else
/// is reported as an error.
pub(crate) fn rejected(err: ServiceError) -> Outcome {
    if err.is_validation() {
        Outcome::Notice(Notice::invalid(err.to_string()))
    } else {
        Outcome::Notice(Notice::error("Error", err.to_string()))
    }
}

/// Two-column `label: value` lines for a detail popup.
pub(crate) fn detail_lines(pairs: &[(&str, String)]) -> String {
    pairs
        .iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
pub(crate) mod testing {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use forestops_core::map::Coordinate;
    use forestops_service::device::{FixedLocation, ScriptedPicker, SimulatedShare};

    use super::Devices;

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    pub fn char_key(c: char) -> KeyEvent {
        key(KeyCode::Char(c))
    }

    pub fn devices() -> Devices {
        Devices {
            location: Box::new(FixedLocation::new(Coordinate::new(37.788, -122.433))),
            picker: Box::new(ScriptedPicker::new(vec!["canopy.csv".to_string()])),
            share: Box::new(SimulatedShare::new(true)),
        }
    }
}
