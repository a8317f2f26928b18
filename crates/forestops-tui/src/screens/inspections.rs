use crossterm::event::{KeyCode, KeyEvent};
use forestops_core::inspection::{InspectionSort, NewInspection};
use forestops_core::theme::Theme;
use forestops_core::validate::format_date;
use forestops_core::{seed, Inspection};
use forestops_service::EntityList;
use ratatui::prelude::*;

use super::{parse_priority, priority_options, rejected, Devices, Outcome, View};
use crate::components::form::{Form, FormEvent};
use crate::components::list_view::ListView;
use crate::components::notice::Notice;
use crate::components::styles;

const DATE_FIELD: &str = "Date (YYYY-MM-DD)";

/// Inspection overview with status tabs (`f`) and date/priority sorting.
pub struct InspectionsScreen {
    inspections: EntityList<Inspection>,
    view: ListView<Inspection>,
    adding: Option<Form>,
}

impl InspectionsScreen {
    pub fn new() -> Self {
        Self {
            inspections: EntityList::seeded("inspection", seed::inspections()),
            view: ListView::new(Some(InspectionSort::Date)),
            adding: None,
        }
    }

    fn visible(&self) -> Vec<Inspection> {
        self.inspections.list(&self.view.query)
    }

    fn submit(&mut self, form: &Form) -> Outcome {
        let draft = NewInspection {
            title: form.value("Title").to_string(),
            date: form.value(DATE_FIELD).to_string(),
            priority: parse_priority(form.value("Priority")),
            assigned_to: form.value("Inspector").to_string(),
        };
        match self.inspections.add(draft) {
            Ok(i) => {
                self.adding = None;
                Outcome::Notice(Notice::status(format!("Inspection \"{}\" scheduled", i.title)))
            }
            Err(e) => rejected(e),
        }
    }
}

impl Default for InspectionsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl View for InspectionsScreen {
    fn handle_key(&mut self, key: KeyEvent, _devices: &mut Devices) -> Outcome {
        if let Some(mut form) = self.adding.take() {
            return match form.handle_key(key) {
                FormEvent::Cancel => Outcome::None,
                FormEvent::Editing => {
                    self.adding = Some(form);
                    Outcome::None
                }
                FormEvent::Submit => {
                    self.adding = Some(form.clone());
                    self.submit(&form)
                }
            };
        }

        let visible = self.visible();
        if self.view.handle_key(key, visible.len()) {
            return Outcome::None;
        }

        match key.code {
            KeyCode::Char('n') => {
                self.adding = Some(
                    Form::new("Schedule Inspection")
                        .text("Title", "")
                        .text(DATE_FIELD, "")
                        .choice("Priority", &priority_options(), "Medium")
                        .text("Inspector", ""),
                );
            }
            KeyCode::Char('c') => {
                if let Some(id) = self.view.selected_id(&visible) {
                    self.inspections.cycle_status(&id);
                }
            }
            KeyCode::Enter => {
                if let Some(i) = self.view.selected(&visible) {
                    let body = serde_json::to_string_pretty(i)
                        .unwrap_or_else(|e| format!("unrenderable: {e}"));
                    return Outcome::Notice(Notice::info("Inspection Details", body));
                }
            }
            _ => {}
        }
        Outcome::None
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let visible = self.visible();
        self.view.render(frame, area, theme, "Inspections", &visible, |i| {
            Line::from(vec![
                Span::styled(format!("{} ", i.priority.symbol()), styles::priority_style(i.priority)),
                Span::styled(format!("{:<28}", i.title), Style::default().bold()),
                Span::raw(format!("{}  ", format_date(i.date))),
                Span::styled(format!("{:<12}", i.status.display_name()), styles::inspection_style(i.status)),
                Span::styled(i.assigned_to.clone(), styles::muted(theme)),
            ])
        });
        if let Some(form) = &self.adding {
            form.render(frame, area, theme);
        }
    }

    fn hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.adding.is_some() {
            return vec![("Enter", "save"), ("Esc", "cancel")];
        }
        let mut hints = self.view.hints();
        hints.extend([("n", "schedule"), ("c", "cycle status"), ("Enter", "details")]);
        hints
    }

    fn is_input_mode(&self) -> bool {
        self.adding.is_some() || self.view.is_searching()
    }

    fn is_idle(&self) -> bool {
        !self.is_input_mode()
    }
}
