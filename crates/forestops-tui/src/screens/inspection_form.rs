use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent};
use forestops_core::report::{InspectionKind, InspectionReport, ReportForm};
use forestops_core::theme::Theme;
use forestops_core::Priority;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use tracing::{info, warn};

use super::{priority_options, Devices, Outcome, View};
use crate::components::form::{Form, FormEvent};
use crate::components::notice::Notice;
use crate::components::styles;

const LOCATION: &str = "Location";
const KIND: &str = "Inspection Type";
const NOTES: &str = "Notes";
const SEVERITY: &str = "Severity";

/// Field inspection entry. The form fills the screen and always has focus,
/// so Esc is the way out.
pub struct InspectionFormScreen {
    form: Form,
    submitted: Vec<InspectionReport>,
}

impl InspectionFormScreen {
    pub fn new() -> Self {
        Self {
            form: Self::blank(),
            submitted: Vec::new(),
        }
    }

    fn blank() -> Form {
        let defaults = ReportForm::default();
        let kinds: Vec<&'static str> = InspectionKind::ALL.iter().map(|k| k.display_name()).collect();
        Form::new("New Inspection")
            .text(LOCATION, "")
            .choice(KIND, &kinds, defaults.kind.display_name())
            .text(NOTES, "")
            .choice(SEVERITY, &priority_options(), defaults.severity.display_name())
    }

    fn read_form(&self) -> ReportForm {
        ReportForm {
            location: self.form.value(LOCATION).to_string(),
            kind: InspectionKind::parse_str(self.form.value(KIND)).unwrap_or(InspectionKind::TreeHealth),
            notes: self.form.value(NOTES).to_string(),
            severity: Priority::parse_str(self.form.value(SEVERITY)).unwrap_or(Priority::Low),
        }
    }

    fn submit(&mut self) -> Outcome {
        match self.read_form().submit(Utc::now()) {
            Ok(report) => {
                match serde_json::to_string(&report) {
                    Ok(json) => info!(report = %json, "inspection submitted"),
                    Err(e) => warn!(error = %e, "inspection submitted; could not serialize"),
                }
                let body = format!(
                    "{} inspection at {} recorded.",
                    report.inspection_type, report.location
                );
                self.submitted.push(report);
                self.form = Self::blank();
                Outcome::Notice(Notice::success("Inspection Submitted", body))
            }
            Err(e) => Outcome::Notice(Notice::invalid(e.to_string())),
        }
    }
}

impl Default for InspectionFormScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl View for InspectionFormScreen {
    fn handle_key(&mut self, key: KeyEvent, _devices: &mut Devices) -> Outcome {
        match self.form.handle_key(key) {
            FormEvent::Cancel => Outcome::Back,
            FormEvent::Submit => self.submit(),
            FormEvent::Editing => Outcome::None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(3)])
            .split(area);
        self.form.render_inline(frame, chunks[0], theme);

        let summary = match self.submitted.last() {
            Some(last) => format!(
                "{} submitted this session. Last: {} at {} ({})",
                self.submitted.len(),
                last.inspection_type,
                last.location,
                last.severity
            ),
            None => "No inspections submitted this session.".to_string(),
        };
        frame.render_widget(
            Paragraph::new(Line::styled(summary, styles::muted(theme)))
                .block(styles::panel(" Submitted ", theme)),
            chunks[1],
        );
    }

    fn hints(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            ("Tab", "next field"),
            ("←/→", "choose"),
            ("Enter", "submit"),
            ("Esc", "back"),
        ]
    }

    fn is_input_mode(&self) -> bool {
        true
    }

    fn is_idle(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::testing::{char_key, devices, key};

    #[test]
    fn submit_without_location_is_rejected() {
        let mut s = InspectionFormScreen::new();
        let mut dev = devices();
        let out = s.handle_key(key(KeyCode::Enter), &mut dev);
        assert!(matches!(out, Outcome::Notice(ref n) if n.body == "Please enter a location"));
        assert!(s.submitted.is_empty());
    }

    #[test]
    fn submit_records_and_resets() {
        let mut s = InspectionFormScreen::new();
        let mut dev = devices();
        for c in "Ridge 4".chars() {
            s.handle_key(char_key(c), &mut dev);
        }
        s.handle_key(key(KeyCode::Tab), &mut dev);
        s.handle_key(key(KeyCode::Right), &mut dev);
        s.handle_key(key(KeyCode::Enter), &mut dev);
        assert_eq!(s.submitted.len(), 1);
        assert_eq!(s.submitted[0].inspection_type, InspectionKind::PestControl);
        assert_eq!(s.submitted[0].severity, Priority::Low);
        assert_eq!(s.form.value(LOCATION), "");
        assert_eq!(s.form.value(KIND), "Tree Health");
    }

    #[test]
    fn esc_goes_back() {
        let mut s = InspectionFormScreen::new();
        let mut dev = devices();
        assert_eq!(s.handle_key(key(KeyCode::Esc), &mut dev), Outcome::Back);
    }
}
