use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use forestops_core::resource::{NewResource, ResourceSort, SetAvailable};
use forestops_core::theme::Theme;
use forestops_core::validate::format_date;
use forestops_core::{seed, Resource};
use forestops_service::EntityList;
use ratatui::prelude::*;
use ratatui::widgets::{Clear, Gauge, Paragraph};
use tracing::debug;

use super::{rejected, Devices, Outcome, View};
use crate::components::form::{Form, FormEvent};
use crate::components::list_view::ListView;
use crate::components::notice::Notice;
use crate::components::styles::{self, centered_rect};
use crate::timer::Interval;

const REQUEST_BODY: &str = "This would open a form to request additional resources from other \
stations or external agencies.";

enum Modal {
    Add(Form),
    Edit { id: String, form: Form },
    History { id: String },
}

/// Emergency resource board. Availability drains on a timer to simulate
/// live deployment.
pub struct ResourcesScreen {
    resources: EntityList<Resource>,
    view: ListView<Resource>,
    modal: Option<Modal>,
    refresh: Interval,
}

impl ResourcesScreen {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            resources: EntityList::seeded("resource", seed::resources()),
            view: ListView::new(Some(ResourceSort::Name)),
            modal: None,
            refresh: Interval::new(period, now),
        }
    }

    fn visible(&self) -> Vec<Resource> {
        self.resources.list(&self.view.query)
    }

    fn handle_modal(&mut self, modal: Modal, key: KeyEvent) -> Outcome {
        match modal {
            Modal::Add(mut form) => match form.handle_key(key) {
                FormEvent::Cancel => Outcome::None,
                FormEvent::Editing => {
                    self.modal = Some(Modal::Add(form));
                    Outcome::None
                }
                FormEvent::Submit => {
                    let draft = NewResource {
                        name: form.value("Name").to_string(),
                        total: form.value("Total").to_string(),
                        location: form.value("Location").to_string(),
                    };
                    match self.resources.add(draft) {
                        Ok(r) => Outcome::Notice(Notice::status(format!("{} added", r.name))),
                        Err(e) => {
                            self.modal = Some(Modal::Add(form));
                            rejected(e)
                        }
                    }
                }
            },
            Modal::Edit { id, mut form } => match form.handle_key(key) {
                FormEvent::Cancel => Outcome::None,
                FormEvent::Editing => {
                    self.modal = Some(Modal::Edit { id, form });
                    Outcome::None
                }
                FormEvent::Submit => {
                    let patch = SetAvailable(form.value("Available").to_string());
                    match self.resources.edit(&id, &patch) {
                        Ok(r) => Outcome::Notice(Notice::status(format!(
                            "{}: {}/{} available",
                            r.name, r.available, r.total
                        ))),
                        Err(e) => {
                            self.modal = Some(Modal::Edit { id, form });
                            rejected(e)
                        }
                    }
                }
            },
            Modal::History { .. } => Outcome::None,
        }
    }

    fn render_history(&self, frame: &mut Frame, area: Rect, theme: &Theme, resource: &Resource) {
        let popup = centered_rect(50, 40, area);
        frame.render_widget(Clear, popup);
        let mut lines: Vec<Line> = resource
            .usage_history()
            .iter()
            .map(|entry| {
                let date = entry.date().map(format_date).unwrap_or_default();
                Line::from(format!(
                    "{date}  {:<12} {}",
                    entry.action.display_name(),
                    entry.quantity
                ))
            })
            .collect();
        lines.push(Line::default());
        lines.push(Line::styled("(any key) close", styles::muted(theme)));
        frame.render_widget(
            Paragraph::new(lines).block(styles::popup(
                format!(" {} Usage History ", resource.name),
                theme,
            )),
            popup,
        );
    }
}

impl View for ResourcesScreen {
    fn handle_key(&mut self, key: KeyEvent, _devices: &mut Devices) -> Outcome {
        if let Some(modal) = self.modal.take() {
            return self.handle_modal(modal, key);
        }

        let visible = self.visible();
        if self.view.handle_key(key, visible.len()) {
            return Outcome::None;
        }

        match key.code {
            KeyCode::Char('n') => {
                self.modal = Some(Modal::Add(
                    Form::new("Add Resource")
                        .text("Name", "")
                        .text("Total", "")
                        .text("Location", ""),
                ));
            }
            KeyCode::Char('e') => {
                if let Some(r) = self.view.selected(&visible) {
                    self.modal = Some(Modal::Edit {
                        id: r.id.clone(),
                        form: Form::new(format!("{} (of {})", r.name, r.total))
                            .text("Available", r.available.to_string()),
                    });
                }
            }
            KeyCode::Char('h') => {
                if let Some(id) = self.view.selected_id(&visible) {
                    self.modal = Some(Modal::History { id });
                }
            }
            KeyCode::Char('r') => {
                return Outcome::Notice(Notice::info("Request Additional Resources", REQUEST_BODY));
            }
            _ => {}
        }
        Outcome::None
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let visible = self.visible();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(area);

        self.view.render(frame, chunks[0], theme, "Emergency Resources", &visible, |r| {
            Line::from(vec![
                Span::styled(format!("{:<22}", r.name), Style::default().bold()),
                Span::raw(format!("{:>4}/{:<4}", r.available, r.total)),
                Span::styled(format!("  {}", r.location), styles::muted(theme)),
            ])
        });

        if let Some(r) = self.view.selected(&visible) {
            let ratio = if r.total == 0 {
                0.0
            } else {
                f64::from(r.available) / f64::from(r.total)
            };
            frame.render_widget(
                Gauge::default()
                    .block(styles::panel(format!(" {} availability ", r.name), theme))
                    .gauge_style(Style::default().fg(styles::color(theme.palette.accent)))
                    .ratio(ratio.clamp(0.0, 1.0))
                    .label(format!("{}/{}", r.available, r.total)),
                chunks[1],
            );
        }

        match &self.modal {
            Some(Modal::Add(form)) | Some(Modal::Edit { form, .. }) => form.render(frame, area, theme),
            Some(Modal::History { id }) => {
                if let Some(r) = self.resources.get(id) {
                    self.render_history(frame, area, theme, r);
                }
            }
            None => {}
        }
    }

    fn hints(&self) -> Vec<(&'static str, &'static str)> {
        match &self.modal {
            Some(Modal::History { .. }) => vec![("any", "close")],
            Some(_) => vec![("Enter", "save"), ("Esc", "cancel")],
            None => {
                let mut hints = self.view.hints();
                hints.extend([("e", "edit"), ("h", "history"), ("r", "request"), ("n", "add")]);
                hints
            }
        }
    }

    fn is_input_mode(&self) -> bool {
        matches!(self.modal, Some(Modal::Add(_)) | Some(Modal::Edit { .. }))
            || self.view.is_searching()
    }

    fn is_idle(&self) -> bool {
        self.modal.is_none() && !self.view.is_searching()
    }

    fn next_deadline(&self) -> Option<Instant> {
        Some(self.refresh.deadline())
    }

    fn tick(&mut self, now: Instant) -> Outcome {
        if self.refresh.fire(now) {
            let mut rng = rand::thread_rng();
            self.resources.update_each(|r| r.drain(&mut rng));
            debug!("resource availability refreshed");
        }
        Outcome::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::testing::{char_key, devices, key};

    fn screen() -> ResourcesScreen {
        ResourcesScreen::new(Duration::from_secs(30), Instant::now())
    }

    fn set_available(s: &mut ResourcesScreen, dev: &mut Devices, value: &str) -> Outcome {
        s.handle_key(char_key('e'), dev);
        for _ in 0..4 {
            s.handle_key(key(KeyCode::Backspace), dev);
        }
        for c in value.chars() {
            s.handle_key(char_key(c), dev);
        }
        s.handle_key(key(KeyCode::Enter), dev)
    }

    #[test]
    fn available_is_bounded_by_total() {
        let mut s = screen();
        let mut dev = devices();
        // Name sort puts Ambulances (3/4) first
        let first = s.visible()[0].clone();
        assert_eq!(first.name, "Ambulances");

        let out = set_available(&mut s, &mut dev, "5");
        assert!(matches!(out, Outcome::Notice(ref n) if n.title == "Invalid Input"));
        assert_eq!(s.resources.get(&first.id).unwrap().available, 3);
        s.handle_key(key(KeyCode::Esc), &mut dev);

        set_available(&mut s, &mut dev, "4");
        assert_eq!(s.resources.get(&first.id).unwrap().available, 4);
    }

    #[test]
    fn tick_drains_but_never_below_zero() {
        let t0 = Instant::now();
        let mut s = ResourcesScreen::new(Duration::from_secs(30), t0);
        let before: u32 = s.resources.records().iter().map(|r| r.available).sum();
        for i in 1..=40 {
            s.tick(t0 + Duration::from_secs(30 * i));
        }
        let after: u32 = s.resources.records().iter().map(|r| r.available).sum();
        assert!(after <= before);
        assert!(s
            .resources
            .records()
            .iter()
            .all(|r| r.available <= r.total));
    }

    #[test]
    fn history_modal_closes_on_any_key() {
        let mut s = screen();
        let mut dev = devices();
        s.handle_key(char_key('h'), &mut dev);
        assert!(!s.is_idle());
        s.handle_key(char_key('x'), &mut dev);
        assert!(s.is_idle());
    }

    #[test]
    fn add_rejects_non_positive_total() {
        let mut s = screen();
        let mut dev = devices();
        let before = s.resources.len();
        s.handle_key(char_key('n'), &mut dev);
        for c in "Drones".chars() {
            s.handle_key(char_key(c), &mut dev);
        }
        s.handle_key(key(KeyCode::Tab), &mut dev);
        s.handle_key(char_key('0'), &mut dev);
        s.handle_key(key(KeyCode::Tab), &mut dev);
        for c in "HQ".chars() {
            s.handle_key(char_key(c), &mut dev);
        }
        let out = s.handle_key(key(KeyCode::Enter), &mut dev);
        assert!(matches!(
            out,
            Outcome::Notice(ref n) if n.body == forestops_core::resource::INVALID_TOTAL
        ));
        assert_eq!(s.resources.len(), before);
    }
}
