use crossterm::event::{KeyCode, KeyEvent};
use forestops_core::emergency::{EmergencyAction, EmergencySort, NewEmergencyTask};
use forestops_core::theme::Theme;
use forestops_core::{seed, EmergencyTask};
use forestops_service::EntityList;
use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph, Wrap};

use super::{parse_priority, priority_options, rejected, Devices, Outcome, View};
use crate::components::form::{Form, FormEvent};
use crate::components::list_view::ListView;
use crate::components::notice::Notice;
use crate::components::styles::{self, centered_rect};

enum Modal {
    Add(Form),
    Detail { id: String },
    Reassign { id: String, form: Form },
}

pub struct EmergencyScreen {
    tasks: EntityList<EmergencyTask>,
    view: ListView<EmergencyTask>,
    modal: Option<Modal>,
}

impl EmergencyScreen {
    pub fn new() -> Self {
        Self {
            tasks: EntityList::seeded("emergency task", seed::emergency_tasks()),
            view: ListView::new(Some(EmergencySort::Priority)),
            modal: None,
        }
    }

    fn visible(&self) -> Vec<EmergencyTask> {
        self.tasks.list(&self.view.query)
    }

    fn act(&mut self, id: &str, action: EmergencyAction) -> Outcome {
        match self.tasks.edit(id, &action) {
            Ok(_) => Outcome::None,
            Err(e) => rejected(e),
        }
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
                    let draft = NewEmergencyTask {
                        title: form.value("Title").to_string(),
                        priority: parse_priority(form.value("Priority")),
                        estimated_time: form.value("Estimated Time").to_string(),
                        location: form.value("Location").to_string(),
                        assigned_to: form.value("Assigned Team").to_string(),
                    };
                    match self.tasks.add(draft) {
                        Ok(t) => Outcome::Notice(Notice::status(format!("Task \"{}\" created", t.title))),
                        Err(e) => {
                            self.modal = Some(Modal::Add(form));
                            rejected(e)
                        }
                    }
                }
            },
            Modal::Detail { id } => match key.code {
                KeyCode::Char('c') => self.act(&id, EmergencyAction::Complete),
                KeyCode::Char('e') => self.act(&id, EmergencyAction::Escalate),
                KeyCode::Char('r') => {
                    let current = self
                        .tasks
                        .get(&id)
                        .map(|t| t.assigned_to.clone())
                        .unwrap_or_default();
                    self.modal = Some(Modal::Reassign {
                        form: Form::new("Reassign Task").text("Assigned Team", current),
                        id,
                    });
                    Outcome::None
                }
                KeyCode::Esc | KeyCode::Enter => Outcome::None,
                _ => {
                    self.modal = Some(Modal::Detail { id });
                    Outcome::None
                }
            },
            Modal::Reassign { id, mut form } => match form.handle_key(key) {
                FormEvent::Cancel => {
                    self.modal = Some(Modal::Detail { id });
                    Outcome::None
                }
                FormEvent::Editing => {
                    self.modal = Some(Modal::Reassign { id, form });
                    Outcome::None
                }
                FormEvent::Submit => {
                    let team = form.value("Assigned Team").to_string();
                    match self.tasks.edit(&id, &EmergencyAction::Reassign(team)) {
                        Ok(t) => Outcome::Notice(Notice::status(format!(
                            "\"{}\" reassigned to {}",
                            t.title, t.assigned_to
                        ))),
                        Err(e) => {
                            self.modal = Some(Modal::Reassign { id, form });
                            rejected(e)
                        }
                    }
                }
            },
        }
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, theme: &Theme, task: &EmergencyTask) {
        let popup = centered_rect(55, 45, area);
        frame.render_widget(Clear, popup);
        let lines = vec![
            Line::from(vec![
                Span::raw("Priority: "),
                Span::styled(task.priority.display_name(), styles::priority_style(task.priority)),
            ]),
            Line::from(vec![
                Span::raw("Status: "),
                Span::styled(task.status.display_name(), styles::progress_style(task.status)),
            ]),
            Line::from(format!("Estimated Time: {}", task.estimated_time)),
            Line::from(format!("Location: {}", task.location)),
            Line::from(format!("Assigned To: {}", task.assigned_to)),
            Line::default(),
            styles::hint_line(&[("c", "complete"), ("e", "escalate"), ("r", "reassign"), ("Esc", "close")]),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .block(styles::popup(format!(" {} ", task.title), theme))
                .wrap(Wrap { trim: false }),
            popup,
        );
    }
}

impl Default for EmergencyScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl View for EmergencyScreen {
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
                    Form::new("New Emergency Task")
                        .text("Title", "")
                        .choice("Priority", &priority_options(), "Medium")
                        .text("Estimated Time", "")
                        .text("Location", "")
                        .text("Assigned Team", ""),
                ));
            }
            KeyCode::Char('c') => {
                if let Some(id) = self.view.selected_id(&visible) {
                    self.tasks.cycle_status(&id);
                }
            }
            KeyCode::Char('p') => {
                if let Some(id) = self.view.selected_id(&visible) {
                    return self.act(&id, EmergencyAction::CyclePriority);
                }
            }
            KeyCode::Enter => {
                if let Some(id) = self.view.selected_id(&visible) {
                    self.modal = Some(Modal::Detail { id });
                }
            }
            _ => {}
        }
        Outcome::None
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let visible = self.visible();
        self.view.render(frame, area, theme, "Emergency Tasks", &visible, |t| {
            Line::from(vec![
                Span::styled(format!("{:<7}", t.priority.display_name()), styles::priority_style(t.priority)),
                Span::styled(format!("{:<40}", t.title), Style::default().bold()),
                Span::styled(format!("{:<12}", t.status.display_name()), styles::progress_style(t.status)),
                Span::raw(format!("{:<10}", t.location)),
                Span::styled(format!("{}  ~{}", t.assigned_to, t.estimated_time), styles::muted(theme)),
            ])
        });
        match &self.modal {
            Some(Modal::Add(form)) | Some(Modal::Reassign { form, .. }) => form.render(frame, area, theme),
            Some(Modal::Detail { id }) => {
                if let Some(task) = self.tasks.get(id) {
                    self.render_detail(frame, area, theme, task);
                }
            }
            None => {}
        }
    }

    fn hints(&self) -> Vec<(&'static str, &'static str)> {
        match &self.modal {
            Some(Modal::Detail { .. }) => {
                vec![("c", "complete"), ("e", "escalate"), ("r", "reassign"), ("Esc", "close")]
            }
            Some(_) => vec![("Enter", "save"), ("Esc", "cancel")],
            None => {
                let mut hints = self.view.hints();
                hints.extend([
                    ("n", "new"),
                    ("c", "cycle status"),
                    ("p", "priority"),
                    ("Enter", "actions"),
                ]);
                hints
            }
        }
    }

    fn is_input_mode(&self) -> bool {
        matches!(self.modal, Some(Modal::Add(_)) | Some(Modal::Reassign { .. }))
            || self.view.is_searching()
    }

    fn is_idle(&self) -> bool {
        self.modal.is_none() && !self.view.is_searching()
    }
}
