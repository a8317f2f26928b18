use crossterm::event::{KeyCode, KeyEvent};
use forestops_core::field_task::{FieldTaskEdit, FieldTaskSort, NewFieldTask};
use forestops_core::theme::Theme;
use forestops_core::{seed, FieldTask};
use forestops_service::EntityList;
use ratatui::prelude::*;

use super::{parse_priority, priority_options, rejected, Devices, Outcome, View};
use crate::components::form::{Form, FormEvent};
use crate::components::list_view::ListView;
use crate::components::notice::Notice;
use crate::components::styles;

enum Modal {
    Add(Form),
    Edit { id: String, form: Form },
}

/// Field operative task list. Enter opens the task for editing.
pub struct TasksScreen {
    tasks: EntityList<FieldTask>,
    view: ListView<FieldTask>,
    modal: Option<Modal>,
}

impl TasksScreen {
    pub fn new() -> Self {
        Self {
            tasks: EntityList::seeded("field task", seed::field_tasks()),
            view: ListView::new(Some(FieldTaskSort::Priority)),
            modal: None,
        }
    }

    fn visible(&self) -> Vec<FieldTask> {
        self.tasks.list(&self.view.query)
    }

    fn task_form(title: &str, edit: Option<&FieldTaskEdit>) -> Form {
        let (name, description, priority) = match edit {
            Some(e) => (e.title.as_str(), e.description.as_str(), e.priority.display_name()),
            None => ("", "", "Medium"),
        };
        Form::new(title)
            .text("Title", name)
            .text("Description", description)
            .choice("Priority", &priority_options(), priority)
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
                    let draft = NewFieldTask {
                        title: form.value("Title").to_string(),
                        description: form.value("Description").to_string(),
                        priority: parse_priority(form.value("Priority")),
                    };
                    match self.tasks.add(draft) {
                        Ok(t) => Outcome::Notice(Notice::status(format!("Task \"{}\" added", t.title))),
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
                    let patch = FieldTaskEdit {
                        title: form.value("Title").to_string(),
                        description: form.value("Description").to_string(),
                        priority: parse_priority(form.value("Priority")),
                    };
                    match self.tasks.edit(&id, &patch) {
                        Ok(t) => Outcome::Notice(Notice::status(format!("Task \"{}\" saved", t.title))),
                        Err(e) => {
                            self.modal = Some(Modal::Edit { id, form });
                            rejected(e)
                        }
                    }
                }
            },
        }
    }
}

impl Default for TasksScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl View for TasksScreen {
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
                self.modal = Some(Modal::Add(Self::task_form("New Task", None)));
            }
            KeyCode::Char('c') => {
                if let Some(id) = self.view.selected_id(&visible) {
                    self.tasks.cycle_status(&id);
                }
            }
            KeyCode::Enter => {
                if let Some(task) = self.view.selected(&visible) {
                    let edit = FieldTaskEdit::from_task(task);
                    self.modal = Some(Modal::Edit {
                        id: task.id.clone(),
                        form: Self::task_form("Edit Task", Some(&edit)),
                    });
                }
            }
            _ => {}
        }
        Outcome::None
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let visible = self.visible();
        self.view.render(frame, area, theme, "Tasks", &visible, |t| {
            Line::from(vec![
                Span::styled(format!("{} ", t.priority.symbol()), styles::priority_style(t.priority)),
                Span::styled(format!("{:<26}", t.title), Style::default().bold()),
                Span::styled(format!("{:<12}", t.status.display_name()), styles::progress_style(t.status)),
                Span::styled(t.description.clone(), styles::muted(theme)),
            ])
        });
        match &self.modal {
            Some(Modal::Add(form)) | Some(Modal::Edit { form, .. }) => form.render(frame, area, theme),
            None => {}
        }
    }

    fn hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.modal.is_some() {
            return vec![("Tab", "field"), ("Enter", "save"), ("Esc", "cancel")];
        }
        let mut hints = self.view.hints();
        hints.extend([("n", "new"), ("c", "cycle status"), ("Enter", "edit")]);
        hints
    }

    fn is_input_mode(&self) -> bool {
        self.modal.is_some() || self.view.is_searching()
    }

    fn is_idle(&self) -> bool {
        !self.is_input_mode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::testing::{char_key, devices, key};

    #[test]
    fn edit_rejects_blank_title_and_keeps_record() {
        let mut s = TasksScreen::new();
        let mut dev = devices();
        let first = s.visible()[0].clone();
        s.handle_key(key(KeyCode::Enter), &mut dev);
        for _ in 0..first.title.chars().count() {
            s.handle_key(key(KeyCode::Backspace), &mut dev);
        }
        let out = s.handle_key(key(KeyCode::Enter), &mut dev);
        assert!(matches!(out, Outcome::Notice(ref n) if n.body == "Please fill in all fields"));
        assert!(matches!(s.modal, Some(Modal::Edit { .. })));
        assert_eq!(s.tasks.get(&first.id).unwrap().title, first.title);
    }

    #[test]
    fn edit_saves_changes() {
        let mut s = TasksScreen::new();
        let mut dev = devices();
        let first = s.visible()[0].clone();
        s.handle_key(key(KeyCode::Enter), &mut dev);
        s.handle_key(char_key('!'), &mut dev);
        s.handle_key(key(KeyCode::Enter), &mut dev);
        assert!(s.modal.is_none());
        assert_eq!(s.tasks.get(&first.id).unwrap().title, format!("{}!", first.title));
    }
}
