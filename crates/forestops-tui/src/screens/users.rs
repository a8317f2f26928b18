use crossterm::event::{KeyCode, KeyEvent};
use forestops_core::theme::Theme;
use forestops_core::user::{UserEdit, UserSort};
use forestops_core::{seed, UserAccount};
use forestops_service::EntityList;
use ratatui::prelude::*;

use super::{rejected, Devices, Outcome, View};
use crate::components::form::{Form, FormEvent};
use crate::components::list_view::ListView;
use crate::components::notice::Notice;
use crate::components::styles;

pub struct UsersScreen {
    users: EntityList<UserAccount>,
    view: ListView<UserAccount>,
    editing: Option<(String, Form)>,
}

impl UsersScreen {
    pub fn new() -> Self {
        Self {
            users: EntityList::seeded("user", seed::users()),
            view: ListView::new(Some(UserSort::Name)),
            editing: None,
        }
    }

    fn visible(&self) -> Vec<UserAccount> {
        self.users.list(&self.view.query)
    }
}

impl Default for UsersScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl View for UsersScreen {
    fn handle_key(&mut self, key: KeyEvent, _devices: &mut Devices) -> Outcome {
        if let Some((id, mut form)) = self.editing.take() {
            return match form.handle_key(key) {
                FormEvent::Cancel => Outcome::None,
                FormEvent::Editing => {
                    self.editing = Some((id, form));
                    Outcome::None
                }
                FormEvent::Submit => {
                    let patch = UserEdit {
                        name: form.value("Name").to_string(),
                        role: form.value("Role").to_string(),
                    };
                    match self.users.edit(&id, &patch) {
                        Ok(u) => Outcome::Notice(Notice::status(format!("{} updated", u.name))),
                        Err(e) => {
                            self.editing = Some((id, form));
                            rejected(e)
                        }
                    }
                }
            };
        }

        let visible = self.visible();
        if self.view.handle_key(key, visible.len()) {
            return Outcome::None;
        }

        match key.code {
            KeyCode::Char('c') => {
                if let Some(id) = self.view.selected_id(&visible) {
                    self.users.cycle_status(&id);
                }
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(u) = self.view.selected(&visible) {
                    let current = UserEdit::from_account(u);
                    let form = Form::new("Edit User")
                        .text("Name", current.name)
                        .text("Role", current.role);
                    self.editing = Some((u.id.clone(), form));
                }
            }
            _ => {}
        }
        Outcome::None
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let visible = self.visible();
        self.view.render(frame, area, theme, "Users", &visible, |u| {
            Line::from(vec![
                Span::styled(format!("{:<20}", u.name), Style::default().bold()),
                Span::raw(format!("{:<32}", u.role)),
                Span::styled(u.status.display_name(), styles::account_style(u.status)),
            ])
        });
        if let Some((_, form)) = &self.editing {
            form.render(frame, area, theme);
        }
    }

    fn hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.editing.is_some() {
            return vec![("Tab", "field"), ("Enter", "save"), ("Esc", "cancel")];
        }
        let mut hints = self.view.hints();
        hints.extend([("c", "activate/deactivate"), ("e", "edit")]);
        hints
    }

    fn is_input_mode(&self) -> bool {
        self.editing.is_some() || self.view.is_searching()
    }

    fn is_idle(&self) -> bool {
        !self.is_input_mode()
    }
}
