use crossterm::event::{KeyCode, KeyEvent};
use forestops_core::list::StatusCycle;
use forestops_core::team::{Assign, NewTeamMember, RoleFilter, TeamSort, TeamStatus};
use forestops_core::theme::Theme;
use forestops_core::{seed, TeamMember};
use forestops_service::EntityList;
use ratatui::prelude::*;

use super::{detail_lines, rejected, Devices, Outcome, View};
use crate::components::form::{Form, FormEvent};
use crate::components::list_view::ListView;
use crate::components::notice::Notice;
use crate::components::styles;

enum Modal {
    Add(Form),
    Assign { id: String, form: Form },
}

pub struct TeamScreen {
    team: EntityList<TeamMember>,
    view: ListView<TeamMember>,
    role: RoleFilter,
    modal: Option<Modal>,
}

impl TeamScreen {
    pub fn new() -> Self {
        Self {
            team: EntityList::seeded("team member", seed::team()),
            view: ListView::new(Some(TeamSort::Name)),
            role: RoleFilter::All,
            modal: None,
        }
    }

    fn visible(&self) -> Vec<TeamMember> {
        self.team
            .list(&self.view.query)
            .into_iter()
            .filter(|m| self.role.admits(m))
            .collect()
    }

    fn status_options() -> Vec<&'static str> {
        TeamStatus::CYCLE.iter().map(|s| s.label()).collect()
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
                    let draft = NewTeamMember {
                        name: form.value("Name").to_string(),
                        role: form.value("Role").to_string(),
                        skills: form.value("Skills (comma separated)").to_string(),
                    };
                    match self.team.add(draft) {
                        Ok(m) => Outcome::Notice(Notice::status(format!("{} joined the team", m.name))),
                        Err(e) => {
                            self.modal = Some(Modal::Add(form));
                            rejected(e)
                        }
                    }
                }
            },
            Modal::Assign { id, mut form } => match form.handle_key(key) {
                FormEvent::Cancel => Outcome::None,
                FormEvent::Editing => {
                    self.modal = Some(Modal::Assign { id, form });
                    Outcome::None
                }
                FormEvent::Submit => {
                    let status = TeamStatus::CYCLE
                        .iter()
                        .copied()
                        .find(|s| s.label() == form.value("Status"))
                        .unwrap_or(TeamStatus::Available);
                    match self.team.edit(&id, &Assign(status)) {
                        Ok(m) => Outcome::Notice(Notice::success(
                            "Assigned",
                            format!("{} is now {}", m.name, status.display_name()),
                        )),
                        Err(e) => rejected(e),
                    }
                }
            },
        }
    }
}

impl Default for TeamScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl View for TeamScreen {
    fn handle_key(&mut self, key: KeyEvent, _devices: &mut Devices) -> Outcome {
        if let Some(modal) = self.modal.take() {
            return self.handle_modal(modal, key);
        }

        let visible = self.visible();
        if self.view.handle_key(key, visible.len()) {
            return Outcome::None;
        }

        match key.code {
            KeyCode::Char('o') => {
                self.role = self.role.next();
                self.view.clamp(self.visible().len());
            }
            KeyCode::Char('n') => {
                self.modal = Some(Modal::Add(
                    Form::new("Add Team Member")
                        .text("Name", "")
                        .text("Role", "")
                        .text("Skills (comma separated)", ""),
                ));
            }
            KeyCode::Char('a') => {
                if let Some(m) = self.view.selected(&visible) {
                    let form = Form::new(format!("Assign {}", m.name)).choice(
                        "Status",
                        &Self::status_options(),
                        m.status.label(),
                    );
                    self.modal = Some(Modal::Assign {
                        id: m.id.clone(),
                        form,
                    });
                }
            }
            KeyCode::Enter => {
                if let Some(m) = self.view.selected(&visible) {
                    let body = detail_lines(&[
                        ("Role", m.role.clone()),
                        ("Status", m.status.display_name().to_string()),
                        ("Skills", m.skills_line()),
                    ]);
                    return Outcome::Notice(Notice::info(format!("{} Details", m.name), body));
                }
            }
            _ => {}
        }
        Outcome::None
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let visible = self.visible();
        let title = format!("Team ({})", self.role.label());
        self.view.render(frame, area, theme, &title, &visible, |m| {
            Line::from(vec![
                Span::styled(format!("{:<20}", m.name), Style::default().bold()),
                Span::raw(format!("{:<18}", m.role)),
                Span::styled(format!("{:<10}", m.status.display_name()), styles::team_style(m.status)),
                Span::styled(m.skills_line(), styles::muted(theme)),
            ])
        });
        match &self.modal {
            Some(Modal::Add(form)) | Some(Modal::Assign { form, .. }) => {
                form.render(frame, area, theme)
            }
            None => {}
        }
    }

    fn hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.modal.is_some() {
            return vec![("←/→", "choose"), ("Enter", "save"), ("Esc", "cancel")];
        }
        let mut hints = self.view.hints();
        hints.extend([("o", "role"), ("a", "assign"), ("n", "add"), ("Enter", "details")]);
        hints
    }

    fn is_input_mode(&self) -> bool {
        self.modal.is_some() || self.view.is_searching()
    }

    fn is_idle(&self) -> bool {
        !self.is_input_mode()
    }
}
