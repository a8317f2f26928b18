use crossterm::event::{KeyCode, KeyEvent};
use forestops_core::theme::Theme;
use forestops_core::validate::format_date;
use forestops_core::work_order::{NewWorkOrder, WorkOrderSort};
use forestops_core::{seed, WorkOrder};
use forestops_service::EntityList;
use ratatui::prelude::*;

use super::{parse_priority, priority_options, rejected, Devices, Outcome, View};
use crate::components::form::{Form, FormEvent};
use crate::components::list_view::ListView;
use crate::components::notice::Notice;
use crate::components::styles;

pub struct WorkOrdersScreen {
    orders: EntityList<WorkOrder>,
    view: ListView<WorkOrder>,
    adding: Option<Form>,
}

impl WorkOrdersScreen {
    pub fn new() -> Self {
        Self {
            orders: EntityList::seeded("work order", seed::work_orders()),
            view: ListView::new(Some(WorkOrderSort::DueDate)),
            adding: None,
        }
    }

    fn add_form() -> Form {
        Form::new("New Work Order")
            .text("Title", "")
            .text("Due Date (YYYY-MM-DD)", "")
            .choice("Priority", &priority_options(), "Medium")
            .text("Assigned To", "")
    }

    fn visible(&self) -> Vec<WorkOrder> {
        self.orders.list(&self.view.query)
    }

    fn submit(&mut self, form: &Form) -> Outcome {
        let draft = NewWorkOrder {
            title: form.value("Title").to_string(),
            due_date: form.value("Due Date (YYYY-MM-DD)").to_string(),
            priority: parse_priority(form.value("Priority")),
            assigned_to: form.value("Assigned To").to_string(),
        };
        match self.orders.add(draft) {
            Ok(order) => {
                self.adding = None;
                Outcome::Notice(Notice::status(format!("Work order \"{}\" added", order.title)))
            }
            Err(e) => rejected(e),
        }
    }
}

impl Default for WorkOrdersScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl View for WorkOrdersScreen {
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
                self.adding = Some(Self::add_form());
                Outcome::None
            }
            KeyCode::Char('c') => {
                if let Some(id) = self.view.selected_id(&visible) {
                    self.orders.cycle_status(&id);
                }
                Outcome::None
            }
            KeyCode::Enter => match self.view.selected(&visible) {
                Some(order) => {
                    let body = serde_json::to_string_pretty(order)
                        .unwrap_or_else(|e| format!("unrenderable: {e}"));
                    Outcome::Notice(Notice::info("Work Order Details", body))
                }
                None => Outcome::None,
            },
            _ => Outcome::None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let visible = self.visible();
        self.view.render(frame, area, theme, "Work Orders", &visible, |o| {
            Line::from(vec![
                Span::styled(format!("{} ", o.priority.symbol()), styles::priority_style(o.priority)),
                Span::styled(format!("{:<28}", o.title), Style::default().bold()),
                Span::styled(format!("{:<12}", o.status.display_name()), styles::progress_style(o.status)),
                Span::raw(format!(" due {}  ", format_date(o.due_date))),
                Span::styled(o.assigned_to.clone(), styles::muted(theme)),
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
        hints.extend([("n", "new"), ("c", "cycle status"), ("Enter", "details")]);
        hints
    }

    fn is_input_mode(&self) -> bool {
        self.adding.is_some() || self.view.is_searching()
    }

    fn is_idle(&self) -> bool {
        !self.is_input_mode()
    }
}
