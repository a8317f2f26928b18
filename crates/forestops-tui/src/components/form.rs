use crossterm::event::{KeyCode, KeyEvent};
use forestops_core::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

use super::styles::{self, centered_rect};

#[derive(Debug, Clone, PartialEq, Eq)]
enum FieldKind {
    Text,
    Secret,
    Choice(Vec<&'static str>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Field {
    label: &'static str,
    value: String,
    kind: FieldKind,
}

/// What a key did to a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    Editing,
    Submit,
    Cancel,
}

/// A modal of labelled fields. Text fields take typed characters, choice
/// fields cycle with Left/Right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    title: String,
    fields: Vec<Field>,
    focus: usize,
}

impl Form {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
            focus: 0,
        }
    }

    pub fn text(mut self, label: &'static str, initial: impl Into<String>) -> Self {
        self.fields.push(Field {
            label,
            value: initial.into(),
            kind: FieldKind::Text,
        });
        self
    }

    pub fn secret(mut self, label: &'static str) -> Self {
        self.fields.push(Field {
            label,
            value: String::new(),
            kind: FieldKind::Secret,
        });
        self
    }

    pub fn choice(mut self, label: &'static str, options: &[&'static str], selected: &str) -> Self {
        let value = options
            .iter()
            .find(|o| **o == selected)
            .or(options.first())
            .map(|o| o.to_string())
            .unwrap_or_default();
        self.fields.push(Field {
            label,
            value,
            kind: FieldKind::Choice(options.to_vec()),
        });
        self
    }

    pub fn value(&self, label: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
            .unwrap_or("")
    }

    pub fn set(&mut self, label: &str, value: impl Into<String>) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.label == label) {
            field.value = value.into();
        }
    }

    pub fn focused_label(&self) -> Option<&'static str> {
        self.fields.get(self.focus).map(|f| f.label)
    }

    pub fn clear(&mut self) {
        for field in &mut self.fields {
            if !matches!(field.kind, FieldKind::Choice(_)) {
                field.value.clear();
            }
        }
        self.focus = 0;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormEvent {
        let count = self.fields.len();
        match key.code {
            KeyCode::Esc => return FormEvent::Cancel,
            KeyCode::Enter => return FormEvent::Submit,
            KeyCode::Tab | KeyCode::Down if count > 0 => {
                self.focus = (self.focus + 1) % count;
            }
            KeyCode::BackTab | KeyCode::Up if count > 0 => {
                self.focus = (self.focus + count - 1) % count;
            }
            KeyCode::Left | KeyCode::Right => {
                let forward = key.code == KeyCode::Right;
                if let Some(field) = self.fields.get_mut(self.focus) {
                    if let FieldKind::Choice(options) = &field.kind {
                        let idx = options.iter().position(|o| *o == field.value).unwrap_or(0);
                        let n = options.len();
                        if n > 0 {
                            let next = if forward { (idx + 1) % n } else { (idx + n - 1) % n };
                            field.value = options[next].to_string();
                        }
                    }
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    if !matches!(field.kind, FieldKind::Choice(_)) {
                        field.value.pop();
                    }
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    if !matches!(field.kind, FieldKind::Choice(_)) {
                        field.value.push(c);
                    }
                }
            }
            _ => {}
        }
        FormEvent::Editing
    }

    fn lines(&self, theme: &Theme) -> Vec<Line<'_>> {
        let mut lines = Vec::new();
        for (i, field) in self.fields.iter().enumerate() {
            let focused = i == self.focus;
            let marker = if focused { "> " } else { "  " };
            let shown = match &field.kind {
                FieldKind::Text => field.value.clone(),
                FieldKind::Secret => "*".repeat(field.value.chars().count()),
                FieldKind::Choice(_) => format!("< {} >", field.value),
            };
            let cursor = if focused && !matches!(field.kind, FieldKind::Choice(_)) {
                "_"
            } else {
                ""
            };
            let label_style = if focused {
                Style::default().fg(styles::color(theme.palette.accent)).bold()
            } else {
                Style::default().bold()
            };
            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(format!("{}: ", field.label), label_style),
                Span::raw(shown),
                Span::raw(cursor),
            ]));
        }
        lines.push(Line::default());
        lines.push(Line::styled(
            "Tab next  ←/→ choose  Enter save  Esc cancel",
            styles::muted(theme),
        ));
        lines
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let height = ((self.fields.len() as u16 + 4) * 100 / area.height.max(1)).clamp(20, 90);
        let popup = centered_rect(60, height, area);
        frame.render_widget(Clear, popup);
        let block = styles::popup(format!(" {} ", self.title), theme);
        frame.render_widget(Paragraph::new(self.lines(theme)).block(block), popup);
    }

    /// Draw inline (no popup), e.g. as the body of a screen.
    pub fn render_inline(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = styles::panel(format!(" {} ", self.title), theme);
        frame.render_widget(Paragraph::new(self.lines(theme)).block(block), area);
    }
}
