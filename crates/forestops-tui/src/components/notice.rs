use forestops_core::theme::{accents, Theme};
use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph, Wrap};

use super::styles::{self, centered_rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A message for the user. Blocking notices pop up and take the next key;
/// the rest show once in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
    pub level: NoticeLevel,
    pub blocking: bool,
}

impl Notice {
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            level: NoticeLevel::Info,
            blocking: true,
        }
    }

    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            ..Self::info(title, body)
        }
    }

    /// Validation failure: blocking, the form underneath stays open.
    pub fn invalid(body: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            ..Self::info("Invalid Input", body)
        }
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            ..Self::info(title, body)
        }
    }

    /// Status-bar only; never interrupts.
    pub fn warning(body: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            body: body.into(),
            level: NoticeLevel::Warning,
            blocking: false,
        }
    }

    pub fn status(body: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            ..Self::warning(body)
        }
    }

    pub fn style(&self) -> Style {
        let rgb = match self.level {
            NoticeLevel::Info => return Style::default().fg(Color::Cyan),
            NoticeLevel::Success => accents::DONE,
            NoticeLevel::Warning => accents::PENDING,
            NoticeLevel::Error => accents::ALERT,
        };
        Style::default().fg(styles::color(rgb))
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let popup = centered_rect(50, 30, area);
        frame.render_widget(Clear, popup);

        let block = styles::popup(format!(" {} ", self.title), theme).border_style(self.style());
        let mut text: Vec<Line> = self.body.lines().map(Line::from).collect();
        text.push(Line::default());
        text.push(Line::styled("(any key) dismiss", styles::muted(theme)));

        let paragraph = Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: false })
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, popup);
    }
}
