use forestops_core::inspection::InspectionStatus;
use forestops_core::team::TeamStatus;
use forestops_core::theme::{accents, Rgb, Theme};
use forestops_core::user::AccountStatus;
use forestops_core::{Priority, Progress};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders};

pub fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn fg(rgb: Rgb) -> Style {
    Style::default().fg(color(rgb))
}

pub fn priority_style(p: Priority) -> Style {
    match p {
        Priority::High => fg(accents::HIGH).bold(),
        Priority::Medium => fg(accents::MEDIUM),
        Priority::Low => fg(accents::LOW),
    }
}

pub fn progress_style(p: Progress) -> Style {
    match p {
        Progress::Pending => fg(accents::PENDING),
        Progress::InProgress => fg(accents::ACTIVE),
        Progress::Completed => fg(accents::DONE),
    }
}

pub fn inspection_style(s: InspectionStatus) -> Style {
    match s {
        InspectionStatus::Scheduled => fg(accents::PENDING),
        InspectionStatus::InProgress => fg(accents::ACTIVE),
        InspectionStatus::Completed => fg(accents::DONE),
    }
}

pub fn team_style(s: TeamStatus) -> Style {
    match s {
        TeamStatus::Available => fg(accents::DONE),
        TeamStatus::OnTask => fg(accents::PENDING),
        TeamStatus::OnLeave => fg(accents::ALERT),
    }
}

pub fn account_style(s: AccountStatus) -> Style {
    match s {
        AccountStatus::Active => fg(accents::DONE),
        AccountStatus::Inactive => fg(accents::ALERT),
    }
}

pub fn muted(theme: &Theme) -> Style {
    fg(theme.palette.muted)
}

pub fn highlight(theme: &Theme) -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(color(theme.palette.accent))
        .bold()
}

/// Bordered block in the theme's primary colour.
pub fn panel<'a>(title: impl Into<Line<'a>>, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(fg(theme.palette.primary))
}

pub fn popup<'a>(title: impl Into<Line<'a>>, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(fg(theme.palette.accent).bold())
}

/// Key hints rendered as " key desc " pairs.
pub fn hint_line(hints: &[(&str, &str)]) -> Line<'static> {
    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, desc)| {
            vec![
                Span::styled(format!(" {key}"), Style::default().fg(Color::Yellow).bold()),
                Span::raw(format!(" {desc} ")),
            ]
        })
        .collect();
    Line::from(spans)
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
