use crossterm::event::{KeyCode, KeyEvent};
use forestops_core::dashboard::{
    Dashboard, AI_INSIGHT, QUICK_LINKS, TEAM_STATUS, WEATHER_FORECAST, WORK_ORDER_OVERVIEW,
};
use forestops_core::theme::{accents, Theme};
use ratatui::prelude::*;
use ratatui::widgets::{Bar, BarChart, BarGroup, List, ListItem, ListState, Paragraph};

use super::{Devices, Outcome, View};
use crate::components::notice::Notice;
use crate::components::styles;

/// Manager landing page: summary charts, notifications and shortcuts.
pub struct DashboardScreen {
    dashboard: Dashboard,
    link: usize,
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self {
            dashboard: Dashboard::default(),
            link: 0,
        }
    }

    fn chart<'a>(title: &'a str, data: &[(&'a str, u64)], theme: &Theme) -> BarChart<'a> {
        let bars: Vec<Bar> = data
            .iter()
            .map(|(label, value)| {
                Bar::default()
                    .label(Line::from(*label))
                    .value(*value)
                    .text_value(format!("{value}%"))
            })
            .collect();
        BarChart::default()
            .block(styles::panel(format!(" {title} "), theme))
            .data(BarGroup::default().bars(&bars))
            .bar_width(12)
            .bar_gap(2)
            .bar_style(Style::default().fg(styles::color(theme.palette.primary)))
            .value_style(Style::default().fg(Color::Black).bg(styles::color(theme.palette.primary)))
    }
}

impl Default for DashboardScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl View for DashboardScreen {
    fn handle_key(&mut self, key: KeyEvent, _devices: &mut Devices) -> Outcome {
        match key.code {
            KeyCode::Char('n') => {
                let body = self.dashboard.read_notifications();
                Outcome::Notice(Notice::info("Notifications", body))
            }
            KeyCode::Char('i') => Outcome::Notice(Notice::info("AI Insight", AI_INSIGHT)),
            KeyCode::Char('w') => Outcome::Notice(Notice::info("Weather Forecast", WEATHER_FORECAST)),
            KeyCode::Char('j') | KeyCode::Down => {
                self.link = (self.link + 1).min(QUICK_LINKS.len().saturating_sub(1));
                Outcome::None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.link = self.link.saturating_sub(1);
                Outcome::None
            }
            KeyCode::Enter => match QUICK_LINKS.get(self.link) {
                Some(route) => Outcome::Navigate(*route),
                None => Outcome::None,
            },
            _ => Outcome::None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Min(0)])
            .split(area);
        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(rows[0]);
        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        frame.render_widget(
            Self::chart("Work Order Overview", WORK_ORDER_OVERVIEW, theme),
            top[0],
        );
        frame.render_widget(Self::chart("Team Status", TEAM_STATUS, theme), top[1]);

        let unread = self.dashboard.unread();
        let badge = if unread > 0 {
            Span::styled(
                format!(" {unread} new "),
                Style::default()
                    .fg(Color::White)
                    .bg(styles::color(accents::ALERT))
                    .bold(),
            )
        } else {
            Span::styled(" no new notifications", styles::muted(theme))
        };
        let info = vec![
            Line::from(vec![Span::raw("Notifications:"), badge]),
            Line::default(),
            Line::from("AI insight and weather forecast are one key away."),
        ];
        frame.render_widget(
            Paragraph::new(info).block(styles::panel(" Updates ", theme)),
            bottom[0],
        );

        let items: Vec<ListItem> = QUICK_LINKS
            .iter()
            .map(|route| ListItem::new(route.display_name()))
            .collect();
        let mut state = ListState::default();
        state.select(Some(self.link));
        frame.render_stateful_widget(
            List::new(items)
                .block(styles::panel(" Quick Links ", theme))
                .highlight_style(styles::highlight(theme))
                .highlight_symbol("> "),
            bottom[1],
            &mut state,
        );
    }

    fn hints(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            ("n", "notifications"),
            ("i", "AI insight"),
            ("w", "weather"),
            ("j/k", "links"),
            ("Enter", "open"),
        ]
    }
}
