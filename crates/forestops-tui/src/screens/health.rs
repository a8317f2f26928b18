use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use forestops_core::health::HealthMonitor;
use forestops_core::theme::{accents, Theme};
use ratatui::prelude::*;
use ratatui::widgets::{Gauge, Paragraph, Sparkline};
use tracing::debug;

use super::{Devices, Outcome, View};
use crate::components::styles;
use crate::timer::Interval;

pub struct HealthScreen {
    monitor: HealthMonitor,
    refresh: Interval,
}

impl HealthScreen {
    pub fn new(period: Duration, now: Instant) -> Self {
        let mut monitor = HealthMonitor::new();
        monitor.sample(&mut rand::thread_rng());
        Self {
            monitor,
            refresh: Interval::new(period, now),
        }
    }

    fn sample(&mut self) {
        self.monitor.sample(&mut rand::thread_rng());
        debug!(
            disk = self.monitor.disk.percent(),
            users = self.monitor.active_users,
            "health sampled"
        );
    }
}

impl View for HealthScreen {
    fn handle_key(&mut self, key: KeyEvent, _devices: &mut Devices) -> Outcome {
        if key.code == KeyCode::Char('r') {
            self.sample();
        }
        Outcome::None
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(5),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(area);

        let status_color = if self.monitor.operational {
            accents::DONE
        } else {
            accents::ALERT
        };
        let summary = vec![
            Line::from(vec![
                Span::raw("System Status: "),
                Span::styled(
                    self.monitor.status_label(),
                    Style::default().fg(styles::color(status_color)).bold(),
                ),
            ]),
            Line::from(format!("Active Users: {}", self.monitor.active_users)),
        ];
        frame.render_widget(
            Paragraph::new(summary).block(styles::panel(" System Health ", theme)),
            rows[0],
        );

        let cpu = self.monitor.cpu();
        let memory = self.monitor.memory();
        let latest = |series: &[u64]| series.last().copied().unwrap_or(0);
        frame.render_widget(
            Sparkline::default()
                .block(styles::panel(format!(" CPU Usage ({}%) ", latest(&cpu)), theme))
                .data(&cpu)
                .max(100)
                .style(Style::default().fg(styles::color(theme.palette.primary))),
            rows[1],
        );
        frame.render_widget(
            Sparkline::default()
                .block(styles::panel(format!(" Memory Usage ({}%) ", latest(&memory)), theme))
                .data(&memory)
                .max(100)
                .style(Style::default().fg(styles::color(theme.palette.accent))),
            rows[2],
        );

        let disk = self.monitor.disk;
        frame.render_widget(
            Gauge::default()
                .block(styles::panel(" Disk Usage ", theme))
                .gauge_style(Style::default().fg(styles::color(theme.palette.primary)))
                .percent(disk.percent())
                .label(format!("{}% used", disk.percent())),
            rows[3],
        );
    }

    fn hints(&self) -> Vec<(&'static str, &'static str)> {
        vec![("r", "refresh")]
    }

    fn next_deadline(&self) -> Option<Instant> {
        Some(self.refresh.deadline())
    }

    fn tick(&mut self, now: Instant) -> Outcome {
        if self.refresh.fire(now) {
            self.sample();
        }
        Outcome::None
    }
}

#[cfg(test)]
mod tests {
    use forestops_core::health::WINDOW;

    use super::*;
    use crate::screens::testing::{char_key, devices};

    #[test]
    fn samples_on_timer_and_on_demand() {
        let t0 = Instant::now();
        let mut s = HealthScreen::new(Duration::from_secs(5), t0);
        assert_eq!(s.monitor.cpu().len(), 1);
        s.tick(t0 + Duration::from_secs(1));
        assert_eq!(s.monitor.cpu().len(), 1);
        s.tick(t0 + Duration::from_secs(5));
        assert_eq!(s.monitor.cpu().len(), 2);
        let mut dev = devices();
        s.handle_key(char_key('r'), &mut dev);
        assert_eq!(s.monitor.memory().len(), 3);
    }

    #[test]
    fn series_window_is_bounded() {
        let t0 = Instant::now();
        let mut s = HealthScreen::new(Duration::from_secs(5), t0);
        let mut dev = devices();
        for _ in 0..30 {
            s.handle_key(char_key('r'), &mut dev);
        }
        assert_eq!(s.monitor.cpu().len(), WINDOW);
    }
}
