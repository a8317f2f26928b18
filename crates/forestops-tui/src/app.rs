use std::collections::VecDeque;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use forestops_core::theme::accents;
use forestops_core::{Gate, Route};
use ratatui::prelude::*;
use ratatui::widgets::{Clear, List, ListItem, ListState, Paragraph};
use tracing::{info, warn};

use crate::components::form::{Form, FormEvent};
use crate::components::notice::Notice;
use crate::components::styles::{self, centered_rect};
use crate::config::Config;
use crate::screens::{Devices, Outcome, Screen, Timing};

const USERNAME: &str = "Username";
const PASSWORD: &str = "Password";

/// What the app is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// No session; the login form has focus
    Login,
    /// A screen has focus
    Normal,
    /// Picking one of the role's routes
    RouteMenu { selected: usize },
}

pub struct App {
    gate: Gate,
    mode: Mode,
    login: Form,
    login_error: Option<String>,
    /// Mounted screens, parallel to the gate's navigation stack.
    screens: Vec<Screen>,
    /// Blocking popup; the next key dismisses it.
    notice: Option<Notice>,
    /// Blocking notices waiting behind the open one.
    queued: VecDeque<Notice>,
    /// One-shot status bar message, cleared by the next key.
    status_message: Option<Notice>,
    devices: Devices,
    timing: Timing,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self::with_devices(config.devices(), config.timing())
    }

    pub fn with_devices(devices: Devices, timing: Timing) -> Self {
        Self {
            gate: Gate::new(),
            mode: Mode::Login,
            login: Self::login_form(),
            login_error: None,
            screens: Vec::new(),
            notice: None,
            queued: VecDeque::new(),
            status_message: None,
            devices,
            timing,
        }
    }

    fn login_form() -> Form {
        Form::new("Sign In").text(USERNAME, "").secret(PASSWORD)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    pub fn current_route(&self) -> Option<Route> {
        self.screens.last().map(Screen::route)
    }

    pub fn current_screen(&self) -> Option<&Screen> {
        self.screens.last()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn status_message(&self) -> Option<&Notice> {
        self.status_message.as_ref()
    }

    pub fn login_error(&self) -> Option<&str> {
        self.login_error.as_deref()
    }

    /// Plain letters are being typed somewhere, so `q` must not quit.
    pub fn is_input_mode(&self) -> bool {
        if self.notice.is_some() {
            return true;
        }
        match self.mode {
            Mode::Login => true,
            Mode::RouteMenu { .. } => false,
            Mode::Normal => self
                .screens
                .last()
                .is_some_and(|s| s.view().is_input_mode()),
        }
    }

    /// When the current screen next wants a tick. Screens below the top of
    /// the stack are paused.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.screens.last().and_then(|s| s.view().next_deadline())
    }

    pub fn tick(&mut self, now: Instant) {
        let outcome = match self.screens.last_mut() {
            Some(screen) => screen.view_mut().tick(now),
            None => return,
        };
        self.apply(outcome);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.notice.take().is_some() {
            self.notice = self.queued.pop_front();
            return;
        }
        self.status_message = None;

        match self.mode {
            Mode::Login => self.handle_login(key),
            Mode::RouteMenu { selected } => self.handle_route_menu(key, selected),
            Mode::Normal => self.handle_normal(key),
        }
    }

    fn handle_login(&mut self, key: KeyEvent) {
        match self.login.handle_key(key) {
            FormEvent::Editing => {}
            FormEvent::Cancel => {
                self.login.clear();
                self.login_error = None;
            }
            FormEvent::Submit => {
                let username = self.login.value(USERNAME).trim().to_string();
                let password = self.login.value(PASSWORD).to_string();
                match self.gate.login(&username, &password) {
                    Ok(entry) => {
                        info!(%username, route = entry.as_str(), "signed in");
                        self.login = Self::login_form();
                        self.login_error = None;
                        self.screens.clear();
                        self.mount(entry);
                        self.mode = Mode::Normal;
                    }
                    Err(e) => {
                        warn!(%username, "sign-in rejected");
                        self.login.set(PASSWORD, "");
                        self.login_error = Some(e.to_string());
                    }
                }
            }
        }
    }

    fn handle_route_menu(&mut self, key: KeyEvent, selected: usize) {
        let routes = self.gate.reachable();
        match key.code {
            KeyCode::Esc | KeyCode::Char('M') => self.mode = Mode::Normal,
            KeyCode::Char('j') | KeyCode::Down => {
                let next = (selected + 1).min(routes.len().saturating_sub(1));
                self.mode = Mode::RouteMenu { selected: next };
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.mode = Mode::RouteMenu {
                    selected: selected.saturating_sub(1),
                };
            }
            KeyCode::Enter => {
                self.mode = Mode::Normal;
                if let Some(route) = routes.get(selected) {
                    self.navigate(*route);
                }
            }
            _ => {}
        }
    }

    fn handle_normal(&mut self, key: KeyEvent) {
        let Some(screen) = self.screens.last_mut() else {
            return;
        };
        if screen.view().is_idle() {
            match key.code {
                KeyCode::Char('M') => {
                    let current = screen.route();
                    let selected = self
                        .gate
                        .reachable()
                        .iter()
                        .position(|r| *r == current)
                        .unwrap_or(0);
                    self.mode = Mode::RouteMenu { selected };
                    return;
                }
                KeyCode::Char('L') => {
                    self.logout();
                    return;
                }
                KeyCode::Esc => {
                    self.back();
                    return;
                }
                _ => {}
            }
        }
        let outcome = screen.view_mut().handle_key(key, &mut self.devices);
        self.apply(outcome);
    }

    fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::None => {}
            Outcome::Notice(n) => self.show(n),
            Outcome::Navigate(route) => self.navigate(route),
            Outcome::Back => self.back(),
        }
    }

    fn show(&mut self, notice: Notice) {
        if notice.blocking {
            if self.notice.is_some() {
                self.queued.push_back(notice);
            } else {
                self.notice = Some(notice);
            }
        } else {
            self.status_message = Some(notice);
        }
    }

    fn mount(&mut self, route: Route) {
        let (screen, notice) =
            Screen::mount(route, Instant::now(), &self.timing, &mut self.devices);
        self.screens.push(screen);
        if let Some(n) = notice {
            self.show(n);
        }
    }

    /// Open a route. A route already on the stack is returned to rather
    /// than opened a second time.
    fn navigate(&mut self, route: Route) {
        if self.gate.current() == Some(route) {
            return;
        }
        if self.gate.stack().contains(&route) {
            while self.gate.current() != Some(route) && self.gate.back().is_some() {
                self.screens.pop();
            }
            info!(route = route.as_str(), "returned to route");
            return;
        }
        match self.gate.navigate(route) {
            Ok(()) => {
                info!(route = route.as_str(), "navigated");
                self.mount(route);
            }
            Err(e) => {
                warn!(route = route.as_str(), error = %e, "navigation refused");
                self.show(Notice::warning(e.to_string()));
            }
        }
    }

    fn back(&mut self) {
        if let Some(route) = self.gate.back() {
            self.screens.pop();
            info!(from = route.as_str(), "back");
        }
    }

    fn logout(&mut self) {
        if let Some(session) = self.gate.session() {
            info!(username = %session.username, "signed out");
        }
        self.gate.logout();
        self.screens.clear();
        self.notice = None;
        self.queued.clear();
        self.login = Self::login_form();
        self.login_error = None;
        self.mode = Mode::Login;
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_title_bar(frame, layout[0]);
        let theme = self.gate.theme();
        match (self.mode, self.screens.last()) {
            (Mode::Login, _) | (_, None) => self.render_login(frame, layout[1]),
            (_, Some(screen)) => screen.view().render(frame, layout[1], theme),
        }
        self.render_status_bar(frame, layout[2]);

        // Overlays
        if let Mode::RouteMenu { selected } = self.mode {
            self.render_route_menu(frame, selected, area);
        }
        if let Some(notice) = &self.notice {
            notice.render(frame, area, theme);
        }
    }

    fn render_title_bar(&self, frame: &mut Frame, area: Rect) {
        let theme = self.gate.theme();
        let bar = Style::default()
            .fg(styles::color(theme.palette.text))
            .bg(styles::color(theme.palette.primary));
        let mut spans = vec![Span::styled(" forestops ", bar.bold())];
        if let Some(route) = self.current_route() {
            spans.push(Span::styled(format!("| {} ", route.display_name()), bar));
        }
        if let Some(session) = self.gate.session() {
            spans.push(Span::styled(
                format!("| {} ({}) ", session.username, session.role.display_name()),
                bar.fg(styles::color(theme.palette.accent)),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)).style(bar), area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        if let Some(msg) = &self.status_message {
            let line = Line::from(Span::styled(format!(" {}", msg.body), msg.style()));
            frame.render_widget(line, area);
            return;
        }

        let mut hints: Vec<(&str, &str)> = match (self.mode, self.screens.last()) {
            (Mode::Login, _) | (_, None) => {
                vec![("Tab", "next field"), ("Enter", "sign in"), ("Esc", "clear")]
            }
            (Mode::RouteMenu { .. }, _) => {
                vec![("j/k", "move"), ("Enter", "open"), ("Esc", "close")]
            }
            (Mode::Normal, Some(screen)) => {
                let mut hints = screen.view().hints();
                if screen.view().is_idle() {
                    hints.push(("M", "menu"));
                    if self.gate.stack().len() > 1 {
                        hints.push(("Esc", "back"));
                    }
                    hints.push(("L", "logout"));
                }
                hints
            }
        };
        if !self.is_input_mode() {
            hints.push(("q", "quit"));
        }
        frame.render_widget(styles::hint_line(&hints), area);
    }

    fn render_login(&self, frame: &mut Frame, area: Rect) {
        let theme = self.gate.theme();
        let popup = centered_rect(50, 50, area);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(6), Constraint::Length(2)])
            .split(popup);

        frame.render_widget(
            Paragraph::new(Line::styled(
                "Forestry Operations",
                Style::default()
                    .fg(styles::color(theme.palette.primary))
                    .bold(),
            ))
            .alignment(Alignment::Center),
            chunks[0],
        );
        self.login.render_inline(frame, chunks[1], theme);
        if let Some(err) = &self.login_error {
            frame.render_widget(
                Paragraph::new(Line::styled(
                    err.as_str(),
                    Style::default().fg(styles::color(accents::ALERT)),
                ))
                .alignment(Alignment::Center),
                chunks[2],
            );
        }
    }

    fn render_route_menu(&self, frame: &mut Frame, selected: usize, area: Rect) {
        let theme = self.gate.theme();
        let routes = self.gate.reachable();
        let popup = centered_rect(40, 40, area);
        frame.render_widget(Clear, popup);

        let current = self.current_route();
        let items: Vec<ListItem> = routes
            .iter()
            .map(|r| {
                let marker = if Some(*r) == current { "● " } else { "  " };
                ListItem::new(format!("{marker}{}", r.display_name()))
            })
            .collect();
        let mut state = ListState::default();
        state.select(Some(selected));
        frame.render_stateful_widget(
            List::new(items)
                .block(styles::popup(" Go To ", theme))
                .highlight_style(styles::highlight(theme))
                .highlight_symbol("> "),
            popup,
            &mut state,
        );
    }
}
