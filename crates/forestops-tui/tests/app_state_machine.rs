//! State machine tests for the TUI App.
//!
//! Each test builds an App over simulated devices and drives it with key
//! events, checking mode, session and navigation transitions.

use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use forestops_core::map::LOCATION_DENIED;
use forestops_core::theme::ThemeName;
use forestops_core::validate::FILL_ALL_FIELDS;
use forestops_core::{Role, Route};
use forestops_tui::app::{App, Mode};
use forestops_tui::config::Config;
use forestops_tui::screens::{Timing, View};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn char_key(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

fn type_str(app: &mut App, s: &str) {
    for c in s.chars() {
        app.handle_key(char_key(c));
    }
}

fn make_app() -> App {
    App::with_devices(Config::default().devices(), Timing::default())
}

fn login(app: &mut App, username: &str, password: &str) {
    type_str(app, username);
    app.handle_key(key(KeyCode::Tab));
    type_str(app, password);
    app.handle_key(key(KeyCode::Enter));
}

fn signed_in(username: &str) -> App {
    let mut app = make_app();
    login(&mut app, username, "password");
    assert!(matches!(app.mode(), Mode::Normal), "{username} did not sign in");
    app
}

/// Open the route menu and pick `route` from it.
fn go_to(app: &mut App, route: Route) {
    app.handle_key(char_key('M'));
    let routes = app.gate().reachable();
    let target = routes.iter().position(|r| *r == route).unwrap();
    let Mode::RouteMenu { selected } = app.mode() else {
        panic!("route menu did not open");
    };
    for _ in selected..target {
        app.handle_key(char_key('j'));
    }
    for _ in target..selected {
        app.handle_key(char_key('k'));
    }
    app.handle_key(key(KeyCode::Enter));
}

fn render(app: &App) {
    let backend = TestBackend::new(120, 40);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();
}

// ---- Session ----

#[test]
fn app_starts_at_login() {
    let app = make_app();
    assert!(matches!(app.mode(), Mode::Login));
    assert!(!app.gate().is_signed_in());
    assert!(app.current_route().is_none());
    assert!(app.is_input_mode());
}

#[test]
fn wrong_password_stays_on_login() {
    let mut app = make_app();
    login(&mut app, "manager", "hunter2");
    assert!(matches!(app.mode(), Mode::Login));
    assert!(!app.gate().is_signed_in());
    assert_eq!(app.login_error(), Some("Invalid credentials"));
}

#[test]
fn unknown_user_is_rejected_with_same_message() {
    let mut app = make_app();
    login(&mut app, "ranger", "password");
    assert_eq!(app.login_error(), Some("Invalid credentials"));
}

#[test]
fn each_persona_lands_on_its_entry_route() {
    let cases = [
        ("manager", Role::Manager, Route::Dashboard),
        ("operative", Role::FieldOperative, Route::TaskList),
        ("gis", Role::GisSpecialist, Route::InteractiveMap),
        ("emergency", Role::EmergencyCoordinator, Route::EmergencyTasks),
        ("admin", Role::Administrator, Route::DataManagement),
    ];
    for (user, role, entry) in cases {
        let app = signed_in(user);
        assert_eq!(app.gate().role(), Some(role));
        assert_eq!(app.current_route(), Some(entry));
        assert_eq!(app.gate().stack(), &[entry]);
    }
}

#[test]
fn login_applies_role_theme() {
    assert_eq!(signed_in("manager").gate().theme().name, ThemeName::Forestry);
    assert_eq!(signed_in("emergency").gate().theme().name, ThemeName::Emergency);
    assert_eq!(signed_in("admin").gate().theme().name, ThemeName::Admin);
}

#[test]
fn logout_returns_to_login_and_resets_theme() {
    let mut app = signed_in("admin");
    app.handle_key(char_key('L'));
    assert!(matches!(app.mode(), Mode::Login));
    assert!(!app.gate().is_signed_in());
    assert!(app.gate().stack().is_empty());
    assert!(app.current_route().is_none());
    assert_eq!(app.gate().theme().name, ThemeName::Forestry);

    // Signing in again starts fresh
    login(&mut app, "emergency", "password");
    assert_eq!(app.current_route(), Some(Route::EmergencyTasks));
}

// ---- Navigation ----

#[test]
fn route_menu_opens_and_closes() {
    let mut app = signed_in("manager");
    app.handle_key(char_key('M'));
    assert!(matches!(app.mode(), Mode::RouteMenu { selected: 0 }));
    app.handle_key(char_key('j'));
    assert!(matches!(app.mode(), Mode::RouteMenu { selected: 1 }));
    app.handle_key(key(KeyCode::Esc));
    assert!(matches!(app.mode(), Mode::Normal));
    assert_eq!(app.current_route(), Some(Route::Dashboard));
}

#[test]
fn route_menu_selection_is_bounded() {
    let mut app = signed_in("gis");
    app.handle_key(char_key('M'));
    app.handle_key(char_key('j'));
    app.handle_key(char_key('j'));
    assert!(matches!(app.mode(), Mode::RouteMenu { selected: 0 }));
    app.handle_key(char_key('k'));
    assert!(matches!(app.mode(), Mode::RouteMenu { selected: 0 }));
}

#[test]
fn navigate_and_back() {
    let mut app = signed_in("manager");
    go_to(&mut app, Route::TeamAssignment);
    assert!(matches!(app.mode(), Mode::Normal));
    assert_eq!(app.current_route(), Some(Route::TeamAssignment));
    assert_eq!(app.gate().stack(), &[Route::Dashboard, Route::TeamAssignment]);

    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.current_route(), Some(Route::Dashboard));
    assert_eq!(app.gate().stack(), &[Route::Dashboard]);
}

#[test]
fn back_on_entry_route_stays() {
    let mut app = signed_in("operative");
    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.current_route(), Some(Route::TaskList));
    assert!(app.gate().is_signed_in());
}

#[test]
fn dashboard_quick_link_opens_work_orders() {
    let mut app = signed_in("manager");
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.current_route(), Some(Route::WorkOrders));
}

#[test]
fn reopening_current_route_is_a_no_op() {
    let mut app = signed_in("manager");
    go_to(&mut app, Route::Dashboard);
    assert_eq!(app.gate().stack(), &[Route::Dashboard]);
}

#[test]
fn opening_a_route_already_on_the_stack_returns_to_it() {
    let mut app = signed_in("manager");
    go_to(&mut app, Route::WorkOrders);
    go_to(&mut app, Route::InspectionOverview);
    assert_eq!(app.gate().stack().len(), 3);

    go_to(&mut app, Route::Dashboard);
    assert_eq!(app.gate().stack(), &[Route::Dashboard]);
    assert_eq!(app.current_route(), Some(Route::Dashboard));
}

#[test]
fn inspection_form_escape_goes_back() {
    let mut app = signed_in("operative");
    go_to(&mut app, Route::InspectionForm);
    assert_eq!(app.current_route(), Some(Route::InspectionForm));
    assert!(app.is_input_mode());

    // Global keys are typed into the form here, not acted on
    app.handle_key(char_key('M'));
    assert!(matches!(app.mode(), Mode::Normal));

    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.current_route(), Some(Route::TaskList));
}

// ---- Notices ----

#[test]
fn validation_notice_keeps_form_open() {
    let mut app = signed_in("manager");
    go_to(&mut app, Route::WorkOrders);
    app.handle_key(char_key('n'));
    assert!(app.is_input_mode());

    app.handle_key(key(KeyCode::Enter));
    let notice = app.notice().expect("validation notice");
    assert!(notice.blocking);
    assert_eq!(notice.body, FILL_ALL_FIELDS);

    // Any key dismisses; the form is still there
    app.handle_key(char_key('x'));
    assert!(app.notice().is_none());
    let screen = app.current_screen().unwrap();
    assert!(screen.view().is_input_mode());
    assert!(!screen.view().is_idle());
}

#[test]
fn quit_key_is_text_while_input_mode() {
    let mut app = signed_in("manager");
    assert!(!app.is_input_mode());
    go_to(&mut app, Route::WorkOrders);
    app.handle_key(char_key('/'));
    assert!(app.is_input_mode());
    app.handle_key(key(KeyCode::Esc));
    assert!(!app.is_input_mode());
}

#[test]
fn denied_location_warns_in_status_bar() {
    let config = Config::parse_from(["forestops", "--deny-location"]);
    let mut app = App::new(&config);
    login(&mut app, "gis", "password");
    assert_eq!(app.current_route(), Some(Route::InteractiveMap));
    assert!(app.notice().is_none());
    let status = app.status_message().expect("location warning");
    assert_eq!(status.body, LOCATION_DENIED);

    // Status messages last one key
    app.handle_key(char_key('t'));
    assert!(app.status_message().is_none());
}

#[test]
fn dashboard_notice_blocks_until_dismissed() {
    let mut app = signed_in("manager");
    app.handle_key(char_key('n'));
    assert_eq!(app.notice().map(|n| n.title.as_str()), Some("Notifications"));
    assert!(app.is_input_mode());

    // The dismissing key is swallowed
    app.handle_key(char_key('L'));
    assert!(app.notice().is_none());
    assert!(app.gate().is_signed_in());
}

#[test]
fn timer_notice_waits_behind_open_notice() {
    let mut app = signed_in("admin");
    app.handle_key(char_key('w'));
    assert!(app.status_message().is_some());
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.notice().map(|n| n.title.as_str()), Some("File Details"));

    app.tick(Instant::now() + Duration::from_secs(5));
    assert_eq!(app.notice().map(|n| n.title.as_str()), Some("File Details"));

    // Each dismissal shows the next queued notice
    app.handle_key(char_key('x'));
    assert_eq!(app.notice().map(|n| n.title.as_str()), Some("Download Complete"));
    app.handle_key(char_key('x'));
    assert!(app.notice().is_none());
    assert_eq!(app.current_route(), Some(Route::DataManagement));
}

// ---- Rendering ----

#[test]
fn render_login_screen() {
    let mut app = make_app();
    render(&app);
    login(&mut app, "manager", "nope");
    render(&app);
}

#[test]
fn render_every_route() {
    for user in ["manager", "operative", "gis", "emergency", "admin"] {
        let routes = signed_in(user).gate().reachable();
        for route in routes {
            let mut app = signed_in(user);
            go_to(&mut app, *route);
            assert_eq!(app.current_route(), Some(*route));
            render(&app);
        }
        let mut app = signed_in(user);
        app.handle_key(char_key('M'));
        render(&app);
    }
}

#[test]
fn render_notice_overlay() {
    let mut app = signed_in("manager");
    app.handle_key(char_key('w'));
    assert!(app.notice().is_some());
    render(&app);
}
