use crossterm::event::{KeyCode, KeyEvent};
use forestops_core::map::{
    Coordinate, MapState, MapType, NewMarker, FOREST_BOUNDARY, LEGEND, LOCATION_DENIED,
};
use forestops_core::theme::{accents, Theme};
use forestops_core::{seed, MapMarker};
use forestops_service::device::{LocationProvider, Permission};
use forestops_service::EntityList;
use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Line as Segment, Points};
use ratatui::widgets::{Paragraph, Wrap};
use tracing::{info, warn};

use super::{rejected, Devices, Outcome, View};
use crate::components::form::{Form, FormEvent};
use crate::components::notice::Notice;
use crate::components::styles;

/// GIS view. Markers are placed at the cursor, which stands in for a
/// long-press on a touch map.
pub struct MapScreen {
    markers: EntityList<MapMarker>,
    state: MapState,
    adding: Option<(Coordinate, Form)>,
}

impl MapScreen {
    /// Ask for the device position once. A refusal is reported but the map
    /// still opens, just without the user marker.
    pub fn mount(location: &mut dyn LocationProvider) -> (Self, Option<Notice>) {
        let mut state = MapState::default();
        let notice = match location.request_permission() {
            Permission::Granted => match location.current_position() {
                Ok(position) => {
                    info!(lat = position.latitude, lon = position.longitude, "user located");
                    state.user_location = Some(position);
                    None
                }
                Err(e) => {
                    warn!(error = %e, "position unavailable");
                    Some(Notice::warning(e.to_string()))
                }
            },
            Permission::Denied => Some(Notice::warning(LOCATION_DENIED)),
        };
        let screen = Self {
            markers: EntityList::seeded("map marker", seed::map_markers()),
            state,
            adding: None,
        };
        (screen, notice)
    }

    fn selected(&self) -> Option<&MapMarker> {
        self.state.selected.as_deref().and_then(|id| self.markers.get(id))
    }

    fn submit(&mut self, at: Coordinate, form: Form) -> Outcome {
        let draft = NewMarker {
            title: form.value("Title").to_string(),
            description: form.value("Description").to_string(),
            coordinate: at,
        };
        match self.markers.add(draft) {
            Ok(m) => Outcome::Notice(Notice::status(format!("Marker \"{}\" placed", m.title))),
            Err(e) => {
                self.adding = Some((at, form));
                rejected(e)
            }
        }
    }

    fn render_canvas(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let (south, north, west, east) = self.state.bounds(self.markers.records());
        let background = match self.state.map_type {
            MapType::Standard => Color::Reset,
            MapType::Satellite => Color::Rgb(0x1B, 0x2A, 0x1B),
        };
        let boundary_color = styles::color(accents::DONE);
        let marker_color = styles::color(accents::ALERT);
        let user_color = styles::color(accents::ACTIVE);
        let selected = self.state.selected.clone();

        let canvas = Canvas::default()
            .block(styles::panel(
                format!(" Map ({}) ", self.state.map_type.display_name()),
                theme,
            ))
            .marker(Marker::Braille)
            .background_color(background)
            .x_bounds([west, east])
            .y_bounds([south, north])
            .paint(|ctx| {
                if self.state.boundary_visible {
                    for (i, a) in FOREST_BOUNDARY.iter().enumerate() {
                        let b = &FOREST_BOUNDARY[(i + 1) % FOREST_BOUNDARY.len()];
                        ctx.draw(&Segment::new(
                            a.longitude,
                            a.latitude,
                            b.longitude,
                            b.latitude,
                            boundary_color,
                        ));
                    }
                }
                ctx.layer();
                for m in self.markers.records() {
                    let c = m.coordinate;
                    let is_selected = selected.as_deref() == Some(m.id.as_str());
                    let style = if is_selected {
                        Style::default().fg(marker_color).bold().reversed()
                    } else {
                        Style::default().fg(marker_color)
                    };
                    ctx.print(c.longitude, c.latitude, Span::styled("●", style));
                }
                if let Some(me) = self.state.user_location {
                    ctx.draw(&Points {
                        coords: &[(me.longitude, me.latitude)],
                        color: user_color,
                    });
                    ctx.print(me.longitude, me.latitude, Span::styled("◉", Style::default().fg(user_color)));
                }
                let cursor = self.state.cursor;
                ctx.print(
                    cursor.longitude,
                    cursor.latitude,
                    Span::styled("+", Style::default().fg(Color::Yellow).bold()),
                );
            });
        frame.render_widget(canvas, area);
    }

    fn render_panel(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let on_off = |b: bool| if b { "shown" } else { "hidden" };
        let mut lines = vec![
            Line::from(format!("Type: {}", self.state.map_type.display_name())),
            Line::from(format!("Boundary: {}", on_off(self.state.boundary_visible))),
            Line::from(format!(
                "Cursor: {:.5}, {:.5}",
                self.state.cursor.latitude, self.state.cursor.longitude
            )),
        ];
        match self.state.user_location {
            Some(me) => lines.push(Line::from(format!(
                "You: {:.5}, {:.5}",
                me.latitude, me.longitude
            ))),
            None => lines.push(Line::styled("You: unknown", styles::muted(theme))),
        }
        lines.push(Line::default());
        if let Some(m) = self.selected() {
            lines.push(Line::styled(m.title.clone(), Style::default().bold()));
            lines.push(Line::from(m.description.clone()));
            lines.push(Line::default());
        }
        lines.push(Line::styled(
            format!("Markers ({})", self.markers.len()),
            Style::default().bold(),
        ));
        for m in self.markers.records() {
            lines.push(Line::from(format!("  {}: {}", m.title, m.description)));
        }

        frame.render_widget(
            Paragraph::new(lines)
                .block(styles::panel(" Details ", theme))
                .wrap(Wrap { trim: true }),
            area,
        );
    }
}

impl View for MapScreen {
    fn handle_key(&mut self, key: KeyEvent, _devices: &mut Devices) -> Outcome {
        if let Some((at, mut form)) = self.adding.take() {
            return match form.handle_key(key) {
                FormEvent::Cancel => Outcome::None,
                FormEvent::Editing => {
                    self.adding = Some((at, form));
                    Outcome::None
                }
                FormEvent::Submit => self.submit(at, form),
            };
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.state.nudge(1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.state.nudge(-1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.state.nudge(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.state.nudge(0, 1),
            KeyCode::Char('t') => self.state.toggle_type(),
            KeyCode::Char('b') => self.state.toggle_boundary(),
            KeyCode::Char('?') => return Outcome::Notice(Notice::info("Legend", LEGEND)),
            KeyCode::Char('a') => {
                let form = Form::new("New Marker")
                    .text("Title", "")
                    .text("Description", "");
                self.adding = Some((self.state.cursor, form));
            }
            KeyCode::Enter => {
                self.state.select_nearest(self.markers.records());
            }
            KeyCode::Esc if self.state.selected.is_some() => self.state.clear_selection(),
            _ => {}
        }
        Outcome::None
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(area);
        self.render_canvas(frame, chunks[0], theme);
        self.render_panel(frame, chunks[1], theme);
        if let Some((_, form)) = &self.adding {
            form.render(frame, area, theme);
        }
    }

    fn hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.adding.is_some() {
            return vec![("Tab", "field"), ("Enter", "place"), ("Esc", "cancel")];
        }
        vec![
            ("arrows", "move"),
            ("a", "add marker"),
            ("Enter", "select"),
            ("t", "type"),
            ("b", "boundary"),
            ("?", "legend"),
        ]
    }

    fn is_input_mode(&self) -> bool {
        self.adding.is_some()
    }

    fn is_idle(&self) -> bool {
        self.adding.is_none() && self.state.selected.is_none()
    }
}

#[cfg(test)]
mod tests {
    use forestops_core::map::{CURSOR_STEP, INITIAL_CENTER};
    use forestops_service::device::FixedLocation;

    use super::*;
    use crate::screens::testing::{char_key, devices, key};

    #[test]
    fn denied_location_warns_without_blocking() {
        let mut loc = FixedLocation::denied();
        let (screen, notice) = MapScreen::mount(&mut loc);
        let notice = notice.unwrap();
        assert_eq!(notice.body, LOCATION_DENIED);
        assert!(!notice.blocking);
        assert!(screen.state.user_location.is_none());
    }

    #[test]
    fn granted_location_sets_user_marker() {
        let mut loc = FixedLocation::new(Coordinate::new(37.7885, -122.433));
        let (screen, notice) = MapScreen::mount(&mut loc);
        assert!(notice.is_none());
        assert!(screen.state.user_location.is_some());
    }

    #[test]
    fn add_marker_at_cursor() {
        let mut loc = FixedLocation::denied();
        let (mut s, _) = MapScreen::mount(&mut loc);
        let mut dev = devices();
        s.handle_key(key(KeyCode::Up), &mut dev);
        s.handle_key(char_key('a'), &mut dev);
        for c in "Snag".chars() {
            s.handle_key(char_key(c), &mut dev);
        }
        s.handle_key(key(KeyCode::Tab), &mut dev);
        for c in "Leaning pine".chars() {
            s.handle_key(char_key(c), &mut dev);
        }
        s.handle_key(key(KeyCode::Enter), &mut dev);
        let snag = s.markers.records().iter().find(|m| m.title == "Snag").unwrap();
        assert!((snag.coordinate.latitude - (INITIAL_CENTER.latitude + CURSOR_STEP)).abs() < 1e-9);
    }

    #[test]
    fn blank_marker_keeps_form_open() {
        let mut loc = FixedLocation::denied();
        let (mut s, _) = MapScreen::mount(&mut loc);
        let mut dev = devices();
        let before = s.markers.len();
        s.handle_key(char_key('a'), &mut dev);
        let out = s.handle_key(key(KeyCode::Enter), &mut dev);
        assert!(matches!(out, Outcome::Notice(ref n) if n.blocking));
        assert!(s.adding.is_some());
        assert_eq!(s.markers.len(), before);
    }

    #[test]
    fn toggles_and_selection() {
        let mut loc = FixedLocation::denied();
        let (mut s, _) = MapScreen::mount(&mut loc);
        let mut dev = devices();
        s.handle_key(char_key('t'), &mut dev);
        s.handle_key(char_key('b'), &mut dev);
        assert_eq!(s.state.map_type, MapType::Satellite);
        assert!(!s.state.boundary_visible);
        s.handle_key(key(KeyCode::Enter), &mut dev);
        assert_eq!(s.selected().map(|m| m.id.as_str()), Some("1"));
        assert!(!s.is_idle());
        s.handle_key(key(KeyCode::Esc), &mut dev);
        assert!(s.is_idle());
    }
}
