use crossterm::event::{KeyCode, KeyEvent};
use forestops_core::list::{SortKey, StatusCycle};
use forestops_core::theme::Theme;
use forestops_core::{ListQuery, Record};
use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use super::styles;

/// Browsing state for one record list: the query plus the cursor.
///
/// The visible rows are always recomputed from the backing list and the
/// query; this only remembers which row is highlighted.
pub struct ListView<T: Record> {
    pub query: ListQuery<T::Status, T::Key>,
    selected: usize,
    searching: bool,
}

impl<T: Record> ListView<T> {
    pub fn new(sort: Option<T::Key>) -> Self {
        Self {
            query: ListQuery {
                sort,
                ..ListQuery::default()
            },
            selected: 0,
            searching: false,
        }
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected<'a>(&self, visible: &'a [T]) -> Option<&'a T> {
        visible.get(self.selected)
    }

    pub fn selected_id(&self, visible: &[T]) -> Option<String> {
        self.selected(visible).map(|r| r.id().to_string())
    }

    /// Keep the cursor inside a list that may have shrunk.
    pub fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    fn next_sort(&self) -> Option<T::Key> {
        let all = T::Key::ALL;
        match self.query.sort {
            None => all.first().copied(),
            Some(current) => {
                let idx = all.iter().position(|k| *k == current).unwrap_or(0);
                all.get((idx + 1) % all.len().max(1)).copied()
            }
        }
    }

    /// Handle browsing keys. Returns false when the key is not a list key.
    pub fn handle_key(&mut self, key: KeyEvent, visible_len: usize) -> bool {
        if self.searching {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => self.searching = false,
                KeyCode::Backspace => {
                    self.query.search.pop();
                }
                KeyCode::Char(c) => self.query.search.push(c),
                _ => {}
            }
            self.selected = 0;
            return true;
        }

        match key.code {
            KeyCode::Char('/') => self.searching = true,
            KeyCode::Char('f') if !T::Status::CYCLE.is_empty() => {
                self.query.status = self.query.status.next();
                self.selected = 0;
            }
            KeyCode::Char('s') => self.query.sort = self.next_sort(),
            KeyCode::Char('S') => self.query.direction = self.query.direction.toggled(),
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected + 1 < visible_len {
                    self.selected += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Char('g') => self.selected = 0,
            KeyCode::Char('G') => self.selected = visible_len.saturating_sub(1),
            _ => return false,
        }
        true
    }

    pub fn hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.searching {
            return vec![("Enter/Esc", "done")];
        }
        let mut hints = vec![("j/k", "nav"), ("/", "search")];
        if !T::Status::CYCLE.is_empty() {
            hints.push(("f", "filter"));
        }
        hints.push(("s/S", "sort"));
        hints
    }

    fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.searching || !self.query.search.is_empty() {
            let cursor = if self.searching { "_" } else { "" };
            parts.push(format!("Search: {}{cursor}", self.query.search));
        }
        if !T::Status::CYCLE.is_empty() {
            parts.push(format!("Status: {}", self.query.status.label()));
        }
        if let Some(key) = self.query.sort {
            parts.push(format!("Sort: {} {}", key.label(), self.query.direction.arrow()));
        }
        parts.join("  |  ")
    }

    /// Draw the query summary line and the rows.
    pub fn render<'a, F>(
        &self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        title: &str,
        visible: &'a [T],
        row: F,
    ) where
        F: Fn(&'a T) -> Line<'a>,
    {
        let block = styles::panel(format!(" {} ({}) ", title, visible.len()), theme);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        frame.render_widget(
            Paragraph::new(Line::styled(self.summary(), styles::muted(theme))),
            chunks[0],
        );

        if visible.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::styled("  Nothing matches", styles::muted(theme))),
                chunks[1],
            );
            return;
        }

        let items: Vec<ListItem> = visible.iter().map(|r| ListItem::new(row(r))).collect();
        let list = List::new(items)
            .highlight_style(styles::highlight(theme))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        state.select(Some(self.selected.min(visible.len() - 1)));
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }
}
