use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent};
use forestops_core::data_file::{DataFileSort, Upload};
use forestops_core::theme::Theme;
use forestops_core::validate::format_date;
use forestops_core::{seed, DataFile};
use forestops_service::device::{PickOutcome, ShareOutcome};
use forestops_service::EntityList;
use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph, Wrap};
use tracing::{info, warn};

use super::{rejected, Devices, Outcome, View};
use crate::components::list_view::ListView;
use crate::components::notice::Notice;
use crate::components::styles::{self, centered_rect};
use crate::timer::{self, Delay};

const SHARE_FAILED: &str = "An error occurred while sharing the file.";

enum Confirm {
    Delete { id: String, name: String },
    Upload { name: String },
}

/// Administrator file catalogue. Downloads are simulated: the notice shows
/// at once and the completion arrives after a delay.
pub struct DataScreen {
    files: EntityList<DataFile>,
    view: ListView<DataFile>,
    confirm: Option<Confirm>,
    downloads: Vec<Delay<String>>,
    download_delay: Duration,
}

impl DataScreen {
    pub fn new(download_delay: Duration) -> Self {
        Self {
            files: EntityList::seeded("data file", seed::data_files()),
            view: ListView::new(Some(DataFileSort::Name)),
            confirm: None,
            downloads: Vec::new(),
            download_delay,
        }
    }

    fn visible(&self) -> Vec<DataFile> {
        self.files.list(&self.view.query)
    }

    fn handle_confirm(&mut self, confirm: Confirm, key: KeyEvent) -> Outcome {
        let accepted = matches!(key.code, KeyCode::Char('y') | KeyCode::Enter);
        if !accepted {
            return Outcome::None;
        }
        match confirm {
            Confirm::Delete { id, name } => {
                self.files.remove(&id);
                self.view.clamp(self.visible().len());
                Outcome::Notice(Notice::success("Success", format!("{name} has been deleted.")))
            }
            Confirm::Upload { name } => {
                let draft = Upload {
                    name: name.clone(),
                    on: Local::now().date_naive(),
                };
                match self.files.add(draft) {
                    Ok(_) => Outcome::Notice(Notice::success(
                        "Upload Successful",
                        format!("File {name} has been uploaded successfully."),
                    )),
                    Err(e) => rejected(e),
                }
            }
        }
    }

    fn start_upload(&mut self, devices: &mut Devices) -> Outcome {
        match devices.picker.pick() {
            Ok(PickOutcome::Picked(name)) => {
                self.confirm = Some(Confirm::Upload { name });
                Outcome::None
            }
            Ok(PickOutcome::Cancelled) => Outcome::None,
            Err(e) => {
                warn!(error = %e, "file picker failed");
                Outcome::Notice(Notice::error(
                    "Upload Failed",
                    "There was an error selecting the file.",
                ))
            }
        }
    }

    fn render_confirm(&self, frame: &mut Frame, area: Rect, theme: &Theme, confirm: &Confirm) {
        let (title, question) = match confirm {
            Confirm::Delete { name, .. } => (
                " Confirm Deletion ",
                format!("Are you sure you want to delete {name}?"),
            ),
            Confirm::Upload { name } => (" Upload File ", format!("Upload {name}?")),
        };
        let popup = centered_rect(50, 25, area);
        frame.render_widget(Clear, popup);
        let lines = vec![
            Line::from(question),
            Line::default(),
            styles::hint_line(&[("y", "confirm"), ("any", "cancel")]),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .block(styles::popup(title, theme))
                .wrap(Wrap { trim: true }),
            popup,
        );
    }
}

impl View for DataScreen {
    fn handle_key(&mut self, key: KeyEvent, devices: &mut Devices) -> Outcome {
        if let Some(confirm) = self.confirm.take() {
            return self.handle_confirm(confirm, key);
        }

        let visible = self.visible();
        if self.view.handle_key(key, visible.len()) {
            return Outcome::None;
        }

        let selected = self.view.selected(&visible);
        match (key.code, selected) {
            (KeyCode::Char('u'), _) => self.start_upload(devices),
            (KeyCode::Enter, Some(file)) => Outcome::Notice(Notice::info("File Details", file.details())),
            (KeyCode::Char('w'), Some(file)) => {
                info!(name = %file.name, "download started");
                self.downloads.push(Delay::new(
                    self.download_delay,
                    Instant::now(),
                    file.name.clone(),
                ));
                Outcome::Notice(Notice::status(format!("Downloading {}...", file.name)))
            }
            (KeyCode::Char('x'), Some(file)) => match devices.share.share(&file.name) {
                Ok(ShareOutcome::Shared) => Outcome::Notice(Notice::success(
                    "Success",
                    format!("{} has been shared successfully.", file.name),
                )),
                Ok(ShareOutcome::Dismissed) => Outcome::None,
                Err(_) => Outcome::Notice(Notice::warning(SHARE_FAILED)),
            },
            (KeyCode::Char('d'), Some(file)) => {
                self.confirm = Some(Confirm::Delete {
                    id: file.id.clone(),
                    name: file.name.clone(),
                });
                Outcome::None
            }
            _ => Outcome::None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let visible = self.visible();
        self.view.render(frame, area, theme, "Data Files", &visible, |f| {
            Line::from(vec![
                Span::styled(format!("{:<26}", f.name), Style::default().bold()),
                Span::styled(format!("{:<8}", f.kind), Style::default().fg(styles::color(theme.palette.accent))),
                Span::raw(format!("{:>8}  ", f.size)),
                Span::styled(format_date(f.last_updated), styles::muted(theme)),
            ])
        });
        if let Some(confirm) = &self.confirm {
            self.render_confirm(frame, area, theme, confirm);
        }
    }

    fn hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.confirm.is_some() {
            return vec![("y", "confirm"), ("any", "cancel")];
        }
        let mut hints = self.view.hints();
        hints.extend([
            ("Enter", "details"),
            ("w", "download"),
            ("x", "share"),
            ("d", "delete"),
            ("u", "upload"),
        ]);
        hints
    }

    fn is_input_mode(&self) -> bool {
        self.view.is_searching()
    }

    fn is_idle(&self) -> bool {
        self.confirm.is_none() && !self.view.is_searching()
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.downloads
            .iter()
            .map(|d| Some(d.due()))
            .fold(None, timer::earliest)
    }

    fn tick(&mut self, now: Instant) -> Outcome {
        let Some(idx) = self.downloads.iter().position(|d| d.is_due(now)) else {
            return Outcome::None;
        };
        let name = self.downloads.remove(idx).into_payload();
        info!(%name, "download complete");
        Outcome::Notice(Notice::success(
            "Download Complete",
            format!("{name} has been downloaded successfully."),
        ))
    }
}
