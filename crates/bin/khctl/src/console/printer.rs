//! Terminal rendering of client events.
//!
//! [`Printer`] turns each [`ClientEvent`] into output lines and [`run`] feeds
//! it from the event bus. While the map view is up, log lines are held back
//! and flushed once the log view returns.

use std::io::Write;

use kh_app::ports::ClientEvent;
use kh_domain::console::{LineTone, LogLine};
use kh_domain::status::StatusView;
use kh_domain::view::PanelView;
use tokio::sync::broadcast::{self, error::RecvError};

const RESET: &str = "\x1b[0m";

/// Event-to-text renderer with the state the terminal needs.
#[derive(Debug)]
pub struct Printer {
    color: bool,
    view: PanelView,
    held: Vec<LogLine>,
    last_summary: Option<String>,
}

impl Printer {
    #[must_use]
    pub fn new(color: bool) -> Self {
        Self {
            color,
            view: PanelView::default(),
            held: Vec::new(),
            last_summary: None,
        }
    }

    /// Output produced by `event`, possibly nothing.
    pub fn handle(&mut self, event: ClientEvent) -> Vec<String> {
        match event {
            ClientEvent::Line(line) if self.view.map_visible() => {
                self.held.push(line);
                Vec::new()
            }
            ClientEvent::Line(line) => vec![self.render_line(&line)],
            ClientEvent::Status(status) => {
                let summary = summary(&status);
                if self.last_summary.as_ref() == Some(&summary) {
                    return Vec::new();
                }
                self.last_summary = Some(summary.clone());
                vec![summary]
            }
            ClientEvent::View(view) => {
                self.view = view;
                match view {
                    PanelView::Map => vec![format!(
                        "-- map view: log paused, :map for {} --",
                        view.button_label().to_lowercase()
                    )],
                    PanelView::Log => {
                        let held = std::mem::take(&mut self.held);
                        let mut out = vec![format!("-- log view ({} held) --", held.len())];
                        out.extend(held.iter().map(|line| self.render_line(line)));
                        out
                    }
                }
            }
        }
    }

    fn render_line(&self, line: &LogLine) -> String {
        let stamp = line.at.format("%H:%M:%S");
        match tone_color(line.tone) {
            Some(code) if self.color => format!("{stamp} {code}{}{RESET}", line.text),
            _ => format!("{stamp} {}", line.text),
        }
    }
}

fn tone_color(tone: LineTone) -> Option<&'static str> {
    match tone {
        LineTone::Plain => None,
        LineTone::Good => Some("\x1b[32m"),
        LineTone::Bad => Some("\x1b[31m"),
        LineTone::Muted => Some("\x1b[2m"),
    }
}

/// One-line digest printed whenever the status changes.
#[must_use]
pub fn summary(status: &StatusView) -> String {
    format!(
        "[{}] {} | game {}, round {}, player {}, phase {} | peer {} {}",
        status.badge.label(),
        status.user,
        status.game_id,
        status.round,
        status.player,
        status.phase,
        status.peer,
        status.peer_online,
    )
}

/// Every status field as an aligned `id  value` table, badge first.
#[must_use]
pub fn status_table(status: &StatusView) -> Vec<String> {
    let mut out = vec![format!("{:<13} {}", "loginBadge", status.badge.label())];
    out.extend(
        status
            .fields()
            .into_iter()
            .map(|(id, text)| format!("{id:<13} {text}")),
    );
    out
}

/// Print events from `rx` to stdout until the bus closes.
pub async fn run(mut rx: broadcast::Receiver<ClientEvent>, mut printer: Printer) {
    loop {
        match rx.recv().await {
            Ok(event) => write_lines(&printer.handle(event)),
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "terminal fell behind, events dropped");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

/// Write `lines` to stdout, ignoring a closed pipe.
pub fn write_lines(lines: &[String]) {
    let mut out = std::io::stdout().lock();
    for line in lines {
        if writeln!(out, "{line}").is_err() {
            return;
        }
    }
    let _ = out.flush();
}
