//! The ordered lines shown in the log panel.

use std::collections::VecDeque;

use serde::Serialize;

use crate::time::{Timestamp, now};

/// Lines printed when the client starts.
pub const WELCOME: [&str; 2] = [
    "Kepler's Horizon client loaded.",
    "Login to begin. Demo: alice/alicepw, bob/bobpw.",
];

pub const LOGIN_OK: &str = "Login OK.";
pub const LOGGED_OUT: &str = "Logged out.";

/// Oldest lines are dropped once the log holds this many.
pub const DEFAULT_CAPACITY: usize = 2000;

/// Visual emphasis of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineTone {
    #[default]
    Plain,
    Good,
    Bad,
    Muted,
}

impl LineTone {
    /// CSS class used by the web dashboard (empty for plain lines).
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Plain => "",
            Self::Good => "line-good",
            Self::Bad => "line-bad",
            Self::Muted => "line-muted",
        }
    }
}

/// A single line of the console log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogLine {
    pub text: String,
    pub tone: LineTone,
    pub at: Timestamp,
}

impl LogLine {
    #[must_use]
    pub fn new(text: impl Into<String>, tone: LineTone) -> Self {
        Self {
            text: text.into(),
            tone,
            at: now(),
        }
    }

    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, LineTone::Plain)
    }
}

/// Bounded, append-only list of log lines.
#[derive(Debug, Clone)]
pub struct ConsoleLog {
    lines: VecDeque<LogLine>,
    capacity: usize,
}

impl Default for ConsoleLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl ConsoleLog {
    /// Create an empty log holding at most `capacity` lines (minimum 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Append a line, evicting the oldest one when full.
    pub fn push(&mut self, line: LogLine) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn lines(&self) -> impl Iterator<Item = &LogLine> {
        self.lines.iter()
    }

    /// Texts of all lines, oldest first.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
