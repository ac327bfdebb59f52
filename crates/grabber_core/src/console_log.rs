use std::collections::VecDeque;
use std::fmt;

use chrono::{Local, NaiveTime};

/// Number of diagnostic lines kept for display.
pub const CONSOLE_LOG_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: NaiveTime,
    pub text: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp.format("%H:%M:%S"), self.text)
    }
}

/// Bounded FIFO of the most recent diagnostic lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConsoleLog {
    entries: VecDeque<LogEntry>,
}

impl ConsoleLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line stamped with the local wall-clock time.
    pub fn append(&mut self, text: impl Into<String>) {
        self.append_at(Local::now().time(), text);
    }

    pub fn append_at(&mut self, timestamp: NaiveTime, text: impl Into<String>) {
        self.entries.push_back(LogEntry {
            timestamp,
            text: text.into(),
        });
        while self.entries.len() > CONSOLE_LOG_CAPACITY {
            self.entries.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    /// Rendered `[HH:MM:SS] text` lines, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
