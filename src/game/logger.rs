//! Game event logging
//!
//! Lightweight in-process logger attached to each game. Entries are kept in
//! memory by default so library callers and tests can inspect them; stdout
//! output is opt-in.

use serde::{Deserialize, Serialize};

/// How much to record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Verbosity {
    Silent,
    #[default]
    Normal,
    Verbose,
}

/// Where log messages go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Capture only to the in-memory buffer (default for library use)
    #[default]
    Memory,
    /// Output only to stdout
    Stdout,
    /// Both stdout and in-memory buffer
    Both,
}

/// A captured log entry.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: Verbosity,
    pub message: String,
    /// E.g. "lifecycle", "elimination"
    pub category: &'static str,
}

/// Per-game event logger.
#[derive(Debug, Clone, Default)]
pub struct GameLogger {
    verbosity: Verbosity,
    output_mode: OutputMode,
    entries: Vec<LogEntry>,
}

impl GameLogger {
    pub fn new(verbosity: Verbosity, output_mode: OutputMode) -> Self {
        GameLogger {
            verbosity,
            output_mode,
            entries: Vec::new(),
        }
    }

    pub fn log(&mut self, level: Verbosity, category: &'static str, message: impl Into<String>) {
        if level > self.verbosity || self.verbosity == Verbosity::Silent {
            return;
        }
        let message = message.into();
        if matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both) {
            println!("[{category}] {message}");
        }
        if matches!(self.output_mode, OutputMode::Memory | OutputMode::Both) {
            self.entries.push(LogEntry {
                level,
                message,
                category,
            });
        }
    }

    pub fn lifecycle(&mut self, message: impl Into<String>) {
        self.log(Verbosity::Normal, "lifecycle", message);
    }

    pub fn elimination(&mut self, message: impl Into<String>) {
        self.log(Verbosity::Normal, "elimination", message);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_capture() {
        let mut logger = GameLogger::default();
        logger.lifecycle("game started");
        logger.elimination("P1 eliminated P2");

        assert_eq!(logger.entries().len(), 2);
        assert_eq!(logger.entries()[0].category, "lifecycle");
        assert!(logger.entries()[1].message.contains("P1"));
    }

    #[test]
    fn test_silent_drops_everything() {
        let mut logger = GameLogger::new(Verbosity::Silent, OutputMode::Memory);
        logger.lifecycle("ignored");
        assert!(logger.entries().is_empty());
    }

    #[test]
    fn test_verbose_entries_filtered_at_normal() {
        let mut logger = GameLogger::default();
        logger.log(Verbosity::Verbose, "lifecycle", "detail");
        assert!(logger.entries().is_empty());
    }

    #[test]
    fn test_clear() {
        let mut logger = GameLogger::default();
        logger.lifecycle("one");
        logger.clear();
        assert!(logger.entries().is_empty());
    }
}
