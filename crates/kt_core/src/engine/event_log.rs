//! Tick-tagged match log.
//!
//! Every entry carries the tick on which it was written, taken from the
//! scheduler by the caller. Entries are kept in order for post-match
//! inspection and mirrored to the `log` facade for live diagnostics.

use serde::{Deserialize, Serialize};

use crate::engine::scheduler::Tick;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogEntry {
    pub tick: Tick,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventLog {
    entries: Vec<LogEntry>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn debug(&mut self, tick: Tick, message: impl Into<String>) {
        self.push(tick, LogLevel::Debug, message.into());
    }

    pub fn info(&mut self, tick: Tick, message: impl Into<String>) {
        self.push(tick, LogLevel::Info, message.into());
    }

    pub fn warning(&mut self, tick: Tick, message: impl Into<String>) {
        self.push(tick, LogLevel::Warning, message.into());
    }

    pub fn error(&mut self, tick: Tick, message: impl Into<String>) {
        self.push(tick, LogLevel::Error, message.into());
    }

    fn push(&mut self, tick: Tick, level: LogLevel, message: String) {
        match level {
            LogLevel::Debug => log::debug!("[t={}] {}", tick, message),
            LogLevel::Info => log::info!("[t={}] {}", tick, message),
            LogLevel::Warning => log::warn!("[t={}] {}", tick, message),
            LogLevel::Error => log::error!("[t={}] {}", tick, message),
        }
        self.entries.push(LogEntry {
            tick,
            level,
            message,
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries at or above `level`, in write order.
    pub fn at_level(&self, level: LogLevel) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |e| e.level == level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_keep_tick_and_order() {
        let mut log = EventLog::new();
        log.info(10, "kickoff");
        log.debug(15, "ball settled");
        log.error(20, "AI fault");

        let entries = log.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].tick, 10);
        assert_eq!(entries[2].level, LogLevel::Error);
        assert_eq!(entries[2].message, "AI fault");
    }

    #[test]
    fn test_level_filter() {
        let mut log = EventLog::new();
        log.info(1, "a");
        log.warning(2, "b");
        log.info(3, "c");

        let infos: Vec<_> = log.at_level(LogLevel::Info).collect();
        assert_eq!(infos.len(), 2);
        assert_eq!(infos[1].tick, 3);
    }
}
