use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

/// How a [`Store`](crate::Store) opens its database file.
#[derive(Debug, Clone, PartialEq)]
pub struct SqliteOptions {
    /// Path to the database file.
    pub path: PathBuf,
    /// Create the file if it doesn't exist.
    pub create_if_missing: bool,
    pub journal_mode: Option<JournalMode>,
    pub synchronous: Option<SynchronousMode>,
    pub busy_timeout: Option<Duration>,
}

impl SqliteOptions {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            create_if_missing: true,
            journal_mode: None,
            synchronous: None,
            busy_timeout: None,
        }
    }

    /// Returns true if any pragma needs to be applied after opening.
    pub fn has_pragmas(&self) -> bool {
        self.journal_mode.is_some() || self.synchronous.is_some() || self.busy_timeout.is_some()
    }
}

/// SQLite journal mode
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum JournalMode {
    #[default]
    Wal,
    Delete,
    Truncate,
    Persist,
    Memory,
    Off,
}

impl JournalMode {
    /// The value of the `journal_mode` pragma.
    pub fn as_str(&self) -> &'static str {
        match self {
            JournalMode::Wal => "WAL",
            JournalMode::Delete => "DELETE",
            JournalMode::Truncate => "TRUNCATE",
            JournalMode::Persist => "PERSIST",
            JournalMode::Memory => "MEMORY",
            JournalMode::Off => "OFF",
        }
    }
}

/// SQLite synchronous mode
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SynchronousMode {
    Off,
    Normal,
    #[default]
    Full,
    Extra,
}

impl SynchronousMode {
    /// The value of the `synchronous` pragma.
    pub fn as_str(&self) -> &'static str {
        match self {
            SynchronousMode::Off => "OFF",
            SynchronousMode::Normal => "NORMAL",
            SynchronousMode::Full => "FULL",
            SynchronousMode::Extra => "EXTRA",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_pragmas() {
        let plain = SqliteOptions::new("db.sqlite");
        assert!(!plain.has_pragmas());
        assert!(plain.create_if_missing);

        let with_journal = SqliteOptions {
            journal_mode: Some(JournalMode::Wal),
            ..SqliteOptions::new("db.sqlite")
        };
        assert!(with_journal.has_pragmas());
    }

    #[test]
    fn test_pragma_values() {
        assert_eq!(JournalMode::Wal.as_str(), "WAL");
        assert_eq!(JournalMode::Off.as_str(), "OFF");
        assert_eq!(SynchronousMode::Normal.as_str(), "NORMAL");
        assert_eq!(SynchronousMode::Extra.as_str(), "EXTRA");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(JournalMode::default(), JournalMode::Wal);
        assert_eq!(SynchronousMode::default(), SynchronousMode::Full);
    }
}
