use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use siphon_store::{JournalMode, SqliteOptions, SynchronousMode};

use crate::{Error, Result};

/// The `[database]` table, tagged by `type`.
#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DatabaseConfig {
    Sqlite(SqliteConfig),
}

impl DatabaseConfig {
    /// Backend name as written in `type`.
    pub fn kind(&self) -> &'static str {
        match self {
            DatabaseConfig::Sqlite(_) => "sqlite",
        }
    }
}

/// Configuration for SQLite database
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SqliteConfig {
    /// Direct file path to the SQLite database (e.g., "countries.db")
    pub path: Option<PathBuf>,

    /// Environment variable holding the database path (ignored if `path` is set)
    pub env: Option<String>,

    /// Create the database file if it doesn't exist (default: true)
    pub create_if_missing: Option<bool>,

    /// Journal mode: wal, delete, truncate, persist, memory, off
    pub journal_mode: Option<JournalMode>,

    /// Synchronous mode: off, normal, full, extra
    pub synchronous: Option<SynchronousMode>,

    /// Busy timeout in milliseconds
    pub busy_timeout: Option<u64>,
}

impl SqliteConfig {
    /// The configured database path, reading `env` through `lookup` when no
    /// `path` is given. Relative paths are resolved against `base`.
    pub fn resolve_path_with(
        &self,
        base: &Path,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<PathBuf> {
        let path = match (&self.path, &self.env) {
            (Some(path), _) => path.clone(),
            (None, Some(var)) => lookup(var)
                .map(PathBuf::from)
                .ok_or_else(|| Box::new(Error::MissingEnv { var: var.clone() }))?,
            // rejected during validation
            (None, None) => PathBuf::from("siphon.db"),
        };

        if path.is_relative() {
            Ok(base.join(path))
        } else {
            Ok(path)
        }
    }

    /// Store options for this configuration, reading `env` from the process
    /// environment.
    pub fn to_options(&self, base: &Path) -> Result<SqliteOptions> {
        let path = self.resolve_path_with(base, |var| std::env::var(var).ok())?;
        Ok(self.options_for(path))
    }

    fn options_for(&self, path: PathBuf) -> SqliteOptions {
        SqliteOptions {
            create_if_missing: self.create_if_missing.unwrap_or(true),
            journal_mode: self.journal_mode,
            synchronous: self.synchronous,
            busy_timeout: self.busy_timeout.map(Duration::from_millis),
            ..SqliteOptions::new(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> DatabaseConfig {
        toml::from_str(content).expect("Failed to parse TOML")
    }

    fn sqlite(content: &str) -> SqliteConfig {
        match parse(content) {
            DatabaseConfig::Sqlite(config) => config,
        }
    }

    #[test]
    fn test_sqlite_basic() {
        let config = sqlite(
            r#"
            type = "sqlite"
            path = "countries.db"
            "#,
        );

        let options = config.options_for(PathBuf::from("countries.db"));
        assert!(options.create_if_missing);
        assert!(!options.has_pragmas());
    }

    #[test]
    fn test_sqlite_with_options() {
        let config = sqlite(
            r#"
            type = "sqlite"
            path = "countries.db"
            create_if_missing = false
            journal_mode = "wal"
            synchronous = "normal"
            busy_timeout = 5000
            "#,
        );

        let options = config.options_for(PathBuf::from("countries.db"));
        assert!(!options.create_if_missing);
        assert_eq!(options.journal_mode, Some(JournalMode::Wal));
        assert_eq!(options.synchronous, Some(SynchronousMode::Normal));
        assert_eq!(options.busy_timeout, Some(Duration::from_millis(5000)));
    }

    #[test]
    fn test_relative_path_resolves_against_base() {
        let config = sqlite(
            r#"
            type = "sqlite"
            path = "data/countries.db"
            "#,
        );
        let path = config
            .resolve_path_with(Path::new("/srv/etl"), |_| None)
            .unwrap();
        assert_eq!(path, PathBuf::from("/srv/etl/data/countries.db"));
    }

    #[test]
    fn test_path_from_env() {
        let config = sqlite(
            r#"
            type = "sqlite"
            env = "SIPHON_DATABASE"
            "#,
        );

        let path = config
            .resolve_path_with(Path::new("/srv"), |var| {
                (var == "SIPHON_DATABASE").then(|| "/var/lib/siphon.db".to_string())
            })
            .unwrap();
        assert_eq!(path, PathBuf::from("/var/lib/siphon.db"));

        let err = config
            .resolve_path_with(Path::new("/srv"), |_| None)
            .unwrap_err();
        assert!(matches!(*err, Error::MissingEnv { ref var } if var == "SIPHON_DATABASE"));
    }

    #[test]
    fn test_path_wins_over_env() {
        let config = sqlite(
            r#"
            type = "sqlite"
            path = "/tmp/direct.db"
            env = "SIPHON_DATABASE"
            "#,
        );
        let path = config
            .resolve_path_with(Path::new("/srv"), |_| Some("/elsewhere.db".into()))
            .unwrap();
        assert_eq!(path, PathBuf::from("/tmp/direct.db"));
    }

    #[test]
    fn test_unknown_journal_mode() {
        let result: std::result::Result<DatabaseConfig, _> = toml::from_str(
            r#"
            type = "sqlite"
            path = "x.db"
            journal_mode = "fast"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_backend() {
        let result: std::result::Result<DatabaseConfig, _> = toml::from_str(
            r#"
            type = "postgres"
            env = "DATABASE_URL"
            "#,
        );
        assert!(result.is_err());
    }
}
