//! SQL backend dialects.
//!
//! The backend is chosen once at startup. Everything that differs between
//! backends in the statements we emit (placeholder syntax, identity column,
//! connection URL shape) is answered here so the insert path never branches
//! on driver names.

use std::fmt;

use clap::ValueEnum;

/// Supported SQL backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    #[value(name = "sqlite3", alias = "sqlite")]
    Sqlite,
    #[value(name = "mysql")]
    MySql,
    #[value(name = "postgres", alias = "postgresql")]
    Postgres,
}

/// How a backend spells positional parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// `$1, $2, ...`
    Numbered,
    /// `?, ?, ...`
    Repeated,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Sqlite => "sqlite3",
            Backend::MySql => "mysql",
            Backend::Postgres => "postgres",
        }
    }

    pub fn placeholder_style(&self) -> PlaceholderStyle {
        match self {
            Backend::Sqlite | Backend::Postgres => PlaceholderStyle::Numbered,
            Backend::MySql => PlaceholderStyle::Repeated,
        }
    }

    /// Placeholder for the 1-based parameter `index`.
    pub fn placeholder(&self, index: usize) -> String {
        match self.placeholder_style() {
            PlaceholderStyle::Numbered => format!("${}", index),
            PlaceholderStyle::Repeated => "?".to_string(),
        }
    }

    /// Definition of the auto-incrementing `id` column.
    pub fn identity_column(&self) -> &'static str {
        match self {
            Backend::Sqlite => "id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT",
            Backend::MySql => "id INTEGER NOT NULL PRIMARY KEY AUTO_INCREMENT",
            Backend::Postgres => "id BIGSERIAL NOT NULL PRIMARY KEY",
        }
    }

    /// Turn a configured data source into a connection URL.
    ///
    /// SQLite accepts a bare file path (created if missing). The server
    /// backends expect a full URL.
    pub fn connect_url(&self, target: &str) -> String {
        match self {
            Backend::Sqlite if !target.starts_with("sqlite:") => {
                format!("sqlite://{}?mode=rwc", target)
            }
            _ => target.to_string(),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
