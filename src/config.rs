//! Process configuration.
//!
//! Built once in `main` from command-line flags (with environment fallbacks)
//! and handed to the components that need it.

use std::net::SocketAddr;

use clap::Parser;

use crate::storage::dialect::Backend;

#[derive(Debug, Clone, Parser)]
#[command(name = "panopticon", about = "Collects homeserver usage reports into a SQL database", version)]
pub struct Config {
    /// The database driver to use.
    #[arg(long, value_enum, default_value = "sqlite3", env = "PANOPTICON_DB_DRIVER")]
    pub db_driver: Backend,

    /// The data source to use. For sqlite this is the path to the file,
    /// otherwise a connection URL.
    #[arg(long, default_value = "stats.db", env = "PANOPTICON_DB")]
    pub db: String,

    /// Port on which to serve HTTP.
    #[arg(long, default_value = "9001", env = "PANOPTICON_PORT")]
    pub port: u16,

    /// Address on which to serve HTTP.
    #[arg(long, default_value = "0.0.0.0", env = "PANOPTICON_BIND")]
    pub bind: String,

    /// Maximum number of pooled database connections.
    #[arg(long, default_value = "10", env = "PANOPTICON_MAX_CONNECTIONS")]
    pub max_connections: u32,
}

impl Config {
    pub fn listen_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.bind, self.port).parse()
    }
}
