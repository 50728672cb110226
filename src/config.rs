//! Configuration module for startup flags and environment variables.
//!
//! Flags configure the framework-level subsystems (hooks, migrations, static
//! serving); the webhook shared secret comes from the environment and is read
//! once at startup into [`Config`], never per request.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Environment variable holding the shared webhook secret.
pub const HOOK_SECRET_ENV: &str = "MMD_HOOK_SECRET";

/// Command-line flags parsed at startup.
#[derive(Debug, Clone, Parser)]
#[command(name = "mmd-backend")]
#[command(about = "Donation review backend")]
pub struct Args {
    /// Directory with the app hook scripts (execution runtime is external)
    #[arg(long, default_value = "./app_hooks")]
    pub hooks_dir: PathBuf,

    /// Auto restart the app on hook script changes
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub hooks_watch: bool,

    /// Total prewarmed runtime instances for hook execution
    #[arg(long, default_value_t = 15)]
    pub hooks_pool: usize,

    /// Directory with the SQL migrations
    #[arg(long, default_value = "./migrations")]
    pub migrations_dir: PathBuf,

    /// Apply pending migrations at startup
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub automigrate: bool,

    /// Directory to serve static files from
    #[arg(long, default_value = "./public")]
    pub public_dir: PathBuf,

    /// Fallback to index.html on missing static paths (SPA routing)
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub index_fallback: bool,

    /// Directory holding the application data (SQLite database)
    #[arg(long, default_value = "./mmd_data")]
    pub data_dir: PathBuf,

    /// Address to bind the HTTP listener on
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port for the HTTP listener
    #[arg(long, env = "PORT", default_value_t = 8090)]
    pub port: u16,
}

/// Resolved application configuration.
///
/// Built from [`Args`] plus the environment. The hook secret is optional on
/// purpose: a missing secret is a per-request configuration error (HTTP 500
/// from the webhook endpoint), not a startup failure.
#[derive(Debug, Clone)]
pub struct Config {
    pub hooks_dir: PathBuf,
    pub hooks_watch: bool,
    pub hooks_pool: usize,
    pub migrations_dir: PathBuf,
    pub automigrate: bool,
    pub public_dir: PathBuf,
    pub index_fallback: bool,
    pub data_dir: PathBuf,
    pub host: String,
    pub port: u16,

    /// Shared secret compared against the `MMD-Signature` header.
    pub hook_secret: Option<String>,
}

impl Config {
    /// Parse flags from the process arguments and load the environment.
    pub fn load() -> Self {
        Self::from_args(Args::parse())
    }

    /// Build a configuration from already-parsed flags.
    pub fn from_args(args: Args) -> Self {
        Config {
            hooks_dir: args.hooks_dir,
            hooks_watch: args.hooks_watch,
            hooks_pool: args.hooks_pool,
            migrations_dir: args.migrations_dir,
            automigrate: args.automigrate,
            public_dir: args.public_dir,
            index_fallback: args.index_fallback,
            data_dir: args.data_dir,
            host: args.host,
            port: args.port,
            hook_secret: env::var(HOOK_SECRET_ENV).ok(),
        }
    }

    /// SQLite connection URL inside the data directory.
    ///
    /// `mode=rwc` creates the database file on first start.
    pub fn database_url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.data_dir.join("data.db").display())
    }

    /// Socket address for the HTTP listener.
    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], self.port)))
    }
}
