//! Argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fixtures::{AdminRole, MemberStatus};
use shared::{HarnessConfig, SharedResult};

#[derive(Parser, Debug)]
#[command(name = "tester")]
#[command(about = "Fixture and server lifecycle tooling for the end-to-end suite")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Root of the application under test
    #[arg(long, global = true)]
    pub project_root: Option<PathBuf>,

    /// SQLite database file (default: <project-root>/data/ysh-robot.db)
    #[arg(long, global = true)]
    pub db_path: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Wipe all fixture tables back to the baseline settings and admin
    Reset,

    /// Insert fixture rows
    Seed {
        #[command(subcommand)]
        what: SeedCommand,
    },

    /// Print the number of rows in a table
    Count { table: String },

    /// Run a read-only statement and print each row as JSON
    Query { sql: String },

    /// Start the application on a free port and keep it running until Ctrl+C
    Serve {
        /// Stop as soon as the server is ready
        #[arg(long)]
        check: bool,

        /// Seconds to wait for the server to answer
        #[arg(long, default_value = "30")]
        startup_timeout_secs: u64,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum SeedCommand {
    /// Default site settings
    Settings,

    /// An administrator account
    Admin {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long, default_value = "super_admin")]
        role: AdminRole,
    },

    /// Numbered published announcements
    Announcements {
        #[arg(default_value = "3")]
        count: u32,
    },

    /// Numbered visible bios
    Bios {
        #[arg(default_value = "3")]
        count: u32,
    },

    /// Numbered visible gallery images
    Gallery {
        #[arg(default_value = "3")]
        count: u32,
    },

    /// A regular member
    Member {
        #[arg(long, default_value = "Test")]
        first_name: String,
        #[arg(long, default_value = "Member")]
        last_name: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, default_value = "active")]
        status: MemberStatus,
        #[arg(long)]
        year: Option<i32>,
    },
}

impl Args {
    /// Apply command-line overrides on top of a loaded configuration
    pub fn apply_to(&self, mut config: HarnessConfig) -> SharedResult<HarnessConfig> {
        if let Some(root) = &self.project_root {
            config = config.with_project_root(root);
        }
        if let Some(db_path) = &self.db_path {
            config = config.with_db_path(db_path);
        }
        if let Some(level) = &self.log_level {
            config = config.with_log_level(level)?;
        }
        Ok(config)
    }
}
