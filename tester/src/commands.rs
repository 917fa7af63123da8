//! Subcommand handlers

use std::time::Duration;

use anyhow::{Context, Result};
use fixtures::{AdminSeed, FixtureStore, MemberSeed};
use lifecycle::{ServerConfig, ServerManager};
use shared::logging::{log_shutdown, log_startup, log_success};
use shared::{ComponentId, HarnessConfig, component_info};

use crate::cli::{Command, SeedCommand};

/// Execute one subcommand with a resolved configuration
pub async fn run(command: Command, config: &HarnessConfig) -> Result<()> {
    match command {
        Command::Reset => {
            let mut store = open_store(config)?;
            store.reset()?;
            log_success(ComponentId::Fixtures, "Database reset to baseline");
        }
        Command::Seed { what } => {
            let mut store = open_store(config)?;
            seed(&mut store, what)?;
        }
        Command::Count { table } => {
            let store = open_store(config)?;
            println!("{}", store.row_count(&table)?);
        }
        Command::Query { sql } => {
            let store = open_store(config)?;
            for row in store.query(&sql)? {
                println!("{}", row.to_json());
            }
        }
        Command::Serve {
            check,
            startup_timeout_secs,
        } => serve(config, check, Duration::from_secs(startup_timeout_secs)).await?,
    }
    Ok(())
}

fn open_store(config: &HarnessConfig) -> Result<FixtureStore> {
    let mut store = FixtureStore::from_config(config);
    store
        .connect()
        .with_context(|| format!("Opening fixture database {}", config.db_path.display()))?;
    Ok(store)
}

fn seed(store: &mut FixtureStore, what: SeedCommand) -> Result<()> {
    match what {
        SeedCommand::Settings => {
            store.seed_settings()?;
            log_success(ComponentId::Fixtures, "Default settings written");
        }
        SeedCommand::Admin {
            email,
            first_name,
            last_name,
            role,
        } => {
            let seed = AdminSeed {
                email,
                first_name,
                last_name,
                role,
            };
            println!("{}", store.seed_admin(seed)?);
        }
        SeedCommand::Announcements { count } => print_ids(&store.seed_announcements(count)?),
        SeedCommand::Bios { count } => print_ids(&store.seed_bios(count)?),
        SeedCommand::Gallery { count } => print_ids(&store.seed_gallery(count)?),
        SeedCommand::Member {
            first_name,
            last_name,
            email,
            status,
            year,
        } => {
            let mut seed = MemberSeed::new().name(first_name, last_name).status(status);
            if let Some(email) = email {
                seed = seed.email(email);
            }
            if let Some(year) = year {
                seed = seed.membership_year(year);
            }
            println!("{}", store.seed_member(seed)?);
        }
    }
    Ok(())
}

fn print_ids(ids: &[i64]) {
    for id in ids {
        println!("{id}");
    }
}

async fn serve(config: &HarnessConfig, check: bool, startup_timeout: Duration) -> Result<()> {
    let mut server_config = ServerConfig::node_app(&config.project_root);
    server_config.startup_timeout = startup_timeout;

    log_startup(ComponentId::Tester, &format!("`{}` in {}", server_config.command_line(), config.project_root.display()));
    let mut server = ServerManager::new(server_config)?;

    let base_url = match server.start().await {
        Ok(url) => url,
        Err(e) => {
            // A timed-out child is still attached
            server.stop().await?;
            return Err(e).context("Server failed to start");
        }
    };
    println!("{base_url}");

    if !check {
        component_info!(ComponentId::Tester, "Press Ctrl+C to stop the server");
        tokio::signal::ctrl_c().await?;
    }

    let outcome = server.stop().await?;
    log_shutdown(ComponentId::Tester, &format!("{outcome:?}"));
    Ok(())
}
