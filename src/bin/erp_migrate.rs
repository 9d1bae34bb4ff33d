use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;

use erp_schema::{
    config::{self, AppConfig},
    db,
    migrator::{BackendArg, Direction, MigrationService},
};

#[derive(Parser)]
#[command(
    name = "erp-migrate",
    about = "Apply, revert and inspect the ERP schema migrations",
    version
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "DATABASE_URL",
        help = "Database URL; overrides the configured database_url"
    )]
    database_url: Option<String>,
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON"
    )]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending migrations
    Up {
        #[arg(short = 'n', long, help = "Apply at most this many migrations")]
        steps: Option<u32>,
    },
    /// Revert applied migrations, newest first
    Down {
        #[arg(short = 'n', long, help = "Revert this many migrations (default 1)")]
        steps: Option<u32>,
    },
    /// List migrations and whether each is applied
    Status,
    /// Drop every table and apply all migrations again
    Fresh,
    /// Check that every pending migration reverts cleanly
    Verify,
    /// Print DDL without connecting to a database
    Sql {
        #[arg(long, help = "Target backend: postgres, mysql or sqlite")]
        backend: BackendArg,
        #[arg(long, action = ArgAction::SetTrue, help = "Render the down halves instead")]
        down: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Sql { backend, down } = &cli.command {
        let direction = if *down { Direction::Down } else { Direction::Up };
        let rendered = MigrationService::render_sql(backend.0, direction);
        if cli.json {
            return print_json(&rendered);
        }
        for migration in rendered {
            println!("-- {} ({backend})", migration.name);
            for statement in migration.statements {
                println!("{statement};");
            }
            println!();
        }
        return Ok(());
    }

    let mut config = config::load_config().context("failed to load application config")?;
    if let Some(url) = cli.database_url {
        config.database_url = url;
    }
    config::init_tracing(config.log_level(), config.log_json);

    let service = connect(&config).await?;

    match cli.command {
        Commands::Up { steps } => service.run_pending(steps).await?,
        Commands::Down { steps } => service.rollback(steps).await?,
        Commands::Fresh => service.fresh().await?,
        Commands::Status => {
            let status = service.status().await?;
            if cli.json {
                print_json(&status)?;
            } else {
                for entry in status {
                    let mark = if entry.applied { "applied" } else { "pending" };
                    println!("{mark:>8}  {}", entry.name);
                }
            }
        }
        Commands::Verify => {
            let report = service.verify_round_trip().await?;
            if cli.json {
                print_json(&report)?;
            } else {
                for outcome in &report.outcomes {
                    let mark = if outcome.differences.is_empty() { "ok" } else { "FAILED" };
                    println!("{mark:>6}  {}", outcome.migration);
                    for difference in &outcome.differences {
                        println!("        {difference}");
                    }
                }
            }
            if !report.is_clean() {
                bail!(
                    "{} migration(s) did not revert cleanly",
                    report.failures().count()
                );
            }
        }
        Commands::Sql { .. } => unreachable!("handled before connecting"),
    }

    Ok(())
}

async fn connect(config: &AppConfig) -> Result<MigrationService> {
    let pool = db::establish_connection_from_app_config(config)
        .await
        .context("failed to connect to database")?;
    Ok(MigrationService::new(Arc::new(pool)))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
