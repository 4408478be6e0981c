//! oxide-schema CLI
//!
//! Prints, creates and drops tables described in JSON definition files.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_schema::prelude::*;

/// Origin reported for tables dropped from the command line.
const CLI_ORIGIN: &str = "oxide-schema";

/// Dialect-aware CREATE TABLE generator for MySQL, PostgreSQL and SQLite.
#[derive(Parser)]
#[command(name = "oxide-schema")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database URL (SQLite path or connection string).
    #[arg(short, long, env = "DATABASE_URL", default_value = "sqlite:db.sqlite3")]
    database: String,

    /// Target engine for `sql` (mysql, postgres, sqlite).
    #[arg(short, long, global = true, env = "OXIDE_SCHEMA_ENGINE")]
    engine: Option<Engine>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the statements for every table in a definition file.
    Sql {
        /// Path to the JSON definition.
        file: PathBuf,
    },

    /// Create every table in a definition file.
    Create {
        /// Path to the JSON definition.
        file: PathBuf,
    },

    /// Drop one table.
    Drop {
        /// Table name.
        #[arg(short, long)]
        table: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Sql { file } => {
            let engine = cli
                .engine
                .context("--engine (or OXIDE_SCHEMA_ENGINE) is required for `sql`")?;
            let schema = SchemaDefinition::from_path(&file)
                .with_context(|| format!("Failed to load {}", file.display()))?;
            for statement in schema.render(engine)? {
                println!("{statement}");
            }
        }

        Commands::Create { file } => {
            let schema = SchemaDefinition::from_path(&file)
                .with_context(|| format!("Failed to load {}", file.display()))?;
            let executor = SqlxExecutor::connect(&cli.database).await?;
            if let Some(engine) = cli.engine {
                if Engine::from_backend_name(executor.backend_name()).ok() != Some(engine) {
                    warn!(
                        requested = %engine,
                        backend = executor.backend_name(),
                        "Ignoring --engine, using the connected backend"
                    );
                }
            }
            info!(tables = schema.tables.len(), "Creating tables...");
            schema.create_all(&executor).await?;
        }

        Commands::Drop { table } => {
            let executor = SqlxExecutor::connect(&cli.database).await?;
            Generator::new(CLI_ORIGIN)
                .with_table(table)
                .with_executor(executor)
                .drop()
                .await?;
        }
    }

    Ok(())
}
