//! Running the CLI

// Allow exits because in this file we ideally handle all errors with known exit codes
#![allow(clippy::exit)]

use crate::db;
use crate::db::retirement::retire_account;
use crate::server::app::serve;
use crate::utils::config::Settings;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Gatehouse serves third-party login callbacks and account retirement.
/// Run from the data directory or pass the path to it.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the default `SQLite` database. Defaults to cwd.
    #[arg(short, long, default_value_t = String::from("."))]
    data_dir: String,
    /// Path to a TOML settings file.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Gatehouse cli subcommands
    #[command(subcommand)]
    subcommands: Subcommands,
}

/// Gatehouse subcommands
#[derive(Clone, clap::Subcommand)]
enum Subcommands {
    /// Serve the account service over HTTP
    Serve {
        /// Port on which to serve.
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },
    /// Delete a retiring user's data from every retirable table
    Retire {
        /// Id of the retiring user.
        #[arg(short, long)]
        user_id: i64,
        /// Email of the retiring user.
        #[arg(short, long)]
        email: String,
    },
}

/// Log to stdout, filtered by `RUST_LOG` and at `info` by default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Retire an account from the command line.
fn retire(data_dir: &Path, user_id: i64, email: &str) -> anyhow::Result<()> {
    actix_web::rt::System::new().block_on(async {
        let connection = db::init::connect(data_dir).await?;
        let report = retire_account(&connection, user_id, email).await?;
        if report.any() {
            tracing::info!("Retired data of user {user_id}: {report:?}");
        } else {
            tracing::info!("Nothing stored for user {user_id}");
        }
        Ok::<(), anyhow::Error>(())
    })
}

/// Main entrypoint to application
pub fn run() {
    init_tracing();
    tracing::debug!("Starting application");
    let cli = Cli::parse();
    let data_dir = Path::new(&cli.data_dir);
    let settings = Settings::load(cli.config.as_deref()).unwrap_or_else(|err| {
        tracing::error!("error: could not load settings: {err:?}");
        std::process::exit(1);
    });

    let result = match cli.subcommands {
        Subcommands::Serve { port } => serve(data_dir, settings, port).map_err(anyhow::Error::from),
        Subcommands::Retire { user_id, email } => retire(data_dir, user_id, &email),
    };
    if let Err(err) = result {
        tracing::error!("Error: {err:?}");
        std::process::exit(1);
    }
}
