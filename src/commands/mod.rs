pub mod config;
pub mod init_db;
pub mod serve;

use crate::libs::config::Config;
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Run the web server")]
    Serve(serve::ServeArgs),
    #[command(about = "Create the database tables if they are missing")]
    InitDb(init_db::InitDbArgs),
    #[command(about = "Show or save the effective configuration")]
    Config(config::ConfigArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        dotenv::dotenv().ok();
        init_tracing();

        let app_config = Config::read()?;
        match cli.command {
            Commands::Serve(args) => serve::cmd(args, app_config).await,
            Commands::InitDb(args) => init_db::cmd(args, app_config),
            Commands::Config(args) => config::cmd(args, app_config),
        }
    }
}

/// Installs the log subscriber. `RUST_LOG` overrides the default `info` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();
}
