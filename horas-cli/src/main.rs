mod api;
mod cli;
mod config;
mod report;
mod upload;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Credentials live in .env during development; absence is fine in
    // environments that export them directly.
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Upload(args) => cli::upload::handle_upload_command(args).await,
        Commands::Check(args) => cli::check::handle_check_command(args),
    }
}
