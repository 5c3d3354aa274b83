//! foglio-cli: headless blog API command-line client.
//! Thin front-end over the `foglio` library; every subcommand maps onto one
//! client operation, with post bodies rendered locally for `posts show`.
#![deny(clippy::all, clippy::pedantic)]

mod args;
mod context;
mod handlers;
mod io;
mod print;

use clap::Parser;

use args::{Cli, Commands};
use context::CliError;
use handlers::{admin, posts, tags, uploads};

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let settings = foglio::config::load(cli.config_file.as_deref(), &cli.overrides)?;
    foglio::telemetry::init(&settings.logging)?;
    let client = context::build_client(&settings)?;

    match cli.command {
        Commands::Posts(cmd) => posts::handle(&client, cmd.action).await?,
        Commands::Tags(cmd) => tags::handle(&client, cmd.action).await?,
        Commands::Admin(cmd) => admin::handle(&client, cmd.action).await?,
        Commands::Uploads(cmd) => uploads::handle(&client, cmd.action).await?,
    }

    Ok(())
}
