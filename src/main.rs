use anyhow::Result;
use clap::Parser;

use event_catalog::cli::handlers;
use event_catalog::cli::{Cli, Commands};
use event_catalog::logging;

fn main() -> Result<()> {
    // A missing .env file is fine; real environment variables still apply.
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_file)?;

    match cli.command {
        Commands::Serve(config) => handlers::handle_serve(config),
        Commands::Schema => handlers::handle_schema(),
    }
}
