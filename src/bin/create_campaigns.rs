// Entrypoint for `create-campaigns`.
// - Loads the API key before anything else: no request is sent without it.
// - Per-campaign failures are reported but never change the exit code.

use anyhow::{Context, Result};
use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use lemlist_cli::api::ApiClient;
use lemlist_cli::campaigns::{create_campaigns, DEFAULT_CAMPAIGN_NAMES};
use lemlist_cli::config::{self, ConfigError};
use lemlist_cli::console;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about = "Create Lemlist campaigns by name", long_about = None)]
struct Args {
    /// Campaign names, created in the given order
    #[arg(
        value_parser = NonEmptyStringValueParser::new(),
        help = "Campaign names to create, in order (defaults to the built-in list)"
    )]
    names: Vec<String>,

    /// Env file holding LEMLIST_API_KEY
    #[arg(long, help = "Load variables from this file instead of looking up .env")]
    env_file: Option<PathBuf>,
}

fn run(args: Args) -> Result<()> {
    let settings = config::load(args.env_file.as_deref()).context("Invalid configuration")?;
    let api = ApiClient::from_settings(&settings).context("Failed to set up the Lemlist client")?;

    let names = if args.names.is_empty() {
        DEFAULT_CAMPAIGN_NAMES.iter().map(|n| n.to_string()).collect()
    } else {
        args.names
    };

    console::banner("Starting Lemlist Campaign Creation");
    let outcomes = create_campaigns(&api, names.as_slice());
    let created = outcomes.iter().filter(|o| o.is_created()).count();
    log::info!("{} of {} campaigns created", created, outcomes.len());
    console::banner("Campaign creation complete");
    Ok(())
}

fn main() -> ExitCode {
    console::init_logging();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            console::fatal(&e);
            if e.downcast_ref::<ConfigError>().is_some() {
                console::hint("Create a .env file and add the line: LEMLIST_API_KEY='your_key_here'");
            }
            ExitCode::FAILURE
        }
    }
}
