// Entrypoint for `upload-leads`.
// - API key and CSV file are both checked before the first request.
// - Failed rows are counted in the summary, not in the exit code.

use anyhow::{Context, Result};
use clap::Parser;
use lemlist_cli::api::ApiClient;
use lemlist_cli::config::{self, ConfigError};
use lemlist_cli::console;
use lemlist_cli::upload::{
    open_leads_file, upload_leads, UploadError, DEFAULT_CSV_PATH, DEFAULT_DELAY,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Upload leads from a CSV file to their Lemlist campaigns", long_about = None)]
struct Args {
    /// CSV file with email, firstName, lastName, companyName, campaignId and
    /// customOpeningLine columns
    #[arg(long, default_value = DEFAULT_CSV_PATH, help = "CSV file containing the leads")]
    csv: PathBuf,

    /// Pause after each request, in milliseconds
    #[arg(long, default_value_t = DEFAULT_DELAY.as_millis() as u64, help = "Delay between two requests (ms)")]
    delay_ms: u64,

    /// Env file holding LEMLIST_API_KEY
    #[arg(long, help = "Load variables from this file instead of looking up .env")]
    env_file: Option<PathBuf>,
}

fn run(args: Args) -> Result<()> {
    let settings = config::load(args.env_file.as_deref()).context("Invalid configuration")?;
    let mut reader = open_leads_file(&args.csv).context("Cannot read leads")?;
    let api = ApiClient::from_settings(&settings).context("Failed to set up the Lemlist client")?;

    console::banner("Starting Lemlist Lead Upload");
    let summary = upload_leads(&api, &mut reader, Duration::from_millis(args.delay_ms));
    drop(reader);

    println!();
    console::banner("Upload Complete");
    println!("{}", summary);
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
                console::hint("Create a .env file with your API key (see .env.example)");
            } else if e.downcast_ref::<UploadError>().is_some() {
                console::hint("Create your CSV file with lead data (see Prospects.csv.example for format)");
            }
            ExitCode::FAILURE
        }
    }
}
