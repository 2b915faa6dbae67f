// Console layer: everything the binaries print goes through here so the
// markers and colours stay consistent between the two tools. Colours are
// only used when the target stream is a terminal, so piped output stays
// plain text.

use crate::api::ApiError;
use crossterm::style::{StyledContent, Stylize};
use crossterm::tty::IsTty;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::Display;
use std::io;
use std::time::Duration;

/// Sets up `env_logger` on stderr. Defaults to `warn` so log lines don't
/// duplicate the progress output; `RUST_LOG` overrides it.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

/// Spinner shown while a request is in flight. indicatif draws it on stderr
/// and draws nothing when stderr is not a terminal. Call `finish_and_clear`
/// before printing the outcome.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("  {spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Renders `content` with its style, or as plain text when `colored` is false.
fn paint(content: StyledContent<&str>, colored: bool) -> String {
    if colored {
        content.to_string()
    } else {
        content.content().to_string()
    }
}

fn out(content: StyledContent<&str>) -> String {
    paint(content, io::stdout().is_tty())
}

fn err(content: StyledContent<&str>) -> String {
    paint(content, io::stderr().is_tty())
}

pub fn banner(title: &str) {
    println!("--- {} ---\n", out(title.bold()));
}

pub fn success(message: impl Display) {
    println!("  {} {}", out("✓ SUCCESS:".green()), message);
}

pub fn failure(message: impl Display) {
    println!("  {} {}", out("✗ ERROR:".red()), message);
}

/// Indented detail line under a success or failure.
pub fn detail(label: &str, value: impl Display) {
    println!("  {}: {}", label, value);
}

/// Status code and body for HTTP errors, the raw error text otherwise.
pub fn api_error(error: &ApiError) {
    match error {
        ApiError::Status { status, body } => {
            detail("Status Code", status.as_u16());
            detail("Response", body);
        }
        other => detail("Exception", other),
    }
}

pub fn warning(message: impl Display) {
    println!("{} {}", out("⚠".yellow()), message);
}

/// Prints a fatal startup error with its whole cause chain.
pub fn fatal(error: &anyhow::Error) {
    eprintln!("{} {:#}", err("FATAL ERROR:".red().bold()), error);
}

pub fn hint(message: &str) {
    eprintln!("{}", message);
}
