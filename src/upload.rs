// Bulk lead upload: reads the CSV file row by row, skips invalid rows and
// sends one add-lead request per valid row, pausing after each request.

use crate::api::ApiClient;
use crate::console;
use crate::leads::{Lead, LeadRecord};
use std::fmt;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

pub const DEFAULT_CSV_PATH: &str = "Prospects.csv";

/// Pause after every add-lead request, to stay under Lemlist's rate limit.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("CSV file not found at '{}'", .0.display())]
    CsvNotFound(PathBuf),
    #[error("cannot open CSV file '{}'", path.display())]
    OpenCsv {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Counters of one upload run. `skipped_rows` holds the display number of
/// each row rejected before any request: its zero-based data-row index + 2,
/// so the first row after the header is 2.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UploadSummary {
    pub total_processed: usize,
    pub successful: usize,
    pub failed: usize,
    pub skipped_rows: Vec<usize>,
}

impl fmt::Display for UploadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total processed: {}", self.total_processed)?;
        writeln!(f, "Successful: {}", self.successful)?;
        write!(f, "Failed: {}", self.failed)
    }
}

/// CSV reader with the settings the lead file needs: a header row and rows
/// that may be shorter or longer than the header.
pub fn leads_reader<R: io::Read>(rdr: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(rdr)
}

/// Opens the lead file. A missing file is reported as
/// [`UploadError::CsvNotFound`] so the caller can abort before any request.
pub fn open_leads_file(path: &Path) -> Result<csv::Reader<File>, UploadError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => UploadError::CsvNotFound(path.to_path_buf()),
        _ => UploadError::OpenCsv {
            path: path.to_path_buf(),
            source,
        },
    })?;
    Ok(leads_reader(file))
}

/// Uploads every valid row of `reader`, one request at a time.
///
/// Invalid rows are counted as failed without touching the network. Every
/// request, successful or not, is followed by `delay`.
pub fn upload_leads<R: io::Read>(
    client: &ApiClient,
    reader: &mut csv::Reader<R>,
    delay: Duration,
) -> UploadSummary {
    let mut summary = UploadSummary::default();

    for (index, record) in reader.deserialize::<LeadRecord>().enumerate() {
        let row = index + 2;

        let lead = match record {
            Ok(record) => record.validate().map_err(|e| e.to_string()),
            Err(e) => Err(format!("Unreadable row ({})", e)),
        };
        let lead = match lead {
            Ok(lead) => lead,
            Err(reason) => {
                log::warn!("Skipping row {}: {}", row, reason);
                console::warning(format!("SKIPPING ROW {}: {}", row, reason));
                summary.failed += 1;
                summary.skipped_rows.push(row);
                continue;
            }
        };

        summary.total_processed += 1;
        if upload_one(client, &lead, summary.total_processed) {
            summary.successful += 1;
        } else {
            summary.failed += 1;
        }

        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }

    summary
}

fn upload_one(client: &ApiClient, lead: &Lead, position: usize) -> bool {
    println!(
        "[{}] Processing: {} → Campaign: {}",
        position, lead.email, lead.campaign_id
    );

    let spinner = console::spinner("Adding lead...");
    let result = client.add_lead(&lead.campaign_id, &lead.to_request());
    spinner.finish_and_clear();

    match result {
        Ok(()) => {
            log::info!("Added {} to campaign {}", lead.email, lead.campaign_id);
            console::success("Lead added to campaign");
            println!();
            true
        }
        Err(error) => {
            log::error!(
                "Failed to add {} to campaign {}: {}",
                lead.email,
                lead.campaign_id,
                error
            );
            console::failure("Failed to add lead");
            console::api_error(&error);
            println!();
            false
        }
    }
}
