// Library root
// -----------
// The two binaries (`create-campaigns` and `upload-leads`) are thin
// wrappers around this library.
//
// Module responsibilities:
// - `config`: loads the `.env` file and the `LEMLIST_*` settings.
// - `api`: blocking HTTP client for the Lemlist endpoints we call.
// - `campaigns`: the create-campaigns loop.
// - `leads`: CSV lead records, validation and the add-lead payload.
// - `upload`: the upload-leads loop and its summary.
// - `console`: terminal output helpers (coloured markers, spinner, logging).
pub mod api;
pub mod campaigns;
pub mod config;
pub mod console;
pub mod leads;
pub mod upload;
