//! Batch conversion of uploaded files.
//!
//! A batch is every file of one upload request plus the single target format
//! they share. [`BatchConverter::process`] handles the files strictly one
//! after another:
//!
//! 1. validate the sanitized filename against the target
//! 2. save the upload to a per-request temp directory and check its size
//! 3. run the encoder with the quality policy's parameters
//! 4. remove the temp input, whatever happened in 2 and 3
//!
//! Failures are collected as user-facing messages; only request-level
//! problems (see [`crate::validator::RequestError`]) abort a batch, and
//! those are checked before a `BatchConverter` is involved.

mod runner;
mod types;

pub use runner::{download_url, BatchConverter, DOWNLOAD_ROUTE_PREFIX};
pub use types::{BatchResult, ConvertedFile, FileOutcome, UploadedFile};
