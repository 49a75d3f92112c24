//! # folder-report
//!
//! `folder_report` walks a directory tree, describes every regular file (size, extension and,
//! for text-like extensions, the first bytes of content), submits the resulting
//! [`FolderRecord`] to a remote analysis endpoint and formats the reply.
//!
//! # Features
//!
//! - `parallel`: Describes files on a Rayon pool. Walk order is preserved.
//! - `logging`: Enables debug logging via the `tracing` crate.
//!
//! # Example
//!
//! ```no_run
//! use folder_report::{ReportBuilder, ReportClient, ReportConfig, analyze_folder};
//! use folder_report::output::{OutputFormat, format_response};
//!
//! let options = ReportBuilder::new("/tmp/service_logs")
//!     .max_file_size_mb(10.0)
//!     .build();
//! let record = analyze_folder(&options).expect("Failed to scan directory");
//!
//! let client = ReportClient::new(ReportConfig::from_env().expect("API key not set")).unwrap();
//! let response = client.send(&record).unwrap_or_else(|e| {
//!     eprintln!("{}", e);
//!     None
//! });
//! println!("{}", format_response(response.as_ref(), OutputFormat::Json).unwrap());
//! ```

mod client;
mod engine;
mod error;
mod options;
pub mod output;
mod types;

pub use client::ReportClient;
pub use engine::{Walker, analyze_folder, analyze_folder_with, describe_file, skip_notice};
pub use error::ReportError;
pub use options::{
    API_KEY_ENV, DEFAULT_CONTENT_LIMIT, DEFAULT_ENDPOINT, DEFAULT_MAX_FILE_SIZE_MB, ENDPOINT_ENV,
    ReportBuilder, ReportConfig, ReportOptions, validate_size_ceiling,
};
pub use types::{
    BINARY_PLACEHOLDER, Described, FileRecord, FolderRecord, READ_ERROR_PLACEHOLDER,
    TEXT_EXTENSIONS,
};
