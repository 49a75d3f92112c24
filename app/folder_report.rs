//! Command-line interface for folder-report.
//!
//! Scans a directory, submits the result to the analysis endpoint and prints
//! the endpoint's reply as JSON or as a plain-text file list.

use clap::{Parser, ValueEnum};
use folder_report::output::{self, OutputFormat};
use folder_report::{
    API_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_MAX_FILE_SIZE_MB, ENDPOINT_ENV, ReportBuilder,
    ReportClient, ReportConfig, ReportError, ReportOptions, analyze_folder,
    validate_size_ceiling,
};
use serde_json::Value;
use std::path::PathBuf;
use std::process::exit;

/// folder-report — scan a folder and submit it for analysis
#[derive(Parser)]
#[command(name = "folder-report", version, about, long_about = None)]
struct Cli {
    /// Root directory (default current dir)
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Skip files larger than this many megabytes
    #[arg(long, default_value_t = DEFAULT_MAX_FILE_SIZE_MB, value_parser = parse_size_ceiling)]
    max_size_mb: f64,

    /// Max depth (unlimited if not set)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Ignore patterns (can be repeated)
    #[arg(short = 'I', long = "ignore")]
    ignore_patterns: Vec<String>,

    /// Follow symlinks
    #[arg(long)]
    follow_links: bool,

    /// Visit entries in file-name order
    #[arg(long)]
    sort: bool,

    /// Analysis endpoint URL
    #[arg(long, env = ENDPOINT_ENV, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Bearer credential for the analysis endpoint
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,

    /// Format the local scan instead of sending it
    #[arg(long)]
    dry_run: bool,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Txt,
}

/// Parse a finite, non-negative megabyte ceiling.
fn parse_size_ceiling(s: &str) -> Result<f64, String> {
    let mb: f64 = s.parse().map_err(|e| format!("invalid number '{}': {}", s, e))?;
    validate_size_ceiling(mb).map_err(|e| e.to_string())
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => OutputFormat::Json,
            Format::Txt => OutputFormat::Text,
        }
    }
}

impl Cli {
    fn options(&self) -> ReportOptions {
        let builder = ReportBuilder::new(&self.root)
            .max_file_size_mb(self.max_size_mb)
            .follow_links(self.follow_links)
            .ignore_patterns(self.ignore_patterns.clone())
            .sort_by_name(self.sort);
        let builder = match self.max_depth {
            Some(depth) => builder.max_depth(depth),
            None => builder.no_limit_depth(),
        };
        builder.build()
    }

    fn config(&self) -> Result<ReportConfig, ReportError> {
        ReportConfig::new(
            self.endpoint.clone(),
            self.api_key.clone().unwrap_or_default(),
        )
    }
}

fn main() {
    let cli = Cli::parse();

    // Validate credentials before touching the filesystem.
    let client = if cli.dry_run {
        None
    } else {
        Some(fail_on_error(cli.config().and_then(ReportClient::new)))
    };

    let record = fail_on_error(analyze_folder(&cli.options()));

    let response = match client {
        Some(client) => match client.send(&record) {
            Ok(response) => response,
            Err(e @ ReportError::Transport(_)) => {
                eprintln!("{}", e);
                None
            }
            Err(e) => fail_on_error(Err(e)),
        },
        None => Some(fail_on_error(
            serde_json::to_value(&record).map_err(ReportError::from),
        )),
    };

    emit(response.as_ref(), cli.format.into(), cli.output.as_ref());
}

fn emit(response: Option<&Value>, format: OutputFormat, path: Option<&PathBuf>) {
    let rendered = fail_on_error(output::format_response(response, format));
    match path {
        Some(path) => fail_on_error(output::write_output(&rendered, path)),
        None if rendered.ends_with('\n') => print!("{}", rendered),
        None => println!("{}", rendered),
    }
}

fn fail_on_error<T>(result: Result<T, ReportError>) -> T {
    result.unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        exit(1);
    })
}
