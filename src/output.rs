//! Output formatting for analysis responses.
//!
//! The response is treated as an opaque JSON document. Text mode only reads
//! `files[].path` and `files[].size_mb`.

use crate::ReportError;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Text,
}

/// Formats a (possibly absent) response.
///
/// JSON mode renders an absent response as `null`. Text mode fails with
/// [`ReportError::MissingFiles`] when there is no `files` array to list.
pub fn format_response(response: Option<&Value>, format: OutputFormat) -> Result<String, ReportError> {
    match format {
        OutputFormat::Json => format_json(response),
        OutputFormat::Text => format_text(response),
    }
}

/// Writes already formatted output to a file.
pub fn write_output(output: &str, path: impl AsRef<Path>) -> Result<(), ReportError> {
    fs::write(&path, output).map_err(|e| ReportError::io(path.as_ref(), e))
}

fn format_json(response: Option<&Value>) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(response.unwrap_or(&Value::Null))?)
}

fn format_text(response: Option<&Value>) -> Result<String, ReportError> {
    let files = response
        .and_then(|r| r.get("files"))
        .and_then(Value::as_array)
        .ok_or(ReportError::MissingFiles)?;
    let mut out = String::with_capacity(files.len() * 64);
    for file in files {
        out.push_str(&format!(
            "File: {} - Size: {} MB\n",
            field(file, "path"),
            field(file, "size_mb")
        ));
    }
    Ok(out)
}

// Strings print bare, anything else as its JSON text.
fn field(file: &Value, key: &str) -> String {
    match file.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_of_missing_response_is_null() {
        assert_eq!(format_response(None, OutputFormat::Json).unwrap(), "null");
    }

    #[test]
    fn json_is_pretty_printed() {
        let value = json!({"status": "received"});
        let out = format_response(Some(&value), OutputFormat::Json).unwrap();
        assert_eq!(out, "{\n  \"status\": \"received\"\n}");
    }

    #[test]
    fn text_lists_one_line_per_file() {
        let value = json!({
            "files": [
                {"path": "/data/a.txt", "size_mb": 0.5},
                {"path": "/data/b.png", "size_mb": 2}
            ]
        });
        let out = format_response(Some(&value), OutputFormat::Text).unwrap();
        assert_eq!(
            out,
            "File: /data/a.txt - Size: 0.5 MB\nFile: /data/b.png - Size: 2 MB\n"
        );
    }

    #[test]
    fn text_without_files_is_an_error() {
        assert!(matches!(
            format_response(None, OutputFormat::Text),
            Err(ReportError::MissingFiles)
        ));
        let value = json!({"status": "received"});
        assert!(matches!(
            format_response(Some(&value), OutputFormat::Text),
            Err(ReportError::MissingFiles)
        ));
    }
}
