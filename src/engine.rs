use crate::error::ReportError;
use crate::options::{ReportOptions, validate_size_ceiling};
use crate::types::{
    BINARY_PLACEHOLDER, Described, FileRecord, FolderRecord, READ_ERROR_PLACEHOLDER,
    is_text_extension,
};
use ignore::WalkBuilder;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
#[cfg(feature = "logging")]
use tracing;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Depth-first walk over every entry under a root, directories before their children.
///
/// No hidden-file or ignore-file filtering is applied; only `ignore_patterns` prune entries.
/// Symlinks to directories are only descended into when `follow_links` is set.
pub struct Walker {
    inner: ignore::Walk,
}
impl Walker {
    pub fn new(options: &ReportOptions) -> Result<Self, ReportError> {
        let mut builder = WalkBuilder::new(&options.root);
        builder
            .standard_filters(false)
            .max_depth(options.max_depth)
            .follow_links(options.follow_links);
        if options.sort_by_name {
            builder.sort_by_file_name(|a, b| a.cmp(b));
        }
        if !options.ignore_patterns.is_empty() {
            let mut glob_builder = globset::GlobSetBuilder::new();
            for pattern in &options.ignore_patterns {
                let glob = globset::Glob::new(pattern).map_err(|e| {
                    ReportError::Walk(format!("Invalid glob pattern '{}': {}", pattern, e))
                })?;
                glob_builder.add(glob);
            }
            let matcher = glob_builder
                .build()
                .map_err(|e| ReportError::Walk(format!("Failed to build glob set: {}", e)))?;
            builder.filter_entry(move |entry| !matcher.is_match(entry.path()));
        }
        Ok(Self {
            inner: builder.build(),
        })
    }
    /// Lazily yields the regular files reached by the walk.
    ///
    /// Symlinks to files count as files; directories are traversed but never yielded.
    pub fn files(self) -> impl Iterator<Item = Result<PathBuf, ReportError>> {
        self.inner.filter_map(|result| match result {
            Ok(entry) if entry.path().is_file() => Some(Ok(entry.into_path())),
            Ok(_) => None,
            Err(e) => Some(Err(ReportError::Walk(e.to_string()))),
        })
    }
}

/// Builds the record for one file, or reports it as skipped when it exceeds
/// `options.max_file_size_mb`.
///
/// A failed read of an allow-listed file is not an error: the record carries
/// [`READ_ERROR_PLACEHOLDER`] instead of content.
pub fn describe_file(path: &Path, options: &ReportOptions) -> Result<Described, ReportError> {
    let metadata = fs::metadata(path).map_err(|e| ReportError::io(path, e))?;
    let size_bytes = metadata.len();
    let size_mb = size_bytes as f64 / BYTES_PER_MB;
    let absolute = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if size_mb > options.max_file_size_mb {
        #[cfg(feature = "logging")]
        tracing::debug!(
            "File too large ({:.2} MB > {} MB), skipping",
            size_mb,
            options.max_file_size_mb
        );
        return Ok(Described::Skipped {
            path: absolute,
            size_mb,
        });
    }
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = file_extension(&name);
    let content = if is_text_extension(&extension) {
        match read_content_prefix(path, options.content_limit) {
            Ok(content) => content,
            Err(_e) => {
                #[cfg(feature = "logging")]
                tracing::debug!("Failed to read {}: {}", path.display(), _e);
                READ_ERROR_PLACEHOLDER.to_string()
            }
        }
    } else {
        BINARY_PLACEHOLDER.to_string()
    };
    Ok(Described::Record(FileRecord {
        name,
        path: absolute,
        size_bytes,
        size_mb,
        extension,
        content,
    }))
}

/// Lowercased text after the last `.` of a file name, so `.log` yields `log`.
fn file_extension(name: &str) -> String {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

fn read_content_prefix(path: &Path, limit: usize) -> io::Result<String> {
    let file = File::open(path)?;
    let mut buf = Vec::with_capacity(limit.min(8192));
    file.take(limit as u64).read_to_end(&mut buf)?;
    Ok(decode_prefix(buf))
}

/// Decodes a byte prefix, dropping a multi-byte character cut off at the end
/// so the result stays a prefix of the original bytes.
fn decode_prefix(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            let utf8 = err.utf8_error();
            let bytes = err.into_bytes();
            if utf8.error_len().is_none() {
                String::from_utf8_lossy(&bytes[..utf8.valid_up_to()]).into_owned()
            } else {
                String::from_utf8_lossy(&bytes).into_owned()
            }
        }
    }
}

/// Console line emitted for a file over the size ceiling.
pub fn skip_notice(path: &Path, size_mb: f64) -> String {
    format!("Skipping large file: {} ({:.2} MB)", path.display(), size_mb)
}

/// Scans `options.root` and prints a skip notice to stderr for each oversized file.
pub fn analyze_folder(options: &ReportOptions) -> Result<FolderRecord, ReportError> {
    analyze_folder_with(options, |path, size_mb| {
        eprintln!("{}", skip_notice(path, size_mb))
    })
}

/// Scans `options.root`, calling `on_skip` in walk order for each oversized file.
pub fn analyze_folder_with<F>(options: &ReportOptions, mut on_skip: F) -> Result<FolderRecord, ReportError>
where
    F: FnMut(&Path, f64),
{
    #[cfg(feature = "logging")]
    tracing::debug!("Analyzing folder: {}", options.root.display());
    validate_size_ceiling(options.max_file_size_mb)?;
    let metadata = fs::metadata(&options.root)
        .map_err(|e| ReportError::InvalidPath(format!("{}: {}", options.root.display(), e)))?;
    if !metadata.is_dir() {
        return Err(ReportError::InvalidPath(format!(
            "{} is not a directory",
            options.root.display()
        )));
    }
    let mut record = FolderRecord::new(folder_name(&options.root));
    let walker = Walker::new(options)?;
    #[cfg(not(feature = "parallel"))]
    let described = walker
        .files()
        .map(|path| path.and_then(|p| describe_file(&p, options)));
    #[cfg(feature = "parallel")]
    let described = describe_parallel(walker, options)?;
    for outcome in described {
        match outcome? {
            Described::Record(file) => record.push(file),
            Described::Skipped { path, size_mb } => on_skip(&path, size_mb),
        }
    }
    #[cfg(feature = "logging")]
    tracing::debug!("Collected {} file records", record.total_files);
    Ok(record)
}

// Outcomes stay in walk order so the caller sees the first failure in that order.
#[cfg(feature = "parallel")]
fn describe_parallel(
    walker: Walker,
    options: &ReportOptions,
) -> Result<Vec<Result<Described, ReportError>>, ReportError> {
    let paths = walker.files().collect::<Result<Vec<_>, _>>()?;
    Ok(paths
        .par_iter()
        .map(|path| describe_file(path, options))
        .collect())
}

fn folder_name(root: &Path) -> String {
    let canonical = fs::canonicalize(root).ok();
    canonical
        .as_deref()
        .and_then(Path::file_name)
        .or_else(|| root.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_prefix_drops_cut_multibyte_tail() {
        let mut bytes = "ab".as_bytes().to_vec();
        bytes.extend_from_slice(&"é".as_bytes()[..1]);
        assert_eq!(decode_prefix(bytes), "ab");
    }

    #[test]
    fn decode_prefix_replaces_invalid_bytes() {
        let bytes = vec![b'a', 0xff, b'b'];
        assert_eq!(decode_prefix(bytes), "a\u{fffd}b");
    }

    #[test]
    fn extension_follows_last_dot() {
        assert_eq!(file_extension("report.TXT"), "txt");
        assert_eq!(file_extension("archive.tar.gz"), "gz");
        assert_eq!(file_extension(".log"), "log");
        assert_eq!(file_extension("Makefile"), "");
        assert_eq!(file_extension("trailing."), "");
    }

    #[test]
    fn skip_notice_rounds_to_two_decimals() {
        let line = skip_notice(Path::new("/tmp/big.log"), 15.0);
        assert_eq!(line, "Skipping large file: /tmp/big.log (15.00 MB)");
    }
}
