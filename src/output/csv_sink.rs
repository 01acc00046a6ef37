//! CSV result file
//!
//! The output has a `Domain,Email` header and one row per domain. Domains
//! without an email get the configured not-found marker.

use crate::crawler::CrawlResult;
use crate::output::traits::{OutputResult, ResultSink};
use crate::OutputError;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Header row of the result file
pub const HEADER: [&str; 2] = ["Domain", "Email"];

/// Writes results as CSV rows, flushing after each one
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    not_found_marker: String,
    rows: usize,
}

impl<W: Write> CsvSink<W> {
    /// Wraps a writer and emits the header row
    pub fn new(inner: W, not_found_marker: impl Into<String>) -> OutputResult<Self> {
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(inner);
        writer.write_record(HEADER)?;
        writer.flush()?;

        Ok(Self {
            writer,
            not_found_marker: not_found_marker.into(),
            rows: 0,
        })
    }

    /// Number of result rows written so far
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flushes and returns the underlying writer
    pub fn into_inner(self) -> OutputResult<W> {
        self.writer
            .into_inner()
            .map_err(|e| OutputError::Io(e.into_error()))
    }
}

impl CsvSink<File> {
    /// Creates (or truncates) the result file, creating missing parent directories
    pub fn create(path: &Path, not_found_marker: impl Into<String>) -> OutputResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                tracing::debug!("Creating output directory {}", parent.display());
                fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(path)?;
        Self::new(file, not_found_marker)
    }
}

impl<W: Write> ResultSink for CsvSink<W> {
    fn record(&mut self, result: &CrawlResult) -> OutputResult<()> {
        let email = result
            .email
            .as_deref()
            .unwrap_or(self.not_found_marker.as_str());
        self.writer.write_record([result.domain.as_str(), email])?;
        self.writer.flush()?;
        self.rows += 1;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Expands a leading `~` in the configured output path
pub fn resolve_output_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn result(domain: &str, email: Option<&str>) -> CrawlResult {
        CrawlResult {
            domain: domain.to_string(),
            email: email.map(str::to_string),
        }
    }

    fn written(sink: CsvSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_header_only_for_empty_batch() {
        let sink = CsvSink::new(Vec::new(), "not found").unwrap();
        assert_eq!(written(sink), "Domain,Email\n");
    }

    #[test]
    fn test_rows_and_not_found_marker() {
        let mut sink = CsvSink::new(Vec::new(), "not found").unwrap();
        sink.record(&result("http://acme.com", Some("info@acme.com")))
            .unwrap();
        sink.record(&result("www.empty.pl", None)).unwrap();

        assert_eq!(sink.rows(), 2);
        assert_eq!(
            written(sink),
            "Domain,Email\nhttp://acme.com,info@acme.com\nwww.empty.pl,not found\n"
        );
    }

    #[test]
    fn test_custom_marker() {
        let mut sink = CsvSink::new(Vec::new(), "-").unwrap();
        sink.record(&result("a.com", None)).unwrap();
        assert!(written(sink).ends_with("a.com,-\n"));
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let mut sink = CsvSink::new(Vec::new(), "not found").unwrap();
        sink.record(&result("http://a.com/?q=1,2", None)).unwrap();
        assert!(written(sink).contains("\"http://a.com/?q=1,2\",not found"));
    }

    #[test]
    fn test_create_makes_parent_dirs_and_flushes_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("out").join("emails.csv");

        let mut sink = CsvSink::create(&path, "not found").unwrap();
        sink.record(&result("a.com", Some("x@a.com"))).unwrap();

        // Readable before the sink is dropped
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "Domain,Email\na.com,x@a.com\n");
    }

    #[test]
    fn test_resolve_output_path_expands_tilde() {
        let resolved = resolve_output_path("~/Desktop/emails.csv");
        assert!(!resolved.starts_with("~"));
        assert!(resolved.ends_with("Desktop/emails.csv"));
    }

    #[test]
    fn test_resolve_output_path_leaves_absolute_paths() {
        assert_eq!(
            resolve_output_path("/tmp/emails.csv"),
            PathBuf::from("/tmp/emails.csv")
        );
    }
}
