//! Append-only log file sink
//!
//! The file is opened and closed for every record, so nothing is held open
//! between records and each append is a complete filesystem operation.
//! Existing content is never truncated.

use super::RecordSink;
use crate::error::{Error, Result};
use crate::record::Record;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Appends records to a text file, one per line
pub struct LogAppender {
    path: PathBuf,
}

impl LogAppender {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append the record followed by a newline
    pub fn append(&self, record: &Record) -> Result<()> {
        let persist_err = |source: std::io::Error| Error::Persist {
            path: self.path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(persist_err)?;

        // Single write so a record and its terminator land together
        let mut line = Vec::with_capacity(record.len() + 1);
        line.extend_from_slice(record.as_bytes());
        line.push(b'\n');
        file.write_all(&line).map_err(persist_err)?;
        file.flush().map_err(persist_err)?;

        Ok(())
    }
}

impl RecordSink for LogAppender {
    fn name(&self) -> &'static str {
        "log"
    }

    fn accept(&mut self, record: &Record) -> Result<()> {
        self.append(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_creates_file_and_appends_lines() {
        let dir = TempDir::new().unwrap();
        let appender = LogAppender::new(dir.path().join("log"));

        appender.append(&Record::from("T=21.5,H=40")).unwrap();
        appender.append(&Record::from("T=21.6,H=41")).unwrap();

        let contents = fs::read_to_string(appender.path()).unwrap();
        assert_eq!(contents, "T=21.5,H=40\nT=21.6,H=41\n");
    }

    #[test]
    fn test_existing_content_preserved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log");
        fs::write(&path, "T=20.0,H=38\n").unwrap();

        let mut appender = LogAppender::new(&path);
        appender.accept(&Record::from("T=21.0,H=39\n")).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "T=20.0,H=38\nT=21.0,H=39\n");
    }

    #[test]
    fn test_empty_record_is_empty_line() {
        let dir = TempDir::new().unwrap();
        let appender = LogAppender::new(dir.path().join("log"));

        appender.append(&Record::from("\n")).unwrap();

        assert_eq!(fs::read(appender.path()).unwrap(), b"\n");
    }

    #[test]
    fn test_unwritable_path_is_persist_error() {
        let dir = TempDir::new().unwrap();
        let appender = LogAppender::new(dir.path().join("missing").join("log"));

        match appender.append(&Record::from("T=21.5,H=40")) {
            Err(Error::Persist { path, .. }) => assert_eq!(path, appender.path()),
            other => panic!("expected persist error, got {:?}", other),
        }
    }
}
