//! Move Logger
//!
//! Append-only JSONL log of executed moves.

use schelling_events::MoveRecord;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub struct MoveLogger {
    writer: Option<BufWriter<File>>,
    record_count: u64,
}

impl MoveLogger {
    /// Create a new logger writing to the specified path, truncating any previous log
    pub fn new(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            record_count: 0,
        })
    }

    /// Create a logger that discards records
    pub fn null() -> Self {
        Self {
            writer: None,
            record_count: 0,
        }
    }

    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    pub fn log(&mut self, record: &MoveRecord) -> io::Result<()> {
        self.record_count += 1;
        if let Some(ref mut writer) = self.writer {
            let json = serde_json::to_string(record)?;
            writeln!(writer, "{}", json)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for MoveLogger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!("Failed to flush move log: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_null_logger_counts() {
        let mut logger = MoveLogger::null();
        logger.log(&MoveRecord::new(1, 0, 2, 3)).unwrap();
        assert_eq!(logger.record_count(), 1);
    }

    #[test]
    fn test_writes_one_line_per_move() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moves.jsonl");
        {
            let mut logger = MoveLogger::new(&path).unwrap();
            logger.log(&MoveRecord::new(1, 4, 0, 9)).unwrap();
            logger.log(&MoveRecord::new(2, 1, 3, 0)).unwrap();
        }

        let content = fs::read_to_string(&path).unwrap();
        let records: Vec<MoveRecord> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].key(), (1, 0));
    }
}
