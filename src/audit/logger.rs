//! Append-only JSONL audit log

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, ErrorKind, Write};
use std::path::PathBuf;

use crate::error::{ExpenseError, ExpenseResult};

use super::entry::AuditEntry;

/// Writes one JSON object per line to the audit log and reads them back
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append an entry as a single line
    pub fn log(&self, entry: &AuditEntry) -> ExpenseResult<()> {
        let mut line = serde_json::to_string(entry)
            .map_err(|e| ExpenseError::Json(format!("Cannot encode audit entry: {}", e)))?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| audit_io("open", e))?;

        file.write_all(line.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| audit_io("append to", e))
    }

    /// All entries, oldest first; blank lines are skipped
    pub fn read_all(&self) -> ExpenseResult<Vec<AuditEntry>> {
        let file = match File::open(&self.log_path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(audit_io("open", e)),
        };

        BufReader::new(file)
            .lines()
            .enumerate()
            .filter(|(_, line)| line.as_ref().map_or(true, |l| !l.trim().is_empty()))
            .map(|(index, line)| -> ExpenseResult<AuditEntry> {
                let line = line.map_err(|e| audit_io("read", e))?;
                serde_json::from_str(&line).map_err(|e| {
                    ExpenseError::Json(format!("Bad audit entry on line {}: {}", index + 1, e))
                })
            })
            .collect()
    }

    /// The most recent `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> ExpenseResult<Vec<AuditEntry>> {
        let mut all_entries = self.read_all()?;
        let start = all_entries.len().saturating_sub(count);
        Ok(all_entries.split_off(start))
    }

    pub fn entry_count(&self) -> ExpenseResult<usize> {
        Ok(self.read_all()?.len())
    }

    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}

fn audit_io(action: &str, err: io::Error) -> ExpenseError {
    ExpenseError::Io(format!("Failed to {} audit log: {}", action, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::{EntityType, Operation};
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    fn expense_entry(i: usize) -> AuditEntry {
        AuditEntry::create(
            EntityType::Expense,
            format!("exp-{}", i),
            None,
            &json!({"amount": i * 100}),
        )
    }

    #[test]
    fn test_empty_log() {
        let (logger, _temp) = create_test_logger();
        assert_eq!(logger.entry_count().unwrap(), 0);
        assert!(logger.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_log_and_read_back() {
        let (logger, temp) = create_test_logger();
        logger.log(&expense_entry(1)).unwrap();

        let reopened = AuditLogger::new(temp.path().join("audit.log"));
        let entries = reopened.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[0].entity_type, EntityType::Expense);
    }

    #[test]
    fn test_read_recent_keeps_order() {
        let (logger, _temp) = create_test_logger();
        for i in 0..10 {
            logger.log(&expense_entry(i)).unwrap();
        }

        let recent = logger.read_recent(3).unwrap();
        let ids: Vec<_> = recent.iter().map(|e| e.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["exp-7", "exp-8", "exp-9"]);
        assert_eq!(logger.read_recent(50).unwrap().len(), 10);
    }
}
