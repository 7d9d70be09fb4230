use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::debug;

use crate::ports::SubmissionSink;
use crate::{EngineError, SubmissionRecord};

/// Appends one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesSink {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonLinesSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn read_all(&self) -> Result<Vec<SubmissionRecord>, EngineError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)
            .map_err(|e| EngineError::Sink(format!("failed to read submissions: {e}")))?;
        raw.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line)
                    .map_err(|e| EngineError::Sink(format!("corrupt submission row: {e}")))
            })
            .collect()
    }
}

impl SubmissionSink for JsonLinesSink {
    fn record(&self, record: &SubmissionRecord) -> Result<(), EngineError> {
        let line = serde_json::to_string(record)
            .map_err(|e| EngineError::Sink(format!("failed to encode submission: {e}")))?;

        let _guard = self
            .lock
            .lock()
            .map_err(|_| EngineError::Sink("submission file lock poisoned".to_string()))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| EngineError::Sink(format!("failed to open submissions file: {e}")))?;
        writeln!(file, "{line}")
            .map_err(|e| EngineError::Sink(format!("failed to append submission: {e}")))?;
        debug!("appended submission to {}", self.path.display());
        Ok(())
    }
}
