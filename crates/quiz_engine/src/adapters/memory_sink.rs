use std::sync::{Arc, Mutex};

use crate::ports::SubmissionSink;
use crate::{EngineError, SubmissionRecord};

#[derive(Clone, Default, Debug)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<SubmissionRecord>>>,
}

impl MemorySink {
    pub fn take(&self) -> Vec<SubmissionRecord> {
        match self.records.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SubmissionSink for MemorySink {
    fn record(&self, record: &SubmissionRecord) -> Result<(), EngineError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| EngineError::Sink("memory sink poisoned".to_string()))?;
        guard.push(record.clone());
        Ok(())
    }
}
