use crate::{EngineError, SubmissionRecord};

pub trait SubmissionSink: Send + Sync {
    fn record(&self, record: &SubmissionRecord) -> Result<(), EngineError>;
}
