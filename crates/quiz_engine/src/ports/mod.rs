pub mod submission_port;

pub use submission_port::SubmissionSink;
