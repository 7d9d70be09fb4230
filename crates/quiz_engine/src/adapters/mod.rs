pub mod jsonl_sink;
pub mod memory_sink;

pub use jsonl_sink::JsonLinesSink;
pub use memory_sink::MemorySink;
