pub mod runner;

pub use runner::{BatchError, BatchRunner, DEFAULT_BATCH_CONCURRENCY};
