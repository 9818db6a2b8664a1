pub mod client;
pub mod dispatcher;

pub use client::{AnalysisProvider, HttpAnalysisProvider};
pub use dispatcher::{dispatch_batches, partition, Batch, BatchProgressCb};
