pub mod catalog;
pub mod config;
pub mod dataset;
pub mod fetch;
pub mod pipeline;
pub mod sink;
pub mod storage;

pub use pipeline::{IngestPipeline, IngestPlan, RunOutcome};
