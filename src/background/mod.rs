//! Asynchronous loading of the remote feeds.

pub mod pipeline;
pub mod source;

pub use pipeline::{run_pipeline, PipelineReport, Stage, StageReport};
pub use source::{fetch_feature_collection, FeatureSource, FetchOutcome, HttpFeatureSource};
