// Library exports for pulse-pipeline
// The stages run strictly in order: synth (or dataset) → clean → aggregate

pub mod aggregate;
pub mod clean;
pub mod config;
pub mod dataset;
pub mod error;
pub mod pipeline;
pub mod synth;
pub mod text;

pub use config::Settings;
pub use error::{PipelineError, Result};
pub use pipeline::{run, PipelineOutput};
