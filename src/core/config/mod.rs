//! Pipeline Configuration
//!
//! Operator-tunable knobs for the resume pipeline: the hybrid orchestrator's
//! confidence threshold, LLM timeout, blob size ceilings, and storage bucket names.

mod defaults;
mod io;
mod types;
mod validation;

pub use types::PipelineConfig;

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
