//! The vigil review pipeline.
//!
//! Provides the per-PR pipeline stages: diff retrieval through the GitHub
//! CLI, prompt construction, model invocation against the Bedrock runtime,
//! review orchestration with a per-item failure boundary, and markdown
//! report rendering.

pub mod diff;
pub mod llm;
pub mod pipeline;
pub mod prompt;
pub mod report;
