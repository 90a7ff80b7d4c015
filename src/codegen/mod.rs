//! Code generation pipeline
//!
//! description -> inference -> classify -> filename -> write -> editor

pub mod classify;
pub mod filename;
pub mod workflow;

pub use classify::{classify, CodeExtension};
pub use filename::{synthesize, timestamped_name, unix_now};
pub use workflow::{CodeArtifact, CodeWorkflow, GeneratedCode};
