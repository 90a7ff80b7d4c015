//! Voxpilot - voice command assistant
//!
//! Turns a transcribed utterance into a structured intent with a language
//! model, then dispatches it to desktop actions or a code generation
//! workflow.

pub mod codegen;
pub mod command;
pub mod core;
pub mod llm;
pub mod platform;
pub mod services;
pub mod session;
