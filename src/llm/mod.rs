//! Inference client and intent extraction

pub mod client;
pub mod parser;

pub use client::{BlockingLlm, Inference, LlmClient};
pub use parser::{extract_intent, try_extract_intent, ExtractionFailure};
