//! Generate source code, persist it, and open it in an editor

use crate::codegen::classify::{classify, CodeExtension};
use crate::codegen::filename::synthesize;
use crate::core::error::Result;
use crate::llm::client::Inference;
use crate::platform::{Editor, Platform};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// A generated file. Written once, never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeArtifact {
    pub code: String,
    pub extension: CodeExtension,
    pub filename: String,
    pub path: PathBuf,
}

/// Result of a successful generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCode {
    pub artifact: CodeArtifact,
    /// `None` when every editor in the fallback chain failed to start
    pub editor: Option<Editor>,
}

/// Code generation workflow over borrowed collaborators
pub struct CodeWorkflow<'a> {
    inference: &'a dyn Inference,
    platform: &'a dyn Platform,
    output_dir: &'a Path,
}

impl<'a> CodeWorkflow<'a> {
    pub fn new(
        inference: &'a dyn Inference,
        platform: &'a dyn Platform,
        output_dir: &'a Path,
    ) -> Self {
        Self {
            inference,
            platform,
            output_dir,
        }
    }

    /// Generate code for `description` at time `now` (unix seconds)
    ///
    /// Inference failures yield `Ok(None)`; write failures are errors.
    pub fn generate_and_persist(
        &self,
        description: &str,
        now: u64,
    ) -> Result<Option<GeneratedCode>> {
        let Some(code) = self.generate(description) else {
            return Ok(None);
        };

        let extension = classify(&code);
        let filename = synthesize(description, extension.as_str(), now);
        let path = self.output_dir.join(&filename);

        fs::write(&path, &code)?;
        tracing::info!(
            path = %path.display(),
            extension = %extension,
            bytes = code.len(),
            "code saved"
        );

        let editor = match self.platform.open_in_editor(&path) {
            Ok(editor) => Some(editor),
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "could not open editor");
                None
            }
        };

        Ok(Some(GeneratedCode {
            artifact: CodeArtifact {
                code,
                extension,
                filename,
                path,
            },
            editor,
        }))
    }

    fn generate(&self, description: &str) -> Option<String> {
        let user_prompt = format!("The user said: \"{}\"", description);
        match self.inference.complete(CODE_SYSTEM_PROMPT, &user_prompt) {
            Ok(reply) => {
                let code = strip_code_fence(&reply);
                if code.trim().is_empty() {
                    tracing::warn!("code generation returned an empty reply");
                    return None;
                }
                tracing::debug!(
                    preview = %code.chars().take(500).collect::<String>(),
                    "generated code"
                );
                Some(code)
            }
            Err(e) => {
                tracing::warn!(error = %e, "code generation failed");
                None
            }
        }
    }
}

/// Remove a Markdown fence wrapping the whole reply; anything else is kept
pub fn strip_code_fence(reply: &str) -> String {
    let trimmed = reply.trim();
    if !trimmed.starts_with("```") || !trimmed.ends_with("```") || trimmed.len() < 6 {
        return trimmed.to_string();
    }
    let Some(body_start) = trimmed.find('\n') else {
        return trimmed.to_string();
    };
    let body = &trimmed[body_start + 1..trimmed.len() - 3];
    body.trim_end().to_string()
}

/// System prompt for code generation
pub const CODE_SYSTEM_PROMPT: &str = r#"You write complete, runnable source code.

Your task:
- Generate the full working code for the user's request.
- If it's a web project, include HTML, CSS, and JavaScript in one file.
- If it's a backend or script, write full code with imports.
- If it's multi-file, combine everything in one file logically.
- Output ONLY code, no explanation, no markdown fences.
"#;
