//! File-type detection for generated code
//!
//! First match wins. HTML is tested before the generic brace rule because
//! pages routinely embed `{}` in inline scripts and styles, and the language
//! markers come before it because those languages use braces too.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

/// Any `{ ... }` span, newlines included
static BRACE_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[\s\S]*\}").unwrap());

/// Extension tag inferred for a code artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeExtension {
    Html,
    Py,
    Java,
    Js,
    Css,
    Txt,
}

impl CodeExtension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Py => "py",
            Self::Java => "java",
            Self::Js => "js",
            Self::Css => "css",
            Self::Txt => "txt",
        }
    }
}

impl fmt::Display for CodeExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify code text into an extension tag. Total; falls through to `txt`.
pub fn classify(code: &str) -> CodeExtension {
    if code.contains("<html>") || code.contains("<body>") {
        CodeExtension::Html
    } else if code.contains("import ") || code.contains("def ") {
        CodeExtension::Py
    } else if code.contains("class ") && code.contains("public static void main") {
        CodeExtension::Java
    } else if code.contains("function ") || code.contains("console.log") {
        CodeExtension::Js
    } else if BRACE_BLOCK_RE.is_match(code) && !code.contains("<html>") {
        CodeExtension::Css
    } else {
        CodeExtension::Txt
    }
}
