pub mod config;
pub mod error;
pub mod types;

pub use types::{Intent, IntentKind, Params};
