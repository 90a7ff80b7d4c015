//! Command execution pipeline
//!
//! Intent -> Dispatcher -> {AppResolver | CodeWorkflow | direct OS action}

pub mod dispatcher;
pub mod resolver;

pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use resolver::{AppResolver, AppTarget, LaunchOutcome};
