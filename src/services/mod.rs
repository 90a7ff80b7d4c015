//! External collaborators: listening, speaking, desktop automation

pub mod desktop;
pub mod listen;
pub mod speech;

pub use desktop::{Desktop, Key, ShellDesktop};
pub use listen::{LineListener, ListenError, Listener};
pub use speech::{ConsoleSpeaker, Speaker};
