//! Utterance capture
//!
//! Audio transcription is an external concern; the stock listener reads one
//! already-transcribed utterance per line from any reader (stdin by default).

use crate::session::Interrupt;
use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;
use thiserror::Error;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Error, Debug)]
pub enum ListenError {
    #[error("nothing was heard")]
    Silence,

    #[error("listening was interrupted")]
    Interrupted,

    #[error("capture failed: {0}")]
    Io(#[from] io::Error),
}

/// Source of utterances
pub trait Listener {
    fn capture_utterance(&mut self) -> Result<String, ListenError>;
}

/// Line-per-utterance listener fed by a background reader thread
///
/// The thread lets a Ctrl-C interrupt a wait that would otherwise block
/// inside `read_line`. End of input counts as an interrupt.
pub struct LineListener {
    lines: Receiver<io::Result<String>>,
    interrupt: Interrupt,
}

impl LineListener {
    pub fn stdin(interrupt: Interrupt) -> Self {
        Self::from_reader(io::BufReader::new(io::stdin()), interrupt)
    }

    pub fn from_reader<R: BufRead + Send + 'static>(reader: R, interrupt: Interrupt) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in reader.lines() {
                let failed = line.is_err();
                if tx.send(line).is_err() || failed {
                    break;
                }
            }
        });
        Self {
            lines: rx,
            interrupt,
        }
    }
}

impl Listener for LineListener {
    fn capture_utterance(&mut self) -> Result<String, ListenError> {
        loop {
            if self.interrupt.is_raised() {
                return Err(ListenError::Interrupted);
            }
            match self.lines.recv_timeout(POLL_INTERVAL) {
                Ok(Ok(line)) => {
                    let text = line.trim();
                    if text.is_empty() {
                        return Err(ListenError::Silence);
                    }
                    tracing::info!(utterance = %text, "heard");
                    return Ok(text.to_string());
                }
                Ok(Err(e)) => return Err(ListenError::Io(e)),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => return Err(ListenError::Interrupted),
            }
        }
    }
}
