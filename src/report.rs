use anyhow::Result;
use std::io::{self, Write};
use std::sync::Mutex;
use tracing::{error, warn};

use crate::error::Halt;

const ERROR_MARKER: &str = "❌";

/// Posts a message to the thread the command came from.
pub trait CommentPoster {
    fn post_comment(&self, body: &str) -> Result<()>;
}

/// Marks the surrounding run as failed. Does not stop the process.
pub trait FailureSignal {
    fn set_failed(&self, message: &str);
}

pub struct ErrorReporter<'a> {
    poster: &'a dyn CommentPoster,
    failure: &'a dyn FailureSignal,
}

impl<'a> ErrorReporter<'a> {
    pub fn new(poster: &'a dyn CommentPoster, failure: &'a dyn FailureSignal) -> Self {
        Self { poster, failure }
    }

    /// Reply with `message` on the thread, fail the run, and halt.
    pub fn post_error(&self, message: &str) -> Halt {
        if let Err(e) = self.poster.post_comment(&format!("{ERROR_MARKER}{message}")) {
            warn!(err = %e, "failed to post error comment");
        }
        self.fail(message)
    }

    /// Fail the run and halt without replying on the thread.
    pub fn fail(&self, message: &str) -> Halt {
        error!("{message}");
        self.failure.set_failed(message);
        Halt::new(message)
    }
}

/// Emits the GitHub Actions `::error::` workflow command.
pub struct ActionsFailure<W: Write> {
    out: Mutex<W>,
}

impl ActionsFailure<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ActionsFailure<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|p| p.into_inner())
    }
}

impl<W: Write> FailureSignal for ActionsFailure<W> {
    fn set_failed(&self, message: &str) {
        let mut out = self.out.lock().unwrap_or_else(|p| p.into_inner());
        if let Err(e) = writeln!(out, "::error::{}", escape_data(message)).and_then(|_| out.flush())
        {
            warn!(err = %e, "failed to write workflow command");
        }
    }
}

fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
