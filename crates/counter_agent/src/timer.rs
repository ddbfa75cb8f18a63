//! src/timer.rs
//!
//! One-shot delayed action on a dedicated thread.

use crate::error::{panic_message, AgentError};
use std::thread;
use std::time::Duration;

/// Runs an action once, after a delay, on its own thread.
///
/// The action is an `FnOnce`, so it cannot run more than once; there is no
/// retry if it panics. Dropping the `TimerAgent` detaches the thread without
/// cancelling it.
pub struct TimerAgent {
    name: String,
    thread: thread::JoinHandle<()>,
}

impl TimerAgent {
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(10);

    pub fn start<F>(delay: Duration, action: F) -> Result<Self, AgentError>
    where
        F: FnOnce() + Send + 'static,
    {
        let name = "timer-agent".to_string();
        let thread = thread::Builder::new()
            .name(name.clone())
            .spawn(move || {
                thread::sleep(delay);
                tracing::debug!(?delay, "timer fired");
                action();
            })
            .map_err(|e| AgentError::Spawn {
                name: name.clone(),
                message: e.to_string(),
            })?;

        Ok(Self { name, thread })
    }

    /// Same as `start(TimerAgent::DEFAULT_DELAY, action)`.
    pub fn with_default_delay<F>(action: F) -> Result<Self, AgentError>
    where
        F: FnOnce() + Send + 'static,
    {
        Self::start(Self::DEFAULT_DELAY, action)
    }

    /// True once the action has returned (or panicked).
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Waits for the delay to elapse and the action to complete.
    pub fn join(self) -> Result<(), AgentError> {
        let name = self.name;
        self.thread.join().map_err(|payload| {
            let message = panic_message(payload.as_ref());
            tracing::error!(%name, %message, "timer action panicked");
            AgentError::Panicked { name, message }
        })
    }
}
