//! src/controls.rs
//!
//! The up / down / stop command surface of a counter.
//!
//! Mirrors three buttons: `up` and `down` set the step to `+1` and `-1`,
//! `stop` stops the counter and disables all three. Commands issued after
//! `stop` are ignored.

use crate::agent::AgentHandle;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Controls {
    agent: AgentHandle,
    enabled: Arc<AtomicBool>,
}

impl Controls {
    pub fn new(agent: AgentHandle) -> Self {
        Self {
            agent,
            enabled: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn up(&self) {
        if self.is_enabled() {
            self.agent.set_step(1);
        }
    }

    pub fn down(&self) {
        if self.is_enabled() {
            self.agent.set_step(-1);
        }
    }

    /// Stops the counter and disables every control. Idempotent.
    pub fn stop(&self) {
        if self.enabled.swap(false, Ordering::SeqCst) {
            self.agent.stop_counting();
            tracing::debug!("controls disabled");
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }
}
