//! src/agent.rs
//!
//! A counter that runs on its own thread and publishes each value to a
//! display channel.
//!
//! The loop only reads two pieces of shared state, a stop flag and the step,
//! each written by command methods from other threads. Both are plain atomics:
//! there is a single logical writer per field and the loop tolerates seeing a
//! new value one tick late, so no lock is involved.
//!
//! The loop ends when `stop_counting` is called or when the display side of
//! the channel is dropped, whichever happens first.

use crate::error::{panic_message, AgentError};
use crossbeam_channel::Sender;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Configuration for CounterAgent
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// First value published (default 0)
    pub initial: i64,
    /// Initial step (default 1)
    pub step: i64,
    /// Pause between two published values (default 100ms)
    pub tick: Duration,
    /// Name of the counting thread
    pub thread_name: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            initial: 0,
            step: 1,
            tick: Duration::from_millis(100),
            thread_name: "counter-agent".to_string(),
        }
    }
}

impl AgentConfig {
    pub fn builder() -> AgentConfigBuilder {
        AgentConfigBuilder::default()
    }
}

/// Builder for AgentConfig with method chaining
#[derive(Default)]
pub struct AgentConfigBuilder {
    config: AgentConfig,
}

impl AgentConfigBuilder {
    pub fn initial(mut self, initial: i64) -> Self {
        self.config.initial = initial;
        self
    }

    pub fn step(mut self, step: i64) -> Self {
        self.config.step = step;
        self
    }

    /// Set the pause between ticks.
    ///
    /// Also bounds how long a stop command can take to be observed.
    pub fn tick(mut self, tick: Duration) -> Self {
        self.config.tick = tick;
        self
    }

    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.config.thread_name = name.into();
        self
    }

    pub fn build(self) -> AgentConfig {
        self.config
    }
}

#[derive(Debug)]
struct AgentState {
    stop: AtomicBool,
    step: AtomicI64,
}

/// Cloneable command handle to a running [`CounterAgent`].
#[derive(Debug, Clone)]
pub struct AgentHandle {
    state: Arc<AgentState>,
}

impl AgentHandle {
    /// External command to set the step value.
    pub fn set_step(&self, step: i64) {
        self.state.step.store(step, Ordering::Relaxed);
    }

    /// External command to stop counting. Idempotent.
    pub fn stop_counting(&self) {
        self.state.stop.store(true, Ordering::Relaxed);
    }

    pub fn step(&self) -> i64 {
        self.state.step.load(Ordering::Relaxed)
    }

    pub fn is_stopped(&self) -> bool {
        self.state.stop.load(Ordering::Relaxed)
    }
}

/// A counting loop running on a dedicated thread.
///
/// Dropping the agent stops it and waits for the thread to exit.
pub struct CounterAgent {
    handle: AgentHandle,
    thread_name: String,
    thread: Option<thread::JoinHandle<i64>>,
}

impl CounterAgent {
    /// Starts counting from `config.initial`, sending each value to `display`
    /// before adding the current step.
    pub fn spawn(config: AgentConfig, display: Sender<i64>) -> Result<Self, AgentError> {
        let handle = AgentHandle {
            state: Arc::new(AgentState {
                stop: AtomicBool::new(false),
                step: AtomicI64::new(config.step),
            }),
        };

        let state = Arc::clone(&handle.state);
        let AgentConfig {
            initial,
            tick,
            thread_name,
            ..
        } = config;

        let thread = thread::Builder::new()
            .name(thread_name.clone())
            .spawn(move || {
                let mut counter = initial;
                while !state.stop.load(Ordering::Relaxed) {
                    if display.send(counter).is_err() {
                        tracing::debug!(counter, "display disconnected, stopping");
                        break;
                    }
                    counter = counter.wrapping_add(state.step.load(Ordering::Relaxed));
                    thread::sleep(tick);
                }
                counter
            })
            .map_err(|e| AgentError::Spawn {
                name: thread_name.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            handle,
            thread_name,
            thread: Some(thread),
        })
    }

    /// Returns a command handle that can be moved to other threads.
    pub fn handle(&self) -> AgentHandle {
        self.handle.clone()
    }

    pub fn set_step(&self, step: i64) {
        self.handle.set_step(step);
    }

    pub fn stop_counting(&self) {
        self.handle.stop_counting();
    }

    /// Waits for the counting loop to end and returns the counter's final
    /// value. Does not stop the agent by itself.
    pub fn join(mut self) -> Result<i64, AgentError> {
        let name = self.thread_name.clone();
        match self.thread.take() {
            Some(thread) => thread.join().map_err(|payload| AgentError::Panicked {
                name,
                message: panic_message(payload.as_ref()),
            }),
            None => unreachable!("agent thread is only taken by join or drop"),
        }
    }
}

impl Drop for CounterAgent {
    fn drop(&mut self) {
        if let Some(thread) = self.thread.take() {
            self.handle.stop_counting();
            let _ = thread.join();
        }
    }
}
