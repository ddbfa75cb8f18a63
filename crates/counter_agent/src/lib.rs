//! Background agents driven by thread-safe commands.
//!
//! - [`CounterAgent`]: counts on its own thread, publishing every value to a
//!   display channel, until told to stop. The step can be changed at any time
//!   from any thread.
//! - [`TimerAgent`]: runs an action exactly once after a delay, on its own
//!   thread.
//! - [`Controls`]: the up / down / stop command surface over a running
//!   counter.

pub mod agent;
pub mod controls;
pub mod error;
pub mod timer;

pub use agent::{AgentConfig, AgentConfigBuilder, AgentHandle, CounterAgent};
pub use controls::Controls;
pub use error::AgentError;
pub use timer::TimerAgent;
