use thiserror::Error;

/// Errors raised while starting or joining an agent thread.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    #[error("failed to spawn thread {name}: {message}")]
    Spawn { name: String, message: String },

    #[error("thread {name} panicked: {message}")]
    Panicked { name: String, message: String },
}

pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
