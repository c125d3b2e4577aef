// Runtime error types

/// Boxed error type used by zenoh APIs
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by the runtime loop
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("transport error: {0}")]
    Transport(#[from] BoxError),

    #[error("message encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}
