use thiserror::Error;

/// Main error type for Zola
#[derive(Error, Debug)]
pub enum ZolaError {
    #[error("Session has not been launched")]
    SessionNotStarted,

    #[error("Session has already ended")]
    SessionEnded,

    #[error("Unhandled request: {0}")]
    UnhandledRequest(String),

    #[error("Intent {intent} is missing slot '{slot}'")]
    MissingSlot { intent: String, slot: String },
}
