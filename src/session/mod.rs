/// Session management module - Gateway

mod state;

pub use state::{ChatTurn, SessionState, SessionStatus};
