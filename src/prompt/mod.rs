// Gateway module for prompt assembly - follows the Train Station Pattern
// All external access must go through this gateway

mod builder;
mod minutes;
mod persona;

pub use builder::{build_messages, history_window};
pub use minutes::{build_minutes_messages, MINUTES_INSTRUCTION};
pub use persona::Persona;
