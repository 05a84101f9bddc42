/// Runtime orchestrator module - Gateway

mod non_interactive;
mod orchestrator;

pub use non_interactive::NonInteractiveRunner;
pub use orchestrator::Orchestrator;
