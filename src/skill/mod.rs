// Gateway module for the skill - follows the Train Station Pattern
// All external access must go through this gateway

mod dispatcher;
mod generation;
mod request;

pub use dispatcher::Skill;
pub use generation::Generation;
pub use request::{
    Action, Intent, Invocation, InvocationResult, Request, SessionEnvelope, SkillResponse,
    Slot,
};
