pub mod app;
pub mod cli;
pub mod constants;
pub mod models;
pub mod prompt;
pub mod runtime;
pub mod session;
pub mod skill;
pub mod utils;

pub use app::{load_config, Config};
pub use models::{Model, ModelFactory};
pub use session::{ChatTurn, SessionState};
pub use skill::{Request, Skill, SkillResponse};
pub use utils::ZolaError;
