use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::utils::ZolaError;

/// One utterance/reply pair, stored as a two-element array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct ChatTurn {
    pub utterance: String,
    pub reply: String,
}

impl ChatTurn {
    pub fn new(utterance: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            utterance: utterance.into(),
            reply: reply.into(),
        }
    }
}

impl From<(String, String)> for ChatTurn {
    fn from((utterance, reply): (String, String)) -> Self {
        Self { utterance, reply }
    }
}

impl From<ChatTurn> for (String, String) {
    fn from(turn: ChatTurn) -> Self {
        (turn.utterance, turn.reply)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    NotStarted,
    Active,
    Terminated,
}

/// Per-session state carried between invocations as session attributes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "SessionAttributes")]
pub struct SessionState {
    pub status: SessionStatus,
    chat_history: Vec<ChatTurn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Local>>,
}

/// Incoming attribute shape; `status` may be absent
#[derive(Deserialize)]
struct SessionAttributes {
    #[serde(default)]
    status: Option<SessionStatus>,
    #[serde(default)]
    chat_history: Option<Vec<ChatTurn>>,
    #[serde(default)]
    started_at: Option<DateTime<Local>>,
}

impl From<SessionAttributes> for SessionState {
    fn from(attributes: SessionAttributes) -> Self {
        // A history without a status was written by a launched session
        let status = attributes.status.unwrap_or(match attributes.chat_history {
            Some(_) => SessionStatus::Active,
            None => SessionStatus::NotStarted,
        });
        Self {
            status,
            chat_history: attributes.chat_history.unwrap_or_default(),
            started_at: attributes.started_at,
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the session with an empty history
    pub fn initialize(&mut self) {
        self.chat_history.clear();
        self.status = SessionStatus::Active;
        self.started_at = Some(Local::now());
    }

    /// Fails unless the session has been launched and not yet terminated
    pub fn ensure_active(&self) -> Result<(), ZolaError> {
        match self.status {
            SessionStatus::Active => Ok(()),
            SessionStatus::NotStarted => Err(ZolaError::SessionNotStarted),
            SessionStatus::Terminated => Err(ZolaError::SessionEnded),
        }
    }

    /// Record one turn at the tail of the history
    pub fn append_turn(
        &mut self,
        utterance: impl Into<String>,
        reply: impl Into<String>,
    ) -> Result<(), ZolaError> {
        self.ensure_active()?;
        self.chat_history.push(ChatTurn::new(utterance, reply));
        Ok(())
    }

    /// Full ordered history; callers apply their own window
    pub fn history(&self) -> &[ChatTurn] {
        &self.chat_history
    }

    pub fn terminate(&mut self) {
        self.status = SessionStatus::Terminated;
    }

    /// One-line description for logs
    pub fn summary(&self) -> String {
        let minutes = self
            .started_at
            .map(|start| Local::now().signed_duration_since(start).num_minutes())
            .unwrap_or(0);
        format!(
            "{} turns | {}h {}m",
            self.chat_history.len(),
            minutes / 60,
            minutes % 60
        )
    }
}
