use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::constants::{CANCEL_INTENT, QUERY_INTENT, QUERY_SLOT, STOP_INTENT};
use crate::session::SessionState;
use crate::utils::ZolaError;

/// Incoming voice-platform request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    #[serde(rename = "LaunchRequest")]
    Launch,
    #[serde(rename = "IntentRequest")]
    Intent { intent: Intent },
    /// Any request type this skill has no handler for
    #[serde(other)]
    Unhandled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(default)]
    pub value: Option<String>,
}

/// What the skill does with a routed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Launch,
    Query(String),
    Summarize,
}

impl Request {
    pub fn launch() -> Self {
        Request::Launch
    }

    pub fn query(text: impl Into<String>) -> Self {
        let mut slots = HashMap::new();
        slots.insert(
            QUERY_SLOT.to_string(),
            Slot {
                value: Some(text.into()),
            },
        );
        Request::Intent {
            intent: Intent {
                name: QUERY_INTENT.to_string(),
                slots,
            },
        }
    }

    pub fn stop() -> Self {
        Request::Intent {
            intent: Intent {
                name: STOP_INTENT.to_string(),
                slots: HashMap::new(),
            },
        }
    }

    /// Map the request onto one of the three handled actions
    pub fn route(&self) -> Result<Action, ZolaError> {
        match self {
            Request::Launch => Ok(Action::Launch),
            Request::Intent { intent } => match intent.name.as_str() {
                QUERY_INTENT => intent
                    .slots
                    .get(QUERY_SLOT)
                    .and_then(|slot| slot.value.clone())
                    .map(Action::Query)
                    .ok_or_else(|| ZolaError::MissingSlot {
                        intent: intent.name.clone(),
                        slot: QUERY_SLOT.to_string(),
                    }),
                STOP_INTENT | CANCEL_INTENT => Ok(Action::Summarize),
                other => Err(ZolaError::UnhandledRequest(format!("intent {}", other))),
            },
            Request::Unhandled => Err(ZolaError::UnhandledRequest("request type".to_string())),
        }
    }
}

/// Outgoing speech for one invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillResponse {
    pub speech: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<String>,
    pub should_end_session: bool,
}

impl SkillResponse {
    /// Speak and keep the session open
    pub fn ask(speech: impl Into<String>, reprompt: impl Into<String>) -> Self {
        Self {
            speech: speech.into(),
            reprompt: Some(reprompt.into()),
            should_end_session: false,
        }
    }

    /// Speak and end the session
    pub fn tell(speech: impl Into<String>) -> Self {
        Self {
            speech: speech.into(),
            reprompt: None,
            should_end_session: true,
        }
    }
}

/// One single-shot invocation: request plus the attributes from the previous turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionEnvelope>,
    pub request: Request,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionEnvelope {
    #[serde(default)]
    pub attributes: SessionState,
}

impl Invocation {
    /// Attributes carried in, or a fresh session when there are none
    pub fn into_parts(self) -> (SessionState, Request) {
        let session = self.session.map(|s| s.attributes).unwrap_or_default();
        (session, self.request)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationResult {
    pub response: SkillResponse,
    pub session_attributes: SessionState,
}
