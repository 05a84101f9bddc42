use anyhow::Result;

use crate::constants::{GENERATION_ERROR_PREFIX, SILENT_REPLY_PLACEHOLDER};
use crate::models::ModelResponse;

/// Outcome of one generation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    Reply(String),
    Failed(String),
}

impl Generation {
    pub fn from_result(result: Result<ModelResponse>) -> Self {
        match result {
            Ok(response) => Generation::Reply(response.content),
            Err(err) => Generation::Failed(format!("{:#}", err)),
        }
    }

    /// Text spoken to the user; failures are announced
    pub fn spoken(&self) -> String {
        match self {
            Generation::Reply(text) => text.clone(),
            Generation::Failed(reason) => format!("{}{}", GENERATION_ERROR_PREFIX, reason),
        }
    }

    /// Text recorded as the turn's reply
    pub fn stored(&self, store_errors: bool) -> String {
        match self {
            Generation::Failed(_) if !store_errors => SILENT_REPLY_PLACEHOLDER.to_string(),
            _ => self.spoken(),
        }
    }
}
