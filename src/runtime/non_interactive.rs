use anyhow::{Context, Result};
use std::path::Path;
use tokio::io::AsyncReadExt;

use crate::skill::{Invocation, InvocationResult, Skill};

/// Single-shot runner: one invocation envelope in, one result envelope out
pub struct NonInteractiveRunner {
    skill: Skill,
}

impl NonInteractiveRunner {
    pub fn new(skill: Skill) -> Self {
        Self { skill }
    }

    /// Read an invocation from a file, or stdin when no path is given
    pub async fn read_input(input: Option<&Path>) -> Result<String> {
        match input {
            Some(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display())),
            None => {
                let mut buffer = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut buffer)
                    .await
                    .context("Failed to read invocation from stdin")?;
                Ok(buffer)
            }
        }
    }

    /// Handle one JSON invocation
    pub async fn execute(&self, raw: &str) -> Result<InvocationResult> {
        let invocation: Invocation =
            serde_json::from_str(raw).context("Invalid invocation JSON")?;

        let (mut session, request) = invocation.into_parts();
        let response = self.skill.handle(&request, &mut session).await;

        Ok(InvocationResult {
            response,
            session_attributes: session,
        })
    }

    pub fn format_result(result: &InvocationResult) -> Result<String> {
        Ok(serde_json::to_string_pretty(result)?)
    }
}
