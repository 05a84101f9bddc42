use anyhow::Result;
use tracing::warn;

use super::openai::OpenAiModel;
use super::traits::Model;
use crate::app::Config;

/// Factory for creating model instances from configuration
pub struct ModelFactory;

impl ModelFactory {
    /// Create the configured chat-completion client
    pub fn create(config: &Config) -> Result<Box<dyn Model>> {
        let model = OpenAiModel::new(&config.model)?;
        if !model.has_api_key() {
            warn!(
                "No API key found in ${} or config; requests will be sent unauthenticated",
                config.model.api_key_env
            );
        }
        Ok(Box::new(model))
    }

    /// Validate that the configured model is reachable
    pub async fn validate(config: &Config) -> Result<bool> {
        match Self::create(config) {
            Ok(model) => model.validate_connection().await,
            Err(_) => Ok(false),
        }
    }
}
