use tracing::{debug, error, info, warn};

use super::generation::Generation;
use super::request::{Action, Request, SkillResponse};
use crate::app::{Config, SkillSettings};
use crate::constants::{
    APOLOGY_SPEECH, LAUNCH_SPEECH, PAUSE_MARKER, QUERY_REPROMPT, SILENT_REPLY_PLACEHOLDER,
};
use crate::models::{ChatMessage, Model, ModelConfig};
use crate::prompt::{build_messages, build_minutes_messages, Persona};
use crate::session::SessionState;
use crate::utils::ZolaError;

/// The conversation session manager: routes requests, talks to the model,
/// and keeps the session history up to date
pub struct Skill {
    model: Box<dyn Model>,
    model_config: ModelConfig,
    settings: SkillSettings,
}

impl Skill {
    pub fn new(model: Box<dyn Model>, config: &Config) -> Self {
        Self {
            model,
            model_config: ModelConfig::from(&config.model),
            settings: config.skill.clone(),
        }
    }

    /// Handle one request; every failure ends up as the apology utterance
    pub async fn handle(&self, request: &Request, session: &mut SessionState) -> SkillResponse {
        match self.dispatch(request, session).await {
            Ok(response) => response,
            Err(err) => {
                error!("Request failed: {}", err);
                SkillResponse::ask(APOLOGY_SPEECH, APOLOGY_SPEECH)
            }
        }
    }

    async fn dispatch(
        &self,
        request: &Request,
        session: &mut SessionState,
    ) -> Result<SkillResponse, ZolaError> {
        match request.route()? {
            Action::Launch => Ok(self.launch(session)),
            Action::Query(query) => self.answer_query(&query, session).await,
            Action::Summarize => self.summarize(session).await,
        }
    }

    pub fn launch(&self, session: &mut SessionState) -> SkillResponse {
        session.initialize();
        info!("Session launched");
        SkillResponse::ask(LAUNCH_SPEECH, LAUNCH_SPEECH)
    }

    /// One query turn: exactly one turn is appended, whatever the outcome
    pub async fn answer_query(
        &self,
        query: &str,
        session: &mut SessionState,
    ) -> Result<SkillResponse, ZolaError> {
        session.ensure_active()?;

        let Some(persona) = Persona::select(query) else {
            debug!(query, "No persona addressed, staying silent");
            session.append_turn(query, SILENT_REPLY_PLACEHOLDER)?;
            return Ok(SkillResponse::ask(PAUSE_MARKER, QUERY_REPROMPT));
        };

        info!(%persona, turns = session.history().len(), "Generating reply");
        let messages = build_messages(
            persona.system_prompt(),
            session.history(),
            query,
            self.settings.history_window,
        );
        let generation = self.generate(&messages).await;

        session.append_turn(query, generation.stored(self.settings.store_generation_errors))?;
        Ok(SkillResponse::ask(generation.spoken(), QUERY_REPROMPT))
    }

    /// Speak the meeting minutes and end the session; history is left as is
    pub async fn summarize(&self, session: &mut SessionState) -> Result<SkillResponse, ZolaError> {
        session.ensure_active()?;

        info!("Summarizing session: {}", session.summary());
        let messages = build_minutes_messages(session.history(), self.settings.history_window);
        let generation = self.generate(&messages).await;

        session.terminate();
        Ok(SkillResponse::tell(generation.spoken()))
    }

    async fn generate(&self, messages: &[ChatMessage]) -> Generation {
        let generation = Generation::from_result(self.model.chat(messages, &self.model_config).await);
        if let Generation::Failed(reason) = &generation {
            warn!("Generation failed: {}", reason);
        }
        generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MockModel, ModelResponse};
    use crate::prompt::MINUTES_INSTRUCTION;
    use crate::session::{ChatTurn, SessionStatus};
    use pretty_assertions::assert_eq;

    fn reply(text: &str) -> anyhow::Result<ModelResponse> {
        Ok(ModelResponse {
            content: text.to_string(),
            usage: None,
            model_name: "test-model".to_string(),
        })
    }

    fn skill_with(model: MockModel) -> Skill {
        Skill::new(Box::new(model), &Config::default())
    }

    fn launched() -> SessionState {
        let mut session = SessionState::new();
        session.initialize();
        session
    }

    #[tokio::test]
    async fn test_launch_greets_and_resets_history() {
        let skill = skill_with(MockModel::new());
        let mut session = SessionState::new();

        let response = skill.handle(&Request::launch(), &mut session).await;

        assert_eq!(response, SkillResponse::ask(LAUNCH_SPEECH, LAUNCH_SPEECH));
        assert_eq!(session.status, SessionStatus::Active);
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_zola_query_calls_model_and_records_turn() {
        let mut model = MockModel::new();
        model
            .expect_chat()
            .withf(|messages, config| {
                messages.len() == 2
                    && messages[0] == ChatMessage::system(Persona::Zola.system_prompt())
                    && messages[1] == ChatMessage::user("Zola, what do you think?")
                    && config.max_tokens == 150
                    && config.candidates == 1
            })
            .times(1)
            .returning(|_, _| reply("Try splitting the task."));

        let skill = skill_with(model);
        let mut session = launched();
        let response = skill
            .handle(&Request::query("Zola, what do you think?"), &mut session)
            .await;

        assert_eq!(response.speech, "Try splitting the task.");
        assert_eq!(response.reprompt.as_deref(), Some(QUERY_REPROMPT));
        assert!(!response.should_end_session);
        assert_eq!(
            session.history(),
            &[ChatTurn::new("Zola, what do you think?", "Try splitting the task.")]
        );
    }

    #[tokio::test]
    async fn test_friendly_frank_uses_his_persona() {
        let mut model = MockModel::new();
        model
            .expect_chat()
            .withf(|messages, _| {
                messages[0] == ChatMessage::system(Persona::FriendlyFrank.system_prompt())
            })
            .times(1)
            .returning(|_, _| reply("How original."));

        let skill = skill_with(model);
        let mut session = launched();
        skill
            .handle(&Request::query("Friendly Frank is annoying"), &mut session)
            .await;

        assert_eq!(session.history()[0].reply, "How original.");
    }

    #[tokio::test]
    async fn test_silent_turn_never_calls_model() {
        let mut model = MockModel::new();
        model.expect_chat().times(0);

        let skill = skill_with(model);
        let mut session = launched();
        let response = skill
            .handle(&Request::query("let's look at the numbers"), &mut session)
            .await;

        assert_eq!(response.speech, PAUSE_MARKER);
        assert_eq!(
            session.history(),
            &[ChatTurn::new("let's look at the numbers", " ")]
        );
    }

    #[tokio::test]
    async fn test_silent_turns_still_reach_later_prompts() {
        let mut model = MockModel::new();
        model
            .expect_chat()
            .withf(|messages, _| {
                messages.len() == 4
                    && messages[1] == ChatMessage::user("budget is tight")
                    && messages[2] == ChatMessage::assistant(" ")
            })
            .times(1)
            .returning(|_, _| reply("Cut the travel line."));

        let skill = skill_with(model);
        let mut session = launched();
        skill.handle(&Request::query("budget is tight"), &mut session).await;
        skill.handle(&Request::query("zola, ideas?"), &mut session).await;

        assert_eq!(session.history().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_generation_is_spoken_and_stored() {
        let mut model = MockModel::new();
        model
            .expect_chat()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("service unavailable")));

        let skill = skill_with(model);
        let mut session = launched();
        let response = skill.handle(&Request::query("zola?"), &mut session).await;

        assert!(response.speech.starts_with("Error generating response: "));
        assert_eq!(session.history()[0].reply, response.speech);
    }

    #[tokio::test]
    async fn test_failed_generation_not_stored_when_disabled() {
        let mut model = MockModel::new();
        model
            .expect_chat()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("timeout")));

        let mut config = Config::default();
        config.skill.store_generation_errors = false;
        let skill = Skill::new(Box::new(model), &config);
        let mut session = launched();
        let response = skill.handle(&Request::query("zola?"), &mut session).await;

        assert_eq!(response.speech, "Error generating response: timeout");
        assert_eq!(session.history()[0].reply, " ");
    }

    #[tokio::test]
    async fn test_query_before_launch_apologizes() {
        let mut model = MockModel::new();
        model.expect_chat().times(0);

        let skill = skill_with(model);
        let mut session = SessionState::new();
        let response = skill.handle(&Request::query("zola, hi"), &mut session).await;

        assert_eq!(response, SkillResponse::ask(APOLOGY_SPEECH, APOLOGY_SPEECH));
        assert!(session.history().is_empty());
        assert_eq!(session.status, SessionStatus::NotStarted);
    }

    #[tokio::test]
    async fn test_unknown_intent_apologizes_and_keeps_session() {
        let skill = skill_with(MockModel::new());
        let mut session = launched();
        let request: Request = serde_json::from_value(serde_json::json!({
            "type": "IntentRequest",
            "intent": {"name": "AMAZON.HelpIntent"}
        }))
        .unwrap();

        let response = skill.handle(&request, &mut session).await;

        assert_eq!(response.speech, APOLOGY_SPEECH);
        assert!(!response.should_end_session);
        assert_eq!(session.status, SessionStatus::Active);
    }

    #[tokio::test]
    async fn test_summary_uses_minutes_prompt_and_leaves_history() {
        let mut model = MockModel::new();
        model
            .expect_chat()
            .withf(|messages, _| {
                messages.to_vec()
                    == vec![
                        ChatMessage::system(Persona::MinutesTaker.system_prompt()),
                        ChatMessage::user("intro"),
                        ChatMessage::assistant("hi"),
                        ChatMessage::user(MINUTES_INSTRUCTION),
                    ]
            })
            .times(1)
            .returning(|_, _| reply("Meeting Minutes\nTopic: Intro"));

        let skill = skill_with(model);
        let mut session = launched();
        session.append_turn("intro", "hi").unwrap();

        let response = skill.handle(&Request::stop(), &mut session).await;

        assert_eq!(response, SkillResponse::tell("Meeting Minutes\nTopic: Intro"));
        assert_eq!(session.history(), &[ChatTurn::new("intro", "hi")]);
        assert_eq!(session.status, SessionStatus::Terminated);
    }

    #[tokio::test]
    async fn test_failed_summary_still_ends_session() {
        let mut model = MockModel::new();
        model
            .expect_chat()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("quota exceeded")));

        let skill = skill_with(model);
        let mut session = launched();
        let response = skill.handle(&Request::stop(), &mut session).await;

        assert_eq!(response.speech, "Error generating response: quota exceeded");
        assert!(response.should_end_session);
        assert_eq!(session.status, SessionStatus::Terminated);
    }

    #[tokio::test]
    async fn test_prompt_window_is_bounded() {
        let mut model = MockModel::new();
        model
            .expect_chat()
            .withf(|messages, _| {
                messages.len() == 82 && messages[1] == ChatMessage::user("turn 10")
            })
            .times(1)
            .returning(|_, _| reply("ok"));

        let skill = skill_with(model);
        let mut session = launched();
        for i in 0..50 {
            session.append_turn(format!("turn {}", i), " ").unwrap();
        }
        skill.handle(&Request::query("zola, recap"), &mut session).await;

        assert_eq!(session.history().len(), 51);
    }
}
