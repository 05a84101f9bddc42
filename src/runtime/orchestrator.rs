use anyhow::Result;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use super::non_interactive::NonInteractiveRunner;
use crate::{
    app::{load_config, Config},
    cli::{handle_command, Cli, Commands},
    constants::PAUSE_MARKER,
    models::ModelFactory,
    session::SessionState,
    skill::{Request, Skill, SkillResponse},
};

/// Main runtime orchestrator
pub struct Orchestrator {
    cli: Cli,
    config: Config,
}

impl Orchestrator {
    /// Create a new orchestrator from CLI args
    pub fn new(cli: Cli) -> Result<Self> {
        let mut config = load_config(cli.config.as_deref())?;

        // CLI argument overrides config
        if let Some(model) = &cli.model {
            config.model.name = model.clone();
        }

        Ok(Self { cli, config })
    }

    /// Run the orchestrator
    pub async fn run(self) -> Result<()> {
        let command = self.cli.command.clone().unwrap_or(Commands::Chat);
        if handle_command(&command, &self.config).await? {
            return Ok(());
        }

        let model = ModelFactory::create(&self.config)?;
        let skill = Skill::new(model, &self.config);

        match command {
            Commands::Handle { input } => {
                let raw = NonInteractiveRunner::read_input(input.as_deref()).await?;
                let runner = NonInteractiveRunner::new(skill);
                let result = runner.execute(&raw).await?;
                println!("{}", NonInteractiveRunner::format_result(&result)?);
                Ok(())
            }
            _ => self.run_chat(skill).await,
        }
    }

    /// Local meeting session: one utterance per stdin line
    ///
    /// `stop` or `cancel` (or end of input) produces the minutes and exits.
    async fn run_chat(&self, skill: Skill) -> Result<()> {
        println!(
            "🎙  Zola with model: {} (type 'stop' to end the meeting)",
            self.config.model.name.green()
        );

        let mut session = SessionState::new();
        speak(&skill.handle(&Request::launch(), &mut session).await);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let request = match lines.next_line().await? {
                Some(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    match line.to_lowercase().as_str() {
                        "stop" | "cancel" => Request::stop(),
                        _ => Request::query(line),
                    }
                }
                None => Request::stop(),
            };

            let response = skill.handle(&request, &mut session).await;
            speak(&response);
            if response.should_end_session {
                break;
            }
        }

        info!("Session ended: {}", session.summary());
        Ok(())
    }
}

fn speak(response: &SkillResponse) {
    if response.speech == PAUSE_MARKER {
        println!("{}", "(silence)".dimmed());
    } else {
        println!("{} {}", "Zola:".cyan().bold(), response.speech);
    }
}
