use anyhow::Result;
use colored::Colorize;

use crate::{
    app::{init_config, Config},
    models::ModelFactory,
    prompt::Persona,
};

use super::Commands;

/// Handle CLI subcommands that don't run a session
///
/// Returns `false` when the command needs the skill runtime.
pub async fn handle_command(command: &Commands, config: &Config) -> Result<bool> {
    match command {
        Commands::Init => {
            let (path, created) = init_config(None)?;
            if created {
                println!("Created default configuration at: {}", path.display());
            } else {
                println!("Configuration already exists at: {}", path.display());
            }
            Ok(true)
        }
        Commands::Personas => {
            list_personas();
            Ok(true)
        }
        Commands::Status => {
            show_status(config).await?;
            Ok(true)
        }
        Commands::Chat | Commands::Handle { .. } => Ok(false),
    }
}

/// List keyword-addressed personas in precedence order
pub fn list_personas() {
    println!("Personas (first match wins):");
    for persona in Persona::DISPATCH_ORDER {
        if let Some(keyword) = persona.keyword() {
            println!("  • {} ({})", keyword.green(), persona);
            println!("      {}", persona.system_prompt().dimmed());
        }
    }
    println!("Anything else is recorded silently.");
}

/// Show resolved configuration and whether the API answers
async fn show_status(config: &Config) -> Result<()> {
    println!("Zola Status:");
    println!();
    println!("  Model: {} @ {}", config.model.name.green(), config.model.base_url);
    println!(
        "  Generation: max_tokens={} temperature={}",
        config.model.max_tokens, config.model.temperature
    );
    println!(
        "  History window: {} turns (store errors: {})",
        config.skill.history_window, config.skill.store_generation_errors
    );

    if config.model.resolve_api_key().is_some() {
        println!("  [OK] API key: Set");
    } else {
        println!("  [WARNING] API key: ${} not set", config.model.api_key_env);
    }

    if ModelFactory::validate(config).await? {
        println!("  [OK] API: Reachable");
    } else {
        println!("  [ERROR] API: Not reachable at {}", config.model.base_url);
    }

    println!();
    Ok(())
}
