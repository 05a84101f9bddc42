use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "zola")]
#[command(version)]
#[command(about = "A meeting-notes voice skill backed by a chat-completion model", long_about = None)]
pub struct Cli {
    /// Model to use (e.g., gpt-3.5-turbo, gpt-4o-mini)
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "ZOLA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize configuration
    Init,
    /// Run a local meeting session on stdin (default)
    Chat,
    /// Handle one JSON invocation and print the response
    Handle {
        /// Invocation file (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// List the personas and the keywords that address them
    Personas,
    /// Show resolved configuration and API reachability
    Status,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_config_path_reads_env() {
        let command = Cli::command();
        let config = command
            .get_arguments()
            .find(|arg| arg.get_id() == "config")
            .unwrap();
        assert_eq!(
            config.get_env().and_then(|name| name.to_str()),
            Some("ZOLA_CONFIG")
        );
    }

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = Cli::parse_from(["zola"]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_handle_with_global_flags() {
        let cli = Cli::parse_from(["zola", "handle", "--input", "req.json", "-m", "gpt-4o-mini"]);
        assert_eq!(cli.model.as_deref(), Some("gpt-4o-mini"));
        match cli.command {
            Some(Commands::Handle { input }) => assert_eq!(input, Some(PathBuf::from("req.json"))),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
