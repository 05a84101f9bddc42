/// Constants module to avoid magic numbers in the codebase

// Network Configuration
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

// Timeouts
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const HEALTH_CHECK_TIMEOUT_SECS: u64 = 3;

// Default Model Configuration
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f32 = 0.5;
pub const DEFAULT_MAX_TOKENS: usize = 150;
pub const DEFAULT_CANDIDATES: usize = 1;

// Conversation history
pub const DEFAULT_HISTORY_WINDOW: usize = 40;
/// Stored reply for a turn that produced no generated content
pub const SILENT_REPLY_PLACEHOLDER: &str = " ";
/// Spoken output for a turn where the skill stays quiet
pub const PAUSE_MARKER: &str = "<break></break>";
pub const GENERATION_ERROR_PREFIX: &str = "Error generating response: ";

// Intent names
pub const QUERY_INTENT: &str = "GptQueryIntent";
pub const QUERY_SLOT: &str = "query";
pub const STOP_INTENT: &str = "AMAZON.StopIntent";
pub const CANCEL_INTENT: &str = "AMAZON.CancelIntent";

// Speech
pub const LAUNCH_SPEECH: &str = "Hello! I'm Zola, I'll be taking notes for your meeting. Feel free to carry on as if I'm not here";
pub const QUERY_REPROMPT: &str = "Any other questions?";
pub const APOLOGY_SPEECH: &str = "Sorry, I had trouble doing what you asked. Please try again.";
