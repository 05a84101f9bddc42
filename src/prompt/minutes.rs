use super::builder::build_messages;
use super::persona::Persona;
use crate::models::ChatMessage;
use crate::session::ChatTurn;

/// Final user message for the end-of-session summary, with one worked example
pub const MINUTES_INSTRUCTION: &str = concat!(
    "Summarize this meeting in the form of a meeting minutes document. Take your own answers into account.",
    " Include only the: Topic, Meeting Summary (as short as possible, jot note format), and tasks each person should work on.",
    " Do not include notes, disclaimers, or anything after the assigned tasks.",
    " This is an example of the format to follow:",
    " Meeting Minutes\n",
    "Topic: Introduction of New Salesperson\n\n",
    "Meeting Summary:\n-",
    "Boss introduced Mr. Mark Johnson as the new salesperson for the company.\n",
    "- Mark was introduced to everyone, except for Ann.\n",
    "- Ann introduced herself to Mark and expressed willingness to help him in his new role.\n",
    "- Mark expressed gratitude and willingness to collaborate with Ann.\n\n",
    "Tasks:\n",
    "- Mark: Familiarize himself with the company's sales processes and procedures.\n",
    "- Ann: Assist Mark in understanding his new job responsibilities.",
);

/// Messages for the meeting-minutes call over the windowed history
pub fn build_minutes_messages(history: &[ChatTurn], window: usize) -> Vec<ChatMessage> {
    build_messages(
        Persona::MinutesTaker.system_prompt(),
        history,
        MINUTES_INSTRUCTION,
        window,
    )
}
