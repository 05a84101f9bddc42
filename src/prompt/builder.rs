use crate::models::ChatMessage;
use crate::session::ChatTurn;

/// Most recent `window` turns, oldest first
pub fn history_window(history: &[ChatTurn], window: usize) -> &[ChatTurn] {
    let start = history.len().saturating_sub(window);
    &history[start..]
}

/// Assemble the message sequence for one generation call
///
/// One system message, then a user/assistant pair per windowed turn, then the
/// new utterance. The count is always `2 * min(window, history.len()) + 2`.
pub fn build_messages(
    system_text: &str,
    history: &[ChatTurn],
    new_utterance: &str,
    window: usize,
) -> Vec<ChatMessage> {
    let turns = history_window(history, window);
    let mut messages = Vec::with_capacity(2 * turns.len() + 2);

    messages.push(ChatMessage::system(system_text));
    for turn in turns {
        messages.push(ChatMessage::user(turn.utterance.as_str()));
        messages.push(ChatMessage::assistant(turn.reply.as_str()));
    }
    messages.push(ChatMessage::user(new_utterance));

    messages
}
