//! Search query composition from conversational context.

use crate::history::ConversationTurn;

/// How many trailing turns of history feed the search query.
///
/// Bounding the window caps prompt growth and embedding cost while keeping
/// recent conversational grounding.
const RECENT_TURNS: usize = 3;

/// Build the effective search query for a new message.
///
/// With no history the message is used verbatim. Otherwise the contents of
/// the last [`RECENT_TURNS`] turns are joined with single spaces and the
/// query is rendered as `"Context: {joined}. Question: {message}"`.
///
/// Pure function; identical inputs always produce identical output.
pub fn compose_query(history: &[ConversationTurn], new_message: &str) -> String {
    if history.is_empty() {
        return new_message.to_string();
    }

    let start = history.len().saturating_sub(RECENT_TURNS);
    let context: Vec<&str> = history[start..].iter().map(|turn| turn.content.as_str()).collect();
    format!("Context: {}. Question: {new_message}", context.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::Role;

    fn turn(role: Role, content: &str) -> ConversationTurn {
        ConversationTurn::new(role, content)
    }

    #[test]
    fn empty_history_passes_the_message_through() {
        assert_eq!(compose_query(&[], "How big is it?"), "How big is it?");
    }

    #[test]
    fn short_history_is_used_in_full() {
        let history = [
            turn(Role::User, "What is X?"),
            turn(Role::Assistant, "X is a widget."),
        ];
        assert_eq!(
            compose_query(&history, "How big is it?"),
            "Context: What is X? X is a widget.. Question: How big is it?"
        );
    }

    #[test]
    fn only_the_last_three_turns_contribute() {
        let history = [
            turn(Role::User, "ancient"),
            turn(Role::Assistant, "older"),
            turn(Role::User, "a"),
            turn(Role::Assistant, "b"),
            turn(Role::User, "c"),
        ];
        assert_eq!(compose_query(&history, "q"), "Context: a b c. Question: q");
    }

    #[test]
    fn composition_is_deterministic() {
        let history = [turn(Role::User, "hello")];
        assert_eq!(compose_query(&history, "q"), compose_query(&history, "q"));
    }
}
