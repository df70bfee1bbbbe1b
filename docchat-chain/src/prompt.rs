//! Grounded prompt assembly.

use docchat_rag::SearchResult;

use crate::history::ConversationTurn;

/// Merge retrieved passages, rendered history, and the question into the
/// generation prompt.
///
/// Passage texts are concatenated in their given order, separated by a
/// blank line. History is rendered one `"{label}: {content}"` line per
/// turn, in order, using the fixed role labels. The surrounding template
/// instructs the model to answer only from the given context and to admit
/// ignorance when the context is insufficient.
///
/// Never called on the no-evidence path; that short-circuits to the
/// fallback before a prompt exists.
pub fn assemble_prompt(
    passages: &[SearchResult],
    history: &[ConversationTurn],
    question: &str,
) -> String {
    let context =
        passages.iter().map(|p| p.chunk.text.as_str()).collect::<Vec<_>>().join("\n\n");

    let history_text = history
        .iter()
        .map(|turn| format!("{}: {}", turn.role.label(), turn.content))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a helpful assistant for question-answering tasks.\n\
         Use the following pieces of retrieved context to provide a comprehensive and detailed answer to the question.\n\
         If you don't know the answer based on the provided context, just say that you don't know.\n\
         Provide thorough explanations and include relevant details from the context.\n\
         You can also use the conversation history to provide more contextual answers.\n\
         \n\
         History: {history_text}\n\
         Question: {question}\n\
         Context: {context}\n\
         Answer:"
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use docchat_rag::Chunk;

    use super::*;
    use crate::history::Role;

    fn passage(text: &str, score: f32) -> SearchResult {
        SearchResult {
            chunk: Chunk {
                id: "id".into(),
                text: text.into(),
                embedding: Vec::new(),
                metadata: HashMap::new(),
                document_id: "doc".into(),
            },
            score,
        }
    }

    #[test]
    fn passages_are_joined_with_blank_lines_in_order() {
        let prompt = assemble_prompt(
            &[passage("first passage", 0.9), passage("second passage", 0.8)],
            &[],
            "q",
        );
        assert!(prompt.contains("first passage\n\nsecond passage"));
    }

    #[test]
    fn history_renders_with_fixed_labels_in_order() {
        let history = [
            ConversationTurn::new(Role::System, "be brief"),
            ConversationTurn::new(Role::User, "what is x"),
            ConversationTurn::new(Role::Assistant, "x is y"),
        ];
        let prompt = assemble_prompt(&[passage("p", 0.5)], &history, "q");
        assert!(prompt.contains("System: be brief\nHuman: what is x\nAI: x is y"));
    }

    #[test]
    fn question_lands_in_the_template() {
        let prompt = assemble_prompt(&[passage("p", 0.5)], &[], "How big is it?");
        assert!(prompt.contains("Question: How big is it?"));
        assert!(prompt.ends_with("Answer:"));
    }
}
