//! Conversation
//!
//! Append-only chat history for one session.

use super::{Guide, Responder};

/// One message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatExchange {
    /// Message text.
    pub text: String,

    /// Whether the user wrote it; otherwise it came from the guide.
    pub is_user: bool,
}

impl ChatExchange {
    /// A message written by the user.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: true,
        }
    }

    /// A message from the guide.
    pub fn guide(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: false,
        }
    }
}

/// Messages exchanged so far. Messages are only ever appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    exchanges: Vec<ChatExchange>,
}

impl Conversation {
    /// An empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// A conversation opened with the guide's greeting.
    pub fn start(guide: &Guide) -> Self {
        Self {
            exchanges: vec![ChatExchange::guide(guide.greeting.clone())],
        }
    }

    /// Ask a question and record both it and the answer.
    ///
    /// Blank questions are ignored and return `None`.
    pub fn ask(&mut self, responder: &Responder, question: &str) -> Option<&ChatExchange> {
        if question.trim().is_empty() {
            return None;
        }

        let answer = responder.respond(question).to_string();

        self.exchanges.push(ChatExchange::user(question));
        self.exchanges.push(ChatExchange::guide(answer));

        self.exchanges.last()
    }

    /// Ask the prepared question of a quick topic.
    ///
    /// Returns `None` if the guide has no topic with that label.
    pub fn ask_topic(&mut self, guide: &Guide, label: &str) -> Option<&ChatExchange> {
        let prompt = guide.quick_topic(label)?.prompt.clone();

        self.ask(&guide.responder, &prompt)
    }

    /// Messages in order.
    pub fn exchanges(&self) -> &[ChatExchange] {
        &self.exchanges
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    /// Whether there are no messages.
    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guide::angola;

    #[test]
    fn start_greets_the_user() {
        let conversation = Conversation::start(&angola::guide());

        assert_eq!(
            conversation.exchanges(),
            [ChatExchange::guide(angola::GREETING)]
        );
    }

    #[test]
    fn ask_appends_question_then_answer() {
        let guide = angola::guide();
        let mut conversation = Conversation::start(&guide);

        let answer = conversation
            .ask(&guide.responder, "Onde comer comida típica?")
            .cloned();

        assert_eq!(answer, Some(ChatExchange::guide(angola::GASTRONOMY)));
        assert_eq!(conversation.len(), 3);
        assert_eq!(
            conversation.exchanges().get(1),
            Some(&ChatExchange::user("Onde comer comida típica?"))
        );
    }

    #[test]
    fn blank_questions_are_ignored() {
        let guide = angola::guide();
        let mut conversation = Conversation::new();

        assert!(conversation.ask(&guide.responder, "   ").is_none());
        assert!(conversation.is_empty());
    }

    #[test]
    fn history_keeps_earlier_messages() {
        let guide = angola::guide();
        let mut conversation = Conversation::start(&guide);

        conversation.ask(&guide.responder, "cultura");
        let before: Vec<ChatExchange> = conversation.exchanges().to_vec();
        conversation.ask(&guide.responder, "xyz");

        assert_eq!(conversation.exchanges().get(..before.len()), Some(before.as_slice()));
        assert_eq!(
            conversation.exchanges().last(),
            Some(&ChatExchange::guide(angola::FALLBACK))
        );
    }

    #[test]
    fn ask_topic_uses_prepared_prompt() {
        let guide = angola::guide();
        let mut conversation = Conversation::new();

        let answer = conversation.ask_topic(&guide, "Dicas de Viagem").cloned();

        assert_eq!(answer, Some(ChatExchange::guide(angola::TRAVEL_TIPS)));
        assert!(conversation.ask_topic(&guide, "Praias").is_none());
        assert_eq!(conversation.len(), 2);
    }
}
