//! Tour guide
//!
//! A rule-based chat responder. Questions are matched against an ordered list of keyword groups
//! and the first group with a keyword contained in the question answers. Declaration order is
//! part of the behaviour: a question matching several groups gets the earliest one's answer.

use serde::Deserialize;
use tracing::debug;

pub mod angola;
pub mod conversation;

pub use conversation::{ChatExchange, Conversation};

/// Keywords that select one canned answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordGroup {
    topic: String,
    keywords: Vec<String>,
    answer: String,
}

impl KeywordGroup {
    /// Create a group. Keywords are trimmed and lowercased so matching is case-insensitive;
    /// blank keywords are dropped.
    pub fn new(
        topic: impl Into<String>,
        keywords: impl IntoIterator<Item = impl AsRef<str>>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            topic: topic.into(),
            keywords: keywords
                .into_iter()
                .map(|keyword| keyword.as_ref().trim().to_lowercase())
                .filter(|keyword| !keyword.is_empty())
                .collect(),
            answer: answer.into(),
        }
    }

    /// Name of the topic, used in logs and tables.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Lowercased keywords.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Canned answer.
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Whether any keyword occurs in an already-lowercased question.
    fn matches(&self, lowered: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| lowered.contains(keyword.as_str()))
    }
}

/// Ordered keyword groups plus the answer given when none match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Responder {
    groups: Vec<KeywordGroup>,
    fallback: String,
}

impl Responder {
    /// Create a responder. Groups are tried in the order given.
    pub fn new(groups: impl Into<Vec<KeywordGroup>>, fallback: impl Into<String>) -> Self {
        Self {
            groups: groups.into(),
            fallback: fallback.into(),
        }
    }

    /// Keyword groups, in match order.
    pub fn groups(&self) -> &[KeywordGroup] {
        &self.groups
    }

    /// Answer given when no group matches.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// The first group with a keyword contained in `question`, ignoring case.
    pub fn classify(&self, question: &str) -> Option<&KeywordGroup> {
        let lowered = question.to_lowercase();

        self.groups.iter().find(|group| group.matches(&lowered))
    }

    /// Answer a question.
    pub fn respond(&self, question: &str) -> &str {
        match self.classify(question) {
            Some(group) => {
                debug!(topic = group.topic(), "matched keyword group");
                group.answer()
            }
            None => {
                debug!("no keyword group matched");
                &self.fallback
            }
        }
    }
}

/// A shortcut button that fills in a prepared question.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuickTopic {
    /// Button label.
    pub label: String,

    /// Question asked when the button is used.
    pub prompt: String,
}

impl QuickTopic {
    /// Create a quick topic.
    pub fn new(label: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            prompt: prompt.into(),
        }
    }
}

/// Everything the chat page needs: greeting, responder and quick topics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guide {
    /// First message of every conversation.
    pub greeting: String,

    /// Keyword responder.
    pub responder: Responder,

    /// Shortcut questions.
    pub quick_topics: Vec<QuickTopic>,
}

impl Guide {
    /// Prepared question for a quick topic label.
    pub fn quick_topic(&self, label: &str) -> Option<&QuickTopic> {
        self.quick_topics.iter().find(|topic| topic.label == label)
    }
}

impl Default for Guide {
    fn default() -> Self {
        angola::guide()
    }
}
