//! Keyword resolver
//!
//! Maps free text to a canned answer: first keyword contained in the
//! lowercased input wins, then the question menu, then the generic fallback.
//! Matching is plain substring containment with no word boundaries, so
//! "specification" matches `spec`.

#[cfg(test)]
mod proptests;

use crate::knowledge::{KnowledgeBase, KnowledgeEntry, FALLBACK_RESPONSE, MENU_RESPONSE};

/// Which tier produced a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// A table entry matched
    Keyword(&'a KnowledgeEntry),
    /// No entry matched but the input asks a question
    Menu,
    /// Nothing matched
    Fallback,
}

impl<'a> Resolution<'a> {
    pub fn response(self) -> &'a str {
        match self {
            Resolution::Keyword(entry) => entry.response(),
            Resolution::Menu => MENU_RESPONSE,
            Resolution::Fallback => FALLBACK_RESPONSE,
        }
    }

    /// Short label for logs
    pub fn tier(self) -> &'static str {
        match self {
            Resolution::Keyword(_) => "keyword",
            Resolution::Menu => "menu",
            Resolution::Fallback => "fallback",
        }
    }
}

/// Pure resolver over an ordered knowledge base
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    knowledge: KnowledgeBase,
}

impl Resolver {
    pub fn new(knowledge: KnowledgeBase) -> Self {
        Self { knowledge }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Find the tier that answers `input` without building the reply
    pub fn classify(&self, input: &str) -> Resolution<'_> {
        let lowered = input.to_lowercase();

        if let Some(entry) = self
            .knowledge
            .entries()
            .iter()
            .find(|entry| lowered.contains(entry.keyword()))
        {
            return Resolution::Keyword(entry);
        }

        if lowered.contains('?') {
            Resolution::Menu
        } else {
            Resolution::Fallback
        }
    }

    /// Reply for `input`. Total: every input gets a non-empty answer.
    pub fn resolve(&self, input: &str) -> String {
        let resolution = self.classify(input);
        match resolution {
            Resolution::Keyword(entry) => {
                tracing::debug!(tier = resolution.tier(), keyword = %entry.keyword(), "Resolved input");
            }
            Resolution::Menu | Resolution::Fallback => {
                tracing::debug!(tier = resolution.tier(), "Resolved input");
            }
        }
        resolution.response().to_string()
    }
}
