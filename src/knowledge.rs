//! Ordered keyword → answer table
//!
//! Entry order is match priority: the resolver returns the first entry whose
//! keyword occurs in the input, so the table is a `Vec`, never a map.

use std::collections::HashSet;
use thiserror::Error;

/// Greeting seeded as the first bot turn of every session
pub const GREETING: &str = "Hi! I'm the AI Book Assistant. I can help you learn about AI & Spec-Driven Software Development. What would you like to know?";

/// Reply for questions that match no keyword
pub const MENU_RESPONSE: &str = "Great question! I can help you with: specs, AI generation, spec-driven development, how to start, examples, testing, best practices, tools, benefits, the AI book, and learning resources. What interests you?";

/// Reply for everything else
pub const FALLBACK_RESPONSE: &str = "That's interesting! I can provide more specific help with topics like specifications, AI code generation, spec-driven development, testing strategies, and best practices. Feel free to ask!";

// `spec-driven` must stay ahead of `spec`: every input containing the former
// also contains the latter.
const REFERENCE_TABLE: &[(&str, &str)] = &[
    (
        "spec-driven",
        "Spec-Driven Development is a modern approach where you write clear specifications and AI generates the code. This creates self-documenting systems with automatic testing.",
    ),
    (
        "spec",
        "A specification is a formal, machine-readable description of what your code should do. It includes inputs, outputs, rules, and examples. Specs serve as the source of truth for your system.",
    ),
    (
        "ai generation",
        "AI code generation uses machine learning models to automatically create implementations from your specifications. This saves time and reduces boilerplate code writing.",
    ),
    (
        "how to start",
        "To get started with spec-driven development: 1) Write a clear specification with examples, 2) Use an AI assistant to generate code, 3) Run the auto-generated tests, 4) Review and deploy.",
    ),
    (
        "examples",
        "Check the documentation for practical examples! We have examples of functions, API endpoints, and data processing pipelines. Visit /docs/ai-spec-driven-development for detailed walkthroughs.",
    ),
    (
        "testing",
        "Tests are auto-generated from your specification examples. Each example in your spec becomes a test case, ensuring your generated code meets requirements.",
    ),
    (
        "best practices",
        "Best practices include: Write clear specs with concrete examples, Include edge cases and error conditions, Use proper data types and constraints, Iterate on specs when needed.",
    ),
    (
        "tools",
        "You can use AI assistants like Claude, ChatGPT, Copilot, and others. We provide guidance on how to structure prompts for each tool.",
    ),
    (
        "benefits",
        "Benefits of spec-driven + AI development include: Fewer bugs, Self-documenting code, Faster development, Clear requirements, Better code quality, and easier onboarding.",
    ),
    (
        "ai book",
        "Welcome to AI-Book-by-Docusaurus! This is a comprehensive guide to AI & Spec-Driven Software Development. Explore our documentation, chapters, and blog posts.",
    ),
    (
        "learn",
        "Start by reading the Introduction (/docs/intro) or jump to AI & Spec-Driven Development (/docs/ai-spec-driven-development). We also have 5 chapters covering different aspects.",
    ),
];

/// A single keyword and the canned answer it triggers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeEntry {
    keyword: String,
    response: String,
}

impl KnowledgeEntry {
    pub fn new(keyword: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            response: response.into(),
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn response(&self) -> &str {
        &self.response
    }
}

/// Reasons a table is refused by [`KnowledgeBase::new`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KnowledgeError {
    #[error("entry {index} has an empty keyword")]
    EmptyKeyword { index: usize },
    #[error("keyword {keyword:?} is not lowercase")]
    KeywordNotLowercase { keyword: String },
    #[error("keyword {keyword:?} appears more than once")]
    DuplicateKeyword { keyword: String },
    #[error("keyword {keyword:?} has an empty response")]
    EmptyResponse { keyword: String },
}

/// Validated, ordered rule table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeBase {
    /// Build a table from entries in priority order.
    ///
    /// # Errors
    ///
    /// Rejects empty or non-lowercase keywords, repeated keywords and empty
    /// responses. Input is only ever lowercased before matching, so an
    /// uppercase keyword could never match.
    pub fn new(entries: Vec<KnowledgeEntry>) -> Result<Self, KnowledgeError> {
        validate(&entries)?;
        Ok(Self { entries })
    }

    /// The eleven documentation topics the widget ships with
    #[must_use]
    pub fn reference() -> Self {
        Self {
            entries: REFERENCE_TABLE
                .iter()
                .map(|(keyword, response)| KnowledgeEntry::new(*keyword, *response))
                .collect(),
        }
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::reference()
    }
}

fn validate(entries: &[KnowledgeEntry]) -> Result<(), KnowledgeError> {
    let mut seen = HashSet::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        if entry.keyword.is_empty() {
            return Err(KnowledgeError::EmptyKeyword { index });
        }
        if entry.keyword.to_lowercase() != entry.keyword {
            return Err(KnowledgeError::KeywordNotLowercase {
                keyword: entry.keyword.clone(),
            });
        }
        if !seen.insert(entry.keyword.as_str()) {
            return Err(KnowledgeError::DuplicateKeyword {
                keyword: entry.keyword.clone(),
            });
        }
        if entry.response.is_empty() {
            return Err(KnowledgeError::EmptyResponse {
                keyword: entry.keyword.clone(),
            });
        }
    }
    Ok(())
}
