//! Book Assistant - canned-answer chat engine for a documentation site
//!
//! A keyword [`resolver`] picks the reply; a per-session [`runtime`] drives
//! the [`state_machine`] that sequences user and bot turns with a short
//! "thinking" delay.

#![allow(clippy::must_use_candidate)]

pub mod config;
pub mod knowledge;
pub mod resolver;
pub mod runtime;
pub mod state_machine;

pub use config::{AssistantConfig, ConfigError};
pub use knowledge::{KnowledgeBase, KnowledgeEntry, KnowledgeError};
pub use resolver::{Resolution, Resolver};
pub use runtime::{start_session, Responder, SessionError, SessionEvent, SessionHandle};
pub use state_machine::{SessionState, Sender, Status, Turn};
