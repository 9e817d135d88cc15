//! Session state types

use crate::knowledge::GREETING;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Reference delay between a submission and the bot's reply
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(500);

// ============================================================================
// Turns
// ============================================================================

/// Who authored a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

/// One message in the session. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        sender: Sender,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            sender,
            timestamp,
        }
    }

    pub fn user(id: impl Into<String>, text: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self::new(id, text, Sender::User, at)
    }

    pub fn bot(id: impl Into<String>, text: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self::new(id, text, Sender::Bot, at)
    }

    /// Two-digit `HH:MM` clock time shown next to the bubble
    pub fn clock_time(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

// ============================================================================
// Status
// ============================================================================

/// Bot status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Status {
    /// Ready for user input, no reply scheduled
    #[default]
    Idle,

    /// A reply is scheduled for the user turn `reply_to`
    AwaitingReply {
        /// Text that will be resolved when the reply fires
        prompt: String,
        /// Id of the user turn being answered
        reply_to: String,
    },
}

impl Status {
    pub fn is_pending(&self) -> bool {
        matches!(self, Status::AwaitingReply { .. })
    }
}

// ============================================================================
// Session State
// ============================================================================

/// Snapshot of a session handed to the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub turns: Vec<Turn>,
    pub status: Status,
    pub draft_input: String,
}

impl SessionState {
    /// Fresh session with the greeting already present
    pub fn seeded(greeting_id: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            turns: vec![Turn::bot(greeting_id, GREETING, at)],
            status: Status::Idle,
            draft_input: String::new(),
        }
    }

    pub fn pending(&self) -> bool {
        self.status.is_pending()
    }

    /// Whether the send control should be enabled for the current draft
    pub fn can_submit(&self) -> bool {
        !self.pending() && !self.draft_input.trim().is_empty()
    }

    pub fn last_turn(&self) -> Option<&Turn> {
        self.turns.last()
    }
}

/// Per-session configuration (immutable)
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub session_id: String,
    pub reply_delay: Duration,
}

impl SessionContext {
    pub fn new(session_id: impl Into<String>, reply_delay: Duration) -> Self {
        Self {
            session_id: session_id.into(),
            reply_delay,
        }
    }
}
