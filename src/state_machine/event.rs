//! Events that can occur in a session

use chrono::{DateTime, Utc};

/// Events that trigger state transitions
///
/// Ids and timestamps are minted by the caller so the transition stays pure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // User events
    UserMessage {
        text: String,
        turn_id: String,
        at: DateTime<Utc>,
    },
    DraftChanged {
        text: String,
    },

    // Timer events
    ReplyDue {
        /// User turn the timer was scheduled for
        reply_to: String,
        turn_id: String,
        at: DateTime<Utc>,
    },
}
