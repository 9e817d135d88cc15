//! Effects produced by state transitions

use crate::state_machine::state::Turn;
use std::time::Duration;

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a turn to the transcript
    AppendTurn { turn: Turn },

    /// Replace the draft input
    SetDraft { text: String },

    /// Fire `Event::ReplyDue` for `reply_to` after `delay`
    ScheduleReply { delay: Duration, reply_to: String },

    /// Tell subscribers the pending flag changed
    NotifyPending { pending: bool },
}

impl Effect {
    pub fn append_turn(turn: Turn) -> Self {
        Effect::AppendTurn { turn }
    }

    pub fn clear_draft() -> Self {
        Effect::SetDraft {
            text: String::new(),
        }
    }
}
