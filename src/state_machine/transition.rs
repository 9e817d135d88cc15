//! Pure state transition function

use super::state::{SessionContext, Status, Turn};
use super::{Effect, Event};
use crate::runtime::Responder;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: Status,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: Status) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Why a submission was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionRejection {
    /// Empty or whitespace-only text
    BlankText,
    /// A reply is already in flight
    ReplyPending,
}

/// Errors that can occur during transition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Submission ignored: {0:?}")]
    InvalidSubmission(SubmissionRejection),
    #[error("Reply for {reply_to} does not match the pending submission")]
    StaleReply { reply_to: String },
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs; ids and
/// timestamps arrive inside the event.
///
/// # Errors
///
/// [`TransitionError::InvalidSubmission`] for blank text or a submission
/// while a reply is pending, [`TransitionError::StaleReply`] for a reply that
/// does not match the pending submission. The state is unchanged in both cases.
pub fn transition(
    state: &Status,
    context: &SessionContext,
    responder: &dyn Responder,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // Draft edits never change status
        (_, Event::DraftChanged { text }) => {
            Ok(TransitionResult::new(state.clone()).with_effect(Effect::SetDraft { text }))
        }

        (_, Event::UserMessage { text, .. }) if text.trim().is_empty() => Err(
            TransitionError::InvalidSubmission(SubmissionRejection::BlankText),
        ),

        // Idle + UserMessage -> AwaitingReply
        (Status::Idle, Event::UserMessage { text, turn_id, at }) => {
            Ok(TransitionResult::new(Status::AwaitingReply {
                prompt: text.clone(),
                reply_to: turn_id.clone(),
            })
            .with_effect(Effect::append_turn(Turn::user(turn_id.clone(), text, at)))
            .with_effect(Effect::clear_draft())
            .with_effect(Effect::NotifyPending { pending: true })
            .with_effect(Effect::ScheduleReply {
                delay: context.reply_delay,
                reply_to: turn_id,
            }))
        }

        // At most one reply in flight
        (Status::AwaitingReply { .. }, Event::UserMessage { .. }) => Err(
            TransitionError::InvalidSubmission(SubmissionRejection::ReplyPending),
        ),

        // AwaitingReply + matching ReplyDue -> Idle
        (
            Status::AwaitingReply {
                prompt,
                reply_to: pending_id,
            },
            Event::ReplyDue {
                reply_to,
                turn_id,
                at,
            },
        ) if *pending_id == reply_to => {
            let reply = responder.respond(prompt);
            Ok(TransitionResult::new(Status::Idle)
                .with_effect(Effect::append_turn(Turn::bot(turn_id, reply, at)))
                .with_effect(Effect::NotifyPending { pending: false }))
        }

        (_, Event::ReplyDue { reply_to, .. }) => Err(TransitionError::StaleReply { reply_to }),
    }
}
