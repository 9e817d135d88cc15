//! Session runtime executor

use super::traits::Responder;
use super::{Command, SessionEvent};

use crate::state_machine::{transition, Effect, Event, SessionContext, SessionState};
use chrono::Utc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;

/// Capacity of the internal timer channel; at most one reply is ever in flight
const TIMER_CHANNEL_CAPACITY: usize = 4;

/// Session actor owning the transcript and the pending reply
pub struct SessionRuntime<R>
where
    R: Responder + 'static,
{
    context: SessionContext,
    state: SessionState,
    responder: R,
    command_rx: mpsc::Receiver<Command>,
    /// Timer tasks report back here, never through the public command channel
    timer_tx: mpsc::Sender<Event>,
    timer_rx: mpsc::Receiver<Event>,
    broadcast_tx: broadcast::Sender<SessionEvent>,
    /// Cancelled on teardown; reply timers hold child tokens
    shutdown: CancellationToken,
    /// Token of the currently scheduled reply
    reply_cancel_token: Option<CancellationToken>,
}

impl<R> SessionRuntime<R>
where
    R: Responder + 'static,
{
    pub(crate) fn new(
        context: SessionContext,
        state: SessionState,
        responder: R,
        command_rx: mpsc::Receiver<Command>,
        broadcast_tx: broadcast::Sender<SessionEvent>,
        shutdown: CancellationToken,
    ) -> Self {
        let (timer_tx, timer_rx) = mpsc::channel(TIMER_CHANNEL_CAPACITY);
        Self {
            context,
            state,
            responder,
            command_rx,
            timer_tx,
            timer_rx,
            broadcast_tx,
            shutdown,
            reply_cancel_token: None,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(session_id = %self.context.session_id, "Starting session runtime");

        // Process events in a loop; every mutation happens on this task
        loop {
            tokio::select! {
                biased;
                () = self.shutdown.cancelled() => {
                    tracing::debug!(session_id = %self.context.session_id, "Shutdown requested");
                    break;
                }
                // Due replies go ahead of queued commands
                Some(event) = self.timer_rx.recv() => {
                    self.process_event(event);
                }
                command = self.command_rx.recv() => {
                    match command {
                        Some(command) => self.handle_command(command),
                        // Every handle dropped
                        None => break,
                    }
                }
            }
        }

        // Discard a reply that has not fired yet
        self.shutdown.cancel();
        if let Some(token) = self.reply_cancel_token.take() {
            token.cancel();
            tracing::info!(
                session_id = %self.context.session_id,
                "Discarded pending reply on teardown"
            );
        }

        tracing::info!(session_id = %self.context.session_id, "Session runtime stopped");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Dispatch(event) => self.process_event(event),
            Command::Snapshot(reply_tx) => {
                // Requester may have gone away
                let _ = reply_tx.send(self.state.clone());
            }
        }
    }

    fn process_event(&mut self, event: Event) {
        // Pure state transition
        let result = match transition(&self.state.status, &self.context, &self.responder, event) {
            Ok(r) => r,
            Err(e) => {
                // Invalid submissions are dropped silently
                tracing::debug!(
                    session_id = %self.context.session_id,
                    reason = %e,
                    "Ignoring event"
                );
                return;
            }
        };

        self.state.status = result.new_state;

        for effect in result.effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::AppendTurn { turn } => {
                self.state.turns.push(turn.clone());
                self.notify(SessionEvent::Turn { turn });
            }

            Effect::SetDraft { text } => {
                if self.state.draft_input != text {
                    self.state.draft_input.clone_from(&text);
                    self.notify(SessionEvent::DraftChanged { text });
                }
            }

            Effect::ScheduleReply { delay, reply_to } => {
                self.schedule_reply(delay, reply_to);
            }

            Effect::NotifyPending { pending } => {
                if !pending {
                    self.reply_cancel_token = None;
                }
                self.notify(SessionEvent::PendingChanged { pending });
            }
        }
    }

    /// Spawn the timer that delivers `Event::ReplyDue`
    fn schedule_reply(&mut self, delay: Duration, reply_to: String) {
        let cancel_token = self.shutdown.child_token();
        self.reply_cancel_token = Some(cancel_token.clone());

        let timer_tx = self.timer_tx.clone();
        let session_id = self.context.session_id.clone();

        tracing::debug!(
            session_id = %session_id,
            reply_to = %reply_to,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "Scheduling reply"
        );

        tokio::spawn(async move {
            tokio::select! {
                () = cancel_token.cancelled() => {
                    tracing::debug!(session_id = %session_id, reply_to = %reply_to, "Scheduled reply cancelled");
                }
                () = tokio::time::sleep(delay) => {
                    let event = Event::ReplyDue {
                        reply_to,
                        turn_id: uuid::Uuid::new_v4().to_string(),
                        at: Utc::now(),
                    };
                    // The runtime may have stopped while we slept
                    let _ = timer_tx.send(event).await;
                }
            }
        });
    }

    fn notify(&self, event: SessionEvent) {
        if self.broadcast_tx.send(event).is_err() {
            tracing::trace!(session_id = %self.context.session_id, "No subscribers");
        }
    }
}
