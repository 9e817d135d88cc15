//! Runtime for executing sessions
//!
//! Each session is an actor: one tokio task owns the transcript and applies
//! events in arrival order. Callers talk to it through a [`SessionHandle`].

mod executor;
pub mod traits;


pub(crate) use executor::SessionRuntime;
pub use traits::*;

use crate::config::{AssistantConfig, MAX_CHANNEL_CAPACITY};
use crate::state_machine::{Event, SessionContext, SessionState, Turn};
use chrono::Utc;
use thiserror::Error;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio_util::sync::CancellationToken;

/// Notifications sent to subscribers whenever the session changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A turn was appended
    Turn { turn: Turn },
    /// The bot started or stopped "thinking"
    PendingChanged { pending: bool },
    /// The draft input changed
    DraftChanged { text: String },
}

/// Errors returned by [`SessionHandle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Session has been shut down")]
    Closed,
}

/// Requests handled by the session task
#[derive(Debug)]
pub(crate) enum Command {
    Dispatch(Event),
    Snapshot(oneshot::Sender<SessionState>),
}

/// Handle to interact with a running session
#[derive(Debug, Clone)]
pub struct SessionHandle {
    session_id: String,
    command_tx: mpsc::Sender<Command>,
    broadcast_tx: broadcast::Sender<SessionEvent>,
    shutdown: CancellationToken,
}

/// Start a session on the current tokio runtime.
///
/// The session lives until [`SessionHandle::shutdown`] is called or every
/// handle is dropped; either way a scheduled reply is cancelled.
pub fn start_session<R>(config: &AssistantConfig, responder: R) -> SessionHandle
where
    R: Responder + 'static,
{
    let session_id = uuid::Uuid::new_v4().to_string();
    let context = SessionContext::new(&session_id, config.reply_delay);
    let initial = SessionState::seeded(uuid::Uuid::new_v4().to_string(), Utc::now());

    // Fields are public, so a hand-built config may bypass validation
    let (command_tx, command_rx) =
        mpsc::channel(config.command_capacity.clamp(1, MAX_CHANNEL_CAPACITY));
    let (broadcast_tx, _) =
        broadcast::channel(config.event_capacity.clamp(1, MAX_CHANNEL_CAPACITY));
    let shutdown = CancellationToken::new();

    let runtime = SessionRuntime::new(
        context,
        initial,
        responder,
        command_rx,
        broadcast_tx.clone(),
        shutdown.clone(),
    );
    tokio::spawn(runtime.run());

    SessionHandle {
        session_id,
        command_tx,
        broadcast_tx,
        shutdown,
    }
}

impl SessionHandle {
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Submit user text. Blank text, or text sent while a reply is pending,
    /// is ignored by the session.
    ///
    /// # Errors
    ///
    /// [`SessionError::Closed`] if the session has stopped.
    pub async fn submit(&self, text: impl Into<String>) -> Result<(), SessionError> {
        self.dispatch(Event::UserMessage {
            text: text.into(),
            turn_id: uuid::Uuid::new_v4().to_string(),
            at: Utc::now(),
        })
        .await
    }

    /// Replace the draft input.
    ///
    /// # Errors
    ///
    /// [`SessionError::Closed`] if the session has stopped.
    pub async fn set_draft(&self, text: impl Into<String>) -> Result<(), SessionError> {
        self.dispatch(Event::DraftChanged { text: text.into() }).await
    }

    /// Snapshot of the transcript, status and draft after every command sent
    /// before this call has been applied.
    ///
    /// # Errors
    ///
    /// [`SessionError::Closed`] if the session has stopped.
    pub async fn state(&self) -> Result<SessionState, SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(Command::Snapshot(reply_tx))
            .await
            .map_err(|_| SessionError::Closed)?;
        reply_rx.await.map_err(|_| SessionError::Closed)
    }

    /// Resolve once no reply is pending.
    ///
    /// Returns immediately when the session is idle.
    ///
    /// # Errors
    ///
    /// [`SessionError::Closed`] if the session stops first.
    pub async fn wait_idle(&self) -> Result<(), SessionError> {
        // Subscribe before the snapshot so the transition cannot slip between them
        let mut updates = self.broadcast_tx.subscribe();
        while self.state().await?.pending() {
            loop {
                tokio::select! {
                    () = self.shutdown.cancelled() => return Err(SessionError::Closed),
                    update = updates.recv() => match update {
                        Ok(SessionEvent::PendingChanged { pending: false }) => return Ok(()),
                        Ok(_) => {}
                        // Re-check the snapshot
                        Err(RecvError::Lagged(_)) => break,
                        Err(RecvError::Closed) => return Err(SessionError::Closed),
                    },
                }
            }
        }
        Ok(())
    }

    /// Subscribe to session updates
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.broadcast_tx.subscribe()
    }

    /// Tear the session down, discarding any scheduled reply
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    /// Resolves once the session task has stopped
    pub async fn closed(&self) {
        self.command_tx.closed().await;
    }

    pub fn is_closed(&self) -> bool {
        self.command_tx.is_closed()
    }

    async fn dispatch(&self, event: Event) -> Result<(), SessionError> {
        self.command_tx
            .send(Command::Dispatch(event))
            .await
            .map_err(|_| SessionError::Closed)
    }
}
