//! Trait abstractions for the runtime
//!
//! The session only needs something that turns submitted text into a reply.
//! Today that is the keyword [`Resolver`]; a model backend would slot in here.

use crate::resolver::Resolver;
use std::sync::Arc;

/// Produces the bot's reply for a submitted message
pub trait Responder: Send + Sync {
    /// Must return a non-empty reply for every input
    fn respond(&self, input: &str) -> String;
}

impl Responder for Resolver {
    fn respond(&self, input: &str) -> String {
        self.resolve(input)
    }
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

impl<T: Responder + ?Sized> Responder for Arc<T> {
    fn respond(&self, input: &str) -> String {
        (**self).respond(input)
    }
}
