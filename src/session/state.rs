//! Session state owned by the controller.

use crate::message::Message;
use crate::profile::UserProfile;

/// The aggregate state of one coaching session.
///
/// Owned exclusively by `SessionController`; everything else sees it through
/// a shared reference, and all mutation flows through the controller's
/// transitions. Once `onboarded` flips to true it never reverts, and from
/// that point `messages` is never empty (the welcome message lands with the
/// transition).
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// False until onboarding completes.
    pub onboarded: bool,
    /// Current profile; empty until onboarding, then replaced wholesale.
    pub profile: UserProfile,
    /// Append-only chronological transcript.
    pub messages: Vec<Message>,
    /// Draft text of the next outgoing message; empty when idle.
    pub pending: String,
    /// True only while a chat turn is in flight. Never true before
    /// onboarding.
    pub loading: bool,
}

impl SessionState {
    /// Most recent transcript entry, if any.
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state() {
        let state = SessionState::default();
        assert!(!state.onboarded);
        assert!(state.profile.is_empty());
        assert!(state.messages.is_empty());
        assert!(state.pending.is_empty());
        assert!(!state.loading);
        assert!(state.last_message().is_none());
    }
}
