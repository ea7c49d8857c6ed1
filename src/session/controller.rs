//! Session controller — the state machine behind onboarding and chat.
//!
//! Owns `SessionState` and mediates every transition. Backend failures never
//! escape a transition: the normalized error becomes transcript text or a log
//! line, and the loading flag is released on every exit path.

use std::sync::Arc;

use crate::api::CoachBackend;
use crate::message::Message;
use crate::profile::ProfileDraft;

use super::state::SessionState;

/// Assistant greeting appended the moment onboarding completes.
pub const WELCOME_MESSAGE: &str = "Welcome! I'm your personal health and wellness coach. \
     I can help you with fitness, nutrition, mental health, and overall wellness. \
     What would you like to work on today?";

/// Substitute assistant reply for any failed chat turn. The failure reason
/// stays in the logs; the transcript gets this text.
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Mediates every session transition; the sole owner of `SessionState`.
pub struct SessionController {
    state: SessionState,
    backend: Arc<dyn CoachBackend>,
}

impl SessionController {
    pub fn new(backend: Arc<dyn CoachBackend>) -> Self {
        Self {
            state: SessionState::default(),
            backend,
        }
    }

    /// Read-only view of the session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Replace the in-progress draft text. No other state is touched.
    pub fn set_pending(&mut self, text: impl Into<String>) {
        self.state.pending = text.into();
    }

    /// Complete onboarding: parse the form draft, save the profile
    /// best-effort, mark the session onboarded, and append the welcome
    /// message.
    ///
    /// The save outcome is deliberately discarded — the transition proceeds
    /// identically whether it succeeds or fails. A second call after
    /// onboarding is a no-op.
    pub async fn submit_onboarding(&mut self, draft: &ProfileDraft) {
        if self.state.onboarded {
            tracing::warn!("Onboarding already completed; ignoring resubmission");
            return;
        }

        let profile = draft.parse();
        let saved = self.backend.save_profile(&profile).await;
        if !saved {
            tracing::warn!("Profile save failed; onboarding proceeds without it");
        }

        self.state.profile = profile;
        self.state.onboarded = true;
        self.state.messages.push(Message::assistant(WELCOME_MESSAGE));
    }

    /// Submit one chat turn. Returns whether the submission was accepted.
    ///
    /// Rejected silently (no state change) when onboarding is incomplete,
    /// the trimmed text is blank, or a turn is already in flight — at most
    /// one outgoing message at a time, no queueing.
    ///
    /// An accepted turn appends the user message immediately (before the
    /// network call resolves), then exactly one assistant message once the
    /// call settles: the reply text on success, the fixed fallback on
    /// failure.
    pub async fn submit_message(&mut self, text: &str) -> bool {
        if !self.state.onboarded {
            tracing::warn!("Chat message submitted before onboarding; ignoring");
            return false;
        }
        let trimmed = text.trim();
        if trimmed.is_empty() || self.state.loading {
            return false;
        }

        let prompt = trimmed.to_string();
        self.state.messages.push(Message::user(prompt.clone()));
        self.state.pending.clear();
        self.state.loading = true;

        let reply = match self.backend.ask(&prompt, &self.state.profile).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "Chat turn failed; substituting fallback reply");
                FALLBACK_REPLY.to_string()
            }
        };

        self.state.messages.push(Message::assistant(reply));
        self.state.loading = false;
        true
    }
}

// ── Tests ───────────────────────────────────────────────────────────
