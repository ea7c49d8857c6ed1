//! Session layer — the controller and the state it owns.

pub mod controller;
pub mod state;

pub use controller::{FALLBACK_REPLY, SessionController, WELCOME_MESSAGE};
pub use state::SessionState;
