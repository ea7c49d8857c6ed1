//! Transport layer for the coach backend.

pub mod backend;
pub mod client;
pub mod observer;
pub mod types;

pub use backend::CoachBackend;
pub use client::ApiClient;
pub use observer::{RequestObserver, RequestOutcome, TracingObserver};
pub use types::{GoalRequest, ProgressEntry, WorkoutLog};
