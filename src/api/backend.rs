//! Seam between the session layer and the transport.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::profile::UserProfile;

/// The slice of the coach backend the session controller depends on.
///
/// `ApiClient` is the production implementation; tests substitute a scripted
/// fake. Every method settles to a normalized outcome — implementations must
/// not panic and must not surface raw transport faults.
#[async_trait]
pub trait CoachBackend: Send + Sync {
    /// One chat turn. `Err` carries a diagnostic reason; the caller decides
    /// what the user sees.
    async fn ask(&self, prompt: &str, profile: &UserProfile) -> Result<String, ApiError>;

    /// Best-effort profile save: `true` on 2xx, `false` on any failure.
    async fn save_profile(&self, profile: &UserProfile) -> bool;

    /// Fetch the stored profile; the empty profile on any failure.
    async fn fetch_profile(&self) -> UserProfile;
}
