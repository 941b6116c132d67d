//! Admin gate guarding the authoring surfaces.

use std::sync::Arc;

use tracing::warn;

use super::ports::ProfileStore;
use super::profile::{Profile, Role, UserId};

/// Where to send a caller that failed the admin gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminRedirect {
    /// No identity at all: the caller must sign in first.
    Login,
    /// Identity present but not an admin, or no profile found. Denial is
    /// indistinguishable from not-found so admin-only routes do not leak
    /// their existence.
    Listing,
}

/// Authorization guard for admin-only pages and actions.
///
/// Invoked synchronously before any admin workflow runs; it has no side
/// effects beyond the returned redirect signal.
pub struct AdminGuard {
    profiles: Arc<dyn ProfileStore>,
}

impl AdminGuard {
    pub fn new(profiles: Arc<dyn ProfileStore>) -> Self {
        Self { profiles }
    }

    /// Resolve the caller's profile and require the admin role.
    ///
    /// Profile-store failures are logged and treated like an absent profile,
    /// keeping the denial signal uniform.
    pub async fn require_admin(
        &self,
        identity: Option<&UserId>,
    ) -> Result<Profile, AdminRedirect> {
        let Some(id) = identity else {
            return Err(AdminRedirect::Login);
        };

        let profile = match self.profiles.profile(id).await {
            Ok(profile) => profile,
            Err(error) => {
                warn!(user = %id, %error, "profile lookup failed during admin gate");
                None
            }
        };

        match profile {
            Some(profile) => match profile.role {
                Role::Admin => Ok(profile),
                Role::Commenter => Err(AdminRedirect::Listing),
            },
            None => Err(AdminRedirect::Listing),
        }
    }
}
