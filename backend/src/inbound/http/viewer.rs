//! Per-request viewer resolution: identity plus profile, both optional.

use tracing::warn;

use crate::domain::{Profile, Role, UserId};

use super::session::{current_identity, SessionContext};
use super::state::HttpState;

/// Who is looking at the page.
#[derive(Debug, Clone)]
pub struct Viewer {
    pub identity: Option<UserId>,
    pub profile: Option<Profile>,
}

impl Viewer {
    pub fn anonymous() -> Self {
        Self {
            identity: None,
            profile: None,
        }
    }

    pub fn signed_in(&self) -> bool {
        self.identity.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.profile.as_ref().map(|profile| profile.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role().is_some_and(Role::is_admin)
    }

    /// Name shown next to the comment form.
    pub fn display_name(&self) -> &str {
        self.profile
            .as_ref()
            .and_then(|profile| profile.username.as_deref())
            .unwrap_or("commenter")
    }
}

/// Resolve the viewer behind a request. Profile lookups that fail are logged
/// and leave the viewer identity-only; pages still render.
pub async fn resolve_viewer(session: &SessionContext, state: &HttpState) -> Viewer {
    let Some(identity) = current_identity(session, state.identity.as_ref()).await else {
        return Viewer::anonymous();
    };

    let profile = match state.profiles.profile(&identity).await {
        Ok(profile) => profile,
        Err(error) => {
            warn!(user = %identity, %error, "viewer profile lookup failed");
            None
        }
    };

    Viewer {
        identity: Some(identity),
        profile,
    }
}
