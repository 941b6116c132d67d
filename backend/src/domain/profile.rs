//! Visitor identity and profile records issued by the hosted auth service.
//!
//! Identities are opaque: the backend never mints them and never inspects
//! their structure beyond rejecting blank values. Profiles are created at
//! signup and mutated only by the external service; the role carried on the
//! profile is the sole authorization input.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation error for identity values read from sessions or store rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// Identity string was empty once trimmed.
    #[error("identity must not be empty")]
    Empty,
    /// Identity string carried surrounding whitespace.
    #[error("identity must not contain surrounding whitespace")]
    Padded,
}

/// Stable, opaque identifier issued by the identity gateway.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`] from raw input.
    pub fn new(id: impl Into<String>) -> Result<Self, IdentityError> {
        let id = id.into();
        if id.is_empty() {
            return Err(IdentityError::Empty);
        }
        if id.trim() != id {
            return Err(IdentityError::Padded);
        }
        Ok(Self(id))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Authorization role attached to a profile.
///
/// A closed variant rather than a raw string so the admin gate matches
/// exhaustively and typos cannot masquerade as a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The single privileged role permitted to author and publish posts.
    Admin,
    /// Any authenticated non-admin identity, permitted only to comment.
    Commenter,
}

impl Role {
    /// Convenience predicate for render-time decisions.
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// Role and display-name record associated with an identity, 1:1, owned by
/// the external signup flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    pub email: Option<String>,
    pub username: Option<String>,
    pub role: Role,
}
