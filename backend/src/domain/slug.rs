//! Slug derivation and validation for post identifiers.
//!
//! Slugs are non-empty identifiers composed of lowercase ASCII letters,
//! digits, and single hyphens, derived from a post title or an explicit
//! override supplied by the author.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Derive a URL-safe slug from free-form text.
///
/// Lowercases and trims the input, drops every character that is not a
/// lowercase ASCII letter, digit, whitespace, or hyphen, then collapses each
/// run of whitespace or hyphens into a single interior hyphen.
///
/// Total and idempotent: `derive_slug(derive_slug(s)) == derive_slug(s)` for
/// every input, so re-saving an already-slugified value is a no-op. An
/// all-symbol input yields the empty string, which callers must treat as
/// invalid.
pub fn derive_slug(input: &str) -> String {
    let lowered = input.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_hyphen = false;

    for ch in lowered.trim().chars() {
        if ch.is_whitespace() || ch == '-' {
            // Separators only materialise between kept characters, which
            // also strips leading and trailing hyphens.
            pending_hyphen = !slug.is_empty();
        } else if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen {
                slug.push('-');
                pending_hyphen = false;
            }
            slug.push(ch);
        }
    }

    slug
}

/// Return `true` when `value` is already a well-formed slug.
///
/// Route handlers call this on raw path segments so junk never reaches the
/// store as a lookup key.
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with('-')
        && !value.ends_with('-')
        && !value.contains("--")
        && value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

/// Validation error returned when a string is not a usable slug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlugError {
    /// Derivation produced no characters at all.
    #[error("slug must not be empty")]
    Empty,
    /// The value contains characters outside `[a-z0-9-]` or malformed hyphens.
    #[error("slug may only contain lowercase letters, digits, and single interior hyphens")]
    Malformed,
}

/// URL-safe post identifier.
///
/// ## Invariants
/// - Non-empty.
/// - Only lowercase ASCII letters, digits, and hyphens.
/// - No leading, trailing, or repeated hyphens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Derive a slug from free-form text, rejecting inputs that reduce to
    /// nothing.
    pub fn derive(input: &str) -> Result<Self, SlugError> {
        let derived = derive_slug(input);
        if derived.is_empty() {
            return Err(SlugError::Empty);
        }
        Ok(Self(derived))
    }

    /// Accept an already well-formed slug without re-deriving it.
    pub fn parse(value: impl Into<String>) -> Result<Self, SlugError> {
        let value = value.into();
        if value.is_empty() {
            return Err(SlugError::Empty);
        }
        if !is_valid_slug(&value) {
            return Err(SlugError::Malformed);
        }
        Ok(Self(value))
    }

    /// Borrow the slug as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}
