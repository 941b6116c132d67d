//! URL-encoded form payloads for the authoring and comment surfaces.

use serde::{Deserialize, Serialize};

use crate::domain::PostInput;

/// Body of the post create/edit forms.
///
/// Every field is optional on the wire; validation happens in the domain so
/// a half-filled form is a silent re-render, never a 400.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub slug: String,
    /// Checkbox field: submitted as `published=on` when ticked, absent
    /// otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
}

impl PostForm {
    /// Checkbox presence semantics: the value `"on"` means `true`.
    pub fn published_flag(&self) -> bool {
        self.published.as_deref() == Some("on")
    }

    /// Borrow the raw fields for the authoring workflow.
    pub fn input(&self) -> PostInput<'_> {
        PostInput {
            title: &self.title,
            content: &self.content,
            slug: &self.slug,
            published: self.published_flag(),
        }
    }
}

/// Body of the comment form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("on"), true)]
    #[case(Some(""), false)]
    #[case(Some("true"), false)]
    #[case(None, false)]
    fn checkbox_presence_semantics(#[case] raw: Option<&str>, #[case] expected: bool) {
        let form = PostForm {
            published: raw.map(str::to_owned),
            ..PostForm::default()
        };
        assert_eq!(form.published_flag(), expected);
    }
}
