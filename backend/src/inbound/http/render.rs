//! Minimal HTML rendering for the page routes.
//!
//! Presentation is deliberately sparse: a shared shell with the site nav,
//! then plain markup per page. All user-supplied text passes through
//! [`escape_html`] before interpolation.

use chrono::Datelike;

use crate::domain::{CommentView, Post};

use super::viewer::Viewer;

/// Escape the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Shared page shell: header nav plus the page body.
fn layout(title: &str, viewer: &Viewer, body: &str) -> String {
    let session_link = if !viewer.signed_in() {
        r#"<a href="/auth/login">login</a>"#.to_owned()
    } else {
        let label = if viewer.is_admin() {
            "logout (admin)"
        } else {
            "logout"
        };
        format!(
            r#"<form action="/auth/sign-out" method="post"><button type="submit">{label}</button></form>"#
        )
    };

    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n<header><nav><a href=\"/blog\">blog</a> <a href=\"/\">index</a> {session_link}</nav></header>\n<main>\n{body}\n</main>\n</body>\n</html>\n",
        escape_html(title),
    )
}

/// Landing page at `/`.
pub fn landing_page(viewer: &Viewer) -> String {
    layout(
        "index",
        viewer,
        r#"<h1>index</h1><p><a href="/blog">blog</a></p>"#,
    )
}

/// Blog listing at `/blog`: year + title rows, newest first.
pub fn listing_page(viewer: &Viewer, posts: &[Post]) -> String {
    let mut body = String::new();
    if viewer.is_admin() {
        body.push_str(r#"<p><a href="/blog/create">create</a></p>"#);
    }

    body.push_str("<ul>\n");
    if posts.is_empty() {
        // Placeholder rows so a fresh site does not look broken.
        for (year, entry) in [
            (2025, "entry 1 extra text"),
            (2025, "entry 2 some more text"),
            (2024, "entry 1 spaced text"),
        ] {
            body.push_str(&format!("<li><span>{year}</span> {entry}</li>\n"));
        }
    } else {
        for post in posts {
            let draft_marker = if !post.published && viewer.is_admin() {
                " <em>(draft)</em>"
            } else {
                ""
            };
            body.push_str(&format!(
                "<li><span>{}</span> <a href=\"/blog/{}\">{}</a>{draft_marker}</li>\n",
                post.created_at.year(),
                post.slug,
                escape_html(&post.title),
            ));
        }
    }
    body.push_str("</ul>");

    layout("blog", viewer, &body)
}

/// Post detail at `/blog/{slug}`, comments section included.
pub fn post_page(viewer: &Viewer, post: &Post, comments: &[CommentView]) -> String {
    let mut body = format!("<h1>{}</h1>", escape_html(&post.title));
    if viewer.is_admin() {
        body.push_str(&format!(
            " <a href=\"/blog/{}/edit\">edit</a>",
            post.slug
        ));
    }

    body.push_str("\n<article>\n");
    for line in post.content.split('\n') {
        if !line.trim().is_empty() {
            body.push_str(&format!("<p>{}</p>\n", escape_html(line)));
        }
    }
    body.push_str("</article>\n");

    if !viewer.signed_in() {
        body.push_str(r#"<p><a href="/auth/login">comment</a></p>"#);
    }

    body.push_str("<section id=\"comments\">\n");
    if viewer.signed_in() {
        body.push_str(&format!(
            "<form action=\"/blog/{}/comments\" method=\"post\">\n<textarea name=\"content\" placeholder=\"Write a comment...\"></textarea>\n<span>{}</span> <button type=\"submit\">submit</button>\n</form>\n",
            post.slug,
            escape_html(viewer.display_name()),
        ));
    }
    if comments.is_empty() {
        body.push_str("<p>No comments yet.</p>\n");
    } else {
        for comment in comments {
            body.push_str(&format!(
                "<div><strong>{}</strong> <time>{}</time><p>{}</p></div>\n",
                escape_html(&comment.author),
                comment.created_at.format("%Y-%m-%d"),
                escape_html(&comment.content),
            ));
        }
    }
    body.push_str("</section>");

    layout(&post.title, viewer, &body)
}

/// Prefill values for the authoring form.
#[derive(Debug, Clone, Default)]
pub struct FormValues {
    pub title: String,
    pub content: String,
    pub slug: String,
    pub published: bool,
}

impl From<&Post> for FormValues {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            slug: post.slug.as_str().to_owned(),
            published: post.published,
        }
    }
}

/// Create/edit form page. `action` is the path the form posts back to.
pub fn post_form_page(viewer: &Viewer, action: &str, values: &FormValues) -> String {
    let checked = if values.published { " checked" } else { "" };
    let body = format!(
        "<form action=\"{action}\" method=\"post\">\n<input type=\"text\" name=\"title\" placeholder=\"title\" value=\"{}\">\n<textarea name=\"content\" placeholder=\"Write your post content here...\">{}</textarea>\n<input type=\"text\" name=\"slug\" placeholder=\"slug (optional)\" value=\"{}\">\n<label><input type=\"checkbox\" name=\"published\"{checked}> Published</label>\n<button type=\"submit\">submit</button>\n</form>",
        escape_html(&values.title),
        escape_html(&values.content),
        escape_html(&values.slug),
    );
    layout("post", viewer, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PostId, Slug};
    use chrono::{TimeZone, Utc};
    use rstest::rstest;
    use uuid::Uuid;

    fn post(published: bool) -> Post {
        Post {
            id: PostId::new(Uuid::new_v4()),
            title: "Tags <&> quotes".into(),
            content: "line one\n\nline two".into(),
            slug: Slug::parse("tags-quotes").expect("valid slug"),
            published,
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).single().expect("valid ts"),
            updated_at: Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).single().expect("valid ts"),
        }
    }

    fn admin_viewer() -> Viewer {
        use crate::domain::{Profile, Role, UserId};
        Viewer {
            identity: Some(UserId::new("user-admin").expect("valid id")),
            profile: Some(Profile {
                id: UserId::new("user-admin").expect("valid id"),
                email: None,
                username: Some("admin".into()),
                role: Role::Admin,
            }),
        }
    }

    #[rstest]
    #[case("a & b", "a &amp; b")]
    #[case("<script>", "&lt;script&gt;")]
    #[case(r#"say "hi""#, "say &quot;hi&quot;")]
    fn escapes_html_significant_characters(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape_html(input), expected);
    }

    #[rstest]
    fn drafts_are_marked_for_admin_viewers_only() {
        let draft = post(false);
        let for_admin = listing_page(&admin_viewer(), std::slice::from_ref(&draft));
        assert!(for_admin.contains("(draft)"));
        assert!(for_admin.contains("create"));

        let for_anonymous = listing_page(&Viewer::anonymous(), std::slice::from_ref(&draft));
        assert!(!for_anonymous.contains("(draft)"));
        assert!(!for_anonymous.contains("/blog/create"));
    }

    #[rstest]
    fn empty_listing_shows_placeholder_entries() {
        let page = listing_page(&Viewer::anonymous(), &[]);
        assert!(page.contains("entry 1 extra text"));
    }

    #[rstest]
    fn post_page_escapes_title_and_splits_paragraphs() {
        let page = post_page(&Viewer::anonymous(), &post(true), &[]);
        assert!(page.contains("Tags &lt;&amp;&gt; quotes"));
        assert!(page.contains("<p>line one</p>"));
        assert!(page.contains("<p>line two</p>"));
        assert!(page.contains("No comments yet."));
        // Anonymous visitors are offered the login link, not the form.
        assert!(page.contains(r#"<a href="/auth/login">comment</a>"#));
        assert!(!page.contains("<textarea name=\"content\""));
    }

    #[rstest]
    fn edit_form_prefills_stored_values() {
        let stored = post(true);
        let page = post_form_page(
            &admin_viewer(),
            "/blog/tags-quotes/edit",
            &FormValues::from(&stored),
        );
        assert!(page.contains("value=\"tags-quotes\""));
        assert!(page.contains(" checked"));
    }
}
