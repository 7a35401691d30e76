//! Input validation and sanitization for blog payloads.
//!
//! Mutating handlers run this before touching persistence; a failed
//! validation therefore performs zero writes.

use serde::Serialize;

/// A single field-level validation failure, in submission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub param: &'static str,
    pub msg: &'static str,
    pub value: String,
}

/// Validated, sanitized blog input ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogInput {
    pub title: String,
    pub description: String,
}

/// Validate and sanitize a blog payload.
///
/// Each field is trimmed, required non-empty, and HTML-escaped. All field
/// errors are collected and returned together rather than stopping at the
/// first one.
pub fn validate_blog_input(title: &str, description: &str) -> Result<BlogInput, Vec<FieldError>> {
    let mut errors = Vec::new();

    let title = title.trim();
    if title.is_empty() {
        errors.push(FieldError {
            param: "title",
            msg: "Title must not be empty.",
            value: title.to_string(),
        });
    }

    let description = description.trim();
    if description.is_empty() {
        errors.push(FieldError {
            param: "description",
            msg: "Description must not be empty.",
            value: description.to_string(),
        });
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(BlogInput {
        title: escape_html(title),
        description: escape_html(description),
    })
}

/// Escape HTML-significant characters so stored text is inert when echoed
/// back into markup.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}
