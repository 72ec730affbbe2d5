// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rich-text rewriting for step fields.
//!
//! Step text is a forgiving HTML-ish fragment that can embed `<<<name>>>`
//! placeholders. Two rewrites happen during import:
//!
//! - attachment placeholders are replaced by a reference to the uploaded file,
//!   relocated to just after the placeholder's enclosing markup element so the
//!   reference is not nested inside arbitrary inline markup;
//! - parameter placeholders are replaced by mention markup carrying the
//!   parameter's remote key id.
//!
//! The fragment is never required to be well formed. The scanner tolerates
//! broken markup and every rewrite falls back to "leave unchanged" or
//! "substitute in place" instead of failing.

use uuid::Uuid;

use crate::parameter::RemoteParameter;

/// File extensions rendered as inline images rather than a textual note.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Returns the `<<<filename>>>` placeholder for an attachment.
pub fn placeholder(name: &str) -> String {
    format!("<<<{name}>>>")
}

/// Builds the rich-text reference for an uploaded attachment.
pub fn attachment_reference(filename: &str, id: Uuid) -> String {
    let is_image = filename
        .rsplit('.')
        .next()
        .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|i| ext.eq_ignore_ascii_case(i)));
    if is_image {
        format!("<img src=\"/api/attachments/{id}\" alt=\"{filename}\"/>")
    } else {
        format!("<p>file attached: {filename}</p>")
    }
}

/// Mention markup for a parameter, keyed by its remote parameter-key id.
pub fn mention_markup(parameter: &RemoteParameter) -> String {
    format!(
        "<span class=\"mention\" data-key-id=\"{}\">{}</span>",
        parameter.key_id, parameter.name
    )
}

/// Rewrites one field for one attached filename.
///
/// - Placeholder present, upload succeeded: the placeholder is removed and the
///   reference inserted immediately after the close of its enclosing element;
///   with no enclosing element the reference substitutes in place.
/// - Placeholder present, upload failed (`uploaded` is `None`): the
///   placeholder is deleted.
/// - No placeholder, upload succeeded: the reference is appended at the end.
pub fn rewrite_attachment(field: &str, filename: &str, uploaded: Option<Uuid>) -> String {
    let marker = placeholder(filename);
    let Some(start) = field.find(&marker) else {
        return match uploaded {
            Some(id) => append_reference(field, filename, id),
            None => field.to_string(),
        };
    };
    let Some(id) = uploaded else {
        return field.replace(&marker, "");
    };
    let end = start + marker.len();
    let reference = attachment_reference(filename, id);
    match enclosing_element_end(field, start, end) {
        Some(insert_at) => {
            let mut out = String::with_capacity(field.len() + reference.len());
            out.push_str(&field[..start]);
            out.push_str(&field[end..insert_at]);
            out.push_str(&reference);
            out.push_str(&field[insert_at..]);
            out
        }
        None => field.replacen(&marker, &reference, 1),
    }
}

/// Appends an attachment reference at the end of a field.
pub fn append_reference(field: &str, filename: &str, id: Uuid) -> String {
    format!("{field}{}", attachment_reference(filename, id))
}

/// Returns true if any of the given fields embeds the filename's placeholder.
pub fn any_field_references(fields: &[&str], filename: &str) -> bool {
    let marker = placeholder(filename);
    fields.iter().any(|f| f.contains(&marker))
}

/// Replaces `<<<name>>>` parameter placeholders with mention markup.
///
/// Names match case-insensitively; placeholders naming no known parameter are
/// left untouched (they may be attachment placeholders).
pub fn substitute_parameter_mentions(field: &str, parameters: &[RemoteParameter]) -> String {
    let mut out = String::with_capacity(field.len());
    let mut rest = field;
    while let Some(start) = rest.find("<<<") {
        let after = &rest[start + 3..];
        let Some(name_len) = after.find(">>>") else {
            break;
        };
        let name = &after[..name_len];
        out.push_str(&rest[..start]);
        match parameters.iter().find(|p| p.name.eq_ignore_ascii_case(name)) {
            Some(parameter) => out.push_str(&mention_markup(parameter)),
            None => out.push_str(&rest[start..start + 3 + name_len + 3]),
        }
        rest = &after[name_len + 3..];
    }
    out.push_str(rest);
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Open,
    Close,
    SelfClosing,
}

#[derive(Debug)]
struct Tag {
    start: usize,
    end: usize,
    name: String,
    kind: TagKind,
}

/// Scans markup tags out of a fragment, skipping `<<<...>>>` placeholders and
/// anything that does not look like a tag.
fn scan_tags(text: &str) -> Vec<Tag> {
    let mut tags = Vec::new();
    let mut i = 0;
    while let Some(offset) = text[i..].find('<') {
        let start = i + offset;
        if text[start..].starts_with("<<<") {
            // A placeholder, not markup. Skip past it.
            i = match text[start + 3..].find(">>>") {
                Some(close) => start + 3 + close + 3,
                None => start + 3,
            };
            continue;
        }
        let Some(gt) = text[start..].find('>') else {
            break;
        };
        let end = start + gt + 1;
        let inner = &text[start + 1..end - 1];
        let (kind, body) = if let Some(rest) = inner.strip_prefix('/') {
            (TagKind::Close, rest)
        } else if let Some(rest) = inner.strip_suffix('/') {
            (TagKind::SelfClosing, rest)
        } else {
            (TagKind::Open, inner)
        };
        let name: String = body
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect();
        if !name.is_empty() {
            tags.push(Tag {
                start,
                end,
                name,
                kind,
            });
        }
        i = end;
    }
    tags
}

/// Finds the end index (one past the closing tag) of the markup element
/// enclosing the `[start, end)` range.
///
/// Scans backward for the nearest opening tag left unclosed before `start`,
/// then forward from `end` for its matching close, honoring same-name nesting.
fn enclosing_element_end(text: &str, start: usize, end: usize) -> Option<usize> {
    let tags = scan_tags(text);

    let mut pending_close: Vec<&str> = Vec::new();
    let mut enclosing: Option<&Tag> = None;
    for tag in tags.iter().rev().filter(|t| t.end <= start) {
        match tag.kind {
            TagKind::SelfClosing => {}
            TagKind::Close => pending_close.push(&tag.name),
            TagKind::Open => {
                if pending_close.last() == Some(&tag.name.as_str()) {
                    pending_close.pop();
                } else {
                    enclosing = Some(tag);
                    break;
                }
            }
        }
    }
    let enclosing = enclosing?;

    let mut depth = 0usize;
    for tag in tags.iter().filter(|t| t.start >= end && t.name == enclosing.name) {
        match tag.kind {
            TagKind::Open => depth += 1,
            TagKind::Close => {
                if depth == 0 {
                    return Some(tag.end);
                }
                depth -= 1;
            }
            TagKind::SelfClosing => {}
        }
    }
    None
}

#[cfg(test)]
#[path = "richtext_tests.rs"]
mod tests;
