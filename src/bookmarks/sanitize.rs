//! Output-side neutralisation of markup in bookmark text fields.
//!
//! Titles are entity-escaped without touching existing character references,
//! so escaping twice is the same as once. Descriptions go through `ammonia`
//! with a small allow-list; its parse/serialize round trip is stable on its
//! own output.

use std::collections::{HashMap, HashSet};

use ammonia::Builder;

use crate::model::Bookmark;

const ALLOWED_TAGS: [&str; 16] = [
    "a", "b", "blockquote", "br", "code", "em", "i", "img", "li", "ol", "p", "pre", "span",
    "strong", "u", "ul",
];
const LINK_ATTRS: [&str; 3] = ["href", "title", "target"];
const IMAGE_ATTRS: [&str; 5] = ["src", "alt", "title", "width", "height"];
const URL_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Byte length of the character reference at the start of `s`, if any.
fn reference_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.first() != Some(&b'&') {
        return None;
    }

    // (offset of first digit, max digits, radix or 0 for a named reference)
    let (start, max, radix) = match (bytes.get(1), bytes.get(2)) {
        (Some(b'#'), Some(b'x' | b'X')) => (3, 6, 16),
        (Some(b'#'), _) => (2, 7, 10),
        (Some(c), _) if c.is_ascii_alphabetic() => (1, 32, 0),
        _ => return None,
    };

    let digits = bytes[start..]
        .iter()
        .take_while(|b| match radix {
            16 => b.is_ascii_hexdigit(),
            10 => b.is_ascii_digit(),
            _ => b.is_ascii_alphanumeric(),
        })
        .count();
    if digits == 0 || digits > max || bytes.get(start + digits) != Some(&b';') {
        return None;
    }
    Some(start + digits + 1)
}

/// Escapes HTML-significant characters, leaving existing character
/// references intact.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(c) = rest.chars().next() {
        let mut consumed = c.len_utf8();
        match c {
            '&' => match reference_len(rest) {
                Some(len) => {
                    out.push_str(&rest[..len]);
                    consumed = len;
                }
                None => out.push_str("&amp;"),
            },
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
        rest = &rest[consumed..];
    }

    out
}

/// Allow-listed tags keep only their listed attributes; `on*` handlers are
/// never listed, and `href`/`src` must use an allowed scheme. `script` and
/// `style` are removed together with their content.
fn markup_cleaner() -> Builder<'static> {
    let mut builder = Builder::default();
    builder
        .tags(HashSet::from(ALLOWED_TAGS))
        .tag_attributes(HashMap::from([
            ("a", HashSet::from(LINK_ATTRS)),
            ("img", HashSet::from(IMAGE_ATTRS)),
        ]))
        .generic_attributes(HashSet::new())
        .url_schemes(HashSet::from(URL_SCHEMES))
        .link_rel(None);
    builder
}

pub fn sanitize_markup(input: &str) -> String {
    markup_cleaner().clean(input).to_string()
}

/// Output-safe projection of a stored bookmark. `url`, `id` and `rating`
/// pass through untouched.
pub fn sanitize_bookmark(bookmark: Bookmark) -> Bookmark {
    Bookmark {
        title: escape_html(&bookmark.title),
        description: sanitize_markup(&bookmark.description),
        ..bookmark
    }
}
