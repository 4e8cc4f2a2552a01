//! Write-path validation. Rules run in a fixed order and the first violation
//! is reported.

use regex::Regex;
use serde_json::Value as JsonValue;
use std::sync::LazyLock;

use crate::error::ValidationError;
use crate::model::{BookmarkPatch, BookmarkPayload, NewBookmark};

const URL_PATTERN: &str = r"[-a-zA-Z0-9@:%._+~#=]{2,256}\.[a-z]{2,6}\b([-a-zA-Z0-9@:%_+.~#?&/=]*)";

static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(URL_PATTERN).expect("valid regex"));

const MIN_RATING: i32 = 1;
const MAX_RATING: i32 = 5;

/// Unanchored search: the value only has to contain a host-like token.
pub fn is_valid_url(url: &str) -> bool {
    URL_RE.is_match(url)
}

/// Coerces a JSON rating to an integer in `[1, 5]`.
///
/// Numbers and numeric strings are accepted as long as they carry no
/// fractional part.
pub fn parse_rating(value: &JsonValue) -> Result<i32, ValidationError> {
    let number = match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite() && n.fract() == 0.0)
    .ok_or(ValidationError::InvalidRating)?;

    if number < MIN_RATING as f64 || number > MAX_RATING as f64 {
        return Err(ValidationError::InvalidRating);
    }

    Ok(number as i32)
}

fn present_text(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn present_rating(value: Option<JsonValue>) -> Option<JsonValue> {
    value.filter(|v| match v {
        JsonValue::Null => false,
        JsonValue::String(s) => !s.is_empty(),
        _ => true,
    })
}

pub fn validate_create(payload: BookmarkPayload) -> Result<NewBookmark, ValidationError> {
    let url = present_text(payload.url).ok_or(ValidationError::MissingField("url"))?;
    let title = present_text(payload.title).ok_or(ValidationError::MissingField("title"))?;
    let rating = present_rating(payload.rating).ok_or(ValidationError::MissingField("rating"))?;
    let description =
        present_text(payload.description).ok_or(ValidationError::MissingField("description"))?;

    let rating = parse_rating(&rating)?;

    if !is_valid_url(&url) {
        return Err(ValidationError::InvalidUrl);
    }

    Ok(NewBookmark {
        url,
        title,
        rating,
        description,
    })
}

/// Validates a partial update. Omitted fields stay unchanged in the store.
pub fn validate_update(payload: BookmarkPayload) -> Result<BookmarkPatch, ValidationError> {
    let url = present_text(payload.url);
    let title = present_text(payload.title);
    let rating = present_rating(payload.rating);
    let description = present_text(payload.description);

    if url.is_none() && title.is_none() && rating.is_none() && description.is_none() {
        return Err(ValidationError::EmptyUpdate);
    }

    let rating = rating.as_ref().map(parse_rating).transpose()?;

    if let Some(url) = &url {
        if !is_valid_url(url) {
            return Err(ValidationError::InvalidUrl);
        }
    }

    Ok(BookmarkPatch {
        url,
        title,
        rating,
        description,
    })
}
