use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A row of `bookmarks_info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bookmark {
    pub id: i32,
    pub url: String,
    pub title: String,
    pub rating: i32,
    pub description: String,
}

/// Write payload as it arrives over the wire, before validation.
///
/// `rating` stays untyped so numeric strings can be coerced and anything else
/// reported as an invalid rating rather than a malformed body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookmarkPayload {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub rating: Option<JsonValue>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookmark {
    pub url: String,
    pub title: String,
    pub rating: i32,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkPatch {
    pub url: Option<String>,
    pub title: Option<String>,
    pub rating: Option<i32>,
    pub description: Option<String>,
}

impl BookmarkPatch {
    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.title.is_none() && self.rating.is_none() && self.description.is_none()
    }
}
