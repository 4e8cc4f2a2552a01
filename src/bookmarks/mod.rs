//! Bookmarks Module
//!
//! CRUD over the `bookmarks_info` table. Writes are validated before they
//! reach the store, and every bookmark leaving the service is sanitized.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bookmarks::bookmarks;
//!
//! for (name, sql) in bookmarks::migrations() {
//!     conn.execute_batch(sql).await?;
//! }
//!
//! let app = Router::new()
//!     .merge(bookmarks::routes())
//!     .with_state(app_state);
//! ```

mod handler;
mod routes;
mod sanitize;
mod store;
mod validate;

pub use routes::routes;
pub use sanitize::{escape_html, sanitize_bookmark, sanitize_markup};
pub use store::BookmarkStore;
pub use validate::{is_valid_url, parse_rating, validate_create, validate_update};

/// Schema for the bookmark table, applied at startup.
pub fn migrations() -> &'static [(&'static str, &'static str)] {
    &[(
        "bookmarks_001_schema.sql",
        include_str!("migrations/001_schema.sql"),
    )]
}
