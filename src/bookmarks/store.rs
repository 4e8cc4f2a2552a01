use anyhow::Result;
use libsql::Connection;

use crate::model::{Bookmark, BookmarkPatch, NewBookmark};

/// Data access for the `bookmarks_info` table. Store faults are returned as-is.
pub struct BookmarkStore<'a> {
    conn: &'a Connection,
}

impl<'a> BookmarkStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub async fn list_all(&self) -> Result<Vec<Bookmark>> {
        let query = r#"
            SELECT id, url, title, rating, description
            FROM bookmarks_info
            ORDER BY id
        "#;

        let mut rows = self.conn.query(query, ()).await?;
        let mut bookmarks = Vec::new();

        while let Some(row) = rows.next().await? {
            bookmarks.push(Self::row_to_bookmark(&row)?);
        }

        Ok(bookmarks)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Bookmark>> {
        let query = r#"
            SELECT id, url, title, rating, description
            FROM bookmarks_info WHERE id = ?
        "#;

        let mut rows = self.conn.query(query, libsql::params![id]).await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_bookmark(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn insert(&self, input: NewBookmark) -> Result<Bookmark> {
        let query = r#"
            INSERT INTO bookmarks_info (url, title, rating, description)
            VALUES (?, ?, ?, ?)
            RETURNING id, url, title, rating, description
        "#;

        let mut rows = self
            .conn
            .query(
                query,
                libsql::params![input.url, input.title, input.rating, input.description],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Self::row_to_bookmark(&row)?)
        } else {
            anyhow::bail!("Failed to create bookmark")
        }
    }

    /// Returns the number of rows removed (0 or 1).
    pub async fn delete_by_id(&self, id: i32) -> Result<u64> {
        let affected = self
            .conn
            .execute("DELETE FROM bookmarks_info WHERE id = ?", libsql::params![id])
            .await?;
        Ok(affected)
    }

    /// Merges the supplied fields into the row and returns the number of rows
    /// matched (0 or 1).
    pub async fn update_by_id(&self, id: i32, input: BookmarkPatch) -> Result<u64> {
        if input.is_empty() {
            return Ok(self.get_by_id(id).await?.map_or(0, |_| 1));
        }

        let mut updates = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(url) = input.url {
            updates.push("url = ?");
            params.push(url.into());
        }
        if let Some(title) = input.title {
            updates.push("title = ?");
            params.push(title.into());
        }
        if let Some(rating) = input.rating {
            updates.push("rating = ?");
            params.push(rating.into());
        }
        if let Some(description) = input.description {
            updates.push("description = ?");
            params.push(description.into());
        }

        params.push(id.into());
        let query = format!("UPDATE bookmarks_info SET {} WHERE id = ?", updates.join(", "));

        let affected = self.conn.execute(&query, params).await?;
        Ok(affected)
    }

    fn row_to_bookmark(row: &libsql::Row) -> Result<Bookmark> {
        Ok(Bookmark {
            id: row.get(0)?,
            url: row.get(1)?,
            title: row.get(2)?,
            rating: row.get(3)?,
            description: row.get(4)?,
        })
    }
}
