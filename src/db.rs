use crate::config::Config;
use anyhow::Result;
use libsql::{Builder, Connection, Database as LibsqlDatabase};
use std::path::Path;
use std::time::Duration;

const IN_MEMORY: &str = ":memory:";

const SYSTEM_MIGRATIONS: &[(&str, &str)] =
    &[("system/000_migrations_table.sql", include_str!("migrations/system/000_migrations_table.sql"))];

pub struct Database {
    _db: LibsqlDatabase,
    conn: Connection,
}

impl Database {
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    async fn is_migration_applied(conn: &Connection, name: &str) -> Result<bool> {
        let query = "SELECT 1 FROM _migrations WHERE name = ?";
        match conn.query(query, libsql::params![name]).await {
            Ok(mut rows) => Ok(rows.next().await?.is_some()),
            Err(e) => {
                if e.to_string().contains("no such table") {
                    Ok(false)
                } else {
                    Err(e.into())
                }
            }
        }
    }

    async fn record_migration(conn: &Connection, name: &str) -> Result<()> {
        let query = r#"
            INSERT INTO _migrations (name, applied_at)
            VALUES (?, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        "#;
        conn.execute(query, libsql::params![name]).await?;
        Ok(())
    }

    async fn run_migration(conn: &Connection, name: &str, sql: &str) -> Result<()> {
        if Self::is_migration_applied(conn, name).await? {
            tracing::debug!("migration {} already applied, skipping", name);
            return Ok(());
        }

        tracing::info!("applying migration: {}", name);
        conn.execute_batch(sql)
            .await
            .map_err(|e| anyhow::anyhow!("failed to execute migration {name}: {e}"))?;

        Self::record_migration(conn, name).await?;
        Ok(())
    }

    pub async fn new(cfg: &Config, data_dir: &Path) -> Result<Self> {
        let db = match cfg.app.replica() {
            Some((url, token)) => {
                tracing::info!("[db] running in synced database mode (offline writes)");
                let path = data_dir.join(cfg.app.get_db());
                let sync_interval = Duration::from_secs(cfg.app.sync_interval_seconds);
                Builder::new_synced_database(&path, url.to_string(), token.to_string())
                    .sync_interval(sync_interval)
                    .build()
                    .await?
            }
            None if cfg.app.get_db() == IN_MEMORY => {
                tracing::warn!("[db] using a transient in-memory store, data is lost on exit");
                Builder::new_local(IN_MEMORY).build().await?
            }
            None => Builder::new_local(data_dir.join(cfg.app.get_db())).build().await?,
        };

        Self::open(db).await
    }

    /// Opens a migrated store that lives only as long as the returned value.
    pub async fn in_memory() -> Result<Self> {
        let db = Builder::new_local(IN_MEMORY).build().await?;
        Self::open(db).await
    }

    async fn open(db: LibsqlDatabase) -> Result<Self> {
        let conn = db.connect()?;
        conn.query("SELECT 1", ()).await?;

        for (filename, sql) in SYSTEM_MIGRATIONS {
            Self::run_migration(&conn, filename, sql).await?;
        }

        for (filename, sql) in crate::bookmarks::migrations() {
            Self::run_migration(&conn, filename, sql).await?;
        }

        Ok(Database { _db: db, conn })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_store_is_migrated() {
        let db = Database::in_memory().await.unwrap();
        let mut rows = db
            .connection()
            .query("SELECT name FROM _migrations ORDER BY name", ())
            .await
            .unwrap();

        let mut names: Vec<String> = vec![];
        while let Some(row) = rows.next().await.unwrap() {
            names.push(row.get(0).unwrap());
        }

        assert_eq!(names, vec!["bookmarks_001_schema.sql", "system/000_migrations_table.sql"]);
    }

    #[tokio::test]
    async fn test_migrations_are_not_reapplied() {
        let db = Database::in_memory().await.unwrap();
        let conn = db.connection();

        for (filename, sql) in crate::bookmarks::migrations() {
            Database::run_migration(conn, filename, sql).await.unwrap();
        }

        let mut rows = conn.query("SELECT COUNT(*) FROM _migrations", ()).await.unwrap();
        let row = rows.next().await.unwrap().unwrap();
        let count: i64 = row.get(0).unwrap();
        assert_eq!(count, 2);
    }
}
