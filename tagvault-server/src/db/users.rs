//! User database operations
//!
//! Account provisioning only; authentication is handled by the fronting
//! layer, which supplies an already-authenticated user id per request.

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use tagvault_common::db::User;
use tagvault_common::Result;
use uuid::Uuid;

/// Insert a new user
pub async fn insert_user(pool: &SqlitePool, username: &str) -> Result<User> {
    let user = User {
        guid: Uuid::new_v4(),
        username: username.to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO users (guid, username, created_at, updated_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(user.guid.to_string())
    .bind(&user.username)
    .bind(user.created_at.to_rfc3339())
    .bind(user.updated_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(user)
}

/// Load a user by id
pub async fn get_user(pool: &SqlitePool, user_id: Uuid) -> Result<Option<User>> {
    let row = sqlx::query(
        r#"
        SELECT guid, username, created_at, updated_at
        FROM users
        WHERE guid = ?
        "#,
    )
    .bind(user_id.to_string())
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => {
            let guid_str: String = row.get("guid");
            let guid = Uuid::parse_str(&guid_str)
                .map_err(|e| tagvault_common::Error::decode(format!("Bad UUID in users row: {}", e)))?;

            Ok(Some(User {
                guid,
                username: row.get("username"),
                created_at: parse_timestamp(row.get("created_at"))?,
                updated_at: parse_timestamp(row.get("updated_at"))?,
            }))
        }
        None => Ok(None),
    }
}

fn parse_timestamp(value: String) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| tagvault_common::Error::decode(format!("Bad timestamp in users row: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagvault_common::db::init;

    async fn test_pool() -> SqlitePool {
        // One connection only: each pooled connection would otherwise get
        // its own private in-memory database
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");
        init::init_tables(&pool).await.expect("Failed to init tables");
        pool
    }

    #[tokio::test]
    async fn insert_then_get_round_trip() {
        let pool = test_pool().await;

        let created = insert_user(&pool, "alice").await.unwrap();
        let loaded = get_user(&pool, created.guid).await.unwrap().unwrap();

        assert_eq!(loaded.guid, created.guid);
        assert_eq!(loaded.username, "alice");
    }

    #[tokio::test]
    async fn get_unknown_user_is_none() {
        let pool = test_pool().await;
        assert!(get_user(&pool, Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let pool = test_pool().await;
        insert_user(&pool, "alice").await.unwrap();
        assert!(insert_user(&pool, "alice").await.is_err());
    }
}
