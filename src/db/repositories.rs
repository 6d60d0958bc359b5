//! Repositories: users.

use crate::error::AppResult;
use chrono::Utc;
use sqlx::FromRow;

use super::DbPool;

// ---- User ----

#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: i64,
}

/// Insert a user. Returns `false` when the email is already taken.
///
/// The UNIQUE constraint decides; there is no prior existence check to race against.
pub async fn user_insert(
    pool: &DbPool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> AppResult<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO users (username, email, password_hash, created_at)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(Utc::now().timestamp())
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(true),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(false),
        Err(e) => Err(e.into()),
    }
}

pub async fn user_find_by_email(pool: &DbPool, email: &str) -> AppResult<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, username, email, password_hash, created_at FROM users WHERE email = ?1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn user_password_hash(pool: &DbPool, email: &str) -> AppResult<Option<String>> {
    let row: Option<(String,)> = sqlx::query_as("SELECT password_hash FROM users WHERE email = ?1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|(hash,)| hash))
}

pub async fn users_count(pool: &DbPool) -> AppResult<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_pool;

    #[tokio::test]
    async fn duplicate_email_is_reported_not_raised() {
        let pool = create_pool(":memory:").await.unwrap();
        assert!(user_insert(&pool, "bob", "bob@x.com", "h1").await.unwrap());
        assert!(!user_insert(&pool, "other", "bob@x.com", "h2").await.unwrap());
        assert_eq!(users_count(&pool).await.unwrap(), 1);

        let row = user_find_by_email(&pool, "bob@x.com").await.unwrap().unwrap();
        assert_eq!(row.username, "bob");
        assert_eq!(row.password_hash, "h1");
    }

    #[tokio::test]
    async fn email_lookup_is_case_sensitive() {
        let pool = create_pool(":memory:").await.unwrap();
        user_insert(&pool, "bob", "bob@x.com", "h1").await.unwrap();
        assert!(user_password_hash(&pool, "BOB@x.com").await.unwrap().is_none());
        assert!(user_insert(&pool, "BOB", "BOB@x.com", "h2").await.unwrap());
    }

    #[tokio::test]
    async fn usernames_may_repeat() {
        let pool = create_pool(":memory:").await.unwrap();
        assert!(user_insert(&pool, "sam", "sam@a.com", "h").await.unwrap());
        assert!(user_insert(&pool, "sam", "sam@b.com", "h").await.unwrap());
    }

    #[tokio::test]
    async fn closed_pool_is_a_fault() {
        let pool = create_pool(":memory:").await.unwrap();
        pool.close().await;
        assert!(user_insert(&pool, "bob", "bob@x.com", "h").await.is_err());
    }
}
