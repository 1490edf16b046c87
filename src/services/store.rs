use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use thiserror::Error;

use crate::models::{CreateProfileRequest, Profile, UpdateProfileRequest};

/// Errors that can occur when interacting with the profile store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Interests column error: {0}")]
    Interests(#[from] serde_json::Error),

    #[error("No profile with id {0}")]
    NotFound(i64),

    #[error("Email already registered: {0}")]
    EmailTaken(String),
}

/// SQLite-backed profile store
///
/// Owns the connection pool and is the only layer aware of the JSON
/// text encoding of the `interests` column; everything above this
/// adapter works with `Vec<String>`.
pub struct ProfileStore {
    pool: SqlitePool,
}

impl ProfileStore {
    /// Open the database at `url` (creating the file if missing) and
    /// run pending migrations.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Open a fresh private in-memory database with migrations applied.
    ///
    /// A single pooled connection pinned open keeps the memory database
    /// alive for the store's lifetime.
    pub async fn connect_in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .connect("sqlite::memory:")
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Insert a new profile and return it with its generated id.
    ///
    /// A unique-constraint violation on the email column maps to
    /// [`StoreError::EmailTaken`].
    pub async fn create(&self, req: &CreateProfileRequest) -> Result<Profile, StoreError> {
        let interests = encode_interests(&req.interests)?;

        let row = sqlx::query(
            r#"
            INSERT INTO profiles (name, age, gender, email, city, interests)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING id, name, age, gender, email, city, interests
            "#,
        )
        .bind(&req.name)
        .bind(i64::from(req.age))
        .bind(&req.gender)
        .bind(&req.email)
        .bind(&req.city)
        .bind(interests)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, Some(req.email.as_str())))?;

        let profile = profile_from_row(&row)?;
        tracing::debug!("Created profile {} for {}", profile.id, profile.email);
        Ok(profile)
    }

    /// Fetch one profile by id.
    pub async fn get(&self, id: i64) -> Result<Profile, StoreError> {
        let row = sqlx::query(
            "SELECT id, name, age, gender, email, city, interests FROM profiles WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => profile_from_row(&row),
            None => Err(StoreError::NotFound(id)),
        }
    }

    /// List profiles in stable id order with offset/limit pagination.
    pub async fn list(&self, offset: u32, limit: u32) -> Result<Vec<Profile>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, age, gender, email, city, interests
            FROM profiles
            ORDER BY id
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(i64::from(limit))
        .bind(i64::from(offset))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(profile_from_row).collect()
    }

    /// Apply a partial update and return the resulting row.
    ///
    /// Absent fields keep their stored values (COALESCE per column);
    /// `interests`, when present, replaces the prior list wholesale.
    pub async fn update(&self, id: i64, req: &UpdateProfileRequest) -> Result<Profile, StoreError> {
        let interests = match &req.interests {
            Some(list) => Some(encode_interests(list)?),
            None => None,
        };

        let row = sqlx::query(
            r#"
            UPDATE profiles SET
                name      = COALESCE(?1, name),
                age       = COALESCE(?2, age),
                gender    = COALESCE(?3, gender),
                email     = COALESCE(?4, email),
                city      = COALESCE(?5, city),
                interests = COALESCE(?6, interests)
            WHERE id = ?7
            RETURNING id, name, age, gender, email, city, interests
            "#,
        )
        .bind(req.name.as_deref())
        .bind(req.age.map(i64::from))
        .bind(req.gender.as_deref())
        .bind(req.email.as_deref())
        .bind(req.city.as_deref())
        .bind(interests)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, req.email.as_deref()))?;

        match row {
            Some(row) => profile_from_row(&row),
            None => Err(StoreError::NotFound(id)),
        }
    }

    /// Hard-delete one profile. Its id is never handed out again.
    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }

        tracing::debug!("Deleted profile {}", id);
        Ok(())
    }

    /// All profiles whose gender differs from `gender`, excluding the
    /// row with `exclude_id`, in id order.
    ///
    /// This enumeration order is what equal match scores preserve
    /// downstream.
    pub async fn list_candidates(
        &self,
        gender: &str,
        exclude_id: i64,
    ) -> Result<Vec<Profile>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, age, gender, email, city, interests
            FROM profiles
            WHERE gender != ?1 AND id != ?2
            ORDER BY id
            "#,
        )
        .bind(gender)
        .bind(exclude_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(profile_from_row).collect()
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn map_unique_violation(err: sqlx::Error, email: Option<&str>) -> StoreError {
    match (&err, email) {
        (sqlx::Error::Database(db), Some(email)) if db.is_unique_violation() => {
            StoreError::EmailTaken(email.to_string())
        }
        _ => StoreError::Sqlx(err),
    }
}

fn profile_from_row(row: &SqliteRow) -> Result<Profile, StoreError> {
    let raw_interests: String = row.get("interests");

    Ok(Profile {
        id: row.get("id"),
        name: row.get("name"),
        age: row.get("age"),
        gender: row.get("gender"),
        email: row.get("email"),
        city: row.get("city"),
        interests: decode_interests(&raw_interests)?,
    })
}

/// Serialize an interest list for the TEXT column.
fn encode_interests(interests: &[String]) -> Result<String, serde_json::Error> {
    serde_json::to_string(interests)
}

/// Deserialize the TEXT column back into a list. An empty column reads
/// as an empty list.
fn decode_interests(raw: &str) -> Result<Vec<String>, serde_json::Error> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interests_round_trip() {
        let interests = vec!["reading".to_string(), "travel".to_string()];
        let encoded = encode_interests(&interests).unwrap();
        assert_eq!(decode_interests(&encoded).unwrap(), interests);
    }

    #[test]
    fn test_decode_empty_column_is_empty_list() {
        assert_eq!(decode_interests("").unwrap(), Vec::<String>::new());
        assert_eq!(decode_interests("[]").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_interests("reading,travel").is_err());
    }
}
