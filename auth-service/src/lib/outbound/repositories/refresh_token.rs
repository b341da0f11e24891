use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::token::errors::RefreshTokenError;
use crate::domain::token::models::RefreshToken;
use crate::domain::token::ports::RefreshTokenRepository;
use crate::domain::user::models::UserId;

pub struct PostgresRefreshTokenRepository {
    pool: PgPool,
}

impl PostgresRefreshTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_token(row: &PgRow) -> Result<RefreshToken, RefreshTokenError> {
    let read = |e: sqlx::Error| RefreshTokenError::DatabaseError(e.to_string());

    Ok(RefreshToken {
        token: row.try_get("token").map_err(read)?,
        user_id: UserId(row.try_get("user_id").map_err(read)?),
        expires_at: row.try_get("expires_at").map_err(read)?,
    })
}

#[async_trait]
impl RefreshTokenRepository for PostgresRefreshTokenRepository {
    async fn save(&self, token: RefreshToken) -> Result<RefreshToken, RefreshTokenError> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (token, user_id, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&token.token)
        .bind(token.user_id.0)
        .bind(token.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RefreshTokenError::DatabaseError(e.to_string()))?;

        Ok(token)
    }

    async fn find_by_token(
        &self,
        token_value: &str,
    ) -> Result<Option<RefreshToken>, RefreshTokenError> {
        let row = sqlx::query(
            r#"
            SELECT token, user_id, expires_at
            FROM refresh_tokens
            WHERE token = $1
            "#,
        )
        .bind(token_value)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RefreshTokenError::DatabaseError(e.to_string()))?;

        row.as_ref().map(row_to_token).transpose()
    }

    async fn delete(&self, token_value: &str) -> Result<bool, RefreshTokenError> {
        // A single DELETE is atomic per token value: of two racing expiry
        // checks, exactly one observes the deleted row.
        let result = sqlx::query(
            r#"
            DELETE FROM refresh_tokens
            WHERE token = $1
            "#,
        )
        .bind(token_value)
        .execute(&self.pool)
        .await
        .map_err(|e| RefreshTokenError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
