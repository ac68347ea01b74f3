use sqlx::PgPool;

use crate::database::manager::DatabaseError;

pub struct PushTokenService {
    pool: PgPool,
}

impl PushTokenService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert the member's device token, replacing any previous one
    pub async fn upsert(&self, memberid: i32, token: &str) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO push_token (memberid, token) VALUES ($1, $2)
            ON CONFLICT (memberid) DO UPDATE SET token = EXCLUDED.token
            "#,
        )
        .bind(memberid)
        .bind(token)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn delete(&self, memberid: i32) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM push_token WHERE memberid = $1")
            .bind(memberid)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn token_for(&self, memberid: i32) -> Result<Option<String>, DatabaseError> {
        let token: Option<(String,)> = sqlx::query_as("SELECT token FROM push_token WHERE memberid = $1")
            .bind(memberid)
            .fetch_optional(&self.pool)
            .await?;

        Ok(token.map(|(token,)| token))
    }

    /// Device tokens of every member of a chatroom, sender included
    pub async fn tokens_for_chat(&self, chatid: i32) -> Result<Vec<String>, DatabaseError> {
        let tokens: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT push_token.token
            FROM push_token
            INNER JOIN chatmembers ON push_token.memberid = chatmembers.memberid
            WHERE chatmembers.chatid = $1
            "#,
        )
        .bind(chatid)
        .fetch_all(&self.pool)
        .await?;

        Ok(tokens.into_iter().map(|(token,)| token).collect())
    }
}
