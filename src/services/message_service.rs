use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::Message;

const TIMESTAMP_FORMAT: &str = "YYYY-MM-DD HH24:MI:SS.US";

pub struct MessageService {
    pool: PgPool,
    time_zone: String,
}

impl MessageService {
    pub fn new(pool: PgPool, time_zone: impl Into<String>) -> Self {
        Self {
            pool,
            time_zone: time_zone.into(),
        }
    }

    /// Store a message and return it in the same shape the history listing uses
    pub async fn insert(&self, chatid: i32, memberid: i32, message: &str) -> Result<Message, DatabaseError> {
        let stored = sqlx::query_as::<_, Message>(
            r#"
            WITH inserted AS (
                INSERT INTO messages (chatid, message, memberid)
                VALUES ($1, $2, $3)
                RETURNING primarykey, chatid, message, memberid, timestamp
            )
            SELECT inserted.primarykey AS messageid,
                   inserted.chatid,
                   inserted.message,
                   members.email,
                   to_char(inserted.timestamp AT TIME ZONE $4, $5) AS timestamp
            FROM inserted
            INNER JOIN members ON inserted.memberid = members.memberid
            "#,
        )
        .bind(chatid)
        .bind(message)
        .bind(memberid)
        .bind(&self.time_zone)
        .bind(TIMESTAMP_FORMAT)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    /// Newest-first page of messages older than `before`
    pub async fn page(&self, chatid: i32, before: i32, limit: i64) -> Result<Vec<Message>, DatabaseError> {
        let rows = sqlx::query_as::<_, Message>(
            r#"
            SELECT messages.primarykey AS messageid,
                   messages.chatid,
                   messages.message,
                   members.email,
                   to_char(messages.timestamp AT TIME ZONE $3, $4) AS timestamp
            FROM messages
            INNER JOIN members ON messages.memberid = members.memberid
            WHERE messages.chatid = $1 AND messages.primarykey < $2
            ORDER BY messages.timestamp DESC, messages.primarykey DESC
            LIMIT $5
            "#,
        )
        .bind(chatid)
        .bind(before)
        .bind(&self.time_zone)
        .bind(TIMESTAMP_FORMAT)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
