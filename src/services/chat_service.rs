use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{Chat, ChatMember};

pub struct ChatService {
    pool: PgPool,
}

impl ChatService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a chatroom and place its creator in it
    pub async fn create(&self, name: &str, creator: i32) -> Result<Chat, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let chat = sqlx::query_as::<_, Chat>("INSERT INTO chats (name) VALUES ($1) RETURNING chatid, name")
            .bind(name)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO chatmembers (chatid, memberid) VALUES ($1, $2)")
            .bind(chat.chatid)
            .bind(creator)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(chat)
    }

    /// Chatrooms the member belongs to
    pub async fn list_for_member(&self, memberid: i32) -> Result<Vec<Chat>, DatabaseError> {
        let chats = sqlx::query_as::<_, Chat>(
            r#"
            SELECT chatid, name FROM chats
            WHERE chatid IN (SELECT chatid FROM chatmembers WHERE memberid = $1)
            ORDER BY chatid
            "#,
        )
        .bind(memberid)
        .fetch_all(&self.pool)
        .await?;

        Ok(chats)
    }

    pub async fn exists(&self, chatid: i32) -> Result<bool, DatabaseError> {
        let found: Option<(i32,)> = sqlx::query_as("SELECT chatid FROM chats WHERE chatid = $1")
            .bind(chatid)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    pub async fn is_member(&self, chatid: i32, memberid: i32) -> Result<bool, DatabaseError> {
        let found: Option<(i32,)> =
            sqlx::query_as("SELECT memberid FROM chatmembers WHERE chatid = $1 AND memberid = $2")
                .bind(chatid)
                .bind(memberid)
                .fetch_optional(&self.pool)
                .await?;

        Ok(found.is_some())
    }

    pub async fn add_member(&self, chatid: i32, memberid: i32) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO chatmembers (chatid, memberid) VALUES ($1, $2)")
            .bind(chatid)
            .bind(memberid)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn members(&self, chatid: i32) -> Result<Vec<ChatMember>, DatabaseError> {
        let members = sqlx::query_as::<_, ChatMember>(
            r#"
            SELECT members.memberid, members.email
            FROM chatmembers
            INNER JOIN members ON chatmembers.memberid = members.memberid
            WHERE chatmembers.chatid = $1
            ORDER BY members.memberid
            "#,
        )
        .bind(chatid)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    pub async fn remove_member(&self, chatid: i32, memberid: i32) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM chatmembers WHERE chatid = $1 AND memberid = $2")
            .bind(chatid)
            .bind(memberid)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
