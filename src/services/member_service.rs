use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::Member;

/// Read-only lookups against `members`; rows are owned by the auth service
pub struct MemberService {
    pool: PgPool,
}

impl MemberService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn exists(&self, memberid: i32) -> Result<bool, DatabaseError> {
        let found: Option<(i32,)> = sqlx::query_as("SELECT memberid FROM members WHERE memberid = $1")
            .bind(memberid)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    pub async fn find(&self, memberid: i32) -> Result<Option<Member>, DatabaseError> {
        let member = sqlx::query_as::<_, Member>(
            "SELECT memberid, firstname, lastname, username, email FROM members WHERE memberid = $1",
        )
        .bind(memberid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }
}
