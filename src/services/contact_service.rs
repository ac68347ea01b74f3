use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{Contact, ContactLink};

/// Directed contact edges. A request is the row (requester -> recipient,
/// unverified); accepting it verifies that row and writes the reverse edge.
pub struct ContactService {
    pool: PgPool,
}

impl ContactService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Everyone the member has an outgoing edge to
    pub async fn list_for_member(&self, memberid: i32) -> Result<Vec<Contact>, DatabaseError> {
        let contacts = sqlx::query_as::<_, Contact>(
            r#"
            SELECT members.memberid, members.firstname, members.lastname, members.username,
                   members.email, contacts.nickname, contacts.verified
            FROM contacts
            INNER JOIN members ON contacts.memberid_b = members.memberid
            WHERE contacts.memberid_a = $1
            ORDER BY contacts.verified DESC, members.username
            "#,
        )
        .bind(memberid)
        .fetch_all(&self.pool)
        .await?;

        Ok(contacts)
    }

    /// Unverified requests addressed to the member
    pub async fn pending_for_member(&self, memberid: i32) -> Result<Vec<Contact>, DatabaseError> {
        let requests = sqlx::query_as::<_, Contact>(
            r#"
            SELECT members.memberid, members.firstname, members.lastname, members.username,
                   members.email, contacts.nickname, contacts.verified
            FROM contacts
            INNER JOIN members ON contacts.memberid_a = members.memberid
            WHERE contacts.memberid_b = $1 AND contacts.verified = FALSE
            ORDER BY contacts.primarykey
            "#,
        )
        .bind(memberid)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    pub async fn find_link(&self, from: i32, to: i32) -> Result<Option<ContactLink>, DatabaseError> {
        let link = sqlx::query_as::<_, ContactLink>(
            "SELECT memberid_a, memberid_b, nickname, verified FROM contacts WHERE memberid_a = $1 AND memberid_b = $2",
        )
        .bind(from)
        .bind(to)
        .fetch_optional(&self.pool)
        .await?;

        Ok(link)
    }

    /// Record an unverified request from `from` to `to`
    pub async fn request(&self, from: i32, to: i32, nickname: &str) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO contacts (memberid_a, memberid_b, nickname, verified) VALUES ($1, $2, $3, FALSE)")
            .bind(from)
            .bind(to)
            .bind(nickname)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Accept `requester`'s request to `recipient`: both directions end up verified
    pub async fn verify(&self, requester: i32, recipient: i32, nickname: &str) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE contacts SET verified = TRUE WHERE memberid_a = $1 AND memberid_b = $2")
            .bind(requester)
            .bind(recipient)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO contacts (memberid_a, memberid_b, nickname, verified)
            VALUES ($1, $2, $3, TRUE)
            ON CONFLICT (memberid_a, memberid_b) DO UPDATE SET verified = TRUE
            "#,
        )
        .bind(recipient)
        .bind(requester)
        .bind(nickname)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Drop the relation in both directions; returns the number of edges removed
    pub async fn remove_between(&self, a: i32, b: i32) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            r#"
            DELETE FROM contacts
            WHERE (memberid_a = $1 AND memberid_b = $2)
               OR (memberid_a = $2 AND memberid_b = $1)
            "#,
        )
        .bind(a)
        .bind(b)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
