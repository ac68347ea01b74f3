use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::Location;

pub struct LocationService {
    pool: PgPool,
}

impl LocationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns false when the member already saved this zip
    pub async fn save(&self, memberid: i32, location: &Location) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            r#"
            INSERT INTO locations (memberid, nickname, lat, long, zip)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (memberid, zip) DO NOTHING
            "#,
        )
        .bind(memberid)
        .bind(&location.nickname)
        .bind(location.lat)
        .bind(location.long)
        .bind(&location.zip)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn delete(&self, memberid: i32, zip: &str) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM locations WHERE memberid = $1 AND zip = $2")
            .bind(memberid)
            .bind(zip)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn list(&self, memberid: i32) -> Result<Vec<Location>, DatabaseError> {
        let locations = sqlx::query_as::<_, Location>(
            "SELECT zip, nickname, lat, long FROM locations WHERE memberid = $1 ORDER BY primarykey",
        )
        .bind(memberid)
        .fetch_all(&self.pool)
        .await?;

        Ok(locations)
    }
}
