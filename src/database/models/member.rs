use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Public view of a `members` row; credentials never leave the auth service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Member {
    pub memberid: i32,
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub email: String,
}
