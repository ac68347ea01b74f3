use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The other side of a contact relation, joined with its member details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Contact {
    pub memberid: i32,
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub email: String,
    pub nickname: Option<String>,
    pub verified: bool,
}

/// Raw directed edge from `contacts`
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ContactLink {
    pub memberid_a: i32,
    pub memberid_b: i32,
    pub nickname: Option<String>,
    pub verified: bool,
}
