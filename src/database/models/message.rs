use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A chat message as clients see it: author email instead of memberid, and a
/// pre-rendered timestamp string in the configured display zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Message {
    pub messageid: i32,
    pub chatid: i32,
    pub message: String,
    pub email: String,
    pub timestamp: String,
}
