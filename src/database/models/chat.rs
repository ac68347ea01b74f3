use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Chat {
    pub chatid: i32,
    pub name: String,
}

/// One row of a chatroom's member listing
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatMember {
    pub memberid: i32,
    pub email: String,
}
