use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Location {
    pub zip: String,
    pub nickname: Option<String>,
    pub lat: Option<f64>,
    pub long: Option<f64>,
}
