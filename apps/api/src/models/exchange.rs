use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExchangeRequestRow {
    pub id: i64,
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub message: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Exchange request joined with both user names, as listed in a user's inbox.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExchangeRequestView {
    pub id: i64,
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub message: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub from_user_name: String,
    pub to_user_name: String,
}
