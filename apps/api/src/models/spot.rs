use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted fishing spot. Owned exclusively by its creating user and never
/// mutated after insert; deletion is the only lifecycle operation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SpotRow {
    pub id: i64,
    pub user_id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub fish_type: Option<String>,
    pub bait: Option<String>,
    pub environment: Option<String>,
    pub rod: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A spot pending insertion — extraction output plus coordinates, or a copy
/// proposed by reconciliation. The row id and timestamp are assigned by the
/// database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSpot {
    pub user_id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub fish_type: Option<String>,
    pub bait: Option<String>,
    pub environment: Option<String>,
    pub rod: Option<String>,
}
