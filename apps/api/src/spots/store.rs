use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::spot::{NewSpot, SpotRow};

pub async fn insert_spot(pool: &PgPool, spot: &NewSpot) -> Result<SpotRow, sqlx::Error> {
    sqlx::query_as::<_, SpotRow>(
        r#"
        INSERT INTO fishing_spots (user_id, latitude, longitude, fish_type, bait, environment, rod)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(spot.user_id)
    .bind(spot.latitude)
    .bind(spot.longitude)
    .bind(&spot.fish_type)
    .bind(&spot.bait)
    .bind(&spot.environment)
    .bind(&spot.rod)
    .fetch_one(pool)
    .await
}

pub async fn list_spots(pool: &PgPool, user_id: Uuid) -> Result<Vec<SpotRow>, sqlx::Error> {
    sqlx::query_as::<_, SpotRow>(
        "SELECT * FROM fishing_spots WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Deletes a spot owned by the given user. Returns false when no such row
/// exists (wrong id or wrong owner).
pub async fn delete_spot(pool: &PgPool, id: i64, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM fishing_spots WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// The storage capabilities spot reconciliation consumes: fetch a user's
/// records and insert one. Kept behind a trait so the merge pass can be
/// exercised against an in-memory store.
#[async_trait]
pub trait SpotStore: Send + Sync {
    async fn spots_by_user(&self, user_id: Uuid) -> Result<Vec<SpotRow>>;
    async fn insert(&self, spot: &NewSpot) -> Result<SpotRow>;
}

#[async_trait]
impl SpotStore for PgPool {
    async fn spots_by_user(&self, user_id: Uuid) -> Result<Vec<SpotRow>> {
        Ok(list_spots(self, user_id).await?)
    }

    async fn insert(&self, spot: &NewSpot) -> Result<SpotRow> {
        Ok(insert_spot(self, spot).await?)
    }
}
