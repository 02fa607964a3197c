use sqlx::PgPool;
use uuid::Uuid;

use crate::models::exchange::{ExchangeRequestRow, ExchangeRequestView};

pub async fn insert_request(
    pool: &PgPool,
    from_user_id: Uuid,
    to_user_id: Uuid,
    message: &str,
) -> Result<ExchangeRequestRow, sqlx::Error> {
    sqlx::query_as::<_, ExchangeRequestRow>(
        r#"
        INSERT INTO exchange_requests (from_user_id, to_user_id, message)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(from_user_id)
    .bind(to_user_id)
    .bind(message)
    .fetch_one(pool)
    .await
}

/// A user's inbox: requests addressed to them, newest first, with both user
/// names resolved.
pub async fn list_requests_for(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<ExchangeRequestView>, sqlx::Error> {
    sqlx::query_as::<_, ExchangeRequestView>(
        r#"
        SELECT er.id, er.from_user_id, er.to_user_id, er.message, er.status, er.created_at,
               u1.name AS from_user_name, u2.name AS to_user_name
        FROM exchange_requests er
        JOIN users u1 ON er.from_user_id = u1.id
        JOIN users u2 ON er.to_user_id = u2.id
        WHERE er.to_user_id = $1
        ORDER BY er.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
