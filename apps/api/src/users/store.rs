use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::UserRow;

/// Records a location ping, creating the user on first contact. A ping marks
/// the user online; the sharing flag is left untouched.
pub async fn upsert_location(
    pool: &PgPool,
    id: Uuid,
    name: &str,
    latitude: f64,
    longitude: f64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO users (id, name, latitude, longitude, last_seen, is_online)
        VALUES ($1, $2, $3, $4, now(), TRUE)
        ON CONFLICT (id) DO UPDATE
        SET name = EXCLUDED.name,
            latitude = EXCLUDED.latitude,
            longitude = EXCLUDED.longitude,
            last_seen = now(),
            is_online = TRUE
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(latitude)
    .bind(longitude)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn set_sharing(pool: &PgPool, id: Uuid, is_sharing: bool) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET is_sharing = $1 WHERE id = $2")
        .bind(is_sharing)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn get_user(pool: &PgPool, id: Uuid) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// All currently-online users. Requester exclusion and the distance cut
/// happen in the proximity filter, not in SQL.
pub async fn list_online(pool: &PgPool) -> Result<Vec<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE is_online = TRUE")
        .fetch_all(pool)
        .await
}
