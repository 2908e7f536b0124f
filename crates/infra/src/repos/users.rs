use sqlx::{PgExecutor, Result as SqlxResult};
use uuid::Uuid;

use crate::models::UserRow;

const USER_COLUMNS: &str = "uuid, email, password_hash, username, first_name, last_name, \
     user_attributes, location, avatar_upload_uuid, last_seen_at, created_at, updated_at";

pub async fn get_by_uuid<'e>(
    executor: impl PgExecutor<'e>,
    uuid: Uuid,
) -> SqlxResult<Option<UserRow>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE uuid = $1");
    sqlx::query_as::<_, UserRow>(&sql)
        .bind(uuid)
        .fetch_optional(executor)
        .await
}

pub async fn get_by_email<'e>(
    executor: impl PgExecutor<'e>,
    email: &str,
) -> SqlxResult<Option<UserRow>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
    sqlx::query_as::<_, UserRow>(&sql)
        .bind(email)
        .fetch_optional(executor)
        .await
}
