use sqlx::{PgExecutor, Result as SqlxResult};
use uuid::Uuid;

use crate::models::{CommunityRow, CommunityVisibility, MemberRow, PopularCommunityRow};
use crate::store::NewCommunity;

pub async fn list_for_user<'e>(
    executor: impl PgExecutor<'e>,
    user_uuid: Uuid,
    visibility: Option<CommunityVisibility>,
) -> SqlxResult<Vec<CommunityRow>> {
    sqlx::query_as::<_, CommunityRow>(
        r#"
        SELECT c.uuid, c.name, c.tagline, c.description, c.location, c.tier, c.visibility,
               c.created_at, c.updated_at
        FROM communities c
        JOIN community_users cu ON cu.community_uuid = c.uuid
        WHERE cu.user_uuid = $1
          AND ($2::community_visibility IS NULL OR c.visibility = $2)
        ORDER BY c.name ASC NULLS LAST, c.uuid ASC
        "#,
    )
    .bind(user_uuid)
    .bind(visibility)
    .fetch_all(executor)
    .await
}

pub async fn list_popular<'e>(
    executor: impl PgExecutor<'e>,
    limit: i64,
) -> SqlxResult<Vec<PopularCommunityRow>> {
    // LEFT JOIN keeps communities without members, counted as zero.
    sqlx::query_as::<_, PopularCommunityRow>(
        r#"
        SELECT c.uuid, c.name, c.tagline, c.description, c.location,
               COUNT(cu.user_uuid) AS user_count
        FROM communities c
        LEFT JOIN community_users cu ON cu.community_uuid = c.uuid
        WHERE c.visibility = 'public'
        GROUP BY c.uuid
        ORDER BY user_count DESC, c.name ASC NULLS LAST, c.uuid ASC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(executor)
    .await
}

pub async fn search_by_name<'e>(
    executor: impl PgExecutor<'e>,
    needle: &str,
) -> SqlxResult<Vec<CommunityRow>> {
    let pattern = format!("%{}%", escape_like(needle));

    sqlx::query_as::<_, CommunityRow>(
        r#"
        SELECT uuid, name, tagline, description, location, tier, visibility,
               created_at, updated_at
        FROM communities
        WHERE COALESCE(name, '') LIKE $1 ESCAPE '\'
        ORDER BY name ASC NULLS LAST, uuid ASC
        "#,
    )
    .bind(pattern)
    .fetch_all(executor)
    .await
}

pub async fn create<'e>(
    executor: impl PgExecutor<'e>,
    data: &NewCommunity,
) -> SqlxResult<CommunityRow> {
    sqlx::query_as::<_, CommunityRow>(
        r#"
        INSERT INTO communities (uuid, name, tagline, description, location, tier, visibility)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING uuid, name, tagline, description, location, tier, visibility,
                  created_at, updated_at
        "#,
    )
    .bind(data.uuid)
    .bind(&data.name)
    .bind(&data.tagline)
    .bind(&data.description)
    .bind(&data.location)
    .bind(data.tier)
    .bind(data.visibility)
    .fetch_one(executor)
    .await
}

pub async fn list_members<'e>(
    executor: impl PgExecutor<'e>,
    community_uuids: &[Uuid],
) -> SqlxResult<Vec<MemberRow>> {
    sqlx::query_as::<_, MemberRow>(
        r#"
        SELECT cu.community_uuid,
               u.uuid, u.email, u.password_hash, u.username, u.first_name, u.last_name,
               u.user_attributes, u.location, u.avatar_upload_uuid, u.last_seen_at,
               u.created_at, u.updated_at
        FROM community_users cu
        JOIN users u ON u.uuid = cu.user_uuid
        WHERE cu.community_uuid = ANY($1::uuid[])
        ORDER BY cu.created_at ASC, u.uuid ASC
        "#,
    )
    .bind(community_uuids)
    .fetch_all(executor)
    .await
}

/// Escape LIKE wildcards so the needle matches as a literal substring.
pub fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
