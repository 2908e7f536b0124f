use infra::{models::UserRow, CommunityStore};

use crate::auth::cookie::build_session_cookie;
use crate::auth::{AuthConfig, JwtService, PasswordService, SessionCookies};
use crate::gql::error::GqlError;

pub struct LoginOutcome {
    pub user: UserRow,
    pub token: String,
}

/// Password login.
///
/// 1. Look the user up by exact email.
/// 2. Verify the password against the stored bcrypt hash.
/// 3. Sign a session token for the user's uuid.
/// 4. Hand the token to `cookies` as the `token` session cookie.
///
/// Nothing is written to `cookies` unless every step succeeds.
pub async fn login(
    store: &dyn CommunityStore,
    jwt: &JwtService,
    config: &AuthConfig,
    cookies: &dyn SessionCookies,
    email: &str,
    password: &str,
) -> Result<LoginOutcome, GqlError> {
    let Some(user) = store.find_user_by_email(email).await? else {
        tracing::info!("Login rejected: unknown email");
        return Err(GqlError::NotFound(format!(
            "No such user found for email {email}"
        )));
    };

    let Some(password_hash) = user.password_hash.clone() else {
        tracing::warn!(user_uuid = %user.uuid, "Login rejected: user has no password set");
        return Err(GqlError::InvalidCredentials);
    };

    // bcrypt is CPU bound; keep it off the async workers.
    let candidate = password.to_owned();
    let verified = tokio::task::spawn_blocking(move || {
        PasswordService::verify_password(&candidate, &password_hash)
    })
    .await
    .map_err(|e| GqlError::internal(format!("Password verification task failed: {e}")))?;

    let valid = match verified {
        Ok(valid) => valid,
        Err(e) => {
            tracing::warn!(user_uuid = %user.uuid, "Stored password hash is unusable: {e}");
            false
        }
    };
    if !valid {
        tracing::info!(user_uuid = %user.uuid, "Login rejected: invalid password");
        return Err(GqlError::InvalidCredentials);
    }

    let token = jwt
        .create_token(user.uuid)
        .map_err(|e| GqlError::internal(format!("Failed to sign session token: {e}")))?;

    cookies.set_cookie(build_session_cookie(
        &token,
        config.session_max_age_secs(),
        &config.cookie_domain,
        config.cookie_secure,
    ));

    tracing::info!(user_uuid = %user.uuid, "User logged in");
    Ok(LoginOutcome { user, token })
}
