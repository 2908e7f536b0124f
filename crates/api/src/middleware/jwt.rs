use axum::{
    extract::{Request, State},
    http::header::{AUTHORIZATION, COOKIE},
    middleware::Next,
    response::Response,
};

use crate::auth::cookie::extract_session_token;
use crate::auth::Claims;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves the caller from a Bearer token or the `token` session cookie and
/// stores the verified claims in the request extensions for the GraphQL handler.
///
/// A bad Bearer token is rejected outright. A bad cookie is ignored so that a
/// client holding a stale session can still reach `login`.
pub async fn jwt_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let bearer = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::to_string);

    if let Some(token) = bearer {
        match state.jwt_service().verify_token(&token) {
            Ok(claims) => {
                request.extensions_mut().insert::<Claims>(claims);
            }
            Err(_) => {
                return Err(AppError::Unauthorized("Invalid or expired token".to_string()));
            }
        }
    } else if let Some(token) = request
        .headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .find_map(extract_session_token)
    {
        match state.jwt_service().verify_token(&token) {
            Ok(claims) => {
                request.extensions_mut().insert::<Claims>(claims);
            }
            Err(e) => {
                tracing::debug!("Ignoring session cookie: {e}");
            }
        }
    }

    Ok(next.run(request).await)
}
