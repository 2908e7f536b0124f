use std::sync::Arc;

use async_graphql::ErrorExtensions;
use infra::StoreError;

/// Unified error type for GraphQL resolvers and the services behind them.
///
/// async-graphql has a blanket `impl<T: Display + Send + Sync + 'static> From<T> for Error`,
/// so `?` works directly, but that drops the `code` extension. Resolvers that
/// want the code call `.extended()` (see [`GqlResultExt`]).
///
///   - `Store` logs the real failure and shows a sanitized message to clients
///   - `Uuid` shows "Invalid ID: …"
#[derive(Debug)]
pub enum GqlError {
    Unauthenticated,
    NotFound(String),
    InvalidCredentials,
    Store(Arc<StoreError>),
    Uuid(uuid::Error),
    Internal(String),
}

impl GqlError {
    /// Logs `msg` and hides it behind a generic message.
    pub fn internal(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        tracing::error!("Internal error: {msg}");
        GqlError::Internal(msg)
    }

    pub fn code(&self) -> &'static str {
        match self {
            GqlError::Unauthenticated => "UNAUTHENTICATED",
            GqlError::NotFound(_) => "NOT_FOUND",
            GqlError::InvalidCredentials => "INVALID_CREDENTIALS",
            GqlError::Store(_) | GqlError::Internal(_) => "INTERNAL",
            GqlError::Uuid(_) => "BAD_USER_INPUT",
        }
    }
}

impl std::fmt::Display for GqlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GqlError::Unauthenticated => write!(f, "Authentication required"),
            GqlError::NotFound(msg) => write!(f, "{msg}"),
            GqlError::InvalidCredentials => write!(f, "Invalid password"),
            GqlError::Store(_) => write!(f, "Internal database error"),
            GqlError::Uuid(e) => write!(f, "Invalid ID: {e}"),
            GqlError::Internal(_) => write!(f, "Internal server error"),
        }
    }
}

impl std::error::Error for GqlError {}

impl ErrorExtensions for GqlError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}

impl From<StoreError> for GqlError {
    fn from(e: StoreError) -> Self {
        Arc::new(e).into()
    }
}

impl From<Arc<StoreError>> for GqlError {
    fn from(e: Arc<StoreError>) -> Self {
        // Log the real error server-side; clients only see the generic message
        tracing::error!("Store error: {e}");
        GqlError::Store(e)
    }
}

impl From<uuid::Error> for GqlError {
    fn from(e: uuid::Error) -> Self {
        GqlError::Uuid(e)
    }
}

/// Converts a service result into a resolver result, keeping the error code.
pub trait GqlResultExt<T> {
    fn extended(self) -> async_graphql::Result<T>;
}

impl<T> GqlResultExt<T> for std::result::Result<T, GqlError> {
    fn extended(self) -> async_graphql::Result<T> {
        self.map_err(|e| e.extend())
    }
}
