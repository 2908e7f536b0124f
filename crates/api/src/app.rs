use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::{
        header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE},
        Method, StatusCode,
    },
    middleware,
    response::{Html, IntoResponse},
    routing::{get, post},
    Extension, Router,
};
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::GovernorLayer;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::auth::Claims;
use crate::config::ServerConfig;
use crate::error::AppError;
use crate::gql::AppSchema;
use crate::middleware::jwt::jwt_middleware;
use crate::state::AppState;

/// Build the Axum router with health endpoint and GraphQL.
pub fn build_router(
    state: AppState,
    schema: AppSchema,
    config: &ServerConfig,
) -> anyhow::Result<Router> {
    // Rate limiting per IP: one token every 50ms (~20/s), bursts of 100
    let governor_conf = GovernorConfigBuilder::default()
        .per_millisecond(50)
        .burst_size(100)
        .finish()
        .ok_or_else(|| anyhow!("Invalid rate limiter configuration"))?;

    let mut graphql_route = post(move |claims, req| graphql_handler(schema.clone(), claims, req));
    if config.gql_introspection {
        graphql_route = graphql_route.get(graphiql);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    Ok(Router::new()
        // Liveness check; also proves store connectivity.
        .route("/health", get(health))
        // GraphQL endpoint; the JWT middleware puts claims in the request extensions
        .route(
            "/graphql",
            graphql_route.layer(GovernorLayer::new(Arc::new(governor_conf))),
        )
        .with_state(state.clone())
        .layer(middleware::from_fn_with_state(state, jwt_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([CONTENT_TYPE, AUTHORIZATION])
                .allow_credentials(true),
        ))
}

/// Executes a GraphQL request with the caller's claims, if any, in the
/// context. `GraphQLResponse` copies resolver-set headers such as
/// `Set-Cookie` onto the HTTP response.
async fn graphql_handler(
    schema: AppSchema,
    claims: Option<Extension<Claims>>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();
    if let Some(Extension(claims)) = claims {
        request = request.data(claims);
    }

    schema.execute(request).await.into()
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

/// Liveness plus a store round trip.
async fn health(State(state): State<AppState>) -> Result<&'static str, AppError> {
    state.store.ping().await?;
    Ok("ok")
}
