use std::net::SocketAddr;

use api::app::build_router;
use api::config::ServerConfig;
use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE},
        Method, Request, StatusCode,
    },
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::common::*;

fn test_router(app: &TestApp) -> Router {
    let config =
        ServerConfig::from_lookup(|key| (key == "STORE_BACKEND").then(|| "memory".to_string()))
            .unwrap();
    build_router(app.state.clone(), app.schema.clone(), &config).unwrap()
}

fn with_peer(mut request: Request<Body>) -> Request<Body> {
    request
        .extensions_mut()
        .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40_000))));
    request
}

fn graphql_request(body: Value, headers: &[(axum::http::HeaderName, String)]) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/graphql")
        .header(CONTENT_TYPE, "application/json");
    for (name, value) in headers {
        builder = builder.header(name, value);
    }
    with_peer(builder.body(Body::from(body.to_string())).unwrap())
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_test_app();
    let router = test_router(&app);

    let request = with_peer(Request::get("/health").body(Body::empty()).unwrap());
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn test_login_cookie_authenticates_next_request() {
    let app = setup_test_app();
    create_test_user(&app.store, "web@test.com", Some("browser-pass"));
    let router = test_router(&app);

    let login = graphql_request(
        json!({
            "query": "mutation { login(email: \"web@test.com\", password: \"browser-pass\") { email } }"
        }),
        &[],
    );
    let response = router.clone().oneshot(login).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("login should set a cookie")
        .to_string();
    assert!(set_cookie.starts_with("token="));
    let cookie = set_cookie.split(';').next().unwrap().to_string();

    let me = graphql_request(
        json!({ "query": "{ getLoggedInUserDetails { email } }" }),
        &[(COOKIE, format!("theme=dark; {cookie}"))],
    );
    let response = router.oneshot(me).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["data"]["getLoggedInUserDetails"]["email"], "web@test.com");
}

#[tokio::test]
async fn test_bearer_token_authenticates() {
    let app = setup_test_app();
    let user = create_test_user(&app.store, "api@test.com", None);
    let token = app.state.jwt_service().create_token(user.uuid).unwrap();

    let request = graphql_request(
        json!({ "query": "{ getLoggedInUserDetails { email } }" }),
        &[(AUTHORIZATION, format!("Bearer {token}"))],
    );
    let response = test_router(&app).oneshot(request).await.unwrap();

    let body = json_body(response).await;
    assert_eq!(body["data"]["getLoggedInUserDetails"]["email"], "api@test.com");
}

#[tokio::test]
async fn test_invalid_bearer_token_is_rejected() {
    let app = setup_test_app();

    let request = graphql_request(
        json!({ "query": "{ popularCommunities { uuid } }" }),
        &[(AUTHORIZATION, "Bearer not.a.token".to_string())],
    );
    let response = test_router(&app).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_stale_cookie_is_ignored() {
    let app = setup_test_app();

    let request = graphql_request(
        json!({ "query": "{ getLoggedInUserDetails { email } }" }),
        &[(COOKIE, "token=stale.session.value".to_string())],
    );
    let response = test_router(&app).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["errors"][0]["extensions"]["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_graphiql_is_hidden_without_introspection() {
    let app = setup_test_app();

    let request = with_peer(Request::get("/graphql").body(Body::empty()).unwrap());
    let response = test_router(&app).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
