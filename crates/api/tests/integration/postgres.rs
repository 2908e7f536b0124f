//! The same queries as the in-memory suites, run through `PgStore` so the
//! SQL itself is exercised. Skipped when `TEST_DATABASE_URL` is unset.

use std::collections::HashSet;

use crate::common::postgres::{setup_test_db, PgTestApp};
use crate::common::{claims_for, execute_graphql, first_error_code};
use async_graphql::Variables;
use infra::models::CommunityVisibility;
use serde_json::{json, Value};

async fn query(app: &PgTestApp, query: &str, variables: Option<Value>) -> Value {
    let response =
        execute_graphql(&app.schema, query, variables.map(Variables::from_json), None).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    response.data.into_json().unwrap()
}

async fn search(app: &PgTestApp, name: &str) -> Value {
    let data = query(
        app,
        "query Search($name: String!) { searchCommunities(name: $name) { name } }",
        Some(json!({ "name": name })),
    )
    .await;
    data["searchCommunities"].clone()
}

#[tokio::test]
async fn test_pg_popular_communities_are_ranked_public_and_capped() {
    let Some(app) = setup_test_db().await else {
        return;
    };

    let mut users = Vec::new();
    for i in 0..12 {
        users.push(app.create_user(&format!("fan{i}@test.com"), None).await);
    }
    for i in 0..12 {
        let community = app
            .create_community(Some(&format!("Club {i:02}")), CommunityVisibility::Public)
            .await;
        for user in users.iter().take(i) {
            app.join(community, *user).await;
        }
    }
    let secret = app
        .create_community(Some("Crowded"), CommunityVisibility::Secret)
        .await;
    for user in &users {
        app.join(secret, *user).await;
    }

    let data = query(&app, "{ popularCommunities { uuid name userCount } }", None).await;
    let popular = data["popularCommunities"].as_array().unwrap();

    assert_eq!(popular.len(), 10);
    assert!(popular.iter().all(|c| c["uuid"] != secret.to_string()));
    let counts: Vec<i64> = popular
        .iter()
        .map(|c| c["userCount"].as_i64().unwrap())
        .collect();
    assert_eq!(counts[0], 11);
    assert!(counts.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(popular[0]["name"], "Club 11");

    app.teardown().await;
}

#[tokio::test]
async fn test_pg_popular_communities_include_empty_ones() {
    let Some(app) = setup_test_db().await else {
        return;
    };
    app.create_community(Some("Quiet"), CommunityVisibility::Public)
        .await;

    let data = query(&app, "{ popularCommunities { name userCount } }", None).await;
    assert_eq!(
        data["popularCommunities"],
        json!([{ "name": "Quiet", "userCount": 0 }])
    );

    app.teardown().await;
}

#[tokio::test]
async fn test_pg_search_communities() {
    let Some(app) = setup_test_db().await else {
        return;
    };
    app.create_community(Some("Rustaceans"), CommunityVisibility::Private)
        .await;
    app.create_community(Some("Trusted Rustlers"), CommunityVisibility::Public)
        .await;
    app.create_community(Some("Go Gophers"), CommunityVisibility::Public)
        .await;
    app.create_community(Some("100% fun"), CommunityVisibility::Public)
        .await;
    app.create_community(None, CommunityVisibility::Public).await;

    assert_eq!(
        search(&app, "Rust").await,
        json!([{ "name": "Rustaceans" }, { "name": "Trusted Rustlers" }])
    );

    let everything = search(&app, "").await;
    assert_eq!(
        everything.as_array().unwrap().len() as i64,
        app.community_count().await
    );
    assert!(everything.as_array().unwrap().last().unwrap()["name"].is_null());

    assert_eq!(search(&app, "zzz").await, json!([]));
    assert_eq!(search(&app, "%").await, json!([{ "name": "100% fun" }]));
    assert_eq!(search(&app, "_").await, json!([]));

    app.teardown().await;
}

#[tokio::test]
async fn test_pg_user_communities_by_uuid_only_lists_public() {
    let Some(app) = setup_test_db().await else {
        return;
    };
    let user = app.create_user("someone@test.com", None).await;

    let public = app
        .create_community(Some("Open"), CommunityVisibility::Public)
        .await;
    let private = app
        .create_community(Some("Closed"), CommunityVisibility::Private)
        .await;
    let secret = app
        .create_community(Some("Hidden"), CommunityVisibility::Secret)
        .await;
    for community in [public, private, secret] {
        app.join(community, user).await;
    }

    let data = query(
        &app,
        "query C($uuid: ID!) { getUserCommunitiesByUuid(uuid: $uuid) { uuid visibility } }",
        Some(json!({ "uuid": user.to_string() })),
    )
    .await;
    assert_eq!(
        data["getUserCommunitiesByUuid"],
        json!([{ "uuid": public.to_string(), "visibility": "public" }])
    );

    let response = execute_graphql(
        &app.schema,
        "{ getLoggedInUserCommunities { name visibility } }",
        None,
        Some(claims_for(user)),
    )
    .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert_eq!(
        data["getLoggedInUserCommunities"],
        json!([
            { "name": "Closed", "visibility": "private" },
            { "name": "Hidden", "visibility": "secret" },
            { "name": "Open", "visibility": "public" },
        ])
    );

    app.teardown().await;
}

#[tokio::test]
async fn test_pg_created_communities_get_distinct_uuids() {
    let Some(app) = setup_test_db().await else {
        return;
    };

    let mut uuids = HashSet::new();
    for _ in 0..5 {
        let data = query(&app, "mutation { createCommunity { uuid name } }", None).await;
        assert!(data["createCommunity"]["name"].is_null());
        uuids.insert(data["createCommunity"]["uuid"].as_str().unwrap().to_string());
    }
    assert_eq!(uuids.len(), 5);

    let data = query(
        &app,
        r#"mutation { createCommunity(name: "Inner circle", tier: tier2, visibility: secret) {
            tier visibility Users { uuid }
        } }"#,
        None,
    )
    .await;
    assert_eq!(
        data["createCommunity"],
        json!({ "tier": "tier2", "visibility": "secret", "Users": [] })
    );
    assert_eq!(app.community_count().await, 6);

    app.teardown().await;
}

#[tokio::test]
async fn test_pg_community_users_field_lists_members() {
    let Some(app) = setup_test_db().await else {
        return;
    };
    let alice = app.create_user("alice@test.com", None).await;
    let bob = app.create_user("bob@test.com", None).await;
    let community = app
        .create_community(Some("First"), CommunityVisibility::Public)
        .await;
    app.join(community, alice).await;
    app.join(community, bob).await;

    let response = execute_graphql(
        &app.schema,
        "{ getLoggedInUserCommunities { Users { uuid username } } }",
        None,
        Some(claims_for(bob)),
    )
    .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    let members: HashSet<String> = data["getLoggedInUserCommunities"][0]["Users"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["uuid"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        members,
        HashSet::from([alice.to_string(), bob.to_string()])
    );

    app.teardown().await;
}

#[tokio::test]
async fn test_pg_login_checks_the_stored_hash() {
    let Some(app) = setup_test_db().await else {
        return;
    };
    let user = app.create_user("dana@test.com", Some("pa55word!")).await;
    let login = "mutation L($email: String!, $password: String!) {
        login(email: $email, password: $password) { uuid token }
    }";

    let data = query(
        &app,
        login,
        Some(json!({ "email": "dana@test.com", "password": "pa55word!" })),
    )
    .await;
    assert_eq!(data["login"]["uuid"], user.to_string());
    assert!(data["login"]["token"].as_str().is_some());

    let response = execute_graphql(
        &app.schema,
        login,
        Some(Variables::from_json(
            json!({ "email": "dana@test.com", "password": "wrong" }),
        )),
        None,
    )
    .await;
    assert_eq!(
        first_error_code(&response).as_deref(),
        Some("INVALID_CREDENTIALS")
    );

    app.teardown().await;
}
