use crate::common::*;
use async_graphql::Variables;
use infra::models::CommunityVisibility;
use serde_json::json;
use uuid::Uuid;

const USER_BY_UUID: &str = r#"
    query User($uuid: ID!) {
        getUserDetailsByUuid(uuid: $uuid) {
            uuid
            username
            location
            lastSeenAt
            communities { name }
        }
    }
"#;

#[tokio::test]
async fn test_logged_in_user_details() {
    let app = setup_test_app();
    let user = create_test_user(&app.store, "me@test.com", Some("irrelevant"));
    let private = create_test_community(&app.store, Some("Backroom"), CommunityVisibility::Private);
    join(&app.store, private, user.uuid);

    let query = r#"
        query {
            getLoggedInUserDetails {
                uuid
                email
                username
                firstName
                lastName
                location
                token
                communities { name visibility }
            }
        }
    "#;

    let response = execute_graphql(&app.schema, query, None, Some(claims_for(user.uuid))).await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    let details = &data["getLoggedInUserDetails"];
    assert_eq!(details["uuid"], user.uuid.to_string());
    assert_eq!(details["email"], "me@test.com");
    assert_eq!(details["username"], "user_me");
    assert_eq!(details["firstName"], "Test");
    assert_eq!(details["lastName"], "User");
    assert_eq!(details["location"], "Brussels");
    assert!(details["token"].is_null());
    assert_eq!(
        details["communities"],
        json!([{ "name": "Backroom", "visibility": "private" }])
    );
}

#[tokio::test]
async fn test_logged_in_user_details_require_authentication() {
    let app = setup_test_app();

    let response = execute_graphql(
        &app.schema,
        "{ getLoggedInUserDetails { uuid } }",
        None,
        None,
    )
    .await;

    assert_eq!(
        first_error_code(&response).as_deref(),
        Some("UNAUTHENTICATED")
    );
    assert_eq!(response.errors[0].message, "Authentication required");
}

#[tokio::test]
async fn test_logged_in_user_details_for_deleted_user_is_null() {
    let app = setup_test_app();

    let response = execute_graphql(
        &app.schema,
        "{ getLoggedInUserDetails { uuid } }",
        None,
        Some(claims_for(Uuid::new_v4())),
    )
    .await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert!(data["getLoggedInUserDetails"].is_null());
}

#[tokio::test]
async fn test_user_details_by_uuid_is_public_and_repeatable() {
    let app = setup_test_app();
    let user = create_test_user(&app.store, "public@test.com", None);
    let open = create_test_community(&app.store, Some("Open"), CommunityVisibility::Public);
    let hidden = create_test_community(&app.store, Some("Hidden"), CommunityVisibility::Secret);
    join(&app.store, open, user.uuid);
    join(&app.store, hidden, user.uuid);

    let variables = || Variables::from_json(json!({ "uuid": user.uuid.to_string() }));

    let first = execute_graphql(&app.schema, USER_BY_UUID, Some(variables()), None).await;
    let second = execute_graphql(&app.schema, USER_BY_UUID, Some(variables()), None).await;

    assert!(first.errors.is_empty(), "{:?}", first.errors);
    let first = first.data.into_json().unwrap();
    let second = second.data.into_json().unwrap();
    assert_eq!(first, second);

    let details = &first["getUserDetailsByUuid"];
    assert_eq!(details["uuid"], user.uuid.to_string());
    assert_eq!(details["username"], "user_public");
    assert!(details["lastSeenAt"].as_str().unwrap().ends_with('Z'));
    assert_eq!(details["communities"], json!([{ "name": "Open" }]));
}

#[tokio::test]
async fn test_user_details_by_uuid_hides_private_fields() {
    let app = setup_test_app();
    let user = create_test_user(&app.store, "private@test.com", None);

    let query = r#"
        query User($uuid: ID!) {
            getUserDetailsByUuid(uuid: $uuid) { email }
        }
    "#;
    let variables = Variables::from_json(json!({ "uuid": user.uuid.to_string() }));

    let response = execute_graphql(&app.schema, query, Some(variables), None).await;

    assert!(!response.errors.is_empty());
    assert!(response.data.into_json().unwrap().is_null());
}

#[tokio::test]
async fn test_user_details_by_unknown_uuid_is_null() {
    let app = setup_test_app();
    let variables = Variables::from_json(json!({ "uuid": Uuid::new_v4().to_string() }));

    let response = execute_graphql(&app.schema, USER_BY_UUID, Some(variables), None).await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert!(data["getUserDetailsByUuid"].is_null());
}
