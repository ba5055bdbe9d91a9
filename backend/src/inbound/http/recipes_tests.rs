//! Tests for recipe HTTP handlers.

use super::*;
use crate::domain::ErrorCode;
use crate::inbound::http::test_utils::{api_app, memory_state, signed_in};
use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

fn curry() -> Value {
    json!({
        "title": "Chicken curry",
        "timeMinutes": 30,
        "price": "7.50",
        "description": "Weeknight dinner",
        "tags": [{"name": "Dinner"}],
        "ingredients": [{"name": "Chicken"}, {"name": "Rice"}],
    })
}

async fn send(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    request: actix_test::TestRequest,
    cookie: Option<&Cookie<'static>>,
) -> (StatusCode, Value) {
    let request = match cookie {
        Some(cookie) => request.cookie(cookie.clone()),
        None => request,
    };
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json body")
    };
    (status, value)
}

#[rstest]
fn list_query_parses_id_filters() {
    let query = RecipeListQuery {
        tags: Some("1, 2".to_owned()),
        ingredients: None,
    };
    let filter = query.into_filter().expect("valid filter");
    assert_eq!(filter.tag_ids, vec![AttributeId::new(1), AttributeId::new(2)]);
    assert!(filter.ingredient_ids.is_empty());
}

#[rstest]
fn list_query_rejects_non_numeric_ids() {
    let query = RecipeListQuery {
        tags: None,
        ingredients: Some("1,x".to_owned()),
    };
    let err = query.into_filter().expect_err("invalid id");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    let details = err.details().expect("details");
    assert_eq!(details["field"], "ingredients");
    assert_eq!(details["index"], 1);
}

#[actix_web::test]
async fn anonymous_requests_are_unauthorised() {
    let app = actix_test::init_service(api_app(memory_state())).await;
    let (status, body) = send(&app, actix_test::TestRequest::get().uri("/api/v1/recipes"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
}

#[actix_web::test]
async fn recipes_are_private_to_their_owner() {
    let app = actix_test::init_service(api_app(memory_state())).await;
    let alice = signed_in(&app, "alice@example.com").await;
    let bob = signed_in(&app, "bob@example.com").await;

    let (status, created) = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/recipes")
            .set_json(curry()),
        Some(&alice),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["price"], "7.50");
    assert_eq!(created["description"], "Weeknight dinner");
    let ingredients: Vec<&str> = created["ingredients"]
        .as_array()
        .expect("ingredients")
        .iter()
        .filter_map(|item| item["name"].as_str())
        .collect();
    assert_eq!(ingredients, ["Chicken", "Rice"]);
    let id = created["id"].as_i64().expect("recipe id");

    let (_, bobs) = send(&app, actix_test::TestRequest::get().uri("/api/v1/recipes"), Some(&bob)).await;
    assert_eq!(bobs, json!([]));

    let uri = format!("/api/v1/recipes/{id}");
    let (status, _) = send(&app, actix_test::TestRequest::get().uri(&uri), Some(&bob)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, actix_test::TestRequest::delete().uri(&uri), Some(&bob)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, listed) = send(&app, actix_test::TestRequest::get().uri("/api/v1/recipes"), Some(&alice)).await;
    assert_eq!(status, StatusCode::OK);
    let listed = listed.as_array().expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["title"], "Chicken curry");
    assert_eq!(listed[0]["price"], "7.50");
    assert!(listed[0].get("description").is_none(), "summary omits description");
    assert!(listed[0].get("tags").is_none(), "summary omits tags");
    assert!(listed[0].get("ingredients").is_none(), "summary omits ingredients");
}

#[actix_web::test]
async fn create_reuses_existing_tag_names() {
    let app = actix_test::init_service(api_app(memory_state())).await;
    let cookie = signed_in(&app, "cook@example.com").await;

    let (_, first) = send(
        &app,
        actix_test::TestRequest::post().uri("/api/v1/recipes").set_json(curry()),
        Some(&cookie),
    )
    .await;
    let (_, second) = send(
        &app,
        actix_test::TestRequest::post().uri("/api/v1/recipes").set_json(json!({
            "title": "Fried rice",
            "timeMinutes": 15,
            "price": 3,
            "tags": [{"name": "Dinner"}],
        })),
        Some(&cookie),
    )
    .await;

    assert_eq!(first["tags"][0]["id"], second["tags"][0]["id"]);
    assert_eq!(second["price"], "3.00");
}

#[actix_web::test]
async fn list_filters_by_tag_ids() {
    let app = actix_test::init_service(api_app(memory_state())).await;
    let cookie = signed_in(&app, "cook@example.com").await;
    let (_, tagged) = send(
        &app,
        actix_test::TestRequest::post().uri("/api/v1/recipes").set_json(curry()),
        Some(&cookie),
    )
    .await;
    send(
        &app,
        actix_test::TestRequest::post().uri("/api/v1/recipes").set_json(json!({
            "title": "Toast",
            "timeMinutes": 2,
            "price": "0.50",
        })),
        Some(&cookie),
    )
    .await;

    let tag_id = tagged["tags"][0]["id"].as_i64().expect("tag id");
    let uri = format!("/api/v1/recipes?tags={tag_id}");
    let (status, listed) = send(&app, actix_test::TestRequest::get().uri(&uri), Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = listed
        .as_array()
        .expect("list")
        .iter()
        .filter_map(|recipe| recipe["title"].as_str())
        .collect();
    assert_eq!(titles, ["Chicken curry"]);
}

#[actix_web::test]
async fn put_requires_core_fields_but_patch_does_not() {
    let app = actix_test::init_service(api_app(memory_state())).await;
    let cookie = signed_in(&app, "cook@example.com").await;
    let (_, created) = send(
        &app,
        actix_test::TestRequest::post().uri("/api/v1/recipes").set_json(curry()),
        Some(&cookie),
    )
    .await;
    let uri = format!("/api/v1/recipes/{}", created["id"]);

    let (status, body) = send(
        &app,
        actix_test::TestRequest::put().uri(&uri).set_json(json!({"title": "Korma"})),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "timeMinutes");

    let (status, body) = send(
        &app,
        actix_test::TestRequest::patch().uri(&uri).set_json(json!({"title": "Korma", "link": "https://example.com/korma"})),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Korma");
    assert_eq!(body["link"], "https://example.com/korma");
    assert_eq!(body["tags"], created["tags"], "omitted tags are kept");

    let (status, body) = send(
        &app,
        actix_test::TestRequest::patch().uri(&uri).set_json(json!({"tags": [], "link": null})),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tags"], json!([]));
    assert_eq!(body["link"], Value::Null);
}

#[actix_web::test]
async fn delete_answers_no_content_then_not_found() {
    let app = actix_test::init_service(api_app(memory_state())).await;
    let cookie = signed_in(&app, "cook@example.com").await;
    let (_, created) = send(
        &app,
        actix_test::TestRequest::post().uri("/api/v1/recipes").set_json(curry()),
        Some(&cookie),
    )
    .await;
    let uri = format!("/api/v1/recipes/{}", created["id"]);

    let (status, _) = send(&app, actix_test::TestRequest::delete().uri(&uri), Some(&cookie)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, actix_test::TestRequest::get().uri(&uri), Some(&cookie)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[case(json!({"timeMinutes": 5, "price": "1"}), "title")]
#[case(json!({"title": "Soup", "timeMinutes": 5, "price": "1.234"}), "price")]
#[case(json!({"title": " ", "timeMinutes": 5, "price": "1"}), "title")]
#[actix_web::test]
async fn create_rejects_invalid_payloads(#[case] payload: Value, #[case] field: &str) {
    let app = actix_test::init_service(api_app(memory_state())).await;
    let cookie = signed_in(&app, "cook@example.com").await;
    let (status, body) = send(
        &app,
        actix_test::TestRequest::post().uri("/api/v1/recipes").set_json(payload),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], field);
}
