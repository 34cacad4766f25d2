//! Router tests against the in-memory store.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use lunchly::{app, AppState, MemoryStore};
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

fn create_test_app() -> Router {
    app(AppState::new(Arc::new(MemoryStore::new())))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Option<String>, String) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, location, String::from_utf8(body.to_vec()).unwrap())
}

async fn add_customer(app: &Router, form: &str) -> String {
    let (status, location, _) = send(app, post_form("/add/", form)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    location.expect("redirect location")
}

#[tokio::test]
async fn test_add_then_show_customer() {
    let app = create_test_app();

    let location = add_customer(&app, "firstName=Ann&lastName=Lee").await;
    assert_eq!(location, "/1/");

    let (status, _, html) = send(&app, get(&location)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Ann Lee"));
    assert!(html.contains("No reservations yet."));
}

#[tokio::test]
async fn test_unknown_customer_is_404() {
    let app = create_test_app();
    let (status, _, html) = send(&app, get("/99/")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("No such customer: 99"));

    let (status, _, _) = send(&app, get("/99/edit/")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_id_is_400() {
    let app = create_test_app();
    let (status, _, _) = send(&app, get("/abc/")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_and_search() {
    let app = create_test_app();
    add_customer(&app, "firstName=John&lastName=Doe").await;
    add_customer(&app, "firstName=Jane&lastName=Smith").await;
    add_customer(&app, "firstName=Johnny&lastName=Walker").await;

    let (status, _, html) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("John Doe"));
    assert!(html.contains("Johnny Walker"));

    let (status, _, html) = send(&app, post_form("/", "searchTerm=john+smith")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("John Doe"));
    assert!(html.contains("Jane Smith"));
    assert!(!html.contains("Johnny Walker"));

    let (_, _, html) = send(&app, post_form("/", "searchTerm=")).await;
    assert!(html.contains("No customers found."));
}

#[tokio::test]
async fn test_edit_customer() {
    let app = create_test_app();
    let location = add_customer(&app, "firstName=Ann&lastName=Lee&phone=555-0100").await;

    let (status, _, html) = send(&app, get("/1/edit/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"value="555-0100""#));

    let (status, redirect, _) = send(
        &app,
        post_form("/1/edit/", "firstName=Anne&lastName=Leigh&phone=&notes=birthday"),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(redirect.as_deref(), Some(location.as_str()));

    let (_, _, html) = send(&app, get(&location)).await;
    assert!(html.contains("Anne Leigh"));
    assert!(html.contains("Notes: birthday"));
    assert!(!html.contains("555-0100"));
}

#[tokio::test]
async fn test_edit_with_blank_notes_is_rejected() {
    let app = create_test_app();
    let location = add_customer(&app, "firstName=Ann&lastName=Lee&notes=vip").await;

    let (status, redirect, html) = send(
        &app,
        post_form("/1/edit/", "firstName=Anne&lastName=Lee&phone=&notes="),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(redirect, None);
    assert!(html.contains("notes must not be empty"));

    let (_, _, html) = send(&app, get(&location)).await;
    assert!(html.contains("Ann Lee"));
    assert!(!html.contains("Anne Lee"));
    assert!(html.contains("Notes: vip"));
}

#[tokio::test]
async fn test_add_reservation_and_top_ten() {
    let app = create_test_app();
    add_customer(&app, "firstName=Ann&lastName=Lee").await;
    add_customer(&app, "firstName=Bob&lastName=Ray").await;
    add_customer(&app, "firstName=Cat&lastName=Idle").await;

    for _ in 0..2 {
        let (status, location, _) = send(
            &app,
            post_form("/2/add-reservation/", "startAt=2024-01-05T18%3A30&numGuests=4&notes=patio"),
        )
        .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/2/"));
    }
    send(&app, post_form("/1/add-reservation/", "startAt=2024-02-01T12%3A00&numGuests=2")).await;

    let (_, _, html) = send(&app, get("/2/")).await;
    assert!(html.contains("January 5th 2024, 6:30 pm for 4 guests (patio)"));

    let (status, _, html) = send(&app, get("/topten")).await;
    assert_eq!(status, StatusCode::OK);
    let bob = html.find("Bob Ray</a> (2 reservations)").expect("bob listed");
    let ann = html.find("Ann Lee</a> (1 reservations)").expect("ann listed");
    assert!(bob < ann);
    assert!(!html.contains("Cat Idle"));
}

#[tokio::test]
async fn test_reservation_errors() {
    let app = create_test_app();
    add_customer(&app, "firstName=Ann&lastName=Lee").await;

    let (status, _, _) = send(
        &app,
        post_form("/7/add-reservation/", "startAt=2024-01-05T18%3A30&numGuests=2"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(&app, post_form("/1/add-reservation/", "startAt=soon&numGuests=2")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = send(
        &app,
        post_form("/1/add-reservation/", "startAt=2024-01-05T18%3A30&numGuests=0"),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_health_and_ready() {
    let app = create_test_app();
    let (status, _, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");

    let (status, _, body) = send(&app, get("/ready")).await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["store"], "ok");
}

#[tokio::test]
async fn test_new_customer_form() {
    let app = create_test_app();
    let (status, _, html) = send(&app, get("/add/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"action="/add/""#));
    assert!(html.contains(r#"name="firstName""#));
}
