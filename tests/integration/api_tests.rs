//! API integration tests

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    routing::get,
    Router,
};
use bookshelf_server::api;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response")
    };
    (status, body)
}

fn mock_book() -> Value {
    json!({
        "title": "Test Book",
        "author": "Tim Asher",
        "publishedDate": "2012-04-05",
        "availableCopies": 1000
    })
}

#[tokio::test]
async fn test_book_lifecycle() {
    let app = common::app();

    // Create
    let (status, body) = send(&app, Method::POST, "/books", Some(mock_book())).await;
    assert_eq!(status, StatusCode::CREATED);
    let book = body["book"].clone();
    assert_eq!(book["title"], "Test Book");
    assert_eq!(book["author"], "Tim Asher");
    assert_eq!(book["publishedDate"], "2012-04-05");
    assert_eq!(book["availableCopies"], 1000);
    let id = book["id"].as_str().expect("No book ID").to_string();

    // Listed
    let (status, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    let books = body["books"].as_array().expect("books is not an array");
    assert_eq!(books.len(), 5);
    assert_eq!(books[4], book);

    // Round trip
    let (status, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["book"], book);

    // Partial update
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/books/{}", id),
        Some(json!({ "title": "Update Test Book" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let mut expected = book.clone();
    expected["title"] = json!("Update Test Book");
    assert_eq!(body["book"], expected);

    // Delete
    let (status, body) = send(&app, Method::DELETE, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "The book was not found.");
}

#[tokio::test]
async fn test_created_ids_are_unique() {
    let app = common::empty_app();
    let mut ids = Vec::new();

    for _ in 0..10 {
        let (status, body) = send(&app, Method::POST, "/books", Some(mock_book())).await;
        assert_eq!(status, StatusCode::CREATED);
        ids.push(body["book"]["id"].as_str().unwrap().to_string());
    }

    let (_, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(body["books"].as_array().unwrap().len(), 10);

    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 10);
}

#[tokio::test]
async fn test_list_seeded_books_in_order() {
    let app = common::app();
    let (status, body) = send(&app, Method::GET, "/books", None).await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["books"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["1", "2", "3", "4"]);
}

#[tokio::test]
async fn test_list_empty_catalog() {
    let app = common::empty_app();
    let (status, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "books": [] }));
}

#[tokio::test]
async fn test_create_invalid_book() {
    let app = common::app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({ "author": "No Title" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let messages = body["message"].as_array().expect("message is not an array");
    assert!(messages.contains(&json!("Title must be provided, and a valid string.")));
    assert!(!messages.contains(&json!("Author must be provided, and a valid string.")));

    let (_, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(body["books"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_create_reports_every_violation() {
    let app = common::app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({ "title": 12, "availableCopies": -1 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        json!([
            "Title must be provided, and a valid string.",
            "Author must be provided, and a valid string.",
            "publishedDate must be provided, and a valid string.",
            "availableCopies must be provided, and be a positive number."
        ])
    );
}

#[tokio::test]
async fn test_malformed_body() {
    let app = common::app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/books")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_create_accepts_any_non_negative_copies() {
    let app = common::empty_app();

    for copies in [json!(1000.0), json!(2.5), json!(5_000_000_000u64)] {
        let mut body = mock_book();
        body["availableCopies"] = copies.clone();
        let (status, body) = send(&app, Method::POST, "/books", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["book"]["availableCopies"], copies);

        let id = body["book"]["id"].as_str().unwrap().to_string();
        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/books/{}", id),
            Some(json!({ "availableCopies": 2.5 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["book"]["availableCopies"], 2.5);
    }
}

#[tokio::test]
async fn test_unknown_id() {
    let app = common::app();

    let (status, _) = send(&app, Method::GET, "/books/unknown", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/books/unknown",
        Some(json!({ "title": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "The book was not found.");

    let (status, _) = send(&app, Method::DELETE, "/books/unknown", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(body["books"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_blank_id() {
    let app = common::app();
    let (status, body) = send(&app, Method::GET, "/books/%20", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "ID must be provided.");
}

#[tokio::test]
async fn test_id_is_matched_exactly() {
    let app = common::app();
    let (status, body) = send(&app, Method::GET, "/books/%201", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "The book was not found.");
}

#[tokio::test]
async fn test_empty_update_returns_book() {
    let app = common::app();
    let (status, body) = send(&app, Method::PUT, "/books/4", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["book"]["id"], "4");
    assert_eq!(body["book"]["availableCopies"], 2);

    let (status, body) = send(&app, Method::PUT, "/books/unknown", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "The book was not found.");
}

#[tokio::test]
async fn test_update_never_changes_id() {
    let app = common::app();
    let (status, body) = send(
        &app,
        Method::PUT,
        "/books/3",
        Some(json!({ "id": "hijacked", "availableCopies": 0 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["book"]["id"], "3");
    assert_eq!(body["book"]["availableCopies"], 0);
    assert_eq!(
        body["book"]["title"],
        "Debugging: The Art of Solving Problems That You Created"
    );

    let (status, _) = send(&app, Method::GET, "/books/hijacked", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_rejects_invalid_fields() {
    let app = common::app();
    let (status, body) = send(
        &app,
        Method::PUT,
        "/books/1",
        Some(json!({ "author": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        json!(["Author must be provided, and a valid string."])
    );
}

#[tokio::test]
async fn test_delete_keeps_others_in_order() {
    let app = common::app();
    let (status, _) = send(&app, Method::DELETE, "/books/2", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, Method::GET, "/books", None).await;
    let ids: Vec<&str> = body["books"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["1", "3", "4"]);
}

#[tokio::test]
async fn test_root_and_health() {
    let app = common::app();

    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Hello from the backend!" }));

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["books"], 4);
}

#[tokio::test]
async fn test_route_not_found() {
    let app = common::app();
    let (status, body) = send(&app, Method::GET, "/non-existent-route", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Route not found." }));
}

async fn failing_handler() -> StatusCode {
    panic!("catalog lock poisoned")
}

#[tokio::test]
async fn test_handler_panic_is_generic_bad_request() {
    let app = api::with_middleware(Router::new().route("/fail", get(failing_handler)));
    let (status, body) = send(&app, Method::GET, "/fail", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "message": "There was an error processing the request" })
    );
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let app = common::app();
    let request = Request::builder()
        .uri("/books")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn test_openapi_document() {
    let app = common::app();
    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/books/{id}"].is_object());
}
