//! API handlers for Bookshelf REST endpoints

pub mod books;
pub mod health;
pub mod openapi;

use axum::{
    extract::FromRequest,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;

use crate::{error::AppError, AppState};

/// JSON body extractor whose rejection is rendered as an [`AppError`]
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Body returned for unmatched routes
#[derive(Serialize, Deserialize, ToSchema)]
pub struct RouteNotFound {
    pub error: String,
}

async fn route_not_found() -> (StatusCode, Json<RouteNotFound>) {
    (
        StatusCode::NOT_FOUND,
        Json(RouteNotFound {
            error: "Route not found.".to_string(),
        }),
    )
}

/// A handler that panicked is answered like any other internal error
fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    AppError::Internal(detail).into_response()
}

/// Panic guard, request tracing and permissive CORS around `router`
pub fn with_middleware(router: Router) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .with_state(state);

    with_middleware(
        Router::new()
            .merge(routes)
            .merge(openapi::create_openapi_router())
            .fallback(route_not_found),
    )
}
