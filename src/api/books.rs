//! Book catalog endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppResult, ErrorResponse},
    models::book::{BookResponse, BooksResponse, CreateBook, UpdateBook},
};

use super::AppJson;

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books in insertion order", body = BooksResponse),
        (status = 400, description = "Unexpected failure", body = ErrorResponse)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<BooksResponse>> {
    let books = state.services.catalog.list_books().await?;
    Ok(Json(BooksResponse { books }))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookResponse),
        (status = 400, description = "Missing ID", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<BookResponse>> {
    let book = state.services.catalog.get_book(&id).await?;
    Ok(Json(BookResponse { book }))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = BookResponse),
        (status = 400, description = "One message per violated rule", body = ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AppJson(data): AppJson<CreateBook>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    let book = state.services.catalog.create_book(data).await?;
    Ok((StatusCode::CREATED, Json(BookResponse { book })))
}

/// Update some fields of a book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 400, description = "Missing ID, invalid field or unknown book", body = ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    AppJson(data): AppJson<UpdateBook>,
) -> AppResult<Json<BookResponse>> {
    let book = state.services.catalog.update_book(&id, data).await?;
    Ok(Json(BookResponse { book }))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 400, description = "Missing ID or unknown book", body = ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.services.catalog.delete_book(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
