//! Catalog management service

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
    repository::Repository,
};

pub const ID_REQUIRED: &str = "ID must be provided.";

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List every book in insertion order
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    pub async fn count_books(&self) -> usize {
        self.repository.books.len().await
    }

    /// Get a book by id. Unknown ids are a 404.
    pub async fn get_book(&self, id: &str) -> AppResult<Book> {
        let id = require_id(id)?;
        self.repository.books.get_by_id(id).await
    }

    /// Validate the request and append a new book
    pub async fn create_book(&self, data: CreateBook) -> AppResult<Book> {
        let new_book = data.validate().map_err(AppError::Validation)?;
        let book = self.repository.books.create(new_book).await?;
        tracing::info!(book_id = %book.id, title = %book.title, "Catalog create");
        Ok(book)
    }

    /// Patch an existing book.
    ///
    /// An unknown id is answered as a bad request, not a 404, matching the
    /// historical contract of this endpoint.
    pub async fn update_book(&self, id: &str, data: UpdateBook) -> AppResult<Book> {
        let id = require_id(id)?;
        let patch = data.validate().map_err(AppError::Validation)?;
        if patch.is_empty() {
            return self
                .repository
                .books
                .get_by_id(id)
                .await
                .map_err(not_found_as_bad_request);
        }
        let book = self
            .repository
            .books
            .update(id, &patch)
            .await
            .map_err(not_found_as_bad_request)?;
        tracing::info!(book_id = %book.id, "Catalog update");
        Ok(book)
    }

    /// Remove a book. Unknown ids are a bad request, as for updates.
    pub async fn delete_book(&self, id: &str) -> AppResult<()> {
        let id = require_id(id)?;
        self.repository
            .books
            .delete(id)
            .await
            .map_err(not_found_as_bad_request)?;
        tracing::info!(book_id = %id, "Catalog delete");
        Ok(())
    }
}

/// Blank ids are rejected; any other id is looked up exactly as received.
fn require_id(id: &str) -> AppResult<&str> {
    if id.trim().is_empty() {
        return Err(AppError::MissingParameter(ID_REQUIRED.to_string()));
    }
    Ok(id)
}

fn not_found_as_bad_request(err: AppError) -> AppError {
    match err {
        AppError::NotFound(msg) => AppError::BadRequest(msg),
        other => other,
    }
}
