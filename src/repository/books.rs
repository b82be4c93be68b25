//! In-memory book collection

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookPatch, NewBook},
};

pub const BOOK_NOT_FOUND: &str = "The book was not found.";

/// Ordered collection of books guarded by a single lock
#[derive(Clone, Default)]
pub struct BooksRepository {
    books: Arc<RwLock<Vec<Book>>>,
}

impl BooksRepository {
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books: Arc::new(RwLock::new(books)),
        }
    }

    /// All books, in insertion order
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        Ok(self.books.read().await.clone())
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Book> {
        self.books
            .read()
            .await
            .iter()
            .find(|book| book.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))
    }

    /// Append a new book under a freshly generated id
    pub async fn create(&self, data: NewBook) -> AppResult<Book> {
        let mut books = self.books.write().await;

        let mut id = Uuid::new_v4().to_string();
        while books.iter().any(|book| book.id == id) {
            id = Uuid::new_v4().to_string();
        }

        let book = Book::from_new(id, data);
        books.push(book.clone());
        Ok(book)
    }

    /// Overlay `patch` on the stored book and return the result
    pub async fn update(&self, id: &str, patch: &BookPatch) -> AppResult<Book> {
        let mut books = self.books.write().await;
        let book = books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))?;
        patch.apply(book);
        Ok(book.clone())
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let mut books = self.books.write().await;
        let index = books
            .iter()
            .position(|book| book.id == id)
            .ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))?;
        books.remove(index);
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }
}
