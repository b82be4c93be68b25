//! Repository layer owning the book collection

pub mod books;

use crate::models::book::sample_books;

/// Main repository struct, one per running server
#[derive(Clone, Default)]
pub struct Repository {
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a repository, optionally pre-filled with the sample catalog
    pub fn new(seed_sample_books: bool) -> Self {
        let books = if seed_sample_books {
            sample_books()
        } else {
            Vec::new()
        };

        Self {
            books: books::BooksRepository::new(books),
        }
    }
}
