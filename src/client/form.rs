//! Draft field values for the create and edit forms

use crate::models::book::{copies_from_f64, Book, NewBook};

pub const TITLE_REQUIRED: &str = "Title must be provided and valid string";
pub const AUTHOR_REQUIRED: &str = "Author must be provided and valid string";
pub const DATE_REQUIRED: &str = "Publish Date must be provided and valid string";
/// The edit view words the missing date differently from the create form
pub const DATE_REQUIRED_ON_EDIT: &str = "Publish Date must be provided.";
pub const COPIES_REQUIRED: &str = "Copies must be provided and valid positive number";

/// Form values as typed by the user. Copies are signed so a negative entry can be reported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub published_date: String,
    pub available_copies: f64,
}

impl BookForm {
    /// Form seeded from an existing record
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            published_date: book.published_date.clone(),
            available_copies: book.available_copies.as_f64().unwrap_or_default(),
        }
    }

    /// Same rules as the server, stopping at the first failure
    pub fn validate(&self) -> Result<NewBook, &'static str> {
        self.check(DATE_REQUIRED)
    }

    /// Rules applied when saving an edit session
    pub fn validate_edit(&self) -> Result<NewBook, &'static str> {
        self.check(DATE_REQUIRED_ON_EDIT)
    }

    fn check(&self, date_required: &'static str) -> Result<NewBook, &'static str> {
        if self.title.is_empty() {
            return Err(TITLE_REQUIRED);
        }
        if self.author.is_empty() {
            return Err(AUTHOR_REQUIRED);
        }
        if self.published_date.is_empty() {
            return Err(date_required);
        }
        let available_copies = copies_from_f64(self.available_copies).ok_or(COPIES_REQUIRED)?;

        Ok(NewBook {
            title: self.title.clone(),
            author: self.author.clone(),
            published_date: self.published_date.clone(),
            available_copies,
        })
    }

    /// True when no field differs from `book`
    pub fn matches(&self, book: &Book) -> bool {
        self.title == book.title
            && self.author == book.author
            && self.published_date == book.published_date
            && book.available_copies.as_f64() == Some(self.available_copies)
    }
}
