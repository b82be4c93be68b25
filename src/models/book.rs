//! Book record model and the request types used to create and patch it.
//!
//! Request bodies are decoded loosely (`serde_json::Value` per field) so that a
//! field carrying the wrong JSON type is reported as a rule violation alongside
//! the others instead of failing the whole decode.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use utoipa::ToSchema;

pub const TITLE_RULE: &str = "Title must be provided, and a valid string.";
pub const AUTHOR_RULE: &str = "Author must be provided, and a valid string.";
pub const PUBLISHED_DATE_RULE: &str = "publishedDate must be provided, and a valid string.";
pub const AVAILABLE_COPIES_RULE: &str =
    "availableCopies must be provided, and be a positive number.";

/// Book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Server generated identifier, immutable once assigned
    pub id: String,
    pub title: String,
    pub author: String,
    /// Publication date, conventionally `YYYY-MM-DD`
    pub published_date: String,
    /// Any finite number >= 0, kept in the form it was sent
    #[schema(value_type = f64)]
    pub available_copies: Number,
}

impl Book {
    pub fn from_new(id: String, data: NewBook) -> Self {
        Self {
            id,
            title: data.title,
            author: data.author,
            published_date: data.published_date,
            available_copies: data.available_copies,
        }
    }
}

/// Validated data for a new book (no id yet)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub published_date: String,
    #[schema(value_type = f64)]
    pub available_copies: Number,
}

/// Create book request, as received on the wire
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateBook {
    #[schema(value_type = Option<String>)]
    pub title: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub author: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub published_date: Option<Value>,
    #[schema(value_type = Option<f64>)]
    pub available_copies: Option<Value>,
}

impl CreateBook {
    /// Check every field rule and collect all violations, in field order.
    pub fn validate(&self) -> Result<NewBook, Vec<String>> {
        let mut errors = Vec::new();

        let title = required_string(self.title.as_ref(), TITLE_RULE, &mut errors);
        let author = required_string(self.author.as_ref(), AUTHOR_RULE, &mut errors);
        let published_date =
            required_string(self.published_date.as_ref(), PUBLISHED_DATE_RULE, &mut errors);
        let available_copies = copies(self.available_copies.as_ref());
        if available_copies.is_none() {
            errors.push(AVAILABLE_COPIES_RULE.to_string());
        }

        match (title, author, published_date, available_copies) {
            (Some(title), Some(author), Some(published_date), Some(available_copies)) => {
                Ok(NewBook {
                    title,
                    author,
                    published_date,
                    available_copies,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Update book request, as received on the wire.
///
/// An `id` in the body is not a field here and is silently dropped.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateBook {
    #[schema(value_type = Option<String>)]
    pub title: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub author: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub published_date: Option<Value>,
    #[schema(value_type = Option<f64>)]
    pub available_copies: Option<Value>,
}

impl UpdateBook {
    /// Apply the create rules to the fields that are present.
    pub fn validate(&self) -> Result<BookPatch, Vec<String>> {
        let mut errors = Vec::new();
        let mut patch = BookPatch::default();

        if let Some(value) = &self.title {
            patch.title = required_string(Some(value), TITLE_RULE, &mut errors);
        }
        if let Some(value) = &self.author {
            patch.author = required_string(Some(value), AUTHOR_RULE, &mut errors);
        }
        if let Some(value) = &self.published_date {
            patch.published_date =
                required_string(Some(value), PUBLISHED_DATE_RULE, &mut errors);
        }
        if let Some(value) = &self.available_copies {
            patch.available_copies = copies(Some(value));
            if patch.available_copies.is_none() {
                errors.push(AVAILABLE_COPIES_RULE.to_string());
            }
        }

        if errors.is_empty() {
            Ok(patch)
        } else {
            Err(errors)
        }
    }
}

/// Partial set of fields overlaid on an existing book
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub available_copies: Option<Number>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.published_date.is_none()
            && self.available_copies.is_none()
    }

    /// Overlay the present fields on `book`. The id is never touched.
    pub fn apply(&self, book: &mut Book) {
        if let Some(ref title) = self.title {
            book.title = title.clone();
        }
        if let Some(ref author) = self.author {
            book.author = author.clone();
        }
        if let Some(ref published_date) = self.published_date {
            book.published_date = published_date.clone();
        }
        if let Some(ref available_copies) = self.available_copies {
            book.available_copies = available_copies.clone();
        }
    }
}

/// `{ "book": ... }` envelope
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookResponse {
    pub book: Book,
}

/// `{ "books": [...] }` envelope
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BooksResponse {
    pub books: Vec<Book>,
}

/// Records present in a freshly started catalog
pub fn sample_books() -> Vec<Book> {
    let sample = |id: &str, title: &str, author: &str, date: &str, copies: u32| Book {
        id: id.to_string(),
        title: title.to_string(),
        author: author.to_string(),
        published_date: date.to_string(),
        available_copies: Number::from(copies),
    };

    vec![
        sample(
            "1",
            "How to Survive Software Engineering: The Coffee Chronicles",
            "Tim the Code Explorer",
            "2024-05-21",
            5,
        ),
        sample(
            "2",
            "The MERN Stack Journey: From Noob to Ninja",
            "Tim the Tech Adventurer",
            "2023-08-16",
            3,
        ),
        sample(
            "3",
            "Debugging: The Art of Solving Problems That You Created",
            "Tim the Bug Buster",
            "2022-10-01",
            4,
        ),
        sample(
            "4",
            "The Secret Life of a GitHub Repository: Tales of Branches and Merges",
            "Tim the Code Chaser",
            "2021-11-23",
            2,
        ),
    ]
}

fn required_string(value: Option<&Value>, rule: &str, errors: &mut Vec<String>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => {
            errors.push(rule.to_string());
            None
        }
    }
}

/// Any JSON number >= 0, returned unchanged
fn copies(value: Option<&Value>) -> Option<Number> {
    match value {
        Some(Value::Number(n)) if n.as_f64().is_some_and(|f| f >= 0.0) => Some(n.clone()),
        _ => None,
    }
}

/// Copies count for a value typed by a user; whole numbers stay integers on the wire
pub fn copies_from_f64(value: f64) -> Option<Number> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    if value.fract() == 0.0 && value < u64::MAX as f64 {
        return Some(Number::from(value as u64));
    }
    Number::from_f64(value)
}
