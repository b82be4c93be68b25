//! Client side of the catalog.
//!
//! [`CatalogClient`] is the single state container a front end constructs at
//! start-up: it owns the HTTP seam ([`BooksApi`]), the local [`BookCache`] and
//! the pending [`Notifications`]. The cache is never authoritative; it only
//! mirrors what the API answered.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod form;
pub mod notify;

use thiserror::Error;

pub use api::{BooksApi, HttpBooksApi};
pub use cache::BookCache;
pub use catalog::{CatalogClient, EditSession, SaveOutcome};
pub use form::BookForm;
pub use notify::{Notification, NotificationKind, Notifications};

/// Errors seen by the client
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Book {0} is not in the local cache")]
    UnknownBook(String),
}

pub type ClientResult<T> = Result<T, ClientError>;
