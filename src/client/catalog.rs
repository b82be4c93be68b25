//! Catalog state container: cache, notifications and the user flows

use super::{
    api::BooksApi, cache::BookCache, form::BookForm, notify::Notification,
    notify::Notifications, ClientError, ClientResult,
};
use crate::models::book::{Book, BookPatch};

/// Result of saving an edit session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Nothing differed from the cached record; no request was sent
    Unchanged,
    Saved(Book),
}

/// Per-record edit state: read view or edit view with a draft
#[derive(Debug, Clone)]
pub struct EditSession {
    book_id: String,
    pub draft: BookForm,
    open: bool,
}

impl EditSession {
    /// Closed session with the draft seeded from `book`
    pub fn new(book: &Book) -> Self {
        Self {
            book_id: book.id.clone(),
            draft: BookForm::from_book(book),
            open: false,
        }
    }

    pub fn book_id(&self) -> &str {
        &self.book_id
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }
}

pub struct CatalogClient<A> {
    api: A,
    cache: BookCache,
    notifications: Notifications,
}

impl<A: BooksApi> CatalogClient<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            cache: BookCache::default(),
            notifications: Notifications::default(),
        }
    }

    pub fn cache(&self) -> &BookCache {
        &self.cache
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.cache.set_search(search);
    }

    /// The view to render: cache filtered by the search string
    pub fn visible_books(&self) -> Vec<&Book> {
        self.cache.filtered()
    }

    pub fn notifications(&self) -> &[Notification] {
        self.notifications.pending()
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    /// Fetch the whole collection and replace the cache with it
    pub async fn load(&mut self) -> ClientResult<()> {
        match self.api.list_books().await {
            Ok(books) => {
                tracing::debug!(count = books.len(), "Loaded books");
                self.cache.replace_all(books);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to load books: {}", e);
                self.notifications.error("Failed to load books.");
                Err(e)
            }
        }
    }

    /// Fetch one book and mirror it into the cache
    pub async fn fetch(&mut self, id: &str) -> ClientResult<Book> {
        let book = self.api.get_book(id).await?;
        if self.cache.get(&book.id).is_some() {
            self.cache.replace(book.clone());
        } else {
            self.cache.add(book.clone());
        }
        Ok(book)
    }

    pub async fn create(&mut self, form: &BookForm) -> ClientResult<Book> {
        let data = match form.validate() {
            Ok(data) => data,
            Err(msg) => {
                self.notifications.error(msg);
                return Err(ClientError::Validation(msg.to_string()));
            }
        };

        match self.api.create_book(&data).await {
            Ok(book) => {
                self.cache.add(book.clone());
                self.notifications.success("New book has been created.");
                Ok(book)
            }
            Err(e) => {
                tracing::warn!("Failed to add a new book: {}", e);
                self.notifications.error("Failed to add a new book.");
                Err(e)
            }
        }
    }

    /// Start an edit session for a cached book
    pub fn edit(&self, id: &str) -> Option<EditSession> {
        self.cache.get(id).map(EditSession::new)
    }

    /// Save the session's draft.
    ///
    /// An invalid draft keeps the session open; once a request has been sent
    /// the session is closed whatever the outcome.
    pub async fn save(&mut self, session: &mut EditSession) -> ClientResult<SaveOutcome> {
        let current = self
            .cache
            .get(session.book_id())
            .cloned()
            .ok_or_else(|| ClientError::UnknownBook(session.book_id().to_string()))?;

        if session.draft.matches(&current) {
            session.close();
            return Ok(SaveOutcome::Unchanged);
        }

        let data = match session.draft.validate_edit() {
            Ok(data) => data,
            Err(msg) => {
                self.notifications.error(msg);
                return Err(ClientError::Validation(msg.to_string()));
            }
        };

        let patch = BookPatch {
            title: Some(data.title),
            author: Some(data.author),
            published_date: Some(data.published_date),
            available_copies: Some(data.available_copies),
        };

        let result = self.api.update_book(&current.id, &patch).await;
        session.close();

        match result {
            Ok(book) => {
                self.cache.replace(book.clone());
                self.notifications.success("The book has been edited.");
                Ok(SaveOutcome::Saved(book))
            }
            Err(e) => {
                tracing::warn!(book_id = %current.id, "Failed to edit the book: {}", e);
                self.notifications.error("Failed to edit the book.");
                Err(e)
            }
        }
    }

    /// Delete a book; the cache only changes once the API has confirmed
    pub async fn delete(&mut self, id: &str) -> ClientResult<()> {
        let title = self
            .cache
            .get(id)
            .map(|book| book.title.clone())
            .unwrap_or_else(|| id.to_string());

        match self.api.delete_book(id).await {
            Ok(()) => {
                self.cache.remove(id);
                self.notifications
                    .success(format!("The book \"{}\" has been deleted", title));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(book_id = %id, "Failed to delete the book: {}", e);
                self.notifications.error("Failed to delete the book.");
                Err(e)
            }
        }
    }
}
