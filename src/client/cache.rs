//! Local copy of the collection plus the search string

use crate::models::book::Book;

#[derive(Debug, Clone, Default)]
pub struct BookCache {
    books: Vec<Book>,
    search: String,
}

impl BookCache {
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn get(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Replace the whole cache; the latest response wins
    pub fn replace_all(&mut self, books: Vec<Book>) {
        self.books = books;
    }

    pub fn add(&mut self, book: Book) {
        self.books.push(book);
    }

    /// Swap in `book` where a record with the same id sits
    pub fn replace(&mut self, book: Book) {
        if let Some(slot) = self.books.iter_mut().find(|b| b.id == book.id) {
            *slot = book;
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.books.retain(|book| book.id != id);
    }

    /// Books whose title or author contains the search string, ignoring case.
    /// An empty search keeps everything.
    pub fn filtered(&self) -> Vec<&Book> {
        if self.search.is_empty() {
            return self.books.iter().collect();
        }

        let needle = self.search.to_lowercase();
        self.books
            .iter()
            .filter(|book| {
                book.title.to_lowercase().contains(&needle)
                    || book.author.to_lowercase().contains(&needle)
            })
            .collect()
    }
}
