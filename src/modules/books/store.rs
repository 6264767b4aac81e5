//! In-memory book collection and its query types.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::models::{Book, BookDraft, BookSummary};

/// Store handle shared between the router and every handler.
pub type SharedBookStore = Arc<BookStore>;

/// Numeric rendition of a `reading` / `finished` query flag.
///
/// Stored booleans compare numerically: true is 1, false is 0. A value that
/// parses to any other number matches nothing, and so does a value that does
/// not parse at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlagFilter {
    Number(f64),
    NotANumber,
}

impl FlagFilter {
    /// Coerce a raw query value, ignoring surrounding whitespace.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(number) => Self::Number(number),
            Err(_) => Self::NotANumber,
        }
    }

    fn matches(self, flag: bool) -> bool {
        match self {
            Self::Number(number) => number == f64::from(u8::from(flag)),
            Self::NotANumber => false,
        }
    }
}

/// Parsed listing filters. `None` means the parameter was absent.
#[derive(Debug, Default)]
pub struct BookQuery {
    pub name: Option<String>,
    pub reading: Option<FlagFilter>,
    pub finished: Option<FlagFilter>,
}

/// Insertion-ordered collection of books behind a read/write lock.
///
/// Every operation is a single lock acquisition with no await while the lock
/// is held. A poisoned lock is recovered with the data as-is: no operation
/// leaves a record half-written.
#[derive(Debug, Default)]
pub struct BookStore {
    books: RwLock<Vec<Book>>,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Book>> {
        self.books.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Book>> {
        self.books.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a record to the end of the collection.
    pub fn insert(&self, book: Book) {
        self.write().push(book);
    }

    /// Membership probe by id.
    pub fn contains(&self, id: &str) -> bool {
        self.read().iter().any(|book| book.id == id)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Listing selection, projected to `{id, name, publisher}`.
    ///
    /// Filters are not combined: each supplied filter starts over from the
    /// full collection in the order name, reading, finished, so when several
    /// are present the last one decides the result.
    pub fn query(&self, query: &BookQuery) -> Vec<BookSummary> {
        let books = self.read();
        let mut selected: Vec<&Book> = books.iter().collect();

        if let Some(name) = &query.name {
            let needle = name.to_lowercase();
            selected = books
                .iter()
                .filter(|book| book.name.to_lowercase().contains(&needle))
                .collect();
        }
        if let Some(reading) = query.reading {
            selected = books
                .iter()
                .filter(|book| reading.matches(book.reading))
                .collect();
        }
        if let Some(finished) = query.finished {
            selected = books
                .iter()
                .filter(|book| finished.matches(book.finished))
                .collect();
        }

        selected.into_iter().map(BookSummary::from).collect()
    }

    /// Full record lookup by id.
    pub fn find_by_id(&self, id: &str) -> Option<Book> {
        self.read().iter().find(|book| book.id == id).cloned()
    }

    /// Overwrite the client-writable fields of the record with `id`; see
    /// [`Book::apply`] for the fields that survive. Returns whether a record
    /// was found.
    pub fn replace_by_id(&self, id: &str, draft: BookDraft) -> bool {
        let mut books = self.write();
        match books.iter_mut().find(|book| book.id == id) {
            Some(book) => {
                book.apply(draft);
                true
            }
            None => false,
        }
    }

    /// Remove the record with `id`, keeping the order of the remaining
    /// records intact. Returns whether a record was removed.
    pub fn remove_by_id(&self, id: &str) -> bool {
        let mut books = self.write();
        match books.iter().position(|book| book.id == id) {
            Some(index) => {
                books.remove(index);
                true
            }
            None => false,
        }
    }
}
