use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A shelved book record. Wire format is camelCase with RFC 3339 timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier, generated at creation; never changes afterwards.
    pub id: String,
    /// Book title; the only field whose presence the boundary validates.
    pub name: String,
    pub year: i32,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    /// Total pages.
    pub page_count: i32,
    /// Pages read so far; never greater than `page_count` at write time.
    pub read_page: i32,
    /// Derived at creation from `read_page == page_count`. Updates leave it
    /// untouched, so it can go stale relative to the page counters.
    pub finished: bool,
    /// User-supplied "currently reading" flag, independent of `finished`.
    pub reading: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub inserted_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Book {
    /// Overwrite every client-writable field and bump `updated_at`.
    /// `id`, `inserted_at`, and `finished` stay as they are.
    pub fn apply(&mut self, draft: BookDraft) {
        self.name = draft.name;
        self.year = draft.year;
        self.author = draft.author;
        self.summary = draft.summary;
        self.publisher = draft.publisher;
        self.page_count = draft.page_count;
        self.read_page = draft.read_page;
        self.reading = draft.reading;
        self.updated_at = OffsetDateTime::now_utc();
    }
}

/// Client payload for the add and update operations.
///
/// `name` stays optional so its absence reaches the validation step and
/// produces the documented 400 envelope instead of a decode rejection; every
/// other field falls back to its default when missing from the body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookPayload {
    pub name: Option<String>,
    pub year: i32,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    pub page_count: i32,
    pub read_page: i32,
    pub reading: bool,
}

impl BookPayload {
    /// Boundary checks shared by add and update: name presence first, then
    /// the read-page ceiling.
    pub fn validated(self) -> Result<BookDraft, PayloadIssue> {
        let name = self.name.ok_or(PayloadIssue::MissingName)?;
        if self.read_page > self.page_count {
            return Err(PayloadIssue::ReadPageBeyondTotal);
        }

        Ok(BookDraft {
            name,
            year: self.year,
            author: self.author,
            summary: self.summary,
            publisher: self.publisher,
            page_count: self.page_count,
            read_page: self.read_page,
            reading: self.reading,
        })
    }
}

/// Why a payload was rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadIssue {
    /// `name` absent from the request body.
    MissingName,
    /// `readPage` greater than `pageCount`.
    ReadPageBeyondTotal,
}

/// A payload that passed boundary validation: the name is known to be
/// present and `read_page` fits within `page_count`.
#[derive(Debug, Clone)]
pub struct BookDraft {
    pub name: String,
    pub year: i32,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    pub page_count: i32,
    pub read_page: i32,
    pub reading: bool,
}

impl BookDraft {
    /// Materialize a full record: `finished` is derived from the page
    /// counters and both timestamps are set to the same instant.
    pub fn into_book(self, id: String) -> Book {
        let now = OffsetDateTime::now_utc();
        Book {
            id,
            finished: self.read_page == self.page_count,
            name: self.name,
            year: self.year,
            author: self.author,
            summary: self.summary,
            publisher: self.publisher,
            page_count: self.page_count,
            read_page: self.read_page,
            reading: self.reading,
            inserted_at: now,
            updated_at: now,
        }
    }
}

/// Listing projection: the only fields the collection view exposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub publisher: String,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            name: book.name.clone(),
            publisher: book.publisher.clone(),
        }
    }
}

/// `data` payload of a successful add.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookCreated {
    pub book_id: String,
}

/// `data` payload of the listing operation.
#[derive(Debug, Serialize)]
pub struct BookListData {
    pub books: Vec<BookSummary>,
}

/// `data` payload of a successful fetch-by-id.
#[derive(Debug, Serialize)]
pub struct BookData {
    pub book: Book,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(name: Option<&str>, page_count: i32, read_page: i32) -> BookPayload {
        BookPayload {
            name: name.map(str::to_string),
            page_count,
            read_page,
            ..BookPayload::default()
        }
    }

    #[test]
    fn missing_name_is_rejected_first() {
        // Both rules are violated; the name check runs before the page check.
        let issue = payload(None, 10, 20).validated().unwrap_err();
        assert_eq!(issue, PayloadIssue::MissingName);
    }

    #[test]
    fn read_page_must_not_exceed_page_count() {
        let issue = payload(Some("Buku A"), 100, 101).validated().unwrap_err();
        assert_eq!(issue, PayloadIssue::ReadPageBeyondTotal);

        assert!(payload(Some("Buku A"), 100, 100).validated().is_ok());
        assert!(payload(Some("Buku A"), 100, 0).validated().is_ok());
    }

    #[test]
    fn finished_is_derived_at_creation() {
        let read = payload(Some("Buku A"), 100, 100)
            .validated()
            .unwrap()
            .into_book("id-1".to_string());
        assert!(read.finished);
        assert_eq!(read.inserted_at, read.updated_at);

        let unread = payload(Some("Buku B"), 100, 50)
            .validated()
            .unwrap()
            .into_book("id-2".to_string());
        assert!(!unread.finished);
    }

    #[test]
    fn apply_replaces_fields_but_not_identity_or_finished() {
        let mut book = payload(Some("Original"), 100, 100)
            .validated()
            .unwrap()
            .into_book("id-1".to_string());
        let inserted_at = book.inserted_at;

        let draft = payload(Some("Replacement"), 100, 10).validated().unwrap();
        book.apply(draft);

        assert_eq!(book.id, "id-1");
        assert_eq!(book.name, "Replacement");
        assert_eq!(book.read_page, 10);
        assert_eq!(book.inserted_at, inserted_at);
        assert!(book.updated_at >= inserted_at);
        // Derived at creation only; the counters changed but the flag did not.
        assert!(book.finished);
    }

    #[test]
    fn book_serializes_to_camel_case() {
        let book = payload(Some("Buku A"), 100, 25)
            .validated()
            .unwrap()
            .into_book("id-1".to_string());
        let value = serde_json::to_value(&book).unwrap();

        assert_eq!(value["pageCount"], 100);
        assert_eq!(value["readPage"], 25);
        assert!(value["insertedAt"].is_string());
        assert!(value["updatedAt"].is_string());
        assert!(value.get("page_count").is_none());
    }

    #[test]
    fn payload_defaults_fill_absent_fields() {
        let payload: BookPayload = serde_json::from_value(json!({"name": "Buku A"})).unwrap();
        assert_eq!(payload.name.as_deref(), Some("Buku A"));
        assert_eq!(payload.year, 0);
        assert_eq!(payload.page_count, 0);
        assert!(!payload.reading);
    }

    #[test]
    fn summary_projects_three_fields() {
        let book = payload(Some("Buku A"), 100, 25)
            .validated()
            .unwrap()
            .into_book("id-1".to_string());
        let value = serde_json::to_value(BookSummary::from(&book)).unwrap();

        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert_eq!(value["id"], "id-1");
        assert_eq!(value["name"], "Buku A");
        assert_eq!(value["publisher"], "");
    }
}
