//! HTTP handlers for the books module.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use shelf_http::error::{ApiResult, AppError};
use shelf_http::response::Envelope;

use super::models::{BookCreated, BookData, BookListData, BookPayload, PayloadIssue};
use super::store::{BookQuery, FlagFilter, SharedBookStore};

/// Raw listing parameters. The flags stay strings here; numeric coercion
/// happens when they are turned into a [`BookQuery`].
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    name: Option<String>,
    reading: Option<String>,
    finished: Option<String>,
}

impl From<ListParams> for BookQuery {
    fn from(params: ListParams) -> Self {
        BookQuery {
            name: params.name,
            reading: params.reading.as_deref().map(FlagFilter::parse),
            finished: params.finished.as_deref().map(FlagFilter::parse),
        }
    }
}

fn payload_error(issue: PayloadIssue, verb: &str) -> AppError {
    let message = match issue {
        PayloadIssue::MissingName => {
            format!("Failed to {verb} book. Please fill in the book name")
        }
        PayloadIssue::ReadPageBeyondTotal => {
            format!("Failed to {verb} book. readPage must not be greater than pageCount")
        }
    };
    AppError::bad_request(message)
}

/// `POST /`: validate, store, and acknowledge a new book.
pub async fn add_book(
    State(store): State<SharedBookStore>,
    Json(payload): Json<BookPayload>,
) -> ApiResult<(StatusCode, Json<Envelope<BookCreated>>)> {
    let draft = payload
        .validated()
        .map_err(|issue| payload_error(issue, "add"))?;

    let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext)).to_string();
    store.insert(draft.into_book(id.clone()));

    // An append cannot fail, but the contract still answers with a server
    // error if the record is not present afterwards.
    if !store.contains(&id) {
        return Err(AppError::server_error("Book could not be added"));
    }

    let body = Envelope::with_message("Book added successfully", BookCreated { book_id: id });
    Ok((StatusCode::CREATED, Json(body)))
}

/// `GET /`: list the shelf, optionally filtered, as summaries.
pub async fn list_books(
    State(store): State<SharedBookStore>,
    Query(params): Query<ListParams>,
) -> Json<Envelope<BookListData>> {
    // Nothing to filter on an empty shelf.
    if store.is_empty() {
        return Json(Envelope::data(BookListData { books: Vec::new() }));
    }

    let books = store.query(&params.into());
    Json(Envelope::data(BookListData { books }))
}

/// `GET /{id}`: fetch one full record.
pub async fn get_book(
    State(store): State<SharedBookStore>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<BookData>>> {
    let book = store
        .find_by_id(&id)
        .ok_or_else(|| AppError::not_found("Book not found"))?;

    Ok(Json(Envelope::data(BookData { book })))
}

/// `PUT /{id}`: replace the client-writable fields of one record.
pub async fn update_book(
    State(store): State<SharedBookStore>,
    Path(id): Path<String>,
    Json(payload): Json<BookPayload>,
) -> ApiResult<Json<Envelope<()>>> {
    // Payload checks come before the existence check, so a bad payload for
    // an unknown id still answers 400.
    let draft = payload
        .validated()
        .map_err(|issue| payload_error(issue, "update"))?;

    if !store.replace_by_id(&id, draft) {
        return Err(AppError::not_found("Failed to update book. Id not found"));
    }

    Ok(Json(Envelope::message("Book updated successfully")))
}

/// `DELETE /{id}`: remove one record.
pub async fn delete_book(
    State(store): State<SharedBookStore>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<()>>> {
    if !store.remove_by_id(&id) {
        return Err(AppError::not_found("Failed to delete book. Id not found"));
    }

    Ok(Json(Envelope::message("Book deleted successfully")))
}
