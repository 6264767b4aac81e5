//! Response envelope shared by every SHELF endpoint.

use serde::Serialize;

/// Top-level status word carried by every response body.
///
/// `Success` covers 2xx responses, `Fail` covers client errors (4xx), and
/// `Error` covers server errors (5xx).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Fail,
    Error,
}

/// The `{status, message?, data?}` wrapper returned by every operation.
/// Absent `message`/`data` are omitted from the JSON, not serialized as null.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Success carrying only a data payload.
    pub fn data(data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: None,
            data: Some(data),
        }
    }

    /// Success carrying both a message and a data payload.
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl Envelope<()> {
    /// Success carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Non-success envelope; used by the error mapping.
    pub(crate) fn status_message(status: ResponseStatus, message: String) -> Self {
        Self {
            status,
            message: Some(message),
            data: None,
        }
    }
}
