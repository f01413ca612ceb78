// src/web/types.rs
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rocket::http::{ContentType, Status};
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::{Request, Response};

use crate::core::augment::AugmentationClient;
use crate::core::export::Exporter;
use crate::core::layout::Layout;
use crate::session::{Session, SessionStore};

/// Everything the handlers need, managed as one piece of rocket state.
pub struct AppState {
    pub sessions: SessionStore,
    pub augmentation: AugmentationClient,
    pub exporter: Exporter,
}

impl AppState {
    pub fn new(sessions: SessionStore, augmentation: AugmentationClient, exporter: Exporter) -> Self {
        Self {
            sessions,
            augmentation,
            exporter,
        }
    }
}

pub struct PdfResponse {
    pub data: Vec<u8>,
    pub filename: Option<String>,
}

impl PdfResponse {
    pub fn with_filename(data: Vec<u8>, filename: String) -> Self {
        Self {
            data,
            filename: Some(filename),
        }
    }
}

impl<'r> Responder<'r, 'static> for PdfResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let mut binding = Response::build();
        let mut response = binding
            .header(ContentType::PDF)
            .sized_body(self.data.len(), std::io::Cursor::new(self.data));

        if let Some(filename) = self.filename {
            response = response.raw_header("Content-Disposition", content_disposition(&filename));
        }

        response.ok()
    }
}

/// RFC 5987 `attr-char`: everything else in an extended value is percent-encoded.
const ATTR_CHAR: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

/// Attachment header carrying an ASCII `filename` fallback and the exact
/// name as `filename*=UTF-8''...`.
pub fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c == ' ' || c.is_ascii_graphic() => c,
            _ => '_',
        })
        .collect();

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        utf8_percent_encode(filename, ATTR_CHAR)
    )
}

// ===== Requests =====

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct UpdateFieldRequest {
    pub section: String,
    pub field: String,
    #[serde(default)]
    pub index: Option<usize>,
    pub value: String,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct AddEntryRequest {
    pub section: String,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct RemoveEntryRequest {
    pub section: String,
    pub id: String,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct SelectLayoutRequest {
    pub layout: String,
}

// ===== Response payloads =====

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct EntryAdded {
    pub entry_id: String,
    pub session: Session,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct LayoutInfo {
    pub name: &'static str,
    pub swatch_class: &'static str,
    pub selected: bool,
}

impl LayoutInfo {
    pub fn list(selected: Layout) -> Vec<LayoutInfo> {
        Layout::ALL
            .into_iter()
            .map(|layout| LayoutInfo {
                name: layout.name(),
                swatch_class: layout.swatch_class(),
                selected: layout == selected,
            })
            .collect()
    }
}

// ===== Standard envelopes =====

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Text,
    Data,
    Error,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TextResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
}

/// Error half of every JSON handler: status plus the standard error body.
pub type ApiError = (Status, Json<StandardErrorResponse>);

impl TextResponse {
    pub fn success(message: String) -> Self {
        Self {
            response_type: ResponseType::Text,
            success: true,
            message,
        }
    }
}

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message,
            data,
        }
    }

    /// Data is still returned, but the operation it describes did not succeed.
    pub fn failure(message: String, data: T) -> Self {
        Self {
            success: false,
            ..Self::success(message, data)
        }
    }
}

impl StandardErrorResponse {
    pub fn new(error: String, error_code: String, suggestions: Vec<String>) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code,
            suggestions,
        }
    }

    pub fn with_status(self, status: Status) -> ApiError {
        (status, Json(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name_keeps_both_forms() {
        assert_eq!(
            content_disposition("Resume-Jane-Doe.pdf"),
            "attachment; filename=\"Resume-Jane-Doe.pdf\"; filename*=UTF-8''Resume-Jane-Doe.pdf"
        );
    }

    #[test]
    fn test_quotes_and_non_ascii_are_encoded() {
        assert_eq!(
            content_disposition("Resume-Jane-\"JJ\"-Doe.pdf"),
            "attachment; filename=\"Resume-Jane-_JJ_-Doe.pdf\"; filename*=UTF-8''Resume-Jane-%22JJ%22-Doe.pdf"
        );
        assert_eq!(
            content_disposition("Resume-José.pdf"),
            "attachment; filename=\"Resume-Jos_.pdf\"; filename*=UTF-8''Resume-Jos%C3%A9.pdf"
        );
    }
}
