// src/web/handlers/helpers.rs
//! Error mapping shared by the JSON handlers

use rocket::http::Status;

use crate::core::editor::EditError;
use crate::session::SessionError;
use crate::types::Section;
use crate::web::types::{ApiError, StandardErrorResponse};

pub fn parse_section(raw: &str) -> Result<Section, ApiError> {
    raw.parse::<Section>()
        .map_err(|e| edit_error_response(&EditError::from(e)))
}

pub fn edit_error_response(err: &EditError) -> ApiError {
    let (code, suggestions) = match err {
        EditError::UnknownSection(_) => (
            "UNKNOWN_SECTION",
            vec!["Use one of: personal, summary, experience, education, skills, achievements"],
        ),
        EditError::UnknownField { .. } => (
            "UNKNOWN_FIELD",
            vec!["Field names are camelCase, e.g. startDate or gradDate"],
        ),
        EditError::MissingIndex(_) => (
            "MISSING_INDEX",
            vec!["Pass the entry index for collection sections"],
        ),
        EditError::IndexOutOfRange { .. } => (
            "INDEX_OUT_OF_RANGE",
            vec!["Reload the resume, the entry may have been removed"],
        ),
        EditError::NotACollection(_) => (
            "NOT_A_COLLECTION",
            vec!["Entries can only be added to or removed from list sections"],
        ),
    };

    StandardErrorResponse::new(
        err.to_string(),
        code.to_string(),
        suggestions.into_iter().map(str::to_string).collect(),
    )
    .with_status(Status::BadRequest)
}

pub fn session_error_response(err: &SessionError) -> ApiError {
    match err {
        SessionError::Edit(edit) => edit_error_response(edit),
        SessionError::GenerationInProgress => StandardErrorResponse::new(
            err.to_string(),
            "GENERATION_IN_PROGRESS".to_string(),
            vec!["Wait for the current generation to finish".to_string()],
        )
        .with_status(Status::Conflict),
    }
}
