// src/web/handlers/generation_handlers.rs
//! AI-assisted summary and skills
use rocket::serde::json::Json;
use rocket::State;
use tracing::Instrument;

use crate::session::Session;
use crate::web::types::{ApiError, AppState, DataResponse};
use crate::{app_log, app_span};

use super::helpers::session_error_response;

/// Run one augmentation. A failed call is still answered with the session,
/// which carries the user-facing error; only a pending call is rejected.
pub async fn generate_handler(
    state: &State<AppState>,
) -> Result<Json<DataResponse<Session>>, ApiError> {
    let session = state
        .sessions
        .generate(&state.augmentation)
        .instrument(app_span!("ai_generation"))
        .await
        .map_err(|e| {
            app_log!(warn, "Generation rejected: {}", e);
            session_error_response(&e)
        })?;

    let response = match session.error.clone() {
        Some(message) => DataResponse::failure(message, session),
        None => DataResponse::success("Generated summary and skills".to_string(), session),
    };
    Ok(Json(response))
}
