// src/web/handlers/system_handlers.rs
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

use crate::web::page::editor_page;
use crate::web::types::{AppState, TextResponse};

pub async fn health_handler() -> Json<TextResponse> {
    info!("Health check");
    Json(TextResponse::success("OK".to_string()))
}

pub async fn editor_page_handler(state: &State<AppState>) -> RawHtml<String> {
    RawHtml(editor_page(&state.sessions.snapshot()))
}
