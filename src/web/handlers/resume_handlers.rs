// src/web/handlers/resume_handlers.rs
//! Record editing, layout selection and preview
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::State;

use crate::app_log;
use crate::core::editor::FieldEdit;
use crate::core::html;
use crate::core::layout::Layout;
use crate::core::preview::render_preview;
use crate::session::{EditAction, Session};
use crate::web::types::{
    AddEntryRequest, ApiError, AppState, DataResponse, EntryAdded, LayoutInfo,
    RemoveEntryRequest, SelectLayoutRequest, StandardErrorResponse, UpdateFieldRequest,
};

use super::helpers::{parse_section, session_error_response};

fn apply(state: &AppState, action: EditAction) -> Result<(Session, Option<String>), ApiError> {
    state.sessions.apply(&action).map_err(|e| {
        app_log!(warn, "Rejected edit {:?}: {}", action, e);
        session_error_response(&e)
    })
}

pub async fn get_resume_handler(state: &State<AppState>) -> Json<DataResponse<Session>> {
    Json(DataResponse::success(
        "Current resume".to_string(),
        state.sessions.snapshot(),
    ))
}

pub async fn update_field_handler(
    request: Json<UpdateFieldRequest>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<Session>>, ApiError> {
    let request = request.into_inner();
    let edit = FieldEdit {
        section: parse_section(&request.section)?,
        field: request.field,
        index: request.index,
        value: request.value,
    };

    app_log!(
        debug,
        "Updating {}.{} (index {:?})",
        edit.section,
        edit.field,
        edit.index
    );

    let (session, _) = apply(state, EditAction::UpdateField(edit))?;
    Ok(Json(DataResponse::success("Field updated".to_string(), session)))
}

pub async fn add_entry_handler(
    request: Json<AddEntryRequest>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<EntryAdded>>, ApiError> {
    let section = parse_section(&request.section)?;
    let (session, entry_id) = apply(state, EditAction::AddEntry(section))?;
    let entry_id = entry_id.unwrap_or_default();

    app_log!(info, "Added {} entry {}", section, entry_id);

    Ok(Json(DataResponse::success(
        format!("Added {} entry", section),
        EntryAdded { entry_id, session },
    )))
}

pub async fn remove_entry_handler(
    request: Json<RemoveEntryRequest>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<Session>>, ApiError> {
    let request = request.into_inner();
    let section = parse_section(&request.section)?;

    let (session, _) = apply(
        state,
        EditAction::RemoveEntry {
            section,
            id: request.id.clone(),
        },
    )?;

    app_log!(info, "Removed {} entry {}", section, request.id);
    Ok(Json(DataResponse::success(
        format!("Removed {} entry", section),
        session,
    )))
}

pub async fn get_layouts_handler(state: &State<AppState>) -> Json<DataResponse<Vec<LayoutInfo>>> {
    let selected = state.sessions.snapshot().layout;
    Json(DataResponse::success(
        "Available layouts".to_string(),
        LayoutInfo::list(selected),
    ))
}

pub async fn select_layout_handler(
    request: Json<SelectLayoutRequest>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<Session>>, ApiError> {
    let layout = request.layout.parse::<Layout>().map_err(|e| {
        StandardErrorResponse::new(
            e.to_string(),
            "UNKNOWN_LAYOUT".to_string(),
            Layout::ALL.iter().map(|l| format!("Try '{}'", l)).collect(),
        )
        .with_status(Status::BadRequest)
    })?;

    let (session, _) = apply(state, EditAction::SelectLayout(layout))?;
    app_log!(info, "Layout switched to {}", layout);

    Ok(Json(DataResponse::success(
        format!("Layout set to {}", layout),
        session,
    )))
}

pub async fn preview_handler(state: &State<AppState>) -> RawHtml<String> {
    let session = state.sessions.snapshot();
    let root = render_preview(&session.record, session.layout);
    RawHtml(html::document(
        &format!("{} - Resume", session.record.personal.name),
        &root,
        None,
    ))
}
