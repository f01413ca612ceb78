// src/web/handlers/export_handlers.rs
//! PDF export of the current preview
use rocket::http::Status;
use rocket::State;
use tracing::Instrument;

use crate::core::preview::render_preview;
use crate::web::types::{ApiError, AppState, PdfResponse, StandardErrorResponse};
use crate::{app_log, app_span};

pub async fn export_handler(state: &State<AppState>) -> Result<PdfResponse, ApiError> {
    let session = state.sessions.snapshot();
    let root = render_preview(&session.record, session.layout);
    let person = session.record.personal.name;

    let span = app_span!("pdf_export", person = %person, layout = %session.layout);
    match state.exporter.export(&root, &person).instrument(span).await {
        Ok(pdf) => {
            app_log!(
                info,
                "Exported {} ({} bytes)",
                pdf.file_name,
                pdf.bytes.len()
            );
            Ok(PdfResponse::with_filename(pdf.bytes, pdf.file_name))
        }
        Err(e) => {
            app_log!(error, "Error generating PDF: {:#}", e);
            Err(StandardErrorResponse::new(
                "Failed to export PDF".to_string(),
                "EXPORT_FAILED".to_string(),
                vec![
                    "Check that the rasterizer binary is installed".to_string(),
                    "Try again in a few moments".to_string(),
                ],
            )
            .with_status(Status::InternalServerError))
        }
    }
}
