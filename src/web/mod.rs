// src/web/mod.rs

pub mod handlers;
pub mod page;
pub mod types;

pub use handlers::*;
pub use types::*;

use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use std::sync::Arc;
use tracing::info;

use crate::core::augment::AugmentationClient;
use crate::core::export::Exporter;
use crate::core::{ConfigManager, ServiceClient};
use crate::session::{Session, SessionStore};

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[get("/")]
pub async fn editor_page(state: &State<AppState>) -> RawHtml<String> {
    handlers::editor_page_handler(state).await
}

#[get("/health")]
pub async fn health() -> Json<TextResponse> {
    handlers::health_handler().await
}

#[get("/resume")]
pub async fn get_resume(state: &State<AppState>) -> Json<DataResponse<Session>> {
    handlers::get_resume_handler(state).await
}

#[post("/resume/field", data = "<request>")]
pub async fn update_field(
    request: Json<UpdateFieldRequest>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<Session>>, ApiError> {
    handlers::update_field_handler(request, state).await
}

#[post("/resume/entries", data = "<request>")]
pub async fn add_entry(
    request: Json<AddEntryRequest>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<EntryAdded>>, ApiError> {
    handlers::add_entry_handler(request, state).await
}

#[post("/resume/entries/remove", data = "<request>")]
pub async fn remove_entry(
    request: Json<RemoveEntryRequest>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<Session>>, ApiError> {
    handlers::remove_entry_handler(request, state).await
}

#[get("/layouts")]
pub async fn get_layouts(state: &State<AppState>) -> Json<DataResponse<Vec<LayoutInfo>>> {
    handlers::get_layouts_handler(state).await
}

#[post("/layout", data = "<request>")]
pub async fn select_layout(
    request: Json<SelectLayoutRequest>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<Session>>, ApiError> {
    handlers::select_layout_handler(request, state).await
}

#[get("/preview")]
pub async fn preview(state: &State<AppState>) -> RawHtml<String> {
    handlers::preview_handler(state).await
}

#[post("/generate")]
pub async fn generate(state: &State<AppState>) -> Result<Json<DataResponse<Session>>, ApiError> {
    handlers::generate_handler(state).await
}

#[post("/export")]
pub async fn export_pdf(state: &State<AppState>) -> Result<PdfResponse, ApiError> {
    handlers::export_handler(state).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
    ))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Resource not found".to_string(),
        "NOT_FOUND".to_string(),
        vec!["Check the endpoint path".to_string()],
    ))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request body does not match the expected shape".to_string(),
        "BAD_REQUEST".to_string(),
        vec!["Verify all required fields are present".to_string()],
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec!["Try again in a few moments".to_string()],
    ))
}

/// Assemble the rocket instance around `state` without launching it.
pub fn build_rocket(state: AppState) -> Rocket<Build> {
    rocket::build()
        .attach(Cors)
        .manage(state)
        .register(
            "/api",
            catchers![bad_request, not_found, unprocessable, internal_error],
        )
        .mount("/", routes![editor_page])
        .mount(
            "/api",
            routes![
                health,
                get_resume,
                update_field,
                add_entry,
                remove_entry,
                get_layouts,
                select_layout,
                preview,
                generate,
                export_pdf,
                options,
            ],
        )
}

/// Wire real collaborators from configuration and serve until shutdown.
pub async fn start_web_server(config: ConfigManager) -> Result<()> {
    let generator = ServiceClient::new(&config.generation)?;
    let state = AppState::new(
        SessionStore::default(),
        AugmentationClient::new(Arc::new(generator)),
        Exporter::from_config(&config.export),
    );

    info!("Starting resume builder on port {}", config.port);
    info!("Open http://localhost:{}/ to edit the demo resume", config.port);

    let figment = rocket::Config::figment().merge(("port", config.port));
    let _rocket = build_rocket(state)
        .configure(figment)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Rocket server failed: {}", e))?;

    Ok(())
}
