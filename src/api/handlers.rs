//! Request handlers

use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

use crate::error::{AppError, IngestError, Result};
use crate::ingest::RawFile;
use crate::prompt::BackgroundDescriptor;
use crate::response::DownloadableImage;
use crate::session::SessionView;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct BackgroundSelection {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct AddendumUpdate {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct PosingUpdate {
    pub enabled: bool,
}

pub async fn health() -> &'static str {
    "OK"
}

pub async fn list_backgrounds(State(state): State<Arc<AppState>>) -> Json<Vec<BackgroundDescriptor>> {
    Json(state.session.catalog().entries().to_vec())
}

pub async fn get_session(State(state): State<Arc<AppState>>) -> Json<SessionView> {
    Json(state.session.view())
}

/// Pull the `file` field out of a multipart upload
async fn read_upload(mut multipart: Multipart) -> Result<RawFile> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidRequest(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let name = field.file_name().unwrap_or_default().to_string();
        let media_type = field.content_type().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(|e| {
            warn!(name = %name, error = %e, "Failed to receive upload");
            IngestError::ReadFailed(e.to_string())
        })?;

        return Ok(RawFile::from_bytes(name, media_type, data.to_vec()));
    }

    Err(AppError::InvalidRequest("Missing 'file' field".to_string()))
}

pub async fn upload_face(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<SessionView>> {
    let file = read_upload(multipart).await?;
    state.session.upload_face(file).await?;
    Ok(Json(state.session.view()))
}

pub async fn upload_garment(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<SessionView>> {
    let file = read_upload(multipart).await?;
    state.session.upload_garment(file).await?;
    Ok(Json(state.session.view()))
}

pub async fn select_background(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BackgroundSelection>,
) -> Result<Json<SessionView>> {
    state.session.select_background(&body.id)?;
    Ok(Json(state.session.view()))
}

pub async fn set_addendum(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AddendumUpdate>,
) -> Json<SessionView> {
    state.session.set_addendum(body.text);
    Json(state.session.view())
}

pub async fn set_posing(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PosingUpdate>,
) -> Json<SessionView> {
    state.session.set_posing(body.enabled);
    Json(state.session.view())
}

pub async fn generate(State(state): State<Arc<AppState>>) -> Json<SessionView> {
    state.session.generate().await;
    Json(state.session.view())
}

pub async fn clear(State(state): State<Arc<AppState>>) -> Json<SessionView> {
    state.session.clear();
    Json(state.session.view())
}

pub async fn download_result(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse> {
    let data_url = state
        .session
        .result()
        .ok_or_else(|| AppError::NotFound("No generated image".to_string()))?;

    let image = DownloadableImage::from_data_url(&data_url, &state.settings.download.file_name)?;

    Ok((
        [
            (header::CONTENT_TYPE, image.media_type.clone()),
            (header::CONTENT_DISPOSITION, image.content_disposition()),
        ],
        image.data,
    ))
}
