//! Design rendering handlers.
//!
//! Every handler takes a design JSON body. Rendering is CPU bound and runs
//! on the blocking pool.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;

use crate::design::DesignDescription;
use crate::error::SignboardError;
use crate::export::{encode_png, export_design, now_millis};
use crate::render::{LiveScene, LiveTarget, rasterize, render_scene};

use super::super::state::AppState;
use super::error_response;

fn task_error(e: tokio::task::JoinError) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, format!("Task error: {}", e))
}

/// Handle POST /api/preview - render the design as a 1x PNG.
pub async fn preview(
    State(state): State<Arc<AppState>>,
    Json(design): Json<DesignDescription>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let png_bytes = tokio::task::spawn_blocking(move || {
        let (w, h) = design.validate(&state.config)?;
        let surface = rasterize(&design, w, h, 1.0, &state.fonts);
        encode_png(surface.image())
    })
    .await
    .map_err(task_error)?
    .map_err(error_response)?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png_bytes))
}

/// Handle POST /api/export - render at the export scale as a download.
pub async fn export(
    State(state): State<Arc<AppState>>,
    Json(design): Json<DesignDescription>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let exported = tokio::task::spawn_blocking(move || {
        export_design(&design, &state.fonts, &state.config, state.config.export_scale, now_millis())
    })
    .await
    .map_err(task_error)?
    .map_err(error_response)?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", exported.filename),
            ),
        ],
        exported.png,
    ))
}

/// Handle POST /api/layout - resolve the design into an editable node tree.
pub async fn layout(
    State(state): State<Arc<AppState>>,
    Json(design): Json<DesignDescription>,
) -> Result<Json<LiveScene>, (StatusCode, String)> {
    let scene = tokio::task::spawn_blocking(move || {
        let (w, h) = design.validate(&state.config)?;
        let mut target = LiveTarget::new(w as f32, h as f32, &state.fonts);
        render_scene(&mut target, &design);
        Ok::<_, SignboardError>(target.into_scene())
    })
    .await
    .map_err(task_error)?
    .map_err(error_response)?;

    Ok(Json(scene))
}
