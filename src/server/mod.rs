//! # HTTP Server for Signboard Rendering
//!
//! Renders posted designs for browser front ends.
//!
//! ## Usage
//!
//! ```bash
//! signboard serve --listen 0.0.0.0:8080
//! ```
//!
//! | Route | Body | Response |
//! |-------|------|----------|
//! | `POST /api/preview` | design JSON | PNG at 1x |
//! | `POST /api/export` | design JSON | PNG at the export scale, as an attachment |
//! | `POST /api/layout` | design JSON | live node tree JSON |

mod handlers;
mod state;

pub use state::AppState;

use axum::{Router, routing::post};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::SignboardConfig;
use crate::error::SignboardError;
use crate::render::FontBook;

/// Build the router without binding a socket.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/preview", post(handlers::design::preview))
        .route("/api/export", post(handlers::design::export))
        .route("/api/layout", post(handlers::design::layout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use signboard::config::SignboardConfig;
/// use signboard::render::FontBook;
/// use signboard::server::serve;
///
/// # async fn example() -> Result<(), signboard::error::SignboardError> {
/// serve(SignboardConfig::default(), FontBook::builtin()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: SignboardConfig, fonts: FontBook) -> Result<(), SignboardError> {
    let listen_addr = config.listen_addr.clone();
    let app = router(Arc::new(AppState::new(config, fonts)));

    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    tracing::info!(addr = %listen_addr, "signboard server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
