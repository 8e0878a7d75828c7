//! Local preview server for the generated site.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, HeaderValue};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use indexmap::IndexMap;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

use crate::errors::{Result, WeftError};

type MimeTypes = Arc<IndexMap<String, String>>;

/// Looks up the configured MIME type for the extension of a request path.
pub fn mime_for_path<'a>(mime_types: &'a IndexMap<String, String>, path: &str) -> Option<&'a str> {
    let extension = Path::new(path).extension()?.to_str()?;
    mime_types
        .iter()
        .find(|(ext, _)| ext.trim_start_matches('.').eq_ignore_ascii_case(extension))
        .map(|(_, mime)| mime.as_str())
}

async fn override_content_type(
    State(mime_types): State<MimeTypes>,
    request: Request,
    next: Next,
) -> Response {
    let mime = mime_for_path(&mime_types, request.uri().path()).map(str::to_string);
    let mut response = next.run(request).await;

    if let Some(mime) = mime.filter(|_| response.status().is_success()) {
        match HeaderValue::from_str(&mime) {
            Ok(value) => {
                response.headers_mut().insert(header::CONTENT_TYPE, value);
            }
            Err(_) => tracing::warn!("Invalid MIME type '{}'", mime),
        }
    }
    response
}

/// Builds the router serving `dir`.
pub fn router(dir: impl Into<PathBuf>, mime_types: &IndexMap<String, String>) -> Router {
    let mime_types: MimeTypes = Arc::new(mime_types.clone());
    Router::new()
        .fallback_service(ServeDir::new(dir.into()))
        .layer(middleware::from_fn_with_state(mime_types, override_content_type))
}

/// Serves `dir` on all interfaces until the process is stopped.
pub async fn serve(dir: &Path, port: u16, mime_types: &IndexMap<String, String>) -> Result<()> {
    if !dir.is_dir() {
        tracing::warn!("{} does not exist yet", dir.display());
    }

    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| WeftError::Server(format!("cannot listen on {}: {}", addr, e)))?;

    tracing::info!("serving docs at http://localhost:{}", port);

    axum::serve(listener, router(dir, mime_types))
        .await
        .map_err(|e| WeftError::Server(e.to_string()))
}
