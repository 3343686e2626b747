use std::{
    path::{Component, Path, PathBuf},
    sync::Arc,
};

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};

const INDEX: &str = "index.html";

pub(crate) async fn serve_file(State(root): State<Arc<PathBuf>>, uri: Uri) -> Response {
    let Some(rel) = sanitize(uri.path()) else {
        tracing::debug!(path = %uri.path(), "rejected path");
        return StatusCode::NOT_FOUND.into_response();
    };

    let mut path = root.join(rel);
    if matches!(tokio::fs::metadata(&path).await, Ok(meta) if meta.is_dir()) {
        path.push(INDEX);
    }

    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            tracing::debug!(path = %path.display(), len = bytes.len(), "served");
            ([(header::CONTENT_TYPE, content_type(&path))], bytes).into_response()
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "not found");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// Turns a request path into a relative path that cannot leave the root.
pub(crate) fn sanitize(raw: &str) -> Option<PathBuf> {
    let decoded = urlencoding::decode(raw).ok()?;
    if decoded.contains('\\') || decoded.contains('\0') {
        return None;
    }
    let mut out = PathBuf::new();
    for component in Path::new(decoded.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(out)
}

pub(crate) fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("wasm") => "application/wasm",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}
