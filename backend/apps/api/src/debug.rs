//! Upload directory listing for troubleshooting deployments
//!
//! `GET /debug/uploads` answers 404 unless `DEBUG_UPLOADS=true`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::{AppError, AppResult};

#[derive(Clone)]
struct DebugState {
    enabled: bool,
    uploads_dir: Arc<PathBuf>,
}

#[derive(Serialize)]
struct UploadsListing {
    ok: bool,
    count: usize,
    files: Vec<String>,
}

pub fn debug_router(enabled: bool, uploads_dir: PathBuf) -> Router {
    Router::new()
        .route("/debug/uploads", get(list_uploads))
        .with_state(DebugState {
            enabled,
            uploads_dir: Arc::new(uploads_dir),
        })
}

async fn list_uploads(State(state): State<DebugState>) -> AppResult<Json<UploadsListing>> {
    if !state.enabled {
        return Err(AppError::not_found("Not found"));
    }

    let files = read_file_names(&state.uploads_dir).await.map_err(|e| {
        tracing::error!(error = %e, dir = %state.uploads_dir.display(), "Failed to read uploads directory");
        AppError::internal("Failed to read uploads directory").with_source(e)
    })?;

    Ok(Json(UploadsListing {
        ok: true,
        count: files.len(),
        files,
    }))
}

/// Sorted names of the directory's entries, hidden files excluded
async fn read_file_names(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with('.') {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn get_uploads(app: Router) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/debug/uploads")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_disabled_is_not_found() {
        let (status, body) = get_uploads(debug_router(false, PathBuf::from("missing"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Not found");
    }

    #[tokio::test]
    async fn test_lists_visible_files() {
        let dir = std::env::temp_dir().join(format!("api-debug-uploads-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        for name in ["b.jpg", "a.png", ".gitkeep"] {
            tokio::fs::write(dir.join(name), b"x").await.unwrap();
        }

        let (status, body) = get_uploads(debug_router(true, dir.clone())).await;
        tokio::fs::remove_dir_all(&dir).await.unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["count"], 2);
        assert_eq!(body["files"], serde_json::json!(["a.png", "b.jpg"]));
    }
}
