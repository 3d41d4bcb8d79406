//! Documents sub-application: a read-only catalog of files under
//! `MEDIA_ROOT/documents`. Categories are first-level subdirectories.

use std::path::{Path, PathBuf};

use axum::{
    Json, Router,
    extract::{Path as AxumPath, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::bootstrap::app_context::AppContext;
use crate::infrastructure::storage;

#[derive(Debug, Serialize, ToSchema)]
pub struct DocumentEntry {
    pub name: String,
    pub category: Option<String>,
    pub size: u64,
    pub modified: Option<chrono::DateTime<chrono::Utc>>,
    pub url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DocumentListResponse {
    pub items: Vec<DocumentEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryEntry {
    pub name: String,
    pub document_count: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryListResponse {
    pub items: Vec<CategoryEntry>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/documents", get(list_documents))
        .route("/documents/*path", get(download_document))
        .route("/categories", get(list_categories))
        .with_state(ctx)
}

fn documents_root(ctx: &AppContext) -> PathBuf {
    Path::new(&ctx.cfg.media_root).join("documents")
}

fn entry_for(file: storage::FileEntry, category: Option<&str>) -> DocumentEntry {
    let url = match category {
        Some(cat) => format!("/api/documents/documents/{cat}/{}", file.name),
        None => format!("/api/documents/documents/{}", file.name),
    };
    DocumentEntry {
        name: file.name,
        category: category.map(str::to_string),
        size: file.size,
        modified: file.modified,
        url,
    }
}

#[utoipa::path(get, path = "/api/documents/documents", tag = "Documents", responses(
    (status = 200, body = DocumentListResponse)
))]
pub async fn list_documents(
    State(ctx): State<AppContext>,
) -> Result<Json<DocumentListResponse>, StatusCode> {
    let root = documents_root(&ctx);
    let mut items = Vec::new();

    let uncategorized = storage::list_files(&root)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    items.extend(uncategorized.into_iter().map(|f| entry_for(f, None)));

    let categories = storage::list_subdirs(&root)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    for category in categories {
        let files = storage::list_files(&root.join(&category))
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
        items.extend(files.into_iter().map(|f| entry_for(f, Some(&category))));
    }

    Ok(Json(DocumentListResponse { items }))
}

/// Serve one document's bytes. The wildcard is resolved under the documents
/// root; traversal attempts resolve to 404.
#[utoipa::path(get, path = "/api/documents/documents/{path}", tag = "Documents",
    params(("path" = String, Path, description = "Document path, optionally category-prefixed")),
    responses(
        (status = 200, description = "Document bytes"),
        (status = 404, description = "No such document")
    )
)]
pub async fn download_document(
    State(ctx): State<AppContext>,
    AxumPath(path): AxumPath<String>,
) -> Result<Response, StatusCode> {
    let root = documents_root(&ctx);
    let resolved = storage::resolve_under(&root, &path)
        .await
        .map_err(|_| StatusCode::NOT_FOUND)?;
    let data = tokio::fs::read(&resolved)
        .await
        .map_err(|_| StatusCode::NOT_FOUND)?;

    let guessed = mime_guess::from_path(&resolved).first_or_octet_stream();
    let mut headers = HeaderMap::new();
    headers.insert(
        axum::http::header::CONTENT_TYPE,
        HeaderValue::from_str(guessed.essence_str())
            .unwrap_or(HeaderValue::from_static("application/octet-stream")),
    );
    headers.insert(
        axum::http::header::HeaderName::from_static("x-content-type-options"),
        HeaderValue::from_static("nosniff"),
    );
    Ok((headers, data).into_response())
}

#[utoipa::path(get, path = "/api/documents/categories", tag = "Documents", responses(
    (status = 200, body = CategoryListResponse)
))]
pub async fn list_categories(
    State(ctx): State<AppContext>,
) -> Result<Json<CategoryListResponse>, StatusCode> {
    let root = documents_root(&ctx);
    let categories = storage::list_subdirs(&root)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let mut items = Vec::new();
    for name in categories {
        let document_count = storage::list_files(&root.join(&name))
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
            .len();
        items.push(CategoryEntry {
            name,
            document_count,
        });
    }
    Ok(Json(CategoryListResponse { items }))
}
