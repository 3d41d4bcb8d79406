//! Photos sub-application: galleries are first-level subdirectories of
//! `MEDIA_ROOT/galleries`. Image URLs point under the media prefix, so the
//! debug media mount (or the production serving layer) delivers the bytes.

use std::path::{Path, PathBuf};

use axum::{
    Json, Router,
    extract::{Path as AxumPath, State},
    http::StatusCode,
    routing::get,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::bootstrap::app_context::AppContext;
use crate::infrastructure::storage;

#[derive(Debug, Serialize, ToSchema)]
pub struct GalleryEntry {
    pub name: String,
    pub image_count: usize,
    pub cover: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GalleryListResponse {
    pub items: Vec<GalleryEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImageEntry {
    pub filename: String,
    pub gallery: String,
    pub size: u64,
    pub url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GalleryDetailResponse {
    pub name: String,
    pub images: Vec<ImageEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImageListResponse {
    pub items: Vec<ImageEntry>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/galleries", get(list_galleries))
        .route("/galleries/:name", get(get_gallery))
        .route("/images", get(list_images))
        .with_state(ctx)
}

fn galleries_root(ctx: &AppContext) -> PathBuf {
    Path::new(&ctx.cfg.media_root).join("galleries")
}

fn image_url(ctx: &AppContext, gallery: &str, filename: &str) -> String {
    format!("{}/galleries/{gallery}/{filename}", ctx.cfg.media_url)
}

async fn gallery_images(ctx: &AppContext, gallery: &str) -> anyhow::Result<Vec<ImageEntry>> {
    let files = storage::list_files(&galleries_root(ctx).join(gallery)).await?;
    Ok(files
        .into_iter()
        .filter(|f| storage::is_image(&f.name))
        .map(|f| ImageEntry {
            url: image_url(ctx, gallery, &f.name),
            filename: f.name,
            gallery: gallery.to_string(),
            size: f.size,
        })
        .collect())
}

#[utoipa::path(get, path = "/api/photos/galleries", tag = "Photos", responses(
    (status = 200, body = GalleryListResponse)
))]
pub async fn list_galleries(
    State(ctx): State<AppContext>,
) -> Result<Json<GalleryListResponse>, StatusCode> {
    let galleries = storage::list_subdirs(&galleries_root(&ctx))
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let mut items = Vec::new();
    for name in galleries {
        let images = gallery_images(&ctx, &name)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
        items.push(GalleryEntry {
            image_count: images.len(),
            cover: images.first().map(|i| i.url.clone()),
            name,
        });
    }
    Ok(Json(GalleryListResponse { items }))
}

#[utoipa::path(get, path = "/api/photos/galleries/{name}", tag = "Photos",
    params(("name" = String, Path, description = "Gallery name")),
    responses(
        (status = 200, body = GalleryDetailResponse),
        (status = 404, description = "No such gallery")
    )
)]
pub async fn get_gallery(
    State(ctx): State<AppContext>,
    AxumPath(name): AxumPath<String>,
) -> Result<Json<GalleryDetailResponse>, StatusCode> {
    let resolved = storage::resolve_under(&galleries_root(&ctx), &name)
        .await
        .map_err(|_| StatusCode::NOT_FOUND)?;
    let meta = tokio::fs::metadata(&resolved)
        .await
        .map_err(|_| StatusCode::NOT_FOUND)?;
    if !meta.is_dir() {
        return Err(StatusCode::NOT_FOUND);
    }

    let images = gallery_images(&ctx, &name)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(GalleryDetailResponse { name, images }))
}

#[utoipa::path(get, path = "/api/photos/images", tag = "Photos", responses(
    (status = 200, body = ImageListResponse)
))]
pub async fn list_images(
    State(ctx): State<AppContext>,
) -> Result<Json<ImageListResponse>, StatusCode> {
    let galleries = storage::list_subdirs(&galleries_root(&ctx))
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let mut items = Vec::new();
    for name in galleries {
        let images = gallery_images(&ctx, &name)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
        items.extend(images);
    }
    Ok(Json(ImageListResponse { items }))
}
