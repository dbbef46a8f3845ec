use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::error::AppError;
use crate::services::BlogStore;

use super::posts::PostsRouteState;

/// Stored images are served with one fixed content type.
pub const IMAGE_CONTENT_TYPE: &str = "image/jpeg";

async fn image<S: BlogStore>(
    State((blog, _)): State<PostsRouteState<S>>,
    Path(post_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let bytes = blog
        .load_image(post_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("image of post {post_id}")))?;
    Ok(([(header::CONTENT_TYPE, IMAGE_CONTENT_TYPE)], bytes))
}

pub fn router<S: BlogStore>() -> Router<PostsRouteState<S>> {
    Router::new()
        .route("/:post_id", get(image::<S>))
        // replaced in place on post update, so always revalidate
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            header::HeaderValue::from_static("no-cache"),
        ))
}
