pub mod images;
pub mod posts;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::response::Redirect;
use axum::routing::get;
use axum::Router;
use tera::Tera;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;

use crate::middleware::logging::HttpLoggingExt;
use crate::services::blog::BlogService;
use crate::services::BlogStore;

/// Upper bound for a post form including its image.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn templates(glob: &str) -> anyhow::Result<Tera> {
    Ok(Tera::new(glob)?)
}

pub fn app<S: BlogStore>(blog: BlogService<S>, tera: Arc<Tera>) -> Router {
    let state = (blog, tera);
    Router::new()
        .route("/", get(|| async { Redirect::to("/posts") }))
        .nest("/posts", posts::router().with_state(state.clone()))
        .nest("/images", images::router().with_state(state))
        .layer(
            ServiceBuilder::new()
                .layer(CompressionLayer::new())
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .with_http_logging()
}
