use std::sync::Arc;

use tracing::*;

use blog::config::{self, AppCfg};
use blog::routes;
use blog::services::{self, blog::BlogService, BlogStoreDb};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = AppCfg::load()?;

    config::tracing::init();

    services::run_migrations(&cfg.database_url).await?;

    info!("Starting DB pool");
    let pool = services::create_pool(&cfg)?;
    let blog = BlogService::new(BlogStoreDb::new(pool));

    let tera = Arc::new(routes::templates(&cfg.templates)?);

    let app = routes::app(blog, tera);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    info!("starting listening at {}", cfg.bind_addr);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
