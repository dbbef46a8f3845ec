pub mod blog;
pub mod comments;
pub mod posts;

use diesel::Connection;
use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_async::pooled_connection::deadpool::Hook;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::AsyncPgConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

use crate::config::AppCfg;
use crate::error::StoreError;

pub use comments::CommentStore;
pub use posts::PostStore;

pub type Pool = diesel_async::pooled_connection::deadpool::Pool<AsyncPgConnection>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Marker for cheaply clonable services shared as router state.
pub trait Svc: Clone + Send + Sync + 'static {}

/// Everything the blog persists, posts and their comments.
pub trait BlogStore: PostStore + CommentStore {}

impl<T: PostStore + CommentStore> BlogStore for T {}

#[derive(Clone)]
pub struct BlogStoreDb {
    db: Pool,
}

impl Svc for BlogStoreDb {}

impl BlogStoreDb {
    pub fn new(db: Pool) -> Self {
        Self { db }
    }
}

pub fn create_pool(cfg: &AppCfg) -> anyhow::Result<Pool> {
    let mgr = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&cfg.database_url);

    let pool = Pool::builder(mgr)
        .max_size(cfg.max_connections)
        .post_create(Hook::sync_fn(|_conn, metrics| {
            tracing::trace!(?metrics, "dbpool post-create");
            Ok(())
        }))
        .runtime(deadpool::Runtime::Tokio1)
        .build()?;
    Ok(pool)
}

/// Applies pending migrations over a dedicated connection.
pub async fn run_migrations(database_url: &str) -> Result<(), StoreError> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || -> Result<(), StoreError> {
        let mut conn = AsyncConnectionWrapper::<AsyncPgConnection>::establish(&url)?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(StoreError::Migration)?
            .len();
        info!(applied, "migrations up to date");
        Ok(())
    })
    .await
    .map_err(|e| StoreError::Migration(Box::new(e)))?
}
