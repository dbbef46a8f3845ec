use std::collections::HashMap;

use axum::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::error::StoreError;
use crate::models::comment::*;
use crate::schema::comments;

use super::{BlogStoreDb, Svc};

/// Comments are always addressed through their post; a mismatched
/// (post, comment) pair updates or deletes nothing.
#[async_trait]
pub trait CommentStore: Svc {
    /// Oldest first, id breaking ties.
    async fn find_by_post_id(&self, post_id: i64) -> Result<Vec<Comment>, StoreError>;
    async fn create_comment(&self, post_id: i64, text: &str) -> Result<i64, StoreError>;
    async fn update_comment(&self, post_id: i64, comment_id: i64, text: &str) -> Result<(), StoreError>;
    async fn delete_comment(&self, post_id: i64, comment_id: i64) -> Result<(), StoreError>;
    /// Comment totals keyed by post id. Posts without comments are absent.
    async fn count_by_posts(&self, post_ids: &[i64]) -> Result<HashMap<i64, i64>, StoreError>;
}

#[async_trait]
impl CommentStore for BlogStoreDb {
    #[tracing::instrument(skip(self))]
    async fn find_by_post_id(&self, post_id: i64) -> Result<Vec<Comment>, StoreError> {
        let mut conn = self.db.get().await?;
        let cs = comments::table
            .filter(comments::post_id.eq(post_id))
            .order((comments::created_at.asc(), comments::id.asc()))
            .select(Comment::as_select())
            .load(&mut conn)
            .await?;
        Ok(cs)
    }

    #[tracing::instrument(skip(self, text))]
    async fn create_comment(&self, post_id: i64, text: &str) -> Result<i64, StoreError> {
        let mut conn = self.db.get().await?;
        let id = diesel::insert_into(comments::table)
            .values(NewComment {
                post_id,
                text,
                created_at: chrono::Utc::now().naive_utc(),
            })
            .returning(comments::id)
            .get_result::<i64>(&mut conn)
            .await?;
        Ok(id)
    }

    #[tracing::instrument(skip(self, text))]
    async fn update_comment(&self, post_id: i64, comment_id: i64, text: &str) -> Result<(), StoreError> {
        let mut conn = self.db.get().await?;
        let n = diesel::update(
            comments::table
                .filter(comments::id.eq(comment_id))
                .filter(comments::post_id.eq(post_id)),
        )
        .set(comments::text.eq(text))
        .execute(&mut conn)
        .await?;
        if n == 0 {
            tracing::debug!("no comment matched");
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_comment(&self, post_id: i64, comment_id: i64) -> Result<(), StoreError> {
        let mut conn = self.db.get().await?;
        diesel::delete(
            comments::table
                .filter(comments::id.eq(comment_id))
                .filter(comments::post_id.eq(post_id)),
        )
        .execute(&mut conn)
        .await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn count_by_posts(&self, post_ids: &[i64]) -> Result<HashMap<i64, i64>, StoreError> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let mut conn = self.db.get().await?;
        let counts: Vec<(i64, i64)> = comments::table
            .filter(comments::post_id.eq_any(post_ids.to_vec()))
            .group_by(comments::post_id)
            .select((comments::post_id, count_star()))
            .load(&mut conn)
            .await?;
        Ok(counts.into_iter().collect())
    }
}
