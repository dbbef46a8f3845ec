use axum::async_trait;
use diesel::dsl::{count_star, sql};
use diesel::prelude::*;
use diesel::sql_types::{Bool, Text};
use diesel_async::{AsyncConnection, RunQueryDsl};
use scoped_futures::ScopedFutureExt;

use crate::error::StoreError;
use crate::models::post::*;
use crate::models::tags::{self, TagFilter};
use crate::schema::{comments, posts};

use super::{BlogStoreDb, Svc};

/// Matches a whole entry of the stored tag CSV against a bound LIKE pattern.
const TAG_MATCH_SQL: &str = "(',' || LOWER(tags_csv) || ',') LIKE ";

#[async_trait]
pub trait PostStore: Svc {
    /// Newest first, without image payloads.
    async fn find_feed(&self, tag: &str, offset: i64, limit: i64) -> Result<Vec<Post>, StoreError>;
    async fn count_feed(&self, tag: &str) -> Result<i64, StoreError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, StoreError>;
    async fn create(&self, draft: &PostDraft) -> Result<i64, StoreError>;
    /// Returns whether a post with `id` existed.
    async fn update(&self, id: i64, draft: &PostDraft) -> Result<bool, StoreError>;
    async fn delete(&self, id: i64) -> Result<(), StoreError>;
    async fn like(&self, id: i64, increase: bool) -> Result<(), StoreError>;
}

#[async_trait]
impl PostStore for BlogStoreDb {
    #[tracing::instrument(skip(self))]
    async fn find_feed(&self, tag: &str, offset: i64, limit: i64) -> Result<Vec<Post>, StoreError> {
        let mut query = posts::table
            .select(PostListRow::as_select())
            .order((posts::created_at.desc(), posts::id.desc()))
            .offset(offset)
            .limit(limit)
            .into_boxed();

        match TagFilter::parse(tag) {
            TagFilter::All => {}
            TagFilter::Tag(t) => {
                query = query.filter(sql::<Bool>(TAG_MATCH_SQL).bind::<Text, _>(tags::like_pattern(&t)))
            }
            TagFilter::Nothing => return Ok(Vec::new()),
        }

        let mut conn = self.db.get().await?;
        let rows: Vec<PostListRow> = query.load(&mut conn).await?;
        Ok(rows.into_iter().map(Post::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn count_feed(&self, tag: &str) -> Result<i64, StoreError> {
        let mut query = posts::table.select(count_star()).into_boxed();

        match TagFilter::parse(tag) {
            TagFilter::All => {}
            TagFilter::Tag(t) => {
                query = query.filter(sql::<Bool>(TAG_MATCH_SQL).bind::<Text, _>(tags::like_pattern(&t)))
            }
            TagFilter::Nothing => return Ok(0),
        }

        let mut conn = self.db.get().await?;
        Ok(query.get_result::<i64>(&mut conn).await?)
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, StoreError> {
        let mut conn = self.db.get().await?;
        let row = posts::table
            .find(id)
            .select(PostRow::as_select())
            .first::<PostRow>(&mut conn)
            .await
            .optional()?;
        Ok(row.map(Post::from))
    }

    #[tracing::instrument(skip_all, fields(title = %draft.title))]
    async fn create(&self, draft: &PostDraft) -> Result<i64, StoreError> {
        let new_post = NewPost::new(draft, chrono::Utc::now().naive_utc());

        let mut conn = self.db.get().await?;
        let id = conn
            .transaction::<_, StoreError, _>(|conn| {
                async move {
                    let id = diesel::insert_into(posts::table)
                        .values(&new_post)
                        .returning(posts::id)
                        .get_result::<i64>(conn)
                        .await?;
                    Ok(id)
                }
                .scope_boxed()
            })
            .await?;
        tracing::info!(id, "post created");
        Ok(id)
    }

    #[tracing::instrument(skip(self, draft))]
    async fn update(&self, id: i64, draft: &PostDraft) -> Result<bool, StoreError> {
        let changes = PostChanges::from(draft);

        let mut conn = self.db.get().await?;
        let updated = conn
            .transaction::<_, StoreError, _>(|conn| {
                async move {
                    let n = diesel::update(posts::table.find(id))
                        .set(&changes)
                        .execute(conn)
                        .await?;
                    Ok(n)
                }
                .scope_boxed()
            })
            .await?;
        Ok(updated > 0)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut conn = self.db.get().await?;
        let (dropped_comments, dropped_posts) = conn
            .transaction::<_, StoreError, _>(|conn| {
                async move {
                    let c = diesel::delete(comments::table.filter(comments::post_id.eq(id)))
                        .execute(conn)
                        .await?;
                    let p = diesel::delete(posts::table.find(id)).execute(conn).await?;
                    Ok((c, p))
                }
                .scope_boxed()
            })
            .await?;
        tracing::info!(dropped_posts, dropped_comments, "post deleted");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn like(&self, id: i64, increase: bool) -> Result<(), StoreError> {
        let mut conn = self.db.get().await?;
        if increase {
            diesel::update(posts::table.find(id))
                .set(posts::likes_count.eq(posts::likes_count + 1))
                .execute(&mut conn)
                .await?;
        } else {
            diesel::update(posts::table.find(id).filter(posts::likes_count.gt(0)))
                .set(posts::likes_count.eq(posts::likes_count - 1))
                .execute(&mut conn)
                .await?;
        }
        Ok(())
    }
}
