use tracing::debug;

use crate::error::{BlogError, StoreError, ValidationError};
use crate::models::paging::MAX_PAGE_SIZE;
use crate::models::{FeedPage, FeedQuery, Paging, Post, PostDraft};

use super::BlogStore;

/// Feed paging and the post/comment lifecycle on top of a [`BlogStore`].
#[derive(Clone)]
pub struct BlogService<S> {
    store: S,
}

impl<S: BlogStore> BlogService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// One page of posts (newest first) plus the paging for the same filter.
    #[tracing::instrument(skip(self))]
    pub async fn feed(&self, query: &FeedQuery) -> Result<FeedPage, BlogError> {
        let tag = query.tag();
        let posts = self.find_feed(tag, query.page_number, query.page_size).await?;
        let total = self.count_feed(tag).await?;

        let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
        let counts = self.store.count_by_posts(&ids).await?;
        debug!(shown = posts.len(), total, "feed page");

        let paging = Paging::new(query.page(), query.page_size, total);
        Ok(FeedPage::new(posts, &counts, paging, tag.to_owned()))
    }

    pub async fn find_feed(
        &self,
        tag: &str,
        page_number: i64,
        page_size: i64,
    ) -> Result<Vec<Post>, BlogError> {
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(ValidationError::PageSize {
                got: page_size,
                max: MAX_PAGE_SIZE,
            }
            .into());
        }
        let query = FeedQuery::new(tag, page_number, page_size);
        Ok(self
            .store
            .find_feed(query.tag(), query.offset(), page_size)
            .await?)
    }

    pub async fn count_feed(&self, tag: &str) -> Result<i64, BlogError> {
        Ok(self.store.count_feed(tag.trim()).await?)
    }

    /// The post with its comments attached, oldest comment first.
    #[tracing::instrument(skip(self))]
    pub async fn get_post(&self, id: i64) -> Result<Option<Post>, StoreError> {
        let Some(mut post) = self.store.find_by_id(id).await? else {
            return Ok(None);
        };
        post.comments = self.store.find_by_post_id(id).await?;
        Ok(Some(post))
    }

    pub async fn create_post(&self, draft: &PostDraft) -> Result<i64, StoreError> {
        self.store.create(draft).await
    }

    /// `false` when there is no post with `id`.
    pub async fn update_post(&self, id: i64, draft: &PostDraft) -> Result<bool, StoreError> {
        self.store.update(id, draft).await
    }

    pub async fn delete_post(&self, id: i64) -> Result<(), StoreError> {
        self.store.delete(id).await
    }

    pub async fn like_post(&self, id: i64, increase: bool) -> Result<(), StoreError> {
        self.store.like(id, increase).await
    }

    pub async fn add_comment(&self, post_id: i64, text: &str) -> Result<i64, StoreError> {
        self.store.create_comment(post_id, text).await
    }

    pub async fn update_comment(
        &self,
        post_id: i64,
        comment_id: i64,
        text: &str,
    ) -> Result<(), StoreError> {
        self.store.update_comment(post_id, comment_id, text).await
    }

    pub async fn delete_comment(&self, post_id: i64, comment_id: i64) -> Result<(), StoreError> {
        self.store.delete_comment(post_id, comment_id).await
    }

    /// Stored image bytes, absent when the post is missing or has none.
    pub async fn load_image(&self, post_id: i64) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self
            .store
            .find_by_id(post_id)
            .await?
            .and_then(|p| p.image_data)
            .filter(|b| !b.is_empty()))
    }
}
