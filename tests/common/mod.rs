// Common test utilities
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime};

use blog::error::StoreError;
use blog::models::tags::{self, TagFilter};
use blog::models::{Comment, Post, PostDraft};
use blog::services::blog::BlogService;
use blog::services::{CommentStore, PostStore, Svc};

/// In-memory `BlogStore` following the same rules as the Postgres one.
/// Every write advances a fake clock by one second so ordering is stable.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    posts: Vec<StoredPost>,
    comments: Vec<Comment>,
    next_id: i64,
    ticks: i64,
}

struct StoredPost {
    id: i64,
    title: String,
    text: String,
    tags_csv: String,
    image: Option<Vec<u8>>,
    likes: i32,
    created_at: NaiveDateTime,
}

impl StoredPost {
    fn to_post(&self, with_image: bool) -> Post {
        Post {
            id: self.id,
            title: self.title.clone(),
            text: self.text.clone(),
            tags: tags::from_csv(&self.tags_csv),
            image_data: if with_image { self.image.clone() } else { None },
            likes_count: self.likes,
            created_at: self.created_at,
            comments: Vec::new(),
        }
    }
}

impl Inner {
    fn now(&mut self) -> NaiveDateTime {
        self.ticks += 1;
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid date")
            + Duration::seconds(self.ticks)
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn matching(&self, tag: &str) -> Vec<&StoredPost> {
        let mut posts: Vec<&StoredPost> = match TagFilter::parse(tag) {
            TagFilter::All => self.posts.iter().collect(),
            TagFilter::Tag(t) => self
                .posts
                .iter()
                .filter(|p| tags::csv_has_tag(&p.tags_csv, &t))
                .collect(),
            TagFilter::Nothing => Vec::new(),
        };
        posts.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        posts
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn comment_count(&self) -> usize {
        self.inner.lock().unwrap().comments.len()
    }
}

impl Svc for MemoryStore {}

#[async_trait]
impl PostStore for MemoryStore {
    async fn find_feed(&self, tag: &str, offset: i64, limit: i64) -> Result<Vec<Post>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .matching(tag)
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|p| p.to_post(false))
            .collect())
    }

    async fn count_feed(&self, tag: &str) -> Result<i64, StoreError> {
        Ok(self.inner.lock().unwrap().matching(tag).len() as i64)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.posts.iter().find(|p| p.id == id).map(|p| p.to_post(true)))
    }

    async fn create(&self, draft: &PostDraft) -> Result<i64, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id();
        let created_at = inner.now();
        inner.posts.push(StoredPost {
            id,
            title: draft.title.clone(),
            text: draft.text.clone(),
            tags_csv: tags::to_csv(&draft.tags),
            image: draft.image_bytes().map(<[u8]>::to_vec),
            likes: 0,
            created_at,
        });
        Ok(id)
    }

    async fn update(&self, id: i64, draft: &PostDraft) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let Some(p) = inner.posts.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        p.title = draft.title.clone();
        p.text = draft.text.clone();
        p.tags_csv = tags::to_csv(&draft.tags);
        if let Some(bytes) = draft.image_bytes() {
            p.image = Some(bytes.to_vec());
        }
        Ok(true)
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.comments.retain(|c| c.post_id != id);
        inner.posts.retain(|p| p.id != id);
        Ok(())
    }

    async fn like(&self, id: i64, increase: bool) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(p) = inner.posts.iter_mut().find(|p| p.id == id) {
            p.likes = if increase { p.likes + 1 } else { (p.likes - 1).max(0) };
        }
        Ok(())
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn find_by_post_id(&self, post_id: i64) -> Result<Vec<Comment>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut cs: Vec<Comment> = inner
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        cs.sort_by_key(|c| (c.created_at, c.id));
        Ok(cs)
    }

    async fn create_comment(&self, post_id: i64, text: &str) -> Result<i64, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id();
        let created_at = inner.now();
        inner.comments.push(Comment {
            id,
            post_id,
            text: text.to_owned(),
            created_at,
        });
        Ok(id)
    }

    async fn update_comment(&self, post_id: i64, comment_id: i64, text: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(c) = inner
            .comments
            .iter_mut()
            .find(|c| c.id == comment_id && c.post_id == post_id)
        {
            c.text = text.to_owned();
        }
        Ok(())
    }

    async fn delete_comment(&self, post_id: i64, comment_id: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .comments
            .retain(|c| !(c.id == comment_id && c.post_id == post_id));
        Ok(())
    }

    async fn count_by_posts(&self, post_ids: &[i64]) -> Result<HashMap<i64, i64>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut counts = HashMap::new();
        for c in inner.comments.iter().filter(|c| post_ids.contains(&c.post_id)) {
            *counts.entry(c.post_id).or_insert(0) += 1;
        }
        Ok(counts)
    }
}

pub fn service() -> BlogService<MemoryStore> {
    BlogService::new(MemoryStore::new())
}

pub fn draft(title: &str, tags: &[&str], image: Option<Vec<u8>>) -> PostDraft {
    PostDraft {
        title: title.to_owned(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        text: format!("{title} body"),
        image,
    }
}
