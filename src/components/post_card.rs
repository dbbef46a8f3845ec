use serde::Serialize;

use crate::models::FeedEntry;

use super::TIMESTAMP_FORMAT;

#[derive(Serialize, Debug)]
pub struct PostCard<'a> {
    pub id: i64,
    pub title: &'a str,
    pub preview: String,
    pub tags: &'a [String],
    pub likes_count: i32,
    pub comments_count: i64,
    pub created_at: String,
}

impl<'a> From<&'a FeedEntry> for PostCard<'a> {
    fn from(entry: &'a FeedEntry) -> Self {
        let post = &entry.post;
        PostCard {
            id: post.id,
            title: &post.title,
            preview: post.text_preview(),
            tags: &post.tags,
            likes_count: post.likes_count,
            comments_count: entry.comments_count,
            created_at: post.created_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

pub fn render(entries: &[FeedEntry]) -> Vec<PostCard<'_>> {
    entries.iter().map(PostCard::from).collect()
}
