pub mod comment;
pub mod paging;
pub mod post;
pub mod tags;

use std::collections::HashMap;

use serde::Serialize;

pub use comment::Comment;
pub use paging::{FeedQuery, Paging};
pub use post::{Post, PostDraft};

/// A feed post with how many comments it has.
#[derive(Serialize, Debug, Clone)]
pub struct FeedEntry {
    pub post: Post,
    pub comments_count: i64,
}

#[derive(Serialize, Debug, Clone)]
pub struct FeedPage {
    pub entries: Vec<FeedEntry>,
    pub paging: Paging,
    pub search: String,
}

impl FeedPage {
    pub fn new(
        posts: Vec<Post>,
        counts: &HashMap<i64, i64>,
        paging: Paging,
        search: String,
    ) -> Self {
        let entries = posts
            .into_iter()
            .map(|post| FeedEntry {
                comments_count: counts.get(&post.id).copied().unwrap_or(0),
                post,
            })
            .collect();
        Self {
            entries,
            paging,
            search,
        }
    }
}
