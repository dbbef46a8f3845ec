use serde::Serialize;

use crate::models::{Comment, Post};

use super::TIMESTAMP_FORMAT;

#[derive(Serialize, Debug)]
pub struct CommentView<'a> {
    pub id: i64,
    pub text: &'a str,
    pub created_at: String,
}

/// Full post as shown on its own page and in the edit form.
#[derive(Serialize, Debug)]
pub struct PostPage<'a> {
    pub id: i64,
    pub title: &'a str,
    pub text: &'a str,
    pub paragraphs: Vec<&'a str>,
    pub tags: &'a [String],
    pub tags_text: String,
    pub has_image: bool,
    pub likes_count: i32,
    pub created_at: String,
    pub comments: Vec<CommentView<'a>>,
}

impl<'a> From<&'a Comment> for CommentView<'a> {
    fn from(c: &'a Comment) -> Self {
        CommentView {
            id: c.id,
            text: &c.text,
            created_at: c.created_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

impl<'a> From<&'a Post> for PostPage<'a> {
    fn from(post: &'a Post) -> Self {
        PostPage {
            id: post.id,
            title: &post.title,
            text: &post.text,
            paragraphs: post.paragraphs(),
            tags: &post.tags,
            tags_text: post.tags_as_text(),
            has_image: post.has_image(),
            likes_count: post.likes_count,
            created_at: post.created_at.format(TIMESTAMP_FORMAT).to_string(),
            comments: post.comments.iter().map(CommentView::from).collect(),
        }
    }
}
