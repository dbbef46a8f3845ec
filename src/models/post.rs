use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

use super::comment::Comment;
use super::tags;

/// Caller input for creating or updating a post.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub tags: Vec<String>,
    pub text: String,
    /// `None` or empty keeps whatever image is stored.
    pub image: Option<Vec<u8>>,
}

impl PostDraft {
    /// The image, if it carries any bytes.
    pub fn image_bytes(&self) -> Option<&[u8]> {
        self.image.as_deref().filter(|b| !b.is_empty())
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub tags: Vec<String>,
    #[serde(skip)]
    pub image_data: Option<Vec<u8>>,
    pub likes_count: i32,
    pub created_at: NaiveDateTime,
    pub comments: Vec<Comment>,
}

impl Post {
    pub fn has_image(&self) -> bool {
        self.image_data.as_ref().is_some_and(|b| !b.is_empty())
    }

    pub fn tags_as_text(&self) -> String {
        self.tags.join(",")
    }

    /// First three non-blank lines of the body.
    pub fn text_preview(&self) -> String {
        self.paragraphs().into_iter().take(3).collect::<Vec<_>>().join("\n")
    }

    pub fn paragraphs(&self) -> Vec<&str> {
        self.text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect()
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = crate::schema::posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PostRow {
    id: i64,
    title: String,
    text: String,
    tags_csv: String,
    image_data: Option<Vec<u8>>,
    likes_count: i32,
    created_at: NaiveDateTime,
}

impl From<PostRow> for Post {
    fn from(r: PostRow) -> Self {
        Post {
            id: r.id,
            title: r.title,
            text: r.text,
            tags: tags::from_csv(&r.tags_csv),
            image_data: r.image_data.filter(|b| !b.is_empty()),
            likes_count: r.likes_count,
            created_at: r.created_at,
            comments: Vec::new(),
        }
    }
}

/// Feed projection, leaves the image payload in the database.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = crate::schema::posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PostListRow {
    id: i64,
    title: String,
    text: String,
    tags_csv: String,
    likes_count: i32,
    created_at: NaiveDateTime,
}

impl From<PostListRow> for Post {
    fn from(r: PostListRow) -> Self {
        Post {
            id: r.id,
            title: r.title,
            text: r.text,
            tags: tags::from_csv(&r.tags_csv),
            image_data: None,
            likes_count: r.likes_count,
            created_at: r.created_at,
            comments: Vec::new(),
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewPost {
    title: String,
    text: String,
    tags_csv: String,
    image_data: Option<Vec<u8>>,
    likes_count: i32,
    created_at: NaiveDateTime,
}

impl NewPost {
    pub fn new(draft: &PostDraft, created_at: NaiveDateTime) -> Self {
        Self {
            title: draft.title.clone(),
            text: draft.text.clone(),
            tags_csv: tags::to_csv(&draft.tags),
            image_data: draft.image_bytes().map(<[u8]>::to_vec),
            likes_count: 0,
            created_at,
        }
    }
}

/// `None` fields are left out of the UPDATE, which is what keeps the stored
/// image when no new one was uploaded.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PostChanges {
    title: String,
    text: String,
    tags_csv: String,
    image_data: Option<Vec<u8>>,
}

impl From<&PostDraft> for PostChanges {
    fn from(draft: &PostDraft) -> Self {
        Self {
            title: draft.title.clone(),
            text: draft.text.clone(),
            tags_csv: tags::to_csv(&draft.tags),
            image_data: draft.image_bytes().map(<[u8]>::to_vec),
        }
    }
}
