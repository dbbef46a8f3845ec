use std::sync::Arc;

use axum::extract::{Multipart, Path, Query, State};
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use tera::Tera;

use crate::components::{post_card, PostPage};
use crate::error::{AppError, ValidationError};
use crate::models::{tags, FeedQuery, PostDraft};
use crate::services::blog::BlogService;
use crate::services::BlogStore;

pub type PostsRouteState<S> = (BlogService<S>, Arc<Tera>);

#[derive(Deserialize)]
pub struct LikeForm {
    like: bool,
}

#[derive(Deserialize)]
pub struct CommentForm {
    text: String,
}

fn post_url(id: i64) -> String {
    format!("/posts/{id}")
}

fn upload_error(e: axum::extract::multipart::MultipartError) -> ValidationError {
    ValidationError::Upload(e.body_text())
}

/// Reads the post form. An empty file input leaves `image` unset.
async fn read_draft(mut multipart: Multipart) -> Result<PostDraft, ValidationError> {
    let mut title = None;
    let mut text = None;
    let mut draft = PostDraft::default();

    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("title") => title = Some(field.text().await.map_err(upload_error)?),
            Some("text") => text = Some(field.text().await.map_err(upload_error)?),
            Some("tags") => draft.tags = tags::parse_input(&field.text().await.map_err(upload_error)?),
            Some("image") => {
                let bytes = field.bytes().await.map_err(upload_error)?;
                if !bytes.is_empty() {
                    draft.image = Some(bytes.to_vec());
                }
            }
            _ => {}
        }
    }

    draft.title = title.ok_or(ValidationError::Field("title"))?;
    draft.text = text.ok_or(ValidationError::Field("text"))?;
    Ok(draft)
}

#[tracing::instrument(skip_all)]
async fn feed<S: BlogStore>(
    State((blog, tera)): State<PostsRouteState<S>>,
    Query(query): Query<FeedQuery>,
) -> Result<Html<String>, AppError> {
    let page = blog.feed(&query).await?;

    let mut ctx = tera::Context::new();
    ctx.insert("posts", &post_card::render(&page.entries));
    ctx.insert("paging", &page.paging);
    ctx.insert("search", &page.search);
    Ok(Html(tera.render("posts/feed.html", &ctx)?))
}

async fn add_form<S: BlogStore>(
    State((_, tera)): State<PostsRouteState<S>>,
) -> Result<Html<String>, AppError> {
    Ok(Html(tera.render("posts/form.html", &tera::Context::new())?))
}

#[tracing::instrument(skip_all)]
async fn create_post<S: BlogStore>(
    State((blog, _)): State<PostsRouteState<S>>,
    multipart: Multipart,
) -> Result<Redirect, AppError> {
    let draft = read_draft(multipart).await?;
    let id = blog.create_post(&draft).await?;
    Ok(Redirect::to(&post_url(id)))
}

async fn show_post<S: BlogStore>(
    State((blog, tera)): State<PostsRouteState<S>>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let post = blog
        .get_post(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("post {id}")))?;

    let mut ctx = tera::Context::new();
    ctx.insert("post", &PostPage::from(&post));
    Ok(Html(tera.render("posts/post.html", &ctx)?))
}

async fn edit_form<S: BlogStore>(
    State((blog, tera)): State<PostsRouteState<S>>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let post = blog
        .get_post(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("post {id}")))?;

    let mut ctx = tera::Context::new();
    ctx.insert("post", &PostPage::from(&post));
    Ok(Html(tera.render("posts/form.html", &ctx)?))
}

#[tracing::instrument(skip_all)]
async fn update_post<S: BlogStore>(
    State((blog, _)): State<PostsRouteState<S>>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Redirect, AppError> {
    let draft = read_draft(multipart).await?;
    if !blog.update_post(id, &draft).await? {
        return Err(AppError::not_found(format!("post {id}")));
    }
    Ok(Redirect::to(&post_url(id)))
}

async fn delete_post<S: BlogStore>(
    State((blog, _)): State<PostsRouteState<S>>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    blog.delete_post(id).await?;
    Ok(Redirect::to("/posts"))
}

async fn like_post<S: BlogStore>(
    State((blog, _)): State<PostsRouteState<S>>,
    Path(id): Path<i64>,
    Form(f): Form<LikeForm>,
) -> Result<Redirect, AppError> {
    blog.like_post(id, f.like).await?;
    Ok(Redirect::to(&post_url(id)))
}

async fn add_comment<S: BlogStore>(
    State((blog, _)): State<PostsRouteState<S>>,
    Path(id): Path<i64>,
    Form(f): Form<CommentForm>,
) -> Result<Redirect, AppError> {
    blog.add_comment(id, &f.text).await?;
    Ok(Redirect::to(&post_url(id)))
}

async fn update_comment<S: BlogStore>(
    State((blog, _)): State<PostsRouteState<S>>,
    Path((id, comment_id)): Path<(i64, i64)>,
    Form(f): Form<CommentForm>,
) -> Result<Redirect, AppError> {
    blog.update_comment(id, comment_id, &f.text).await?;
    Ok(Redirect::to(&post_url(id)))
}

async fn delete_comment<S: BlogStore>(
    State((blog, _)): State<PostsRouteState<S>>,
    Path((id, comment_id)): Path<(i64, i64)>,
) -> Result<Redirect, AppError> {
    blog.delete_comment(id, comment_id).await?;
    Ok(Redirect::to(&post_url(id)))
}

pub fn router<S: BlogStore>() -> Router<PostsRouteState<S>> {
    Router::new()
        .route("/", get(feed::<S>).post(create_post::<S>))
        .route("/add", get(add_form::<S>))
        .route("/:id", get(show_post::<S>).post(update_post::<S>))
        .route("/:id/edit", get(edit_form::<S>))
        .route("/:id/delete", post(delete_post::<S>))
        .route("/:id/like", post(like_post::<S>))
        .route("/:id/comments", post(add_comment::<S>))
        .route("/:id/comments/:comment_id", post(update_comment::<S>))
        .route("/:id/comments/:comment_id/delete", post(delete_comment::<S>))
}
