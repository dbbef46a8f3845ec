//! Template-facing views of the models. Tera reads fields, not methods, so
//! everything a page shows is computed here.

pub mod post_card;
pub mod post_page;

pub use post_card::PostCard;
pub use post_page::PostPage;

pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";
