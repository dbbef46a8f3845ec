use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// One page of the feed, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub page_number: i64,
    pub page_size: i64,
    pub total: i64,
}

impl Paging {
    pub fn new(page_number: i64, page_size: i64, total: i64) -> Self {
        Self {
            page_number,
            page_size,
            total,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_number.saturating_mul(self.page_size) < self.total
    }
}

// Templates can't call methods, so the flags go out as fields.
impl Serialize for Paging {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Paging", 5)?;
        s.serialize_field("page_number", &self.page_number)?;
        s.serialize_field("page_size", &self.page_size)?;
        s.serialize_field("total", &self.total)?;
        s.serialize_field("has_previous", &self.has_previous())?;
        s.serialize_field("has_next", &self.has_next())?;
        s.end()
    }
}

/// Feed request as it arrives on the query string.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedQuery {
    pub search: String,
    pub page_number: i64,
    pub page_size: i64,
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FeedQuery {
    pub fn new(search: impl Into<String>, page_number: i64, page_size: i64) -> Self {
        Self {
            search: search.into(),
            page_number,
            page_size,
        }
    }

    /// Trimmed search; empty means no filter.
    pub fn tag(&self) -> &str {
        self.search.trim()
    }

    /// Page number coerced to at least 1.
    pub fn page(&self) -> i64 {
        self.page_number.max(1)
    }

    pub fn offset(&self) -> i64 {
        page_offset(self.page_number, self.page_size)
    }
}

/// 0-based row offset of a 1-based page.
pub fn page_offset(page_number: i64, page_size: i64) -> i64 {
    (page_number.max(1) - 1).saturating_mul(page_size)
}
