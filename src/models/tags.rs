//! Tag CSV encoding as persisted in `posts.tags_csv`.

/// Normalizes tags into the stored CSV form: trimmed, lowercase, no empty
/// entries, first occurrence wins on duplicates.
pub fn to_csv<S: AsRef<str>>(tags: &[S]) -> String {
    let mut seen: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.as_ref().trim().to_lowercase();
        if !tag.is_empty() && !seen.contains(&tag) {
            seen.push(tag);
        }
    }
    seen.join(",")
}

/// Splits a stored CSV back into tags, dropping empty segments.
pub fn from_csv(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Parses tags typed into the post form. Commas and whitespace both separate.
pub fn parse_input(input: &str) -> Vec<String> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// How a feed search string constrains the tag set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagFilter {
    All,
    Tag(String),
    /// A filter no single tag can equal, e.g. one containing a comma.
    Nothing,
}

impl TagFilter {
    pub fn parse(search: &str) -> Self {
        let tag = search.trim().to_lowercase();
        if tag.is_empty() {
            TagFilter::All
        } else if tag.contains(',') {
            TagFilter::Nothing
        } else {
            TagFilter::Tag(tag)
        }
    }
}

/// LIKE pattern matching `tag` as a whole entry of `',' || tags_csv || ','`.
/// Postgres uses backslash as the default LIKE escape.
pub fn like_pattern(tag: &str) -> String {
    let mut pattern = String::with_capacity(tag.len() + 4);
    pattern.push_str("%,");
    for c in tag.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push_str(",%");
    pattern
}

/// In-process form of the feed tag match, same rule as the SQL filter.
/// `tag` is expected already normalized by [`TagFilter::parse`].
pub fn csv_has_tag(csv: &str, tag: &str) -> bool {
    csv.split(',').any(|t| t.to_lowercase() == tag)
}
