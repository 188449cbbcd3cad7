//! Data models for fetched news records.
//!
//! The only record the pipeline carries is [`NewsItem`], a flat snapshot of
//! one headline scraped from a listing page. Fields the page did not provide
//! are filled with fixed placeholder values at parse time, so downstream
//! consumers (the prompt builder in particular) never see a missing field.

/// Placeholder used when a listing entry carries no publish time.
pub const UNKNOWN_TIME: &str = "未知时间";

/// Placeholder used when a listing entry carries no description.
pub const NO_SUMMARY: &str = "无摘要";

/// A single finance news record scraped from a listing page.
///
/// Within one fetch run no two retained items share an identical `title`;
/// the fetcher de-duplicates on the exact title string, keeping the first
/// occurrence.
#[derive(Debug, Clone)]
pub struct NewsItem {
    /// Headline text, whitespace-trimmed, never empty.
    pub title: String,
    /// Publish time as shown on the page, or [`UNKNOWN_TIME`].
    pub published_at: String,
    /// Short description as shown on the page, or [`NO_SUMMARY`].
    pub summary: String,
    /// Absolute article URL, or empty when the page had none.
    pub link: String,
}

impl NewsItem {
    /// Build an item from a bare title, substituting the placeholder values
    /// for every other field.
    pub fn from_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            published_at: UNKNOWN_TIME.to_string(),
            summary: NO_SUMMARY.to_string(),
            link: String::new(),
        }
    }
}
