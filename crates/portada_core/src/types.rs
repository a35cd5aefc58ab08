use serde::{Deserialize, Serialize};

/// A single content entry from the source API, immutable for the duration
/// of one pipeline pass. The body HTML is only ever scanned for a fallback
/// image, never rendered as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: u64,
    pub title: String,
    pub content_html: String,
    pub link: String,
    pub featured_image_url: Option<String>,
    pub categories: Vec<u64>,
}

/// Everything the template composer needs for one card. Built per tick,
/// consumed once, never persisted.
#[derive(Debug, Clone)]
pub struct RenderJob {
    pub image_url: String,
    pub title: String,
    pub category_label: String,
    pub link: String,
}
