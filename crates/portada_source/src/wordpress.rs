use async_trait::async_trait;
use portada_core::{Article, ContentSource, Result};
use serde::Deserialize;
use url::Url;

/// Field selection sent to the posts endpoint. Keeps response payloads to
/// the handful of fields a card actually needs.
const ARTICLE_FIELDS: &str = "id,title,content,link,featured_media_url,categories";

#[derive(Debug, Deserialize)]
struct Rendered {
    rendered: String,
}

#[derive(Debug, Deserialize)]
struct WpPost {
    id: u64,
    title: Rendered,
    content: Rendered,
    link: String,
    #[serde(default)]
    featured_media_url: Option<String>,
    #[serde(default)]
    categories: Vec<u64>,
}

impl From<WpPost> for Article {
    fn from(post: WpPost) -> Self {
        Article {
            id: post.id,
            title: post.title.rendered,
            content_html: post.content.rendered,
            link: post.link,
            featured_image_url: post.featured_media_url.filter(|url| !url.is_empty()),
            categories: post.categories,
        }
    }
}

/// Read-only client for a WordPress-style paginated posts endpoint.
pub struct WordPressSource {
    client: reqwest::Client,
    api_url: Url,
}

impl WordPressSource {
    pub fn new(api_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
        }
    }
}

#[async_trait]
impl ContentSource for WordPressSource {
    async fn fetch_recent(&self, category: u64, limit: u32) -> Result<Vec<Article>> {
        let response = self
            .client
            .get(self.api_url.clone())
            .query(&[
                ("categories", category.to_string()),
                ("per_page", limit.to_string()),
                ("_fields", ARTICLE_FIELDS.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let posts: Vec<WpPost> = response.json().await?;
        tracing::debug!(count = posts.len(), category, "Fetched recent posts");
        Ok(posts.into_iter().map(Article::from).collect())
    }
}
