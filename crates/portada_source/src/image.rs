use once_cell::sync::Lazy;
use portada_core::Article;
use regex::Regex;
use scraper::{Html, Selector};

/// WordPress thumbnails encode the crop size right before the extension,
/// e.g. `photo-150x150.jpg`.
static THUMBNAIL_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-\d+x\d+(\.[a-zA-Z0-9]+)$").unwrap());

/// Three-tier image choice for a card: the featured image unless it is the
/// source's default placeholder, else the first image embedded in the body,
/// else the configured fallback. Never fails.
pub fn select_image_url(article: &Article, fallback: &str) -> String {
    if let Some(featured) = article.featured_image_url.as_deref() {
        if !featured.contains("default") {
            return strip_thumbnail_suffix(featured);
        }
    }

    if let Some(embedded) = first_body_image(&article.content_html) {
        return embedded;
    }

    tracing::debug!(id = article.id, "No usable image, using fallback");
    fallback.to_string()
}

/// `…/photo-150x150.jpg` → `…/photo.jpg`.
fn strip_thumbnail_suffix(url: &str) -> String {
    THUMBNAIL_SUFFIX.replace(url, "$1").into_owned()
}

fn first_body_image(html: &str) -> Option<String> {
    let fragment = Html::parse_fragment(html);
    let selector = Selector::parse("img[src]").ok()?;
    fragment
        .select(&selector)
        .filter_map(|el| el.value().attr("src"))
        .find(|src| !src.is_empty())
        .map(str::to_string)
}
