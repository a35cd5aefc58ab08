use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(Error::Config(format!("unknown environment: {}", other))),
        }
    }
}

/// Which fixed card layout to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTemplate {
    /// Centered image over a blurred backdrop, title band below.
    Classic,
    /// Full-bleed image with a gradient overlay and bottom-anchored text.
    Overlay,
}

impl FromStr for CardTemplate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "overlay" => Ok(Self::Overlay),
            other => Err(Error::Config(format!("unknown card template: {}", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BrandingConfig {
    pub logo_url: String,
    pub category_label: String,
    pub category_bg_color: String,
    pub category_text_color: String,
    pub template: CardTemplate,
}

/// Everything that varies per destination. One pipeline parameterized by
/// this record replaces the per-destination script copies the system grew
/// out of.
#[derive(Debug, Clone)]
pub struct DestinationConfig {
    pub content_api_url: Url,
    pub category_id: u64,
    pub page_size: u32,
    pub poll_interval: Duration,
    pub graph_api_url: Url,
    pub page_id: String,
    pub access_token: String,
    pub renderer_url: Url,
    pub branding: BrandingConfig,
    pub default_image_url: String,
    pub ledger_path: PathBuf,
    pub output_dir: PathBuf,
    pub publish_story: bool,
    pub card_width: u32,
    pub card_height: u32,
    pub port: u16,
    pub environment: Environment,
    pub tls_cert_path: Option<PathBuf>,
    pub tls_key_path: Option<PathBuf>,
}

impl DestinationConfig {
    /// Load configuration from environment variables. Credentials are
    /// required; everything else has a default matching the original
    /// deployment profile.
    pub fn from_env() -> Result<Self> {
        let logo_url = var_or("PORTADA_LOGO_URL", "");
        let default_image_url = match std::env::var("PORTADA_DEFAULT_IMAGE_URL") {
            Ok(v) => v,
            Err(_) => logo_url.clone(),
        };

        Ok(Self {
            content_api_url: parse_url(&required("PORTADA_CONTENT_API_URL")?)?,
            category_id: parse_var("PORTADA_CATEGORY_ID", 38)?,
            page_size: parse_var("PORTADA_PAGE_SIZE", 10)?,
            poll_interval: Duration::from_secs(
                parse_var::<u64>("PORTADA_INTERVAL_MINUTES", 45)? * 60,
            ),
            graph_api_url: parse_url(&var_or(
                "PORTADA_GRAPH_API_URL",
                "https://graph.facebook.com/v12.0",
            ))?,
            page_id: required("PORTADA_PAGE_ID")?,
            access_token: required("PORTADA_ACCESS_TOKEN")?,
            renderer_url: parse_url(&required("PORTADA_RENDERER_URL")?)?,
            branding: BrandingConfig {
                logo_url,
                category_label: var_or("PORTADA_CATEGORY_LABEL", "MUNDO"),
                category_bg_color: var_or("PORTADA_CATEGORY_BG_COLOR", "#1a73e8"),
                category_text_color: var_or("PORTADA_CATEGORY_TEXT_COLOR", "#ffffff"),
                template: var_or("PORTADA_TEMPLATE", "classic").parse()?,
            },
            default_image_url,
            ledger_path: PathBuf::from(var_or("PORTADA_LEDGER_PATH", "published_posts.json")),
            output_dir: PathBuf::from(var_or("PORTADA_OUTPUT_DIR", "output")),
            publish_story: parse_var("PORTADA_PUBLISH_STORY", false)?,
            card_width: parse_var("PORTADA_CARD_WIDTH", 720)?,
            card_height: parse_var("PORTADA_CARD_HEIGHT", 1280)?,
            port: parse_var("PORT", 3700)?,
            environment: var_or("PORTADA_ENV", "development").parse()?,
            tls_cert_path: std::env::var("PORTADA_TLS_CERT").ok().map(PathBuf::from),
            tls_key_path: std::env::var("PORTADA_TLS_KEY").ok().map(PathBuf::from),
        })
    }
}

fn required(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| Error::Config(format!("{} must be set", name)))
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_url(value: &str) -> Result<Url> {
    Url::parse(value).map_err(|e| Error::Config(format!("invalid URL {}: {}", value, e)))
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|e| Error::Config(format!("{} is invalid: {}", name, e))),
        Err(_) => Ok(default),
    }
}
