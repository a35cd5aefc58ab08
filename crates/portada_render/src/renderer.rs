use async_trait::async_trait;
use portada_core::{CardRenderer, Error, Result};
use serde::Serialize;
use url::Url;

#[derive(Debug, Serialize)]
struct Viewport {
    width: u32,
    height: u32,
}

#[derive(Debug, Serialize)]
struct ScreenshotRequest<'a> {
    html: &'a str,
    viewport: Viewport,
}

/// Client for an external headless-browser screenshot service. The service
/// receives a full HTML document and a viewport and answers with PNG bytes;
/// everything else about it is opaque to this system.
pub struct HttpRenderer {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpRenderer {
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl CardRenderer for HttpRenderer {
    async fn render(&self, html: &str, width: u32, height: u32) -> Result<Vec<u8>> {
        let request = ScreenshotRequest {
            html,
            viewport: Viewport { width, height },
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Render(format!(
                "screenshot service returned {}",
                response.status()
            )));
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(Error::Render(
                "screenshot service returned an empty body".to_string(),
            ));
        }

        tracing::debug!(bytes = bytes.len(), width, height, "Rendered card image");
        Ok(bytes.to_vec())
    }
}
