use async_trait::async_trait;

use crate::Result;

/// Opaque HTML-to-image conversion. The implementation drives an external
/// rendering engine; this system only cares about bytes out.
#[async_trait]
pub trait CardRenderer: Send + Sync {
    /// Render an HTML document to raster image bytes at the given viewport.
    async fn render(&self, html: &str, width: u32, height: u32) -> Result<Vec<u8>>;
}
