use async_trait::async_trait;

use crate::types::Article;
use crate::Result;

#[async_trait]
pub trait ContentSource: Send + Sync {
    /// One bounded read of the most recent articles in a category, most
    /// recent first as provided by the source. No ordering guarantee
    /// beyond that.
    async fn fetch_recent(&self, category: u64, limit: u32) -> Result<Vec<Article>>;
}
