use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// What came out of one publish sequence. `post_id` alone defines
/// "published"; the comment and story flags report best-effort follow-ups
/// that may have failed without rolling the post back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishOutcome {
    pub post_id: String,
    pub comment_attached: bool,
    pub story_posted: bool,
}

/// The social-network publishing surface: four endpoints, each a separate
/// network call with no rollback between them.
#[async_trait]
pub trait SocialSink: Send + Sync {
    /// Upload an image with a caption as the primary post. Returns the
    /// created post id.
    async fn publish_photo(&self, image: Vec<u8>, caption: &str) -> Result<String>;

    /// Attach a comment to an existing post.
    async fn comment(&self, post_id: &str, message: &str) -> Result<()>;

    /// Upload an image without publishing it. Returns the photo id.
    async fn upload_unpublished(&self, image: Vec<u8>) -> Result<String>;

    /// Create an ephemeral story item from a previously uploaded photo.
    /// Returns the story id.
    async fn publish_story(&self, photo_id: &str, link: &str) -> Result<String>;
}
