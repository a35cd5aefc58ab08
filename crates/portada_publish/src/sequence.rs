use portada_core::{PublishOutcome, Result, SocialSink};

/// Run the publish sequence for one rendered card: primary photo post,
/// then a source-link comment, then optionally the story variant.
///
/// The post counts as published once the primary upload succeeds. Comment
/// and story failures are logged and surfaced in the outcome flags; nothing
/// is rolled back. A primary-upload failure is the only error this returns.
pub async fn publish_card(
    sink: &dyn SocialSink,
    image: Vec<u8>,
    caption: &str,
    link: &str,
    with_story: bool,
) -> Result<PublishOutcome> {
    let post_id = sink.publish_photo(image.clone(), caption).await?;
    tracing::info!(post_id = %post_id, "Photo published");

    let comment = format!("Más información: {}", link);
    let comment_attached = match sink.comment(&post_id, &comment).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(post_id = %post_id, "Failed to attach source link comment: {}", e);
            false
        }
    };

    let story_posted = if with_story {
        match publish_story(sink, image, link).await {
            Ok(story_id) => {
                tracing::info!(story_id = %story_id, "Story published");
                true
            }
            Err(e) => {
                tracing::warn!("Failed to publish story: {}", e);
                false
            }
        }
    } else {
        false
    };

    Ok(PublishOutcome {
        post_id,
        comment_attached,
        story_posted,
    })
}

/// Stories go out in two steps: upload the photo unpublished, then create
/// the story item referencing it.
async fn publish_story(sink: &dyn SocialSink, image: Vec<u8>, link: &str) -> Result<String> {
    let photo_id = sink.upload_unpublished(image).await?;
    sink.publish_story(&photo_id, link).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use portada_core::Error;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockSink {
        calls: Mutex<Vec<String>>,
        fail_photo: bool,
        fail_comment: bool,
        fail_story_upload: bool,
    }

    impl MockSink {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SocialSink for MockSink {
        async fn publish_photo(&self, _image: Vec<u8>, caption: &str) -> Result<String> {
            self.calls.lock().unwrap().push(format!("photo:{}", caption));
            if self.fail_photo {
                return Err(Error::Publish("photo upload failed".to_string()));
            }
            Ok("post-1".to_string())
        }

        async fn comment(&self, post_id: &str, message: &str) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("comment:{}:{}", post_id, message));
            if self.fail_comment {
                return Err(Error::Publish("comment failed".to_string()));
            }
            Ok(())
        }

        async fn upload_unpublished(&self, _image: Vec<u8>) -> Result<String> {
            self.calls.lock().unwrap().push("upload".to_string());
            if self.fail_story_upload {
                return Err(Error::Publish("upload failed".to_string()));
            }
            Ok("photo-1".to_string())
        }

        async fn publish_story(&self, photo_id: &str, link: &str) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("story:{}:{}", photo_id, link));
            Ok("story-1".to_string())
        }
    }

    #[tokio::test]
    async fn test_full_sequence_with_story() {
        let sink = MockSink::default();
        let outcome = publish_card(&sink, vec![1], "Titular", "https://example.com/p", true)
            .await
            .unwrap();

        assert_eq!(outcome.post_id, "post-1");
        assert!(outcome.comment_attached);
        assert!(outcome.story_posted);
        assert_eq!(
            sink.calls(),
            vec![
                "photo:Titular",
                "comment:post-1:Más información: https://example.com/p",
                "upload",
                "story:photo-1:https://example.com/p",
            ]
        );
    }

    #[tokio::test]
    async fn test_story_disabled_skips_story_calls() {
        let sink = MockSink::default();
        let outcome = publish_card(&sink, vec![1], "t", "l", false).await.unwrap();
        assert!(!outcome.story_posted);
        assert_eq!(sink.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_comment_failure_does_not_undo_post() {
        let sink = MockSink {
            fail_comment: true,
            ..Default::default()
        };
        let outcome = publish_card(&sink, vec![1], "t", "l", false).await.unwrap();
        assert_eq!(outcome.post_id, "post-1");
        assert!(!outcome.comment_attached);
    }

    #[tokio::test]
    async fn test_story_upload_failure_is_non_fatal() {
        let sink = MockSink {
            fail_story_upload: true,
            ..Default::default()
        };
        let outcome = publish_card(&sink, vec![1], "t", "l", true).await.unwrap();
        assert_eq!(outcome.post_id, "post-1");
        assert!(!outcome.story_posted);
        // The story create call never happens after a failed upload.
        assert!(!sink.calls().iter().any(|c| c.starts_with("story:")));
    }

    #[tokio::test]
    async fn test_primary_failure_aborts_sequence() {
        let sink = MockSink {
            fail_photo: true,
            ..Default::default()
        };
        let result = publish_card(&sink, vec![1], "t", "l", true).await;
        assert!(result.is_err());
        assert_eq!(sink.calls().len(), 1);
    }
}
