use std::sync::Arc;

use portada_core::{
    CardRenderer, ContentSource, DestinationConfig, PublicationLedger, RenderJob, Result,
    SocialSink,
};
use portada_publish::publish_card;
use portada_render::{compose, remove_temp_image, write_temp_image};
use portada_source::select_image_url;

/// What one pass did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// One article went out and was recorded.
    Published(u64),
    /// Every fetched article was already in the ledger (or the fetch came
    /// back empty — the two are indistinguishable here by design).
    NothingNew,
}

/// One fetch→select→render→publish→record pass over the collaborators.
/// All state lives in the collaborators; the pipeline itself is just the
/// sequencing and the ledger discipline around it.
pub struct Pipeline {
    source: Arc<dyn ContentSource>,
    renderer: Arc<dyn CardRenderer>,
    sink: Arc<dyn SocialSink>,
    ledger: Arc<dyn PublicationLedger>,
    config: DestinationConfig,
}

impl Pipeline {
    pub fn new(
        source: Arc<dyn ContentSource>,
        renderer: Arc<dyn CardRenderer>,
        sink: Arc<dyn SocialSink>,
        ledger: Arc<dyn PublicationLedger>,
        config: DestinationConfig,
    ) -> Self {
        Self {
            source,
            renderer,
            sink,
            ledger,
            config,
        }
    }

    /// Execute one pass. At most one article is published per call, which
    /// bounds the publish rate to one item per interval regardless of
    /// backlog size.
    ///
    /// A render failure aborts the pass before anything was posted. A
    /// primary-upload failure aborts it without touching the ledger. The
    /// ledger is only written after the primary upload succeeded; a ledger
    /// write failure then surfaces as the pass's error. The temporary
    /// image file is removed after any publish attempt, successful or not.
    pub async fn run_once(&self) -> Result<TickOutcome> {
        let articles = match self
            .source
            .fetch_recent(self.config.category_id, self.config.page_size)
            .await
        {
            Ok(articles) => articles,
            Err(e) => {
                tracing::error!("Failed to fetch articles: {}", e);
                Vec::new()
            }
        };

        let mut unseen = None;
        for article in articles {
            if !self.ledger.contains(article.id).await? {
                unseen = Some(article);
                break;
            }
        }

        let Some(article) = unseen else {
            tracing::info!("No new articles to publish");
            return Ok(TickOutcome::NothingNew);
        };

        tracing::info!(id = article.id, title = %article.title, "Publishing article");

        let job = RenderJob {
            image_url: select_image_url(&article, &self.config.default_image_url),
            title: article.title.clone(),
            category_label: self.config.branding.category_label.clone(),
            link: article.link.clone(),
        };

        let html = compose(
            &job,
            &self.config.branding,
            self.config.card_width,
            self.config.card_height,
        );
        let image = self
            .renderer
            .render(&html, self.config.card_width, self.config.card_height)
            .await?;

        let image_path = write_temp_image(&image, &self.config.output_dir).await?;

        let published = publish_card(
            self.sink.as_ref(),
            image,
            &article.title,
            &article.link,
            self.config.publish_story,
        )
        .await;

        remove_temp_image(&image_path).await;

        let outcome = published?;
        self.ledger.record(article.id).await?;
        tracing::info!(
            id = article.id,
            post_id = %outcome.post_id,
            comment_attached = outcome.comment_attached,
            story_posted = outcome.story_posted,
            "Article published and recorded"
        );

        Ok(TickOutcome::Published(article.id))
    }
}
