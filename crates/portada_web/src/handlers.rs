use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use portada_core::{BrandingConfig, RenderJob};
use portada_publish::{publish_card, GraphSink};
use portada_render::{compose, write_temp_image};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::AppState;

/// One synchronous render+publish job. The destination credentials ride in
/// the payload so a single server instance can serve several pages.
#[derive(Debug, Deserialize)]
pub struct GenerateImageRequest {
    pub image_url: String,
    pub title: String,
    pub logo_url: String,
    pub category: String,
    pub category_bg_color: String,
    pub category_text_color: String,
    pub post_url: String,
    pub page_id: String,
    pub access_token: String,
    #[serde(default)]
    pub publish_story: bool,
}

#[derive(Debug, Serialize)]
pub struct GenerateImageResponse {
    pub image_path: String,
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Render the card and publish it within the request, answering with the
/// stored image path. The image is kept on disk so `/output` can serve it.
pub async fn generate_image(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateImageRequest>,
) -> Result<Json<GenerateImageResponse>, (StatusCode, Json<serde_json::Value>)> {
    let job = RenderJob {
        image_url: request.image_url,
        title: request.title.clone(),
        category_label: request.category.clone(),
        link: request.post_url.clone(),
    };
    let branding = BrandingConfig {
        logo_url: request.logo_url,
        category_label: request.category,
        category_bg_color: request.category_bg_color,
        category_text_color: request.category_text_color,
        template: state.config.branding.template,
    };

    let html = compose(
        &job,
        &branding,
        state.config.card_width,
        state.config.card_height,
    );

    let image = state
        .renderer
        .render(&html, state.config.card_width, state.config.card_height)
        .await
        .map_err(internal_error)?;

    let image_path = write_temp_image(&image, &state.config.output_dir)
        .await
        .map_err(internal_error)?;

    let sink = GraphSink::new(
        state.config.graph_api_url.clone(),
        request.page_id,
        request.access_token,
    );
    publish_card(
        &sink,
        image,
        &request.title,
        &request.post_url,
        request.publish_story,
    )
    .await
    .map_err(internal_error)?;

    Ok(Json(GenerateImageResponse {
        image_path: image_path.display().to_string(),
    }))
}

fn internal_error(e: portada_core::Error) -> (StatusCode, Json<serde_json::Value>) {
    tracing::error!("generate-image failed: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_payload_shape() {
        let body = r##"{
            "image_url": "https://cdn.example.com/a.jpg",
            "title": "Titular",
            "logo_url": "https://example.com/logo.png",
            "category": "MUNDO",
            "category_bg_color": "#1a73e8",
            "category_text_color": "#ffffff",
            "post_url": "https://example.com/?p=1",
            "page_id": "1234",
            "access_token": "token"
        }"##;

        let request: GenerateImageRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.title, "Titular");
        assert!(!request.publish_story);
    }
}
