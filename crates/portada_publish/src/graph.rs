use async_trait::async_trait;
use portada_core::{Error, Result, SocialSink};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::json;
use url::Url;

#[derive(Debug, Deserialize)]
struct IdResponse {
    id: String,
}

/// Graph-style publishing client for one page. Four endpoints: photo
/// upload, comment creation, unpublished photo upload, story creation.
/// The access token travels as a query parameter on every call.
pub struct GraphSink {
    client: reqwest::Client,
    api_url: Url,
    page_id: String,
    access_token: String,
}

impl GraphSink {
    pub fn new(api_url: Url, page_id: String, access_token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            page_id,
            access_token,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        // The base is `…/vNN.N`; joining needs the trailing slash kept.
        let base = format!("{}/", self.api_url.as_str().trim_end_matches('/'));
        Url::parse(&base)
            .and_then(|base| base.join(path))
            .map_err(|e| Error::Publish(format!("invalid endpoint {}: {}", path, e)))
    }

    fn photo_form(image: Vec<u8>) -> Result<Form> {
        let part = Part::bytes(image)
            .file_name("card.png")
            .mime_str("image/png")?;
        Ok(Form::new().part("file", part))
    }

    async fn expect_id(response: reqwest::Response, what: &str) -> Result<String> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Publish(format!("{} failed with {}: {}", what, status, body)));
        }
        let IdResponse { id } = response.json().await?;
        Ok(id)
    }

    async fn expect_ok(response: reqwest::Response, what: &str) -> Result<()> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Publish(format!("{} failed with {}: {}", what, status, body)));
        }
        Ok(())
    }
}

#[async_trait]
impl SocialSink for GraphSink {
    async fn publish_photo(&self, image: Vec<u8>, caption: &str) -> Result<String> {
        let form = Self::photo_form(image)?.text("message", caption.to_string());
        let response = self
            .client
            .post(self.endpoint(&format!("{}/photos", self.page_id))?)
            .query(&[("access_token", self.access_token.as_str())])
            .multipart(form)
            .send()
            .await?;
        Self::expect_id(response, "photo upload").await
    }

    async fn comment(&self, post_id: &str, message: &str) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint(&format!("{}/comments", post_id))?)
            .query(&[("access_token", self.access_token.as_str())])
            .json(&json!({ "message": message }))
            .send()
            .await?;
        Self::expect_ok(response, "comment creation").await
    }

    async fn upload_unpublished(&self, image: Vec<u8>) -> Result<String> {
        let form = Self::photo_form(image)?.text("published", "false");
        let response = self
            .client
            .post(self.endpoint(&format!("{}/photos", self.page_id))?)
            .query(&[("access_token", self.access_token.as_str())])
            .multipart(form)
            .send()
            .await?;
        Self::expect_id(response, "unpublished photo upload").await
    }

    async fn publish_story(&self, photo_id: &str, link: &str) -> Result<String> {
        let response = self
            .client
            .post(self.endpoint(&format!("{}/photo_stories", self.page_id))?)
            .query(&[("access_token", self.access_token.as_str())])
            .json(&json!({ "photo_id": photo_id, "link": link }))
            .send()
            .await?;
        Self::expect_id(response, "story creation").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_under_versioned_base() {
        let sink = GraphSink::new(
            Url::parse("https://graph.facebook.com/v12.0").unwrap(),
            "1234".to_string(),
            "token".to_string(),
        );
        assert_eq!(
            sink.endpoint("1234/photos").unwrap().as_str(),
            "https://graph.facebook.com/v12.0/1234/photos"
        );
        assert_eq!(
            sink.endpoint("987_654/comments").unwrap().as_str(),
            "https://graph.facebook.com/v12.0/987_654/comments"
        );
    }

    #[test]
    fn test_id_response_shape() {
        let IdResponse { id } = serde_json::from_str(r#"{"id":"123_456","post_id":"789"}"#).unwrap();
        assert_eq!(id, "123_456");
    }
}
