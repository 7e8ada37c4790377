use std::time::Duration;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::models::remote::{CreateMoodBody, RemoteAck, RemoteMoodRecord};

/// Remote store port. Implementations attach the caller-supplied bearer
/// credential to every request; an absent credential is passed through
/// unmodified and rejected by the remote, not here. No retries — retry
/// policy, if any, belongs to the caller.
#[async_trait]
pub trait MoodApi: Send + Sync {
    async fn create(&self, body: CreateMoodBody, token: Option<&str>) -> CoreResult<RemoteAck>;
    async fn delete(&self, id: &str, token: Option<&str>) -> CoreResult<RemoteAck>;
    async fn list(&self, token: Option<&str>) -> CoreResult<Vec<RemoteMoodRecord>>;
}

/// reqwest-backed adapter for the mood API:
/// `POST /mood`, `GET /mood`, `DELETE /mood/{id}`.
pub struct HttpMoodApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMoodApi {
    pub fn new(config: &Config) -> CoreResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn with_bearer(
        request: reqwest::RequestBuilder,
        token: Option<&str>,
    ) -> reqwest::RequestBuilder {
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Non-success statuses become a typed failure with the body captured,
    /// so auth rejections and server errors read the same way upstream.
    async fn check(response: reqwest::Response) -> CoreResult<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CoreError::Remote {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl MoodApi for HttpMoodApi {
    async fn create(&self, body: CreateMoodBody, token: Option<&str>) -> CoreResult<RemoteAck> {
        let request = self
            .client
            .post(format!("{}/mood", self.base_url))
            .json(&body);
        let response = Self::with_bearer(request, token).send().await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    async fn delete(&self, id: &str, token: Option<&str>) -> CoreResult<RemoteAck> {
        let request = self.client.delete(format!("{}/mood/{}", self.base_url, id));
        let response = Self::with_bearer(request, token).send().await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    async fn list(&self, token: Option<&str>) -> CoreResult<Vec<RemoteMoodRecord>> {
        let request = self.client.get(format!("{}/mood", self.base_url));
        let response = Self::with_bearer(request, token).send().await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }
}
