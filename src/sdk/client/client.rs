//! Core PixelHub client implementation

use super::types::ApiEnvelope;
use crate::config::{ClientConfig, MAX_PAGE_SIZE, default_page_size};
use crate::utils::error::{PixelHubError, Result};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;

/// HTTP client for the PixelHub REST API
#[derive(Debug, Clone)]
pub struct PixelHubClient {
    pub(crate) config: ClientConfig,
    pub(crate) api_root: Url,
    pub(crate) http_client: reqwest::Client,
    pub(crate) page_size: u32,
}

impl PixelHubClient {
    /// Create a new client
    pub fn new(config: ClientConfig) -> Result<Self> {
        let api_root = Url::parse(&config.api_root())?;
        if api_root.cannot_be_a_base() {
            return Err(PixelHubError::configuration(format!(
                "Base URL cannot carry API paths: {}",
                config.base_url
            )));
        }

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout_duration())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                PixelHubError::configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        info!("PixelHubClient created for {}", api_root);

        Ok(Self {
            config,
            api_root,
            http_client,
            page_size: default_page_size(),
        })
    }

    /// Page size used by [`list_all_item_ids`](crate::core::ImageService::list_all_item_ids)
    ///
    /// Values outside `1..=100` are clamped.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// Get configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Absolute URL of an API route given as path segments
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_root.clone();
        url.path_segments_mut()
            .map_err(|_| PixelHubError::configuration("Base URL cannot carry API paths"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request and unwrap the response envelope
    ///
    /// Non-2xx statuses and envelope codes outside `200..300` become
    /// [`PixelHubError::Api`]; the envelope message is used when present.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Option<T>> {
        let response = request.send().await.map_err(PixelHubError::from_transport)?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(PixelHubError::from_transport)?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&body)
                .ok()
                .map(|envelope| envelope.message)
                .filter(|message| !message.is_empty())
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_default();
            warn!("PixelHub API error: {} - {}", status, message);
            return Err(PixelHubError::api(status.as_u16(), message));
        }

        let envelope: ApiEnvelope<T> = serde_json::from_str(&body)
            .map_err(|e| PixelHubError::parsing(format!("Invalid response body: {}", e)))?;

        if !envelope.is_success() {
            warn!(
                "PixelHub API rejected request: {} - {}",
                envelope.code, envelope.message
            );
            return Err(PixelHubError::api(envelope.code, envelope.message));
        }

        debug!("PixelHub API: {}", envelope.message);
        Ok(envelope.data)
    }

    /// Like [`execute`](Self::execute) but requires the envelope to carry data
    pub(crate) async fn execute_data<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T> {
        self.execute(request)
            .await?
            .ok_or_else(|| PixelHubError::parsing("Response carried no data"))
    }
}
