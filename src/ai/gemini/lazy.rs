use super::client::{GeminiHttpClient, DEFAULT_BASE_URL};
use super::types::{GenerateContentRequest, GenerateContentResponse};
use crate::ai::GenerativeModel;
use crate::config::{mask_key, KeySources};
use crate::Result;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::OnceCell;

/// Gemini handle built on first use and memoized afterwards.
///
/// The API key is resolved when the first request is made, so a missing key
/// fails that request with a configuration error before anything is sent.
/// A failed resolution leaves the cell empty; the next call tries again.
pub struct LazyGeminiClient {
    keys: KeySources,
    base_url: String,
    timeout: Duration,
    http: reqwest::Client,
    cell: OnceCell<GeminiHttpClient>,
}

impl LazyGeminiClient {
    pub fn new(keys: KeySources, timeout: Duration) -> Self {
        Self {
            keys,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout,
            http: reqwest::Client::new(),
            cell: OnceCell::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }

    pub async fn client(&self) -> Result<&GeminiHttpClient> {
        self.cell
            .get_or_try_init(|| async {
                let api_key = self.keys.resolve()?;
                tracing::info!("Initializing Gemini client with API key {}", mask_key(&api_key));
                Ok::<_, crate::Error>(
                    GeminiHttpClient::new_with_client(api_key, self.timeout, self.http.clone())
                        .with_base_url(self.base_url.clone()),
                )
            })
            .await
    }
}

#[async_trait]
impl GenerativeModel for LazyGeminiClient {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        self.client().await?.generate_content(model, request).await
    }
}
