use crate::catalog::types::Product;
use crate::error::FetchError;
use color_eyre::{eyre::eyre, Result};
use tracing::debug;
use url::Url;

/// HTTP data source for the product list.
///
/// One GET per call against a fixed endpoint. No query parameters are sent;
/// searching, sorting and paging all happen client-side.
#[derive(Clone, Debug)]
pub struct ProductClient {
  http: reqwest::Client,
  endpoint: Url,
}

impl ProductClient {
  pub fn new(endpoint: Url) -> Result<Self> {
    let http = reqwest::Client::builder()
      .user_agent(concat!("shopdash/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self { http, endpoint })
  }

  pub fn endpoint(&self) -> &Url {
    &self.endpoint
  }

  /// Fetch every product. A single attempt, no retries.
  pub async fn fetch_all(&self) -> Result<Vec<Product>, FetchError> {
    debug!(endpoint = %self.endpoint, "fetching products");

    let response = self
      .http
      .get(self.endpoint.clone())
      .send()
      .await
      .map_err(|e| FetchError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
      return Err(FetchError::Status(status.as_u16()));
    }

    let body = response
      .bytes()
      .await
      .map_err(|e| FetchError::Transport(e.to_string()))?;

    serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
  }
}
