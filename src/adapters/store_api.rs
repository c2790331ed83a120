use crate::adapters::http::{decode_json, join_url};
use crate::domain::model::{CategoryPage, ProductPage, Region};
use crate::domain::ports::StorefrontData;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const PUBLISHABLE_KEY_HEADER: &str = "x-publishable-api-key";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Live storefront data read from the Medusa Store API.
#[derive(Debug, Clone)]
pub struct StoreApiClient {
    base_url: String,
    publishable_key: Option<String>,
    timeout: Duration,
    client: Client,
}

#[derive(Deserialize)]
struct RegionList {
    regions: Vec<Region>,
}

impl StoreApiClient {
    pub fn new(base_url: impl Into<String>, publishable_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            publishable_key,
            timeout: DEFAULT_REQUEST_TIMEOUT,
            client: Client::new(),
        }
    }

    /// Per-request limit; a backend that accepts but never answers fails after this.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let url = join_url(&self.base_url, path);
        tracing::debug!("Store API request: GET {}", url);
        let request = self.client.get(url).timeout(self.timeout);
        match &self.publishable_key {
            Some(key) => request.header(PUBLISHABLE_KEY_HEADER, key),
            None => request,
        }
    }
}

#[async_trait]
impl StorefrontData for StoreApiClient {
    async fn prefetch_categories(&self) -> Result<CategoryPage> {
        decode_json(self.get("/store/collections").send().await?).await
    }

    async fn prefetch_products(&self) -> Result<ProductPage> {
        decode_json(self.get("/store/products").send().await?).await
    }

    async fn prefetch_regions(&self) -> Result<Vec<Region>> {
        let list: RegionList = decode_json(self.get("/store/regions").send().await?).await?;
        Ok(list.regions)
    }
}
