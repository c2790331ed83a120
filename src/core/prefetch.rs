use crate::adapters::store_api::{StoreApiClient, DEFAULT_REQUEST_TIMEOUT};
use crate::config::EnvSnapshot;
use crate::domain::model::{CategoryPage, ProductPage, Region};
use crate::domain::ports::StorefrontData;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Empty storefront data, identical on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubStorefront;

#[async_trait]
impl StorefrontData for StubStorefront {
    async fn prefetch_categories(&self) -> Result<CategoryPage> {
        Ok(CategoryPage::default())
    }

    async fn prefetch_products(&self) -> Result<ProductPage> {
        Ok(ProductPage::default())
    }

    async fn prefetch_regions(&self) -> Result<Vec<Region>> {
        Ok(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Stub,
    Live {
        base_url: String,
        publishable_key: Option<String>,
    },
}

impl DataSource {
    /// Stub when pre-fetching is switched off or there is no backend to ask.
    pub fn select(env: &EnvSnapshot) -> Self {
        match (&env.backend_url, env.skip_prefetch) {
            (Some(base_url), false) => DataSource::Live {
                base_url: base_url.clone(),
                publishable_key: env.publishable_key.clone(),
            },
            _ => DataSource::Stub,
        }
    }

    pub fn provider(&self) -> Arc<dyn StorefrontData> {
        self.provider_with_timeout(DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn provider_with_timeout(&self, timeout: Duration) -> Arc<dyn StorefrontData> {
        match self {
            DataSource::Stub => Arc::new(StubStorefront),
            DataSource::Live {
                base_url,
                publishable_key,
            } => Arc::new(
                StoreApiClient::new(base_url.clone(), publishable_key.clone()).with_timeout(timeout),
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrefetchSummary {
    pub categories: u64,
    pub products: u64,
    pub regions: usize,
}

pub async fn summarize(data: &dyn StorefrontData) -> Result<PrefetchSummary> {
    Ok(PrefetchSummary {
        categories: data.prefetch_categories().await?.count,
        products: data.prefetch_products().await?.count,
        regions: data.prefetch_regions().await?.len(),
    })
}

/// CommonJS module exposing the three prefetch functions with the values
/// `data` returns. Written over the storefront's data modules during CI builds.
pub async fn render_stub_module(data: &dyn StorefrontData) -> Result<String> {
    let categories = serde_json::to_string(&data.prefetch_categories().await?)?;
    let products = serde_json::to_string(&data.prefetch_products().await?)?;
    let regions = serde_json::to_string(&data.prefetch_regions().await?)?;

    Ok(format!(
        "// Stub data for build\nmodule.exports = {{\n  prefetchCategories: () => ({}),\n  prefetchProducts: () => ({}),\n  prefetchRegions: () => ({})\n}};\n",
        categories, products, regions
    ))
}
