use crate::domain::model::{
    CategoryPage, Invite, NotificationReceipt, NotificationRequest, ProductPage, Region,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Invite lookups in the commerce backend's user module.
#[async_trait]
pub trait UserModule: Send + Sync {
    async fn retrieve_invite(&self, id: &str) -> Result<Invite>;
}

/// The commerce backend's notification module.
#[async_trait]
pub trait NotificationModule: Send + Sync {
    async fn create_notification(&self, request: NotificationRequest) -> Result<NotificationReceipt>;
}

/// Data-fetch seam for storefront pre-fetching. Builds without a reachable
/// backend select the stub implementation.
#[async_trait]
pub trait StorefrontData: Send + Sync {
    async fn prefetch_categories(&self) -> Result<CategoryPage>;
    async fn prefetch_products(&self) -> Result<ProductPage>;
    async fn prefetch_regions(&self) -> Result<Vec<Region>>;
}
