pub mod build;
pub mod events;
pub mod notifier;
pub mod prefetch;
pub mod subscriber;
pub mod templates;

pub use crate::domain::model::Delivery;
pub use crate::domain::ports::{NotificationModule, StorefrontData, UserModule};
pub use crate::utils::error::Result;
