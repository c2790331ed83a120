// Adapters layer: concrete clients for the systems this crate talks to over HTTP.

pub mod admin_api;
pub mod http;
pub mod resend;
pub mod store_api;
