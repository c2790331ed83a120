use crate::utils::error::{GlueError, Result};
use serde::de::DeserializeOwned;

/// Decodes a JSON body, turning non-2xx responses into `ProviderError`.
pub async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    tracing::debug!("Response status: {}", status);

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(GlueError::ProviderError {
            status: status.as_u16(),
            message,
        });
    }

    Ok(response.json::<T>().await?)
}

pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
