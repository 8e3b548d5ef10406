//! Low-level HTTP helpers shared by the platform adapters.

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::Client;

use crate::error::ScraperError;

/// Builds the HTTP client used by an adapter.
///
/// # Errors
///
/// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
/// cannot be constructed.
pub fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, ScraperError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Sends a GET request, asserts a 2xx status, and parses the body as JSON.
///
/// # Errors
///
/// - [`ScraperError::Http`] on network failure.
/// - [`ScraperError::UnexpectedStatus`] on a non-2xx status.
/// - [`ScraperError::Deserialize`] if the body is not valid JSON.
pub(crate) async fn fetch_json(
    client: &Client,
    url: &str,
    headers: HeaderMap,
) -> Result<serde_json::Value, ScraperError> {
    tracing::debug!(url, "GET");
    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT, "application/json")
        .headers(headers)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScraperError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ScraperError::Deserialize {
        context: url.to_owned(),
        source: e,
    })
}
