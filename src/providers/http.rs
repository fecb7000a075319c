use crate::providers::error::ProviderError;
use log::{debug, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// GETs `url` with `query` and decodes the JSON body.
///
/// Only `url` (no query string) is logged or stored in errors, since the
/// query may carry an API key. `reqwest` errors are stripped of their URL for
/// the same reason.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    query: &[(&str, String)],
) -> Result<T, ProviderError> {
    debug!("GET {}", url);

    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| ProviderError::NetworkRequest(url.to_string(), e.without_url()))?;

    let response = match response.error_for_status() {
        Ok(resp) => resp,
        Err(e) => {
            let e = e.without_url();
            warn!("HTTP error for {}: {}", url, e);
            return Err(if let Some(status) = e.status() {
                ProviderError::HttpStatus {
                    url: url.to_string(),
                    status,
                    source: e,
                }
            } else {
                ProviderError::NetworkRequest(url.to_string(), e)
            });
        }
    };

    let body = response
        .bytes()
        .await
        .map_err(|e| ProviderError::NetworkRequest(url.to_string(), e.without_url()))?;

    serde_json::from_slice(&body).map_err(|e| ProviderError::JsonParse {
        url: url.to_string(),
        source: e,
    })
}
