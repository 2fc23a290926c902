pub mod forecast;

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings;

fn api_base() -> String {
    settings::get_settings().api_base_url()
}

/// Everything a fetch can fail with. Callers always get one of these back
/// instead of an unhandled rejection, and the UI decides how to show it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Transport failure or a non-2xx response from the backend.
    #[error("request failed: {0}")]
    Network(String),

    /// The response arrived but did not have the expected JSON shape.
    #[error("unexpected response from server: {0}")]
    InvalidResponse(String),

    /// Input rejected locally, before any network call was made.
    #[error("{0}")]
    InvalidInput(String),
}

/// FastAPI-style error body on non-2xx responses.
#[derive(Debug, Deserialize, Serialize)]
struct ErrorDetail {
    detail: String,
}

/// Common GET request handler
pub async fn get<T>(endpoint: &str) -> Result<T, ApiError>
where
    T: for<'de> Deserialize<'de>,
{
    let url = format!("{}{}", api_base(), endpoint);
    log::debug!("GET request to: {}", url);

    let response = Request::get(&url).send().await.map_err(|e| {
        log::error!("GET {} - request failed: {}", endpoint, e);
        ApiError::Network(e.to_string())
    })?;

    if !response.ok() {
        log::error!("GET {} - HTTP error: {}", endpoint, response.status());
        return Err(ApiError::Network(format!("HTTP {}", response.status())));
    }

    log::trace!("GET {} - response received, parsing JSON", endpoint);
    let body: T = response.json().await.map_err(|e| {
        log::error!("GET {} - failed to parse response: {}", endpoint, e);
        ApiError::InvalidResponse(e.to_string())
    })?;

    log::info!("GET {} - success", endpoint);
    Ok(body)
}

/// Common POST request handler
pub async fn post<T, B>(endpoint: &str, body: &B) -> Result<T, ApiError>
where
    T: for<'de> Deserialize<'de>,
    B: Serialize,
{
    let url = format!("{}{}", api_base(), endpoint);
    log::debug!("POST request to: {}", url);

    let response = Request::post(&url)
        .json(body)
        .map_err(|e| {
            log::error!("POST {} - failed to encode request body: {}", endpoint, e);
            ApiError::InvalidInput(format!("failed to encode request body: {}", e))
        })?
        .send()
        .await
        .map_err(|e| {
            log::error!("POST {} - request failed: {}", endpoint, e);
            ApiError::Network(e.to_string())
        })?;

    if !response.ok() {
        let status = response.status();
        log::warn!("POST {} - non-OK response: {}", endpoint, status);
        let detail: Result<ErrorDetail, _> = response.json().await;
        return Err(match detail {
            Ok(err) => {
                log::error!("POST {} - API error: {}", endpoint, err.detail);
                ApiError::Network(err.detail)
            }
            Err(_) => {
                log::error!("POST {} - HTTP error: {}", endpoint, status);
                ApiError::Network(format!("HTTP {}", status))
            }
        });
    }

    log::trace!("POST {} - response received, parsing JSON", endpoint);
    let body: T = response.json().await.map_err(|e| {
        log::error!("POST {} - failed to parse response: {}", endpoint, e);
        ApiError::InvalidResponse(e.to_string())
    })?;

    log::info!("POST {} - success", endpoint);
    Ok(body)
}
