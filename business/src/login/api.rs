use std::time::Duration;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::BusinessConfig;
use crate::error::ApiError;
use crate::http::Client;

/// Sent when the public address cannot be resolved.
pub const LOOPBACK_IP: &str = "127.0.0.1";

const IP_LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);

/// Body of `POST /api/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IpLookup {
    ip: String,
}

/// Best-effort public IP of the caller. Any failure yields [`LOOPBACK_IP`].
pub async fn resolve_public_ip(config: &BusinessConfig) -> String {
    if !config.resolve_public_ip {
        return LOOPBACK_IP.to_owned();
    }

    let response = Client::get(config.ip_lookup_url.as_str())
        .timeout(IP_LOOKUP_TIMEOUT)
        .send()
        .await;

    match response {
        Ok(response) if response.is_success() => match response.json::<IpLookup>() {
            Ok(lookup) if !lookup.ip.trim().is_empty() => {
                debug!("Resolved public IP {}", lookup.ip);
                lookup.ip
            }
            Ok(_) => {
                warn!("IP lookup returned an empty address");
                LOOPBACK_IP.to_owned()
            }
            Err(e) => {
                warn!("IP lookup returned an unreadable body: {e}");
                LOOPBACK_IP.to_owned()
            }
        },
        Ok(response) => {
            warn!("IP lookup failed with status {}", response.status);
            LOOPBACK_IP.to_owned()
        }
        Err(e) => {
            warn!("IP lookup failed: {e}");
            LOOPBACK_IP.to_owned()
        }
    }
}

/// Posts credentials and returns the raw 2xx body for branching.
pub async fn submit_login(
    config: &BusinessConfig,
    request: &LoginRequest,
) -> Result<Value, ApiError> {
    let url = format!("{}/login", config.api_url());

    let response = Client::post(url)
        .header("Accept", "application/json")
        .json(request)
        .map_err(|e| ApiError::Transport(format!("failed to encode login request: {e}")))?
        .send()
        .await?;

    if !response.is_success() {
        return Err(ApiError::from_response(&response));
    }

    response
        .json::<Value>()
        .map_err(|e| ApiError::Decode(e.to_string()))
}
