use log::debug;
use serde::de::DeserializeOwned;
use ustr::Ustr;

use super::model::{ListUsersResponse, MutationResponse, UpdateStatusRequest, UserId};
use crate::BusinessConfig;
use crate::error::ApiError;
use crate::http::{Client, RequestBuilder, Response};
use crate::session::SessionCredentials;

/// Authenticated client for the `/api/user` endpoints.
#[derive(Debug, Clone)]
pub struct UsersClient {
    api_url: Ustr,
    credentials: SessionCredentials,
}

impl UsersClient {
    pub fn new(config: &BusinessConfig, credentials: SessionCredentials) -> Self {
        Self {
            api_url: config.api_url(),
            credentials,
        }
    }

    pub fn list_url(&self, status: Option<bool>) -> String {
        match status {
            Some(active) => format!("{}/user?status={}", self.api_url, u8::from(active)),
            None => format!("{}/user", self.api_url),
        }
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("Accept", "application/json")
            .bearer(&self.credentials.token)
            .header("company_id", self.credentials.company_id.as_str())
    }

    /// `GET /api/user`, optionally narrowed by `?status=0|1`.
    pub async fn list(&self, status: Option<bool>) -> Result<ListUsersResponse, ApiError> {
        let url = self.list_url(status);
        debug!("Fetching users from {url}");

        let response = self.authorized(Client::get(url)).send().await?;
        decode(&response)
    }

    /// `POST /api/user/{id}/status` with the new state as `0`/`1`.
    pub async fn update_status(
        &self,
        id: UserId,
        active: bool,
    ) -> Result<MutationResponse, ApiError> {
        let url = format!("{}/user/{id}/status", self.api_url);
        debug!("Setting user {id} status to {active}");

        let response = self
            .authorized(Client::post(url))
            .json(&UpdateStatusRequest::new(active))
            .map_err(|e| ApiError::Transport(format!("failed to encode status request: {e}")))?
            .send()
            .await?;
        decode_mutation(&response)
    }

    /// `DELETE /api/user/{id}`.
    pub async fn delete(&self, id: UserId) -> Result<MutationResponse, ApiError> {
        let url = format!("{}/user/{id}", self.api_url);
        debug!("Deleting user {id}");

        let response = self.authorized(Client::delete(url)).send().await?;
        decode_mutation(&response)
    }
}

fn decode<T: DeserializeOwned>(response: &Response) -> Result<T, ApiError> {
    if !response.is_success() {
        return Err(ApiError::from_response(response));
    }
    response.json().map_err(|e| ApiError::Decode(e.to_string()))
}

/// A 2xx with no body counts as confirmed.
fn decode_mutation(response: &Response) -> Result<MutationResponse, ApiError> {
    if response.is_success() && response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(MutationResponse::confirmed());
    }
    decode(response)
}
