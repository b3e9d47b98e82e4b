//! HTTP API client with bearer-token authentication.

use parley_shared::{
    ApiError, Channel, CreateChannelRequest, CreateServerRequest, HistoryRecord, LoginForm,
    RegisterRequest, Server, TokenResponse, UploadResponse, User,
};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth_session::bearer_headers;
use crate::config::ClientConfig;

/// HTTP client for the chat API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            token: None,
        }
    }

    /// Attach (or clear) the bearer token sent with every request
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn url(&self, path: &str) -> String {
        self.config.api_url(path)
    }

    fn authorize(&self, rb: RequestBuilder) -> RequestBuilder {
        rb.headers(bearer_headers(self.token.as_deref()))
    }

    /// Send a request and decode the JSON response.
    async fn send<TRes: DeserializeOwned>(&self, rb: RequestBuilder) -> Result<TRes, ApiError> {
        let resp = self
            .authorize(rb)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        let is_success = resp.status().is_success();
        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("failed to read body: {e}")))?;

        if !is_success {
            return Err(ApiError::Http { status, body: text });
        }

        if text.is_empty() {
            serde_json::from_str("null").map_err(|e| ApiError::Deserialize(e.to_string()))
        } else {
            serde_json::from_str(&text).map_err(|e| ApiError::Deserialize(e.to_string()))
        }
    }

    /// Make an authenticated GET request
    pub async fn get_json<TRes: DeserializeOwned>(&self, path: &str) -> Result<TRes, ApiError> {
        self.send(self.client.get(self.url(path))).await
    }

    /// Make an authenticated POST request with JSON body
    pub async fn post_json<TReq: Serialize, TRes: DeserializeOwned>(
        &self,
        path: &str,
        body: &TReq,
    ) -> Result<TRes, ApiError> {
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    /// Make a POST request with a form-encoded body
    pub async fn post_form<TReq: Serialize, TRes: DeserializeOwned>(
        &self,
        path: &str,
        body: &TReq,
    ) -> Result<TRes, ApiError> {
        self.send(self.client.post(self.url(path)).form(body)).await
    }

    // --- Auth ---

    /// Exchange credentials for an access token. The email travels in the
    /// `username` field.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let form = LoginForm {
            username: email.to_string(),
            password: password.to_string(),
        };
        self.post_form("/token", &form).await
    }

    pub async fn register(&self, req: &RegisterRequest) -> Result<User, ApiError> {
        self.post_json("/register/", req).await
    }

    // --- Servers & channels ---

    /// Servers owned by or visible to the current user
    pub async fn list_servers(&self) -> Result<Vec<Server>, ApiError> {
        self.get_json("/servers/").await
    }

    pub async fn create_server(&self, name: &str) -> Result<Server, ApiError> {
        let req = CreateServerRequest {
            name: name.to_string(),
        };
        self.post_json("/servers/", &req).await
    }

    pub async fn list_channels(&self, server_id: i64) -> Result<Vec<Channel>, ApiError> {
        self.get_json(&format!("/servers/{server_id}/channels/")).await
    }

    pub async fn create_channel(&self, server_id: i64, name: &str) -> Result<Channel, ApiError> {
        let req = CreateChannelRequest {
            name: name.to_string(),
        };
        self.post_json(&format!("/servers/{server_id}/channels/"), &req)
            .await
    }

    // --- Messages & files ---

    /// Stored history of a channel, oldest first
    pub async fn channel_messages(&self, channel_id: i64) -> Result<Vec<HistoryRecord>, ApiError> {
        self.get_json(&format!("/channels/{channel_id}/messages")).await
    }

    /// Upload a file to a channel, returning where it can be fetched from
    pub async fn upload_file(
        &self,
        channel_id: i64,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<UploadResponse, ApiError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().part("file", part);
        let rb = self
            .client
            .post(self.url(&format!("/channels/{channel_id}/upload/")))
            .multipart(form);
        self.send(rb).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_carry_bearer_header_only_with_token() {
        let anonymous = ApiClient::default();
        let req = anonymous
            .authorize(anonymous.client.get(anonymous.url("/servers/")))
            .build()
            .unwrap();
        assert!(req.headers().get(reqwest::header::AUTHORIZATION).is_none());
        assert_eq!(req.url().as_str(), "http://127.0.0.1:8000/servers/");

        let authed = ApiClient::default().with_token(Some("tok".to_string()));
        let req = authed
            .authorize(authed.client.get(authed.url("/channels/5/messages")))
            .build()
            .unwrap();
        assert_eq!(
            req.headers().get(reqwest::header::AUTHORIZATION).unwrap(),
            "Bearer tok"
        );
        assert_eq!(req.url().path(), "/channels/5/messages");
    }
}
