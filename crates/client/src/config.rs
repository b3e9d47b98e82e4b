//! Endpoint configuration.

/// Environment variable naming the API base URL.
pub const API_URL_ENV: &str = "PARLEY_API_URL";

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Where the chat API lives. The socket base is derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_base_url: String,
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        let api_base_url = api_base_url.into();
        let trimmed = api_base_url.trim().trim_end_matches('/');
        let api_base_url = if trimmed.is_empty() {
            DEFAULT_API_URL.to_string()
        } else {
            trimmed.to_string()
        };
        Self { api_base_url }
    }

    /// Read the base URL from `PARLEY_API_URL`.
    ///
    /// Desktop builds read it at runtime; web builds bake it in at compile
    /// time since the browser has no process environment.
    pub fn from_env() -> Self {
        #[cfg(target_arch = "wasm32")]
        let configured = option_env!("PARLEY_API_URL").map(str::to_string);
        #[cfg(not(target_arch = "wasm32"))]
        let configured = std::env::var(API_URL_ENV).ok();

        Self::new(configured.unwrap_or_else(|| DEFAULT_API_URL.to_string()))
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Construct an API URL for `path`. Absolute URLs pass through.
    pub fn api_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.api_base_url, path)
    }

    /// Construct a WebSocket URL for `path`.
    pub fn ws_url(&self, path: &str) -> String {
        http_to_ws(&self.api_url(path))
    }

    /// Socket URL for a channel, carrying the token as a query credential.
    pub fn channel_ws_url(&self, channel_id: i64, token: Option<&str>) -> String {
        let base = self.ws_url(&format!("/ws/{channel_id}"));
        match token {
            Some(token) => format!("{base}?token={}", urlencoding::encode(token)),
            None => base,
        }
    }

    /// Resolve a file URL returned by the upload endpoint, which may be
    /// relative to the API.
    pub fn file_url(&self, file_url: &str) -> String {
        self.api_url(file_url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

/// Convert HTTP/HTTPS URL to WS/WSS
fn http_to_ws(url: &str) -> String {
    if url.starts_with("https://") {
        url.replacen("https://", "wss://", 1)
    } else if url.starts_with("http://") {
        url.replacen("http://", "ws://", 1)
    } else {
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_paths_without_double_slashes() {
        let config = ClientConfig::new("http://localhost:8000/");
        assert_eq!(config.api_url("/servers/"), "http://localhost:8000/servers/");
        assert_eq!(config.api_url("token"), "http://localhost:8000/token");
        assert_eq!(config.api_url("https://cdn.example/x.png"), "https://cdn.example/x.png");
    }

    #[test]
    fn channel_socket_url_swaps_scheme_and_encodes_token() {
        let config = ClientConfig::new("https://chat.example");
        assert_eq!(
            config.channel_ws_url(42, Some("a b+c")),
            "wss://chat.example/ws/42?token=a%20b%2Bc"
        );

        let local = ClientConfig::default();
        assert_eq!(local.channel_ws_url(1, None), "ws://127.0.0.1:8000/ws/1");
    }

    #[test]
    fn blank_base_falls_back_to_default() {
        assert_eq!(ClientConfig::new("  ").api_base_url(), DEFAULT_API_URL);
    }
}
