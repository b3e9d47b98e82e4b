//! Authentication session management with persistent token storage.

use dioxus::prelude::*;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

use crate::api_client::ApiClient;
use crate::config::ClientConfig;
use crate::storage::{KeyValueStore, PlatformStore};

/// Storage key the token is persisted under.
pub const TOKEN_KEY: &str = "token";

/// The token holder, independent of any UI runtime.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthSession {
    token: Option<String>,
}

impl AuthSession {
    /// Load the persisted token, if any.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let token = store.get(TOKEN_KEY).filter(|t| !t.is_empty());
        Self { token }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Replace the token and mirror it to `store`: written when present,
    /// deleted when `None`. An empty token counts as `None`.
    pub fn set_token(&mut self, store: &dyn KeyValueStore, token: Option<String>) {
        let token = token.filter(|t| !t.is_empty());
        match token.as_deref() {
            Some(t) => {
                if !store.set(TOKEN_KEY, t) {
                    crate::log_warn!("Failed to persist auth token");
                }
            }
            None => store.remove(TOKEN_KEY),
        }
        self.token = token;
    }

    /// `Authorization: Bearer <token>` when a token is present, empty otherwise.
    pub fn auth_headers(&self) -> HeaderMap {
        bearer_headers(self.token())
    }
}

pub(crate) fn bearer_headers(token: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Some(token) = token {
        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(value) => {
                headers.insert(AUTHORIZATION, value);
            }
            Err(_) => crate::log_warn!("Auth token is not a valid header value"),
        }
    }
    headers
}

/// Authentication context provided to the app
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub session: Signal<AuthSession>,
    pub config: Signal<ClientConfig>,
}

/// Provider component that sets up auth context
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let session = use_signal(|| AuthSession::load(&PlatformStore));
    let config = use_signal(ClientConfig::from_env);

    use_context_provider(|| AuthContext { session, config });

    children
}

impl AuthContext {
    /// Store a freshly issued token.
    pub fn set_token(&mut self, token: Option<String>) {
        self.session.write().set_token(&PlatformStore, token);
    }

    /// Logout and clear the persisted token
    pub fn logout(&mut self) {
        self.set_token(None);
    }

    pub fn token(&self) -> Option<String> {
        self.session.read().token().map(str::to_string)
    }

    /// Check if user is authenticated
    pub fn is_authenticated(&self) -> bool {
        self.session.read().token().is_some()
    }

    /// Create an API client configured for the current session
    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.config.read().clone()).with_token(self.token())
    }

    /// Socket URL for a channel under the current session.
    pub fn channel_ws_url(&self, channel_id: i64) -> String {
        let token = self.token();
        self.config.read().channel_ws_url(channel_id, token.as_deref())
    }

    /// Absolute URL for an uploaded file.
    pub fn file_url(&self, file_url: &str) -> String {
        self.config.read().file_url(file_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn set_token_is_readable_and_persisted() {
        let store = MemoryStore::new();
        let mut session = AuthSession::load(&store);
        assert_eq!(session.token(), None);

        for token in ["abc", "eyJhbGciOi.payload.sig", "x"] {
            session.set_token(&store, Some(token.to_string()));
            assert_eq!(session.token(), Some(token));
            assert_eq!(store.get(TOKEN_KEY).as_deref(), Some(token));
        }
    }

    #[test]
    fn clearing_token_removes_persisted_value() {
        let store = MemoryStore::new();
        let mut session = AuthSession::default();
        session.set_token(&store, Some("abc".to_string()));
        session.set_token(&store, None);

        assert_eq!(session.token(), None);
        assert_eq!(store.get(TOKEN_KEY), None);
    }

    #[test]
    fn empty_token_clears_session_and_storage() {
        let store = MemoryStore::new();
        let mut session = AuthSession::default();
        session.set_token(&store, Some("abc".to_string()));
        session.set_token(&store, Some(String::new()));

        assert_eq!(session.token(), None);
        assert_eq!(store.get(TOKEN_KEY), None);
    }

    #[test]
    fn load_restores_persisted_token() {
        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "persisted");
        assert_eq!(AuthSession::load(&store).token(), Some("persisted"));

        store.set(TOKEN_KEY, "");
        assert_eq!(AuthSession::load(&store).token(), None);
    }

    #[test]
    fn auth_headers_follow_token_presence() {
        let store = MemoryStore::new();
        let mut session = AuthSession::default();
        assert!(session.auth_headers().is_empty());

        session.set_token(&store, Some("t0k".to_string()));
        let headers = session.auth_headers();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer t0k");
    }
}
