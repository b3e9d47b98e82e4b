//! Cross-platform key/value storage.
//!
//! Provides a unified API for persistent storage:
//! - Web: `localStorage`
//! - Desktop: one file per key in the platform-appropriate config directory:
//!   - Linux: `~/.config/parley/`
//!   - macOS: `~/Library/Application Support/parley/`
//!   - Windows: `%APPDATA%\parley\`
//!
//! Values are stored as raw strings so the web build shares the `token` key
//! format with any other client of the same origin.

use std::cell::RefCell;
use std::collections::HashMap;

/// A string key/value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    /// Returns `true` if the write succeeded.
    fn set(&self, key: &str, value: &str) -> bool;
    fn remove(&self, key: &str);
}

/// The platform's persistent storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformStore;

impl KeyValueStore for PlatformStore {
    fn get(&self, key: &str) -> Option<String> {
        load_raw(key)
    }

    fn set(&self, key: &str, value: &str) -> bool {
        save_raw(key, value)
    }

    fn remove(&self, key: &str) {
        remove_raw(key);
    }
}

/// Volatile store, used when nothing should touch disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

// =========================================
// Web (WASM) implementation
// =========================================

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

#[cfg(target_arch = "wasm32")]
fn save_raw(key: &str, value: &str) -> bool {
    match local_storage() {
        Some(storage) => storage.set_item(key, value).is_ok(),
        None => false,
    }
}

#[cfg(target_arch = "wasm32")]
fn load_raw(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok()?
}

#[cfg(target_arch = "wasm32")]
fn remove_raw(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

// =========================================
// Desktop (native) implementation
// =========================================

#[cfg(not(target_arch = "wasm32"))]
fn get_config_dir() -> Option<std::path::PathBuf> {
    let app_dir = dirs::config_dir()?.join("parley");

    if !app_dir.exists() {
        std::fs::create_dir_all(&app_dir).ok()?;
    }

    Some(app_dir)
}

#[cfg(not(target_arch = "wasm32"))]
fn sanitize_key(key: &str) -> String {
    key.replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|'], "_")
}

#[cfg(not(target_arch = "wasm32"))]
fn get_file_path(key: &str) -> Option<std::path::PathBuf> {
    Some(get_config_dir()?.join(sanitize_key(key)))
}

#[cfg(not(target_arch = "wasm32"))]
fn save_raw(key: &str, value: &str) -> bool {
    let Some(path) = get_file_path(key) else {
        return false;
    };
    std::fs::write(path, value).is_ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn load_raw(key: &str) -> Option<String> {
    let path = get_file_path(key)?;
    std::fs::read_to_string(path).ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn remove_raw(key: &str) {
    if let Some(path) = get_file_path(key) {
        let _ = std::fs::remove_file(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_and_removes() {
        let store = MemoryStore::new();
        assert_eq!(store.get("token"), None);
        assert!(store.set("token", "abc"));
        assert_eq!(store.get("token").as_deref(), Some("abc"));
        store.remove("token");
        assert_eq!(store.get("token"), None);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn file_names_are_sanitized() {
        assert_eq!(sanitize_key("a/b:c"), "a_b_c");
        assert_eq!(sanitize_key("token"), "token");
    }
}
