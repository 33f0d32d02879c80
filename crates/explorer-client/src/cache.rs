//! Client-side cache: server results plus the fields resolved locally.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use explorer_types::LocalState;

pub const IS_LOGGED_IN_FIELD: &str = "isLoggedIn";
pub const CART_ITEMS_FIELD: &str = "cartItems";

#[derive(Debug, Default)]
pub struct ClientCache {
    local: RwLock<LocalState>,
    results: RwLock<HashMap<String, serde_json::Value>>,
}

impl ClientCache {
    pub fn new(initial: LocalState) -> Self {
        Self {
            local: RwLock::new(initial),
            results: RwLock::new(HashMap::new()),
        }
    }

    pub fn local(&self) -> LocalState {
        self.local
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.local
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_logged_in
    }

    pub fn set_logged_in(&self, isLoggedIn: bool) {
        self.local
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .is_logged_in = isLoggedIn;
    }

    /// Answers a client-only field, or `None` if the field is not local.
    pub fn resolve_local(&self, field: &str) -> Option<serde_json::Value> {
        let local = self.local.read().unwrap_or_else(PoisonError::into_inner);
        match field {
            IS_LOGGED_IN_FIELD => Some(serde_json::Value::Bool(local.is_logged_in)),
            CART_ITEMS_FIELD => Some(serde_json::Value::from(local.cart_items.clone())),
            _ => None,
        }
    }

    pub fn cart_items(&self) -> Vec<String> {
        self.local
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .cart_items
            .clone()
    }

    /// Returns false if the launch was already in the cart.
    pub fn add_to_cart(&self, launchId: &str) -> bool {
        let mut local = self.local.write().unwrap_or_else(PoisonError::into_inner);
        if local.cart_items.iter().any(|id| id == launchId) {
            return false;
        }
        local.cart_items.push(launchId.to_string());
        true
    }

    pub fn remove_from_cart(&self, launchId: &str) -> bool {
        let mut local = self.local.write().unwrap_or_else(PoisonError::into_inner);
        let before = local.cart_items.len();
        local.cart_items.retain(|id| id != launchId);
        local.cart_items.len() != before
    }

    pub fn clear_cart(&self) {
        self.local
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .cart_items
            .clear();
    }

    pub fn read_result(&self, key: &str) -> Option<serde_json::Value> {
        self.results
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn write_result(&self, key: String, data: serde_json::Value) {
        self.results
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, data);
    }

    pub fn evict_results(&self) {
        self.results
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Back to a logged-out, empty cache.
    pub fn reset(&self) {
        *self.local.write().unwrap_or_else(PoisonError::into_inner) = LocalState::default();
        self.evict_results();
    }
}

/// Key for a cached result: operation name plus its variables.
pub fn result_key(operationName: &str, variables: &serde_json::Value) -> String {
    format!("{operationName}:{variables}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_local_fields() {
        let cache = ClientCache::new(LocalState::logged_in(true));
        cache.add_to_cart("42");

        assert_eq!(cache.resolve_local("isLoggedIn"), Some(serde_json::json!(true)));
        assert_eq!(cache.resolve_local("cartItems"), Some(serde_json::json!(["42"])));
        assert_eq!(cache.resolve_local("launches"), None);
    }

    #[test]
    fn cart_add_is_idempotent() {
        let cache = ClientCache::default();
        assert!(cache.add_to_cart("1"));
        assert!(!cache.add_to_cart("1"));
        assert!(cache.add_to_cart("2"));
        assert_eq!(cache.cart_items(), vec!["1", "2"]);

        assert!(cache.remove_from_cart("1"));
        assert!(!cache.remove_from_cart("1"));
        assert_eq!(cache.cart_items(), vec!["2"]);
    }

    #[test]
    fn reset_logs_out_and_drops_results() {
        let cache = ClientCache::new(LocalState::logged_in(true));
        cache.add_to_cart("7");
        cache.write_result("GetLaunches:{}".into(), serde_json::json!({ "launches": [] }));

        cache.reset();

        assert!(!cache.is_logged_in());
        assert!(cache.cart_items().is_empty());
        assert_eq!(cache.read_result("GetLaunches:{}"), None);
    }

    #[test]
    fn result_key_includes_variables() {
        let first = result_key("GetLaunches", &serde_json::json!({ "after": null }));
        let second = result_key("GetLaunches", &serde_json::json!({ "after": "10" }));
        assert_ne!(first, second);
    }
}
