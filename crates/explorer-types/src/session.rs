use serde::{Deserialize, Serialize};

/// Client-only state answered from the cache, never from the network.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LocalState {
    pub is_logged_in: bool,
    pub cart_items: Vec<String>,
}

impl LocalState {
    pub fn logged_in(is_logged_in: bool) -> Self {
        Self {
            is_logged_in,
            cart_items: Vec::new(),
        }
    }
}
