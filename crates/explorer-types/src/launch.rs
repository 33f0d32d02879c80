use serde::{Deserialize, Serialize};

/// One launch, flattened from the `launches` query for display.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LaunchSummary {
    pub id: String,
    pub site: Option<String>,
    pub mission_name: Option<String>,
    pub mission_patch: Option<String>,
    pub rocket_name: Option<String>,
    pub is_booked: bool,
}

impl LaunchSummary {
    pub fn title(&self) -> String {
        self.mission_name
            .clone()
            .unwrap_or_else(|| format!("Launch {}", self.id))
    }
}

/// A page of launches plus the cursor to fetch the next one.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LaunchPage {
    pub cursor: String,
    pub has_more: bool,
    pub launches: Vec<LaunchSummary>,
}
