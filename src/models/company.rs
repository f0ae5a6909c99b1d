use serde::{Deserialize, Serialize};

/// Reference data for a third-party provider, loaded from the catalog file.
///
/// A `days_before_deactivation` of `0` marks the company as "custom": the
/// provider publishes no fixed window, so every reminder must carry its own
/// `custom_days`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub days_before_deactivation: u32,
    pub policy_link: Option<String>,
    pub activities_to_avoid_deactivation: Option<String>,
}

impl Company {
    pub fn is_custom(&self) -> bool {
        self.days_before_deactivation == 0
    }
}
