use serde::{Deserialize, Serialize};

/// Contact handles embedded in guivers, causes and products.
///
/// An update request replaces the whole value or leaves it alone; the
/// individual handles are never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whats_app: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ContactInfo {
    /// True when no handle carries a non-blank value.
    pub fn is_empty(&self) -> bool {
        [&self.whats_app, &self.instagram, &self.email]
            .iter()
            .all(|v| v.as_deref().map_or(true, |s| s.trim().is_empty()))
    }
}
