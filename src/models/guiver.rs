use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a guiver does on the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuiverType {
    /// Supports causes.
    #[default]
    Helper,
    /// Sells products for causes.
    Entrepreneur,
}

impl GuiverType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuiverType::Helper => "helper",
            GuiverType::Entrepreneur => "entrepreneur",
        }
    }
}

impl fmt::Display for GuiverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GuiverType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "helper" => Ok(GuiverType::Helper),
            "entrepreneur" => Ok(GuiverType::Entrepreneur),
            other => Err(format!("must be one of helper, entrepreneur (got '{}')", other)),
        }
    }
}

/// A content creator. The root entity every cause and product points back to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guiver {
    #[serde(default)]
    pub id: String,
    pub email: String,
    pub display_name: String,
    #[serde(rename = "photoURL", default)]
    pub photo_url: String,
    #[serde(rename = "type")]
    pub guiver_type: GuiverType,
    #[serde(default)]
    pub bio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whats_app: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
