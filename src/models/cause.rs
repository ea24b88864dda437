use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ContactInfo;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CauseType {
    #[default]
    Social,
    Animal,
    Environment,
}

impl CauseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CauseType::Social => "social",
            CauseType::Animal => "animal",
            CauseType::Environment => "environment",
        }
    }
}

impl fmt::Display for CauseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CauseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "social" => Ok(CauseType::Social),
            "animal" => Ok(CauseType::Animal),
            "environment" => Ok(CauseType::Environment),
            other => Err(format!("must be one of social, animal, environment (got '{}')", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CauseStatus {
    Draft,
    #[default]
    Active,
    Completed,
    Cancelled,
}

impl CauseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CauseStatus::Draft => "draft",
            CauseStatus::Active => "active",
            CauseStatus::Completed => "completed",
            CauseStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for CauseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CauseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(CauseStatus::Draft),
            "active" => Ok(CauseStatus::Active),
            "completed" => Ok(CauseStatus::Completed),
            "cancelled" => Ok(CauseStatus::Cancelled),
            other => Err(format!(
                "must be one of draft, active, completed, cancelled (got '{}')",
                other
            )),
        }
    }
}

/// A social, animal or environmental cause owned by a guiver.
///
/// Updates are embedded in the cause document. Comments live in the
/// `causes/<id>/comments` sub-collection and are never part of this struct
/// as stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cause {
    #[serde(default)]
    pub id: String,
    pub guiver_id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub cause_type: CauseType,
    #[serde(default)]
    pub image_urls: Vec<String>,
    pub status: CauseStatus,
    pub location: String,
    #[serde(default)]
    pub contact_info: ContactInfo,
    #[serde(default)]
    pub updates: Vec<Update>,
    #[serde(default)]
    pub likes: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Progress note appended to a cause. Never edited once written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Update {
    #[serde(default)]
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default)]
    pub id: String,
    pub guiver_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn enums_use_lowercase_names() {
        assert_eq!(serde_json::to_value(CauseType::Environment).unwrap(), json!("environment"));
        assert_eq!(serde_json::to_value(CauseStatus::Cancelled).unwrap(), json!("cancelled"));
        assert_eq!("animal".parse::<CauseType>(), Ok(CauseType::Animal));
        assert!("Animal".parse::<CauseType>().is_err());
        assert!("archived".parse::<CauseStatus>().is_err());
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let v = json!({
            "id": "c1",
            "guiverId": "g1",
            "title": "Feed Dogs",
            "description": "Daily food",
            "type": "animal",
            "status": "active",
            "location": "City",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        });
        let cause: Cause = serde_json::from_value(v).unwrap();
        assert!(cause.updates.is_empty());
        assert!(cause.image_urls.is_empty());
        assert_eq!(cause.likes, 0);
        assert!(cause.contact_info.is_empty());
    }
}
