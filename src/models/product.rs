use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ContactInfo;

/// A product sold for a cause; part of the price is donated to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub id: String,
    pub guiver_id: String,
    pub cause_id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Whole percent of the price donated, 1 to 100.
    pub donation_percentage: u8,
    /// Free text, unlike the cause status.
    pub status: String,
    #[serde(default)]
    pub contact_info: ContactInfo,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
