//! Product type.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::ids::ProductId;
use crate::money::Price;

/// A product in the catalog.
///
/// Products are immutable once fetched; the catalog replaces the whole
/// collection on each successful fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name. The first two whitespace tokens double as brand and model.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Image URI.
    #[serde(default)]
    pub image: String,
    /// Long-form description.
    #[serde(default)]
    pub description: String,
    /// When the provider created the product. Zoneless timestamps are read
    /// as UTC.
    #[serde(deserialize_with = "deserialize_created_at")]
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Brand token: first whitespace-separated word of the name.
    pub fn brand(&self) -> Option<&str> {
        self.name.split_whitespace().next()
    }

    /// Model token: second whitespace-separated word of the name.
    pub fn model(&self) -> Option<&str> {
        self.name.split_whitespace().nth(1)
    }
}

/// Parse a provider timestamp: RFC 3339, then a zoneless date-time (UTC),
/// then a bare date (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = raw
        .parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
    {
        return Some(naive.and_utc());
    }
    raw.parse::<NaiveDate>()
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn deserialize_created_at<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| de::Error::custom(format!("invalid createdAt timestamp: {:?}", raw)))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    /// Build a product whose `created_at` is `day` days into 2024.
    pub fn product(id: &str, name: &str, price: &str, day: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price: price.parse().unwrap(),
            image: format!("https://img.example/{}.jpg", id),
            description: format!("{} description", name),
            created_at: Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap(),
        }
    }
}
