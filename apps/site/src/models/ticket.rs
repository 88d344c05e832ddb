use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::cms_client::Resource;
use crate::models::rich_text::Block;
use crate::models::{double_option, null_default, CmsRecord};

/// A purchasable ticket tier. Purchasing itself happens off-site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketCategory {
    pub id: u64,
    pub document_id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub description: Vec<Block>,
    pub price: f64,
    #[serde(default = "default_currency", deserialize_with = "currency_or_default")]
    pub currency: String,
    #[serde(default)]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub valid_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub max_purchase_quantity: Option<u32>,
    #[serde(default, deserialize_with = "null_default")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub featured: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub sort_order: i32,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub published_at: Option<Option<DateTime<Utc>>>,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn currency_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(default_currency))
}

impl TicketCategory {
    /// Whether `now` falls inside the sale window. Open ends are unbounded.
    pub fn is_on_sale(&self, now: DateTime<Utc>) -> bool {
        self.valid_from.map_or(true, |from| now >= from)
            && self.valid_until.map_or(true, |until| now <= until)
    }

    pub fn display_price(&self) -> String {
        if self.price.fract() == 0.0 {
            format!("{} {:.0}", self.currency, self.price)
        } else {
            format!("{} {:.2}", self.currency, self.price)
        }
    }
}

impl CmsRecord for TicketCategory {
    const RESOURCE: Resource = Resource::TicketCategories;

    fn slug(&self) -> Option<&str> {
        None
    }

    fn published_at(&self) -> Option<Option<DateTime<Utc>>> {
        self.published_at
    }

    fn resolve_media(&mut self, _base: &str) {}
}
