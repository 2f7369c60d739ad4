//! Wire types of the Azure Retail Prices API.

use serde::{Deserialize, Serialize};

/// One catalog entry returned by the Retail Prices API.
///
/// Fields the pipeline does not rely on are not modelled; missing string
/// fields default to empty strings and a missing price to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PriceRecord {
    pub service_family: String,
    pub service_name: String,
    pub product_name: String,
    pub sku_name: String,
    pub meter_name: String,
    pub arm_region_name: String,
    #[serde(rename = "type")]
    pub price_type: String,
    pub unit_of_measure: String,
    pub retail_price: f64,
    pub currency_code: String,
}

/// One page of results, including the continuation link if any.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PricePage {
    #[serde(rename = "Items", default)]
    pub items: Vec<PriceRecord>,

    #[serde(rename = "NextPageLink", default)]
    pub next_page_link: Option<String>,
}

impl PricePage {
    /// The continuation link, ignoring empty strings.
    pub fn next_link(&self) -> Option<&str> {
        self.next_page_link.as_deref().filter(|l| !l.is_empty())
    }
}
