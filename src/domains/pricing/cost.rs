//! Monthly cost aggregation over priced line items.

use serde::Serialize;
use tracing::warn;

use super::model::PriceRecord;

/// 24 hours × 365 days / 12 months.
pub const DEFAULT_MONTHLY_HOURS: f64 = 730.0;

/// Currency reported when there is nothing to take it from.
pub const FALLBACK_CURRENCY: &str = "USD";

/// One priced SKU/meter with its derived monthly cost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub sku_name: String,
    pub meter_name: String,
    pub retail_price: f64,
    pub unit_of_measure: String,
    pub monthly_cost: f64,
    pub currency: String,
}

/// Line items ranked by monthly cost, with their total.
#[derive(Debug, Clone, PartialEq)]
pub struct CostBreakdown {
    pub items: Vec<LineItem>,
    pub total_monthly_cost: f64,
    /// Currency of the first record, before ranking.
    pub currency: String,
    /// Distinct currency codes, in order of first appearance.
    pub currencies: Vec<String>,
}

impl CostBreakdown {
    pub fn is_mixed_currency(&self) -> bool {
        self.currencies.len() > 1
    }
}

/// Monthly cost of one record: hourly units are multiplied by the hours,
/// anything else is taken as already monthly or flat.
pub fn monthly_cost(record: &PriceRecord, monthly_hours: f64) -> f64 {
    if record.unit_of_measure.contains("Hour") {
        record.retail_price * monthly_hours
    } else {
        record.retail_price
    }
}

/// Price every record, sum them, and rank by monthly cost descending.
pub fn aggregate(records: &[PriceRecord], monthly_hours: f64) -> CostBreakdown {
    let currency = records
        .first()
        .map(|r| currency_of(r).to_string())
        .unwrap_or_else(|| FALLBACK_CURRENCY.to_string());

    let mut currencies: Vec<String> = Vec::new();
    let mut items: Vec<LineItem> = Vec::with_capacity(records.len());

    for record in records {
        let code = currency_of(record);
        if !currencies.iter().any(|c| c == code) {
            currencies.push(code.to_string());
        }

        items.push(LineItem {
            sku_name: record.sku_name.clone(),
            meter_name: record.meter_name.clone(),
            retail_price: record.retail_price,
            unit_of_measure: record.unit_of_measure.clone(),
            monthly_cost: monthly_cost(record, monthly_hours),
            currency: code.to_string(),
        });
    }

    let total_monthly_cost = items.iter().map(|i| i.monthly_cost).sum();

    // Stable: ties keep input order.
    items.sort_by(|a, b| b.monthly_cost.total_cmp(&a.monthly_cost));

    if currencies.len() > 1 {
        warn!(
            "Line items use mixed currencies ({}); total is not converted",
            currencies.join(", ")
        );
    }

    CostBreakdown {
        items,
        total_monthly_cost,
        currency,
        currencies,
    }
}

fn currency_of(record: &PriceRecord) -> &str {
    if record.currency_code.is_empty() {
        FALLBACK_CURRENCY
    } else {
        &record.currency_code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priced(sku: &str, unit: &str, price: f64, currency: &str) -> PriceRecord {
        PriceRecord {
            sku_name: sku.to_string(),
            unit_of_measure: unit.to_string(),
            retail_price: price,
            currency_code: currency.to_string(),
            ..PriceRecord::default()
        }
    }

    #[test]
    fn test_hourly_unit() {
        let r = priced("P1", "1 Hour", 0.10, "USD");
        assert!((monthly_cost(&r, 730.0) - 73.0).abs() < 1e-9);
    }

    #[test]
    fn test_monthly_unit_unchanged() {
        let r = priced("Disk", "1/Month", 50.0, "USD");
        assert_eq!(monthly_cost(&r, 730.0), 50.0);
    }

    #[test]
    fn test_hour_match_is_case_sensitive_substring() {
        assert_eq!(monthly_cost(&priced("a", "100 Hours", 1.0, "USD"), 10.0), 10.0);
        assert_eq!(monthly_cost(&priced("b", "1 hour", 1.0, "USD"), 10.0), 1.0);
    }

    #[test]
    fn test_total_and_ranking() {
        let records = vec![
            priced("small", "1 Hour", 0.01, "EUR"),
            priced("flat", "1/Month", 20.0, "EUR"),
            priced("big", "1 Hour", 0.5, "EUR"),
        ];
        let breakdown = aggregate(&records, 730.0);

        let skus: Vec<_> = breakdown.items.iter().map(|i| i.sku_name.as_str()).collect();
        assert_eq!(skus, vec!["big", "flat", "small"]);

        let sum: f64 = breakdown.items.iter().map(|i| i.monthly_cost).sum();
        assert!((breakdown.total_monthly_cost - sum).abs() < 1e-9);
        assert!((breakdown.total_monthly_cost - (7.3 + 20.0 + 365.0)).abs() < 1e-9);
        assert_eq!(breakdown.currency, "EUR");
        assert!(!breakdown.is_mixed_currency());
    }

    #[test]
    fn test_ties_keep_input_order() {
        let records = vec![
            priced("first", "1/Month", 10.0, "USD"),
            priced("second", "1/Month", 10.0, "USD"),
            priced("top", "1/Month", 99.0, "USD"),
            priced("third", "1/Month", 10.0, "USD"),
        ];
        let breakdown = aggregate(&records, 730.0);
        let skus: Vec<_> = breakdown.items.iter().map(|i| i.sku_name.as_str()).collect();
        assert_eq!(skus, vec!["top", "first", "second", "third"]);
    }

    #[test]
    fn test_currency_from_first_record_before_sort() {
        let records = vec![
            priced("cheap", "1/Month", 1.0, "EUR"),
            priced("pricey", "1/Month", 100.0, "USD"),
        ];
        let breakdown = aggregate(&records, 730.0);
        assert_eq!(breakdown.items[0].sku_name, "pricey");
        assert_eq!(breakdown.currency, "EUR");
        assert!(breakdown.is_mixed_currency());
        assert_eq!(breakdown.currencies, vec!["EUR", "USD"]);
    }

    #[test]
    fn test_empty_defaults_to_usd() {
        let breakdown = aggregate(&[], 730.0);
        assert!(breakdown.items.is_empty());
        assert_eq!(breakdown.total_monthly_cost, 0.0);
        assert_eq!(breakdown.currency, "USD");
    }
}
