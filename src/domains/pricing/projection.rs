//! Reduce raw price records to sorted, deduplicated name lists.

use std::collections::BTreeSet;

use super::model::PriceRecord;

/// Which record field a name projection reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    Product,
    Service,
}

impl NameField {
    fn get(self, record: &PriceRecord) -> &str {
        match self {
            Self::Product => &record.product_name,
            Self::Service => &record.service_name,
        }
    }
}

/// Result of a name projection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameSet {
    /// Unique names, alphabetically sorted, possibly truncated to the limit.
    pub names: Vec<String>,
    /// Unique names before the limit was applied.
    pub total_unique: usize,
    /// Records inspected.
    pub total_processed: usize,
    /// Records left after the substring filter.
    pub total_matched: usize,
    pub was_limited: bool,
}

/// Project records onto unique names.
///
/// `contains` is matched case-insensitively against the projected field
/// before deduplication. A `limit` of zero means unlimited.
pub fn project_names(
    records: &[PriceRecord],
    field: NameField,
    contains: Option<&str>,
    limit: usize,
) -> NameSet {
    let needle = contains
        .filter(|c| !c.is_empty())
        .map(|c| c.to_lowercase());

    let matched: Vec<&str> = records
        .iter()
        .map(|r| field.get(r))
        .filter(|name| match &needle {
            Some(n) => name.to_lowercase().contains(n.as_str()),
            None => true,
        })
        .collect();

    let unique: BTreeSet<&str> = matched.iter().copied().filter(|n| !n.is_empty()).collect();
    let total_unique = unique.len();
    let was_limited = limit > 0 && total_unique > limit;
    let take = if was_limited { limit } else { total_unique };

    NameSet {
        names: unique.into_iter().take(take).map(str::to_string).collect(),
        total_unique,
        total_processed: records.len(),
        total_matched: matched.len(),
        was_limited,
    }
}
