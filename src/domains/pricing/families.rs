//! Reference table of Azure service families.
//!
//! Taken from the Retail Prices API documentation. Updating the list means
//! bumping [`SERVICE_FAMILIES_VERSION`] and redeploying.

/// Version tag of the table below.
pub const SERVICE_FAMILIES_VERSION: &str = "2024-05";

/// Where the list comes from.
pub const SERVICE_FAMILIES_SOURCE: &str = "official_documentation";

/// Documentation page listing the supported `serviceFamily` values.
pub const SERVICE_FAMILIES_REFERENCE: &str = "https://learn.microsoft.com/en-us/rest/api/cost-management/retail-prices/azure-retail-prices#supported-servicefamily-values";

/// Supported `serviceFamily` values, alphabetically ordered.
pub const SERVICE_FAMILIES: &[&str] = &[
    "Analytics",
    "Azure Arc",
    "Azure Communication Services",
    "Azure Security",
    "Azure Stack",
    "Compute",
    "Containers",
    "Data",
    "Databases",
    "Developer Tools",
    "Dynamics",
    "Gaming",
    "Integration",
    "Internet of Things",
    "Management and Governance",
    "Microsoft Syntex",
    "Mixed Reality",
    "Networking",
    "Other",
    "Power Platform",
    "Quantum Computing",
    "Security",
    "Storage",
    "Telecommunications",
    "Web",
    "Windows Virtual Desktop",
];

/// Family whose catalog is large enough that service names are sampled
/// from a single bounded page instead of paginated.
pub const SAMPLED_FAMILY: &str = "Compute";

/// Whether service names for this family are listed from a sample.
pub fn is_sampled_family(family: &str) -> bool {
    family.eq_ignore_ascii_case(SAMPLED_FAMILY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_families_sorted_and_unique() {
        assert!(SERVICE_FAMILIES.len() >= 20);
        assert!(SERVICE_FAMILIES.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_sampled_family_case_insensitive() {
        assert!(is_sampled_family("Compute"));
        assert!(is_sampled_family("compute"));
        assert!(!is_sampled_family("Storage"));
    }
}
