//! Map lookups for a business. The directory does not geocode anything itself;
//! it hands a search query to Google Maps and lets the browser do the rest.

use crate::models::BusinessRecord;

const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

/// Build the Google Maps search URL for a name/address pair. Returns `None`
/// when there is nothing to search for.
pub fn search_url(name: &str, address: &str) -> Option<String> {
    let name = name.trim();
    let address = address.trim();
    if name.is_empty() && address.is_empty() {
        return None;
    }

    let query = format!("{name} {address}");
    Some(format!("{MAPS_SEARCH_URL}{}", query.trim().replace(' ', "+")))
}

/// Convenience wrapper for a full record.
pub fn record_url(record: &BusinessRecord) -> Option<String> {
    search_url(record.name(), record.address())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_name_and_address_with_plus() {
        assert_eq!(
            search_url("Bob's Cafe", "1 Main St").as_deref(),
            Some("https://www.google.com/maps/search/?api=1&query=Bob's+Cafe+1+Main+St")
        );
    }

    #[test]
    fn either_half_is_enough() {
        assert_eq!(
            search_url("", "1 Main St").as_deref(),
            Some("https://www.google.com/maps/search/?api=1&query=1+Main+St")
        );
        assert_eq!(
            search_url("Deli", "  ").as_deref(),
            Some("https://www.google.com/maps/search/?api=1&query=Deli")
        );
    }

    #[test]
    fn refuses_when_both_are_blank() {
        assert_eq!(search_url("", ""), None);
        assert_eq!(search_url("  ", "\t"), None);
    }
}
