use std::borrow::Borrow;
use std::cmp::Reverse;

use crate::models::{BusinessRecord, SortKey, SortOrder};

/// Case-insensitive substring match against name, category, and description.
/// A blank query matches everything and keeps the original order.
pub fn search<'a>(query: &str, records: &'a [BusinessRecord]) -> Vec<&'a BusinessRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records.iter().collect();
    }

    records
        .iter()
        .filter(|record| {
            record.name().to_lowercase().contains(&needle)
                || record.category().to_lowercase().contains(&needle)
                || record.description().to_lowercase().contains(&needle)
        })
        .collect()
}

/// Stable sort on the lowercased value of `key`. Equal keys keep their input
/// order in both directions.
pub fn sort<R: Borrow<BusinessRecord>>(records: &mut [R], key: SortKey, order: SortOrder) {
    let field = key.field();
    match order {
        SortOrder::Ascending => {
            records.sort_by_cached_key(|r| r.borrow().get(field).to_lowercase());
        }
        SortOrder::Descending => {
            records.sort_by_cached_key(|r| Reverse(r.borrow().get(field).to_lowercase()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Draft, Field};

    fn record(id: &str, name: &str, category: &str, description: &str) -> BusinessRecord {
        let draft = Draft::new()
            .with(Field::Name, name)
            .with(Field::Category, category)
            .with(Field::Description, description);
        BusinessRecord::from_draft(id, &draft)
    }

    fn sample() -> Vec<BusinessRecord> {
        vec![
            record("1", "Bob's Cafe", "Food", "Breakfast all day"),
            record("2", "Hardware Hut", "Retail", "Tools and paint"),
            record("3", "apple Books", "Retail", "Used books"),
            record("4", "Cafe Luna", "food", "Espresso bar"),
            record("5", "Zed's Garage", "Auto", "Brake and tool repair"),
        ]
    }

    fn ids(records: &[&BusinessRecord]) -> Vec<String> {
        records.iter().map(|r| r.id().to_string()).collect()
    }

    #[test]
    fn blank_query_returns_everything_in_order() {
        let records = sample();
        assert_eq!(ids(&search("", &records)), ["1", "2", "3", "4", "5"]);
        assert_eq!(ids(&search("   ", &records)), ["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn query_matches_name_category_or_description() {
        let records = sample();
        assert_eq!(ids(&search("CAFE", &records)), ["1", "4"]);
        assert_eq!(ids(&search("retail", &records)), ["2", "3"]);
        assert_eq!(ids(&search("tool", &records)), ["2", "5"]);
        assert!(search("pizza", &records).is_empty());
    }

    #[test]
    fn address_is_not_searched() {
        let draft = Draft::new()
            .with(Field::Name, "Deli")
            .with(Field::Address, "Main Street");
        let records = vec![BusinessRecord::from_draft("1", &draft)];
        assert!(search("main", &records).is_empty());
    }

    #[test]
    fn every_hit_contains_the_query() {
        let records = sample();
        for query in ["a", "e", "oo", "bar", "RE"] {
            let needle = query.to_lowercase();
            for hit in search(query, &records) {
                assert!(
                    hit.name().to_lowercase().contains(&needle)
                        || hit.category().to_lowercase().contains(&needle)
                        || hit.description().to_lowercase().contains(&needle)
                );
            }
        }
    }

    #[test]
    fn sort_by_name_ignores_case() {
        let records = sample();
        let mut hits = search("", &records);
        sort(&mut hits, SortKey::Name, SortOrder::Ascending);
        assert_eq!(ids(&hits), ["3", "1", "4", "2", "5"]);

        sort(&mut hits, SortKey::Name, SortOrder::Descending);
        assert_eq!(ids(&hits), ["5", "2", "4", "1", "3"]);
    }

    #[test]
    fn sort_is_stable_in_both_directions() {
        let records = sample();
        let mut hits = search("", &records);
        sort(&mut hits, SortKey::Category, SortOrder::Ascending);
        assert_eq!(ids(&hits), ["5", "1", "4", "2", "3"]);

        sort(&mut hits, SortKey::Category, SortOrder::Descending);
        assert_eq!(ids(&hits), ["2", "3", "1", "4", "5"]);
    }

    #[test]
    fn sort_is_idempotent() {
        let mut records = sample();
        sort(&mut records, SortKey::Name, SortOrder::Ascending);
        let once = records.clone();
        sort(&mut records, SortKey::Name, SortOrder::Ascending);
        assert_eq!(records, once);
    }
}
