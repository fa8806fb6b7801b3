use std::collections::HashSet;

use carenote_core::catalog::{all_entries, get_entry, is_catalog_id};
use carenote_core::models::assessment::initial_assessment;

#[test]
fn catalog_ids_are_unique() {
    let ids: HashSet<&str> = all_entries().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids.len(), all_entries().len());
}

#[test]
fn every_entry_has_options() {
    for entry in all_entries() {
        assert!(!entry.judgment_options.is_empty(), "{} has no options", entry.id);
        assert!(!entry.item_name.is_empty());
        assert!(!entry.category.is_empty());
    }
}

#[test]
fn catalog_starts_with_health_then_adl() {
    let ids: Vec<&str> = all_entries().iter().take(3).map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["10-1", "11-1", "11-2"]);
}

#[test]
fn lookup_by_id() {
    let entry = get_entry("11-1").unwrap();
    assert_eq!(entry.category, "ADL");
    assert!(entry.allows("independent"));
    assert!(entry.allows(""));
    assert!(!entry.allows("bedridden"));

    assert!(is_catalog_id("23-1"));
    assert!(!is_catalog_id("99-9"));
}

#[test]
fn initial_assessment_mirrors_catalog() {
    let items = initial_assessment();
    assert_eq!(items.len(), all_entries().len());
    for (item, entry) in items.iter().zip(all_entries()) {
        assert_eq!(item.id, entry.id);
        assert_eq!(item.judgment_options, entry.judgment_options);
        assert!(item.situation.is_empty());
        assert!(item.judgment.is_empty());
        assert!(item.strengths.is_empty());
        assert!(!item.is_assessed());
    }
}
