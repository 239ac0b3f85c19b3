//! Integration tests for catalog lookup and filtering against the shipped
//! menu fixture.
//!
//! The default menu at `fixtures/menu.yml` has twelve entries across four
//! categories; filtering must preserve its source order, and the combined
//! category and search predicates must AND together.

use testresult::TestResult;

use mezze::{
    catalog::{CatalogError, Category, CategoryFilter},
    fixtures::MenuSource,
};

#[test]
fn wildcard_with_empty_search_returns_every_entry_in_order() -> TestResult {
    let catalog = MenuSource::new().load("menu")?;

    let ids: Vec<u32> = catalog
        .filter(CategoryFilter::All, "")
        .map(|entry| entry.id)
        .collect();

    let expected: Vec<u32> = (1..=12).collect();

    assert_eq!(ids, expected);

    Ok(())
}

#[test]
fn category_filter_keeps_only_matching_entries() -> TestResult {
    let catalog = MenuSource::new().load("menu")?;

    let mains: Vec<u32> = catalog
        .filter(CategoryFilter::Only(Category::Main), "")
        .map(|entry| entry.id)
        .collect();

    assert_eq!(mains, vec![4, 5, 6, 7]);

    for entry in catalog.filter(CategoryFilter::Only(Category::Main), "") {
        assert_eq!(entry.category, Category::Main);
    }

    Ok(())
}

#[test]
fn search_matches_names_case_insensitively() -> TestResult {
    let catalog = MenuSource::new().load("menu")?;

    let ids: Vec<u32> = catalog
        .filter(CategoryFilter::All, "KEBAB")
        .map(|entry| entry.id)
        .collect();

    assert_eq!(ids, vec![4, 5]);

    Ok(())
}

#[test]
fn search_matches_descriptions_too() -> TestResult {
    let catalog = MenuSource::new().load("menu")?;

    let ids: Vec<u32> = catalog
        .filter(CategoryFilter::All, "saffron")
        .map(|entry| entry.id)
        .collect();

    assert_eq!(ids, vec![4, 5, 7, 11]);

    Ok(())
}

#[test]
fn category_and_search_combine_with_and() -> TestResult {
    let catalog = MenuSource::new().load("menu")?;

    let ids: Vec<u32> = catalog
        .filter(CategoryFilter::Only(Category::Main), "saffron")
        .map(|entry| entry.id)
        .collect();

    assert_eq!(ids, vec![4, 5, 7]);

    Ok(())
}

#[test]
fn no_match_yields_an_empty_pass() -> TestResult {
    let catalog = MenuSource::new().load("menu")?;

    assert_eq!(catalog.filter(CategoryFilter::All, "pizza").count(), 0);

    Ok(())
}

#[test]
fn lookup_by_unknown_id_returns_not_found() -> TestResult {
    let catalog = MenuSource::new().load("menu")?;

    let result = catalog.find_by_id(999);

    assert!(matches!(result, Err(CatalogError::UnknownEntry(999))));

    Ok(())
}

#[test]
fn lookup_by_id_resolves_entry_details() -> TestResult {
    let catalog = MenuSource::new().load("menu")?;

    let entry = catalog.find_by_id(8)?;

    assert_eq!(entry.name, "Doogh");
    assert_eq!(entry.category, Category::Drink);
    assert_eq!(entry.price.to_minor_units(), 35_000);

    Ok(())
}
