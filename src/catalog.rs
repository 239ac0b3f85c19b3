//! Catalog
//!
//! The static, read-only menu: entries are loaded once at startup and looked
//! up by their public integer identifier or filtered by category and search
//! text.

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use slotmap::{SlotMap, new_key_type};
use std::{fmt, str::FromStr};
use thiserror::Error;

new_key_type! {
    /// Menu Entry Key
    pub struct EntryKey;
}

/// Fixed set of menu categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Starters and small plates.
    Appetizer,

    /// Main dishes.
    Main,

    /// Hot and cold drinks.
    Drink,

    /// Desserts and sweets.
    Dessert,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Appetizer => "appetizer",
            Category::Main => "main",
            Category::Drink => "drink",
            Category::Dessert => "dessert",
        };

        f.write_str(name)
    }
}

/// Error returned when parsing an unrecognised category name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "appetizer" => Ok(Category::Appetizer),
            "main" => Ok(Category::Main),
            "drink" => Ok(Category::Drink),
            "dessert" => Ok(Category::Dessert),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// A category predicate: one concrete category, or the `all` wildcard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Matches every entry.
    #[default]
    All,

    /// Matches entries with exactly this category tag.
    Only(Category),
}

impl CategoryFilter {
    /// Returns true if the filter accepts the given category.
    #[must_use]
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(only) => only == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(category) => write!(f, "{category}"),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

/// Menu Entry
#[derive(Debug, Clone)]
pub struct MenuEntry {
    /// Public identifier, unique and stable across the session.
    pub id: u32,

    /// Display name.
    pub name: String,

    /// Description text, searched together with the name.
    pub description: String,

    /// Unit price in minor currency units.
    pub price: Money<'static, Currency>,

    /// Category tag.
    pub category: Category,

    /// Display icon or image reference.
    pub icon: String,
}

/// Errors related to catalog construction or lookup.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No entry with this identifier exists on the menu.
    #[error("No entry with id {0} on the menu")]
    UnknownEntry(u32),

    /// An entry with this identifier was already inserted.
    #[error("Duplicate entry id {0}")]
    DuplicateEntry(u32),

    /// An entry's currency differs from the catalog currency.
    #[error("Entry has currency {0}, but catalog has currency {1}")]
    CurrencyMismatch(&'static str, &'static str),
}

/// Catalog
///
/// Ordered, immutable-after-load collection of [`MenuEntry`] values. Entries
/// live in a slot map; a side vector preserves source order and a hash map
/// resolves the public integer identifiers to keys.
#[derive(Debug)]
pub struct Catalog {
    entries: SlotMap<EntryKey, MenuEntry>,
    order: Vec<EntryKey>,
    ids: FxHashMap<u32, EntryKey>,
    currency: &'static Currency,
}

impl Catalog {
    /// Create an empty catalog with the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Catalog {
            entries: SlotMap::with_key(),
            order: Vec::new(),
            ids: FxHashMap::default(),
            currency,
        }
    }

    /// Append an entry to the catalog.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the entry's id was already inserted or
    /// its price currency differs from the catalog currency.
    pub fn insert(&mut self, entry: MenuEntry) -> Result<EntryKey, CatalogError> {
        if self.ids.contains_key(&entry.id) {
            return Err(CatalogError::DuplicateEntry(entry.id));
        }

        let entry_currency = entry.price.currency();

        if entry_currency != self.currency {
            return Err(CatalogError::CurrencyMismatch(
                entry_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        let id = entry.id;
        let key = self.entries.insert(entry);

        self.order.push(key);
        self.ids.insert(id, key);

        Ok(key)
    }

    /// Resolve a public identifier to its key and entry.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError::UnknownEntry` if the id is not on the menu.
    pub fn resolve(&self, id: u32) -> Result<(EntryKey, &MenuEntry), CatalogError> {
        let key = *self.ids.get(&id).ok_or(CatalogError::UnknownEntry(id))?;

        self.entries
            .get(key)
            .map(|entry| (key, entry))
            .ok_or(CatalogError::UnknownEntry(id))
    }

    /// Look up an entry by its public identifier.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError::UnknownEntry` if the id is not on the menu.
    pub fn find_by_id(&self, id: u32) -> Result<&MenuEntry, CatalogError> {
        self.resolve(id).map(|(_, entry)| entry)
    }

    /// Get an entry by key.
    pub fn get(&self, key: EntryKey) -> Option<&MenuEntry> {
        self.entries.get(key)
    }

    /// Iterate over the entries in source order.
    pub fn iter(&self) -> impl Iterator<Item = &MenuEntry> {
        self.order.iter().filter_map(|&key| self.entries.get(key))
    }

    /// Iterate over the entries matching both predicates, in source order.
    ///
    /// Search text is trimmed and matched case-insensitively as a substring
    /// of the name or the description; empty search text matches everything.
    /// The returned iterator is finite and restartable — call again for a
    /// fresh pass.
    pub fn filter(
        &self,
        category: CategoryFilter,
        search: &str,
    ) -> impl Iterator<Item = &MenuEntry> {
        let needle = search.trim().to_lowercase();

        self.iter()
            .filter(move |entry| category.matches(entry.category) && matches_search(entry, &needle))
    }

    /// Get the number of entries on the menu.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Get the currency of the catalog.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

/// Returns true if the entry's name or description contains the needle.
///
/// The needle must already be lowercased; an empty needle matches everything.
fn matches_search(entry: &MenuEntry, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    entry.name.to_lowercase().contains(needle) || entry.description.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{IRR, USD};
    use testresult::TestResult;

    use super::*;

    fn entry(id: u32, name: &str, description: &str, price: i64, category: Category) -> MenuEntry {
        MenuEntry {
            id,
            name: name.to_string(),
            description: description.to_string(),
            price: Money::from_minor(price, IRR),
            category,
            icon: format!("{id}.png"),
        }
    }

    fn test_catalog() -> Result<Catalog, CatalogError> {
        let mut catalog = Catalog::new(IRR);

        catalog.insert(entry(
            1,
            "Mast-o-Khiar",
            "Yogurt dip with cucumber and dried mint",
            45_000,
            Category::Appetizer,
        ))?;

        catalog.insert(entry(
            2,
            "Kebab Koobideh",
            "Two skewers of minced lamb over saffron rice",
            185_000,
            Category::Main,
        ))?;

        catalog.insert(entry(
            3,
            "Doogh",
            "Sparkling yogurt drink with mint",
            35_000,
            Category::Drink,
        ))?;

        Ok(catalog)
    }

    #[test]
    fn insert_preserves_source_order() -> TestResult {
        let catalog = test_catalog()?;

        let ids: Vec<u32> = catalog.iter().map(|entry| entry.id).collect();

        assert_eq!(ids, vec![1, 2, 3]);

        Ok(())
    }

    #[test]
    fn insert_rejects_duplicate_id() -> TestResult {
        let mut catalog = test_catalog()?;

        let result = catalog.insert(entry(2, "Joojeh Kebab", "", 165_000, Category::Main));

        assert!(matches!(result, Err(CatalogError::DuplicateEntry(2))));

        Ok(())
    }

    #[test]
    fn insert_rejects_currency_mismatch() {
        let mut catalog = Catalog::new(IRR);

        let mut foreign = entry(1, "Import", "", 100, Category::Drink);
        foreign.price = Money::from_minor(100, USD);

        let result = catalog.insert(foreign);

        match result {
            Err(CatalogError::CurrencyMismatch(entry_currency, catalog_currency)) => {
                assert_eq!(entry_currency, USD.iso_alpha_code);
                assert_eq!(catalog_currency, IRR.iso_alpha_code);
            }
            other => panic!("expected CurrencyMismatch error, got {other:?}"),
        }
    }

    #[test]
    fn find_by_id_returns_entry() -> TestResult {
        let catalog = test_catalog()?;

        let found = catalog.find_by_id(2)?;

        assert_eq!(found.name, "Kebab Koobideh");
        assert_eq!(found.price, Money::from_minor(185_000, IRR));

        Ok(())
    }

    #[test]
    fn find_by_id_unknown_returns_error() -> TestResult {
        let catalog = test_catalog()?;

        let result = catalog.find_by_id(99);

        assert!(matches!(result, Err(CatalogError::UnknownEntry(99))));

        Ok(())
    }

    #[test]
    fn resolve_key_round_trips_through_get() -> TestResult {
        let catalog = test_catalog()?;

        let (key, entry) = catalog.resolve(3)?;
        let by_key = catalog.get(key).ok_or("expected entry for key")?;

        assert_eq!(by_key.id, entry.id);

        Ok(())
    }

    #[test]
    fn filter_all_with_empty_search_returns_everything_in_order() -> TestResult {
        let catalog = test_catalog()?;

        let ids: Vec<u32> = catalog
            .filter(CategoryFilter::All, "")
            .map(|entry| entry.id)
            .collect();

        assert_eq!(ids, vec![1, 2, 3]);

        Ok(())
    }

    #[test]
    fn filter_by_category_matches_exact_tag() -> TestResult {
        let catalog = test_catalog()?;

        let ids: Vec<u32> = catalog
            .filter(CategoryFilter::Only(Category::Main), "")
            .map(|entry| entry.id)
            .collect();

        assert_eq!(ids, vec![2]);

        Ok(())
    }

    #[test]
    fn filter_search_is_case_insensitive_on_name_and_description() -> TestResult {
        let catalog = test_catalog()?;

        let by_name: Vec<u32> = catalog
            .filter(CategoryFilter::All, "KEBAB")
            .map(|entry| entry.id)
            .collect();

        let by_description: Vec<u32> = catalog
            .filter(CategoryFilter::All, "yogurt")
            .map(|entry| entry.id)
            .collect();

        assert_eq!(by_name, vec![2]);
        assert_eq!(by_description, vec![1, 3]);

        Ok(())
    }

    #[test]
    fn filter_trims_search_text() -> TestResult {
        let catalog = test_catalog()?;

        let ids: Vec<u32> = catalog
            .filter(CategoryFilter::All, "  doogh  ")
            .map(|entry| entry.id)
            .collect();

        assert_eq!(ids, vec![3]);

        Ok(())
    }

    #[test]
    fn filter_combines_category_and_search_with_and() -> TestResult {
        let catalog = test_catalog()?;

        // "yogurt" matches entries 1 and 3, but only 3 is a drink.
        let ids: Vec<u32> = catalog
            .filter(CategoryFilter::Only(Category::Drink), "yogurt")
            .map(|entry| entry.id)
            .collect();

        assert_eq!(ids, vec![3]);

        Ok(())
    }

    #[test]
    fn filter_is_restartable() -> TestResult {
        let catalog = test_catalog()?;

        let first: Vec<u32> = catalog
            .filter(CategoryFilter::All, "kebab")
            .map(|entry| entry.id)
            .collect();

        let second: Vec<u32> = catalog
            .filter(CategoryFilter::All, "kebab")
            .map(|entry| entry.id)
            .collect();

        assert_eq!(first, second);

        Ok(())
    }

    #[test]
    fn len_and_is_empty() -> TestResult {
        let empty = Catalog::new(IRR);
        let catalog = test_catalog()?;

        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.len(), 3);

        Ok(())
    }

    #[test]
    fn category_filter_parses_wildcard_and_tags() -> TestResult {
        assert_eq!("all".parse::<CategoryFilter>()?, CategoryFilter::All);
        assert_eq!(
            "dessert".parse::<CategoryFilter>()?,
            CategoryFilter::Only(Category::Dessert)
        );

        Ok(())
    }

    #[test]
    fn category_parse_rejects_unknown_name() {
        let result = "kebab".parse::<Category>();

        assert_eq!(result, Err(UnknownCategory("kebab".to_string())));
    }

    #[test]
    fn category_display_round_trips_through_parse() -> TestResult {
        for category in [
            Category::Appetizer,
            Category::Main,
            Category::Drink,
            Category::Dessert,
        ] {
            assert_eq!(category.to_string().parse::<Category>()?, category);
        }

        Ok(())
    }
}
