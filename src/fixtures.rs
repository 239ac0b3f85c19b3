//! Fixtures
//!
//! YAML menu definitions: the static catalog input, loaded once at startup
//! and read-only thereafter.

use std::{fs, path::PathBuf};

use rusty_money::{Findable, Money, iso::Currency};
use serde::Deserialize;
use thiserror::Error;

use crate::catalog::{Catalog, CatalogError, Category, MenuEntry};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Price too large to represent in minor units
    #[error("Invalid price: {0}")]
    InvalidPrice(u64),

    /// Catalog construction error
    #[error("Failed to build catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// One menu entry record as it appears in a fixture file.
#[derive(Debug, Deserialize)]
pub struct EntryFixture {
    /// Public identifier, unique within the menu.
    pub id: u32,

    /// Display name.
    pub name: String,

    /// Description text.
    pub description: String,

    /// Unit price in minor currency units, non-negative.
    pub price: u64,

    /// Category tag.
    pub category: Category,

    /// Display icon or image reference.
    pub icon: String,
}

/// A complete menu document: a currency code and an ordered entry list.
#[derive(Debug, Deserialize)]
pub struct MenuFixture {
    /// ISO alpha code of the menu currency.
    pub currency: String,

    /// The entries, in display order.
    pub entries: Vec<EntryFixture>,
}

impl MenuFixture {
    /// Parse a menu document from YAML.
    ///
    /// # Errors
    ///
    /// Returns a `FixtureError` if the document is not valid YAML.
    pub fn parse(contents: &str) -> Result<Self, FixtureError> {
        Ok(serde_norway::from_str(contents)?)
    }

    /// Build a catalog from the parsed document.
    ///
    /// # Errors
    ///
    /// Returns a `FixtureError` if the currency code is unknown, a price
    /// does not fit in minor units, or the catalog rejects an entry.
    pub fn into_catalog(self) -> Result<Catalog, FixtureError> {
        let currency = Currency::find(&self.currency)
            .ok_or_else(|| FixtureError::UnknownCurrency(self.currency.clone()))?;

        let mut catalog = Catalog::new(currency);

        for entry in self.entries {
            let minor =
                i64::try_from(entry.price).map_err(|_err| FixtureError::InvalidPrice(entry.price))?;

            catalog.insert(MenuEntry {
                id: entry.id,
                name: entry.name,
                description: entry.description,
                price: Money::from_minor(minor, currency),
                category: entry.category,
                icon: entry.icon,
            })?;
        }

        Ok(catalog)
    }
}

/// Menu fixture loader with a configurable base path.
#[derive(Debug)]
pub struct MenuSource {
    /// Base path for fixture files
    base_path: PathBuf,
}

impl MenuSource {
    /// Create a loader with the default base path.
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a loader with a custom base path.
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Load a menu fixture by name and build its catalog.
    ///
    /// # Errors
    ///
    /// Returns a `FixtureError` if the file cannot be read or parsed, or if
    /// the catalog cannot be built from it.
    pub fn load(&self, name: &str) -> Result<Catalog, FixtureError> {
        let file_path = self.base_path.join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        MenuFixture::parse(&contents)?.into_catalog()
    }
}

impl Default for MenuSource {
    fn default() -> Self {
        Self::new()
    }
}
