//! Cart
//!
//! The mutable order state: an insertion-ordered collection of lines, one
//! per distinct menu entry, with derived totals and a full view snapshot
//! re-derived from scratch after every mutation.

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError, EntryKey},
    pricing,
    receipt::{Receipt, ReceiptError},
};

/// One menu entry's quantity within the active cart.
///
/// The unit price is copied from the entry at add time; the entry itself is
/// referenced by key and outlives every line pointing at it.
#[derive(Clone, Debug, PartialEq)]
pub struct CartLine {
    entry: EntryKey,
    unit_price: Money<'static, Currency>,
    quantity: u32,
}

impl CartLine {
    /// Creates a new line with quantity 1.
    #[must_use]
    pub fn new(entry: EntryKey, unit_price: Money<'static, Currency>) -> Self {
        Self::with_quantity(entry, unit_price, 1)
    }

    /// Creates a new line with the given quantity.
    #[must_use]
    pub fn with_quantity(
        entry: EntryKey,
        unit_price: Money<'static, Currency>,
        quantity: u32,
    ) -> Self {
        Self {
            entry,
            unit_price,
            quantity,
        }
    }

    /// Returns the key of the referenced menu entry.
    pub fn entry(&self) -> EntryKey {
        self.entry
    }

    /// Returns the unit price of the referenced menu entry.
    pub fn unit_price(&self) -> Money<'static, Currency> {
        self.unit_price
    }

    /// Returns the current quantity.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Signal emitted by a cart mutation, for notification display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartEvent {
    /// A line was created or its quantity incremented.
    Added {
        /// Key of the affected entry.
        entry: EntryKey,
        /// Quantity after the mutation.
        quantity: u32,
    },

    /// A line was removed from the cart.
    Removed {
        /// Key of the affected entry.
        entry: EntryKey,
    },

    /// A line's quantity changed in place.
    QuantityChanged {
        /// Key of the affected entry.
        entry: EntryKey,
        /// Quantity after the mutation.
        quantity: u32,
    },
}

/// Errors related to cart mutations or derivations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The operation referenced an identifier absent from the catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A cart line's entry is missing from catalog storage.
    #[error("Cart line references an entry missing from the catalog")]
    MissingEntry(EntryKey),

    /// Checkout was attempted with no lines in the cart.
    #[error("The cart is empty")]
    EmptyCart,

    /// An entry's currency differs from the cart currency.
    #[error("Entry has currency {0}, but cart has currency {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Error building the checkout receipt.
    #[error(transparent)]
    Receipt(#[from] ReceiptError),
}

/// One resolved line of the cart view.
#[derive(Debug, Clone)]
pub struct LineView {
    /// Key of the referenced entry.
    pub entry: EntryKey,

    /// Public identifier of the referenced entry.
    pub id: u32,

    /// Display name of the referenced entry.
    pub name: String,

    /// Current quantity.
    pub quantity: u32,

    /// Unit price.
    pub unit_price: Money<'static, Currency>,

    /// Unit price, formatted for display.
    pub unit_price_display: String,

    /// Line total (unit price × quantity), formatted for display.
    pub line_total_display: String,
}

/// Snapshot of everything the view layer needs to re-render the cart.
///
/// Rebuilt in full from the current lines after every mutation — count
/// badge, line list and grand total always agree with each other.
#[derive(Debug, Clone)]
pub struct CartView {
    /// Total item count (sum of quantities).
    pub item_count: u32,

    /// The ordered lines with resolved entry details.
    pub lines: Vec<LineView>,

    /// Grand total.
    pub total: Money<'static, Currency>,

    /// Grand total, formatted for display.
    pub total_display: String,
}

/// Cart
///
/// Owns the ordered lines. All mutations resolve entries through the
/// catalog and run to completion synchronously; removing an absent line or
/// changing the quantity of one is a no-op, never an error.
#[derive(Debug)]
pub struct Cart {
    lines: Vec<CartLine>,
    currency: &'static Currency,
}

impl Cart {
    /// Create a new empty cart with the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
        }
    }

    /// Add one of the given entry to the cart.
    ///
    /// A repeated add increments the existing line's quantity rather than
    /// creating a duplicate; otherwise a new line with quantity 1 is
    /// appended at the end.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if the id is not on the menu or the entry's
    /// currency differs from the cart currency.
    pub fn add(&mut self, catalog: &Catalog, id: u32) -> Result<CartEvent, CartError> {
        let (key, entry) = catalog.resolve(id)?;
        let entry_currency = entry.price.currency();

        if entry_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                entry_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if let Some(line) = self.lines.iter_mut().find(|line| line.entry == key) {
            line.quantity = line.quantity.saturating_add(1);

            return Ok(CartEvent::Added {
                entry: key,
                quantity: line.quantity,
            });
        }

        self.lines.push(CartLine::new(key, entry.price));

        Ok(CartEvent::Added {
            entry: key,
            quantity: 1,
        })
    }

    /// Remove the line for the given entry, if present.
    ///
    /// Returns `None` (a no-op, not an error) when the id is unknown or no
    /// line exists for it; removing twice is safe.
    pub fn remove(&mut self, catalog: &Catalog, id: u32) -> Option<CartEvent> {
        let (key, _) = catalog.resolve(id).ok()?;
        let position = self.lines.iter().position(|line| line.entry == key)?;

        self.lines.remove(position);

        Some(CartEvent::Removed { entry: key })
    }

    /// Change the quantity of an existing line by the given delta.
    ///
    /// A resulting quantity of zero or below removes the line, exactly like
    /// [`Cart::remove`]. Returns `None` (a no-op) when no line exists for
    /// the id.
    pub fn change_quantity(&mut self, catalog: &Catalog, id: u32, delta: i32) -> Option<CartEvent> {
        let (key, _) = catalog.resolve(id).ok()?;
        let position = self.lines.iter().position(|line| line.entry == key)?;
        let current = self.lines.get(position)?.quantity;

        let quantity = i64::from(current).saturating_add(i64::from(delta));

        if quantity <= 0 {
            self.lines.remove(position);

            return Some(CartEvent::Removed { entry: key });
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        if let Some(line) = self.lines.get_mut(position) {
            line.quantity = quantity;
        }

        Some(CartEvent::QuantityChanged {
            entry: key,
            quantity,
        })
    }

    /// Complete the order: build the receipt, then clear the cart.
    ///
    /// The receipt total equals the pre-checkout cart total.
    ///
    /// # Errors
    ///
    /// Returns `CartError::EmptyCart` (no mutation) if the cart has no
    /// lines, or a `ReceiptError` if a line's entry cannot be resolved.
    pub fn checkout(&mut self, catalog: &Catalog) -> Result<Receipt, CartError> {
        if self.lines.is_empty() {
            return Err(CartError::EmptyCart);
        }

        let receipt = Receipt::from_cart(self, catalog)?;

        self.lines.clear();

        Ok(receipt)
    }

    /// Total item count: the sum of quantities over current lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(CartLine::quantity).sum()
    }

    /// Grand total: the sum of unit price × quantity over current lines.
    ///
    /// An empty cart totals to zero in the cart currency.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] on a money arithmetic or currency mismatch
    /// error.
    pub fn total(&self) -> Result<Money<'static, Currency>, MoneyError> {
        pricing::cart_total(&self.lines, self.currency)
    }

    /// Build the full view snapshot from the current lines.
    ///
    /// # Errors
    ///
    /// Returns a `CartError::MissingEntry` if a line's entry is absent from
    /// catalog storage.
    pub fn view(&self, catalog: &Catalog) -> Result<CartView, CartError> {
        let mut lines = Vec::with_capacity(self.lines.len());

        for line in &self.lines {
            let entry = catalog
                .get(line.entry)
                .ok_or(CartError::MissingEntry(line.entry))?;

            let line_total = pricing::line_total(line.unit_price, line.quantity);

            lines.push(LineView {
                entry: line.entry,
                id: entry.id,
                name: entry.name.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                unit_price_display: pricing::format_price(line.unit_price),
                line_total_display: pricing::format_price(line_total),
            });
        }

        let total = self.total()?;

        Ok(CartView {
            item_count: self.item_count(),
            lines,
            total,
            total_display: pricing::format_price(total),
        })
    }

    /// The current lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Iterate over the current lines.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Get the number of distinct lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
