//! Mezze prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartEvent, CartLine, CartView, LineView},
    catalog::{
        Catalog, CatalogError, Category, CategoryFilter, EntryKey, MenuEntry, UnknownCategory,
    },
    fixtures::{EntryFixture, FixtureError, MenuFixture, MenuSource},
    pricing::{cart_total, format_price, line_total},
    receipt::{Receipt, ReceiptError, ReceiptLine},
};
