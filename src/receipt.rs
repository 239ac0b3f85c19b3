//! Receipt
//!
//! The order summary produced by a successful checkout: one row per cart
//! line with resolved entry details, plus the grand total.

use std::io;

use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::Cart,
    catalog::{Catalog, EntryKey},
    pricing,
};

/// Errors that can occur when building or rendering a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// A cart line's entry is missing from catalog storage.
    #[error("Cart line references an entry missing from the catalog")]
    MissingEntry(EntryKey),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// One row of the order summary.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine {
    /// Display name of the ordered entry.
    pub name: String,

    /// Ordered quantity.
    pub quantity: u32,

    /// Unit price at order time.
    pub unit_price: Money<'static, Currency>,

    /// Line total (unit price × quantity).
    pub line_total: Money<'static, Currency>,
}

/// Final receipt for a completed order.
#[derive(Debug, Clone)]
pub struct Receipt {
    /// Order lines, in cart insertion order.
    lines: SmallVec<[ReceiptLine; 8]>,

    /// Grand total for the order.
    total: Money<'static, Currency>,

    /// Currency used for all monetary values.
    currency: &'static Currency,
}

impl Receipt {
    /// Create a new receipt with the given details.
    #[must_use]
    pub fn new(
        lines: SmallVec<[ReceiptLine; 8]>,
        total: Money<'static, Currency>,
        currency: &'static Currency,
    ) -> Self {
        Self {
            lines,
            total,
            currency,
        }
    }

    /// Build a receipt from the current cart lines.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if a line's entry is absent from catalog
    /// storage or the total cannot be calculated.
    pub fn from_cart(cart: &Cart, catalog: &Catalog) -> Result<Self, ReceiptError> {
        let mut lines = SmallVec::new();

        for line in cart.iter() {
            let entry = catalog
                .get(line.entry())
                .ok_or(ReceiptError::MissingEntry(line.entry()))?;

            lines.push(ReceiptLine {
                name: entry.name.clone(),
                quantity: line.quantity(),
                unit_price: line.unit_price(),
                line_total: pricing::line_total(line.unit_price(), line.quantity()),
            });
        }

        let total = pricing::cart_total(cart.lines(), cart.currency())?;

        Ok(Receipt {
            lines,
            total,
            currency: cart.currency(),
        })
    }

    /// The order lines, in cart insertion order.
    #[must_use]
    pub fn lines(&self) -> &[ReceiptLine] {
        &self.lines
    }

    /// Grand total for the order.
    #[must_use]
    pub fn total(&self) -> Money<'static, Currency> {
        self.total
    }

    /// Total item count (sum of quantities).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Currency used for all monetary values.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Renders the order summary table and totals to the given sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Qty", "Unit Price", "Line Total"]);

        for (idx, line) in self.lines.iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.name.clone(),
                line.quantity.to_string(),
                pricing::format_price(line.unit_price),
                pricing::format_price(line.line_total),
            ]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());
        let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(1, separator);

        table.with(theme);
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..5), Alignment::right());

        writeln!(out, "\n{table}").map_err(|_err| ReceiptError::IO)?;

        writeln!(out, "\n Items: {}", self.item_count()).map_err(|_err| ReceiptError::IO)?;

        writeln!(
            out,
            " \x1b[1mTotal:\x1b[0m {}",
            pricing::format_price(self.total)
        )
        .map_err(|_err| ReceiptError::IO)?;

        Ok(())
    }
}
