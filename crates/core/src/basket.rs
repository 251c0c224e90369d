//! Basket

use crate::prices::{Price, PriceError};

/// One product-size-quantity entry, priced at its snapshotted unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasketLine {
    /// Units of the product size.
    pub quantity: u32,

    /// Unit price captured when the line was added.
    pub unit_price: Price,
}

impl BasketLine {
    /// Create a new line.
    pub const fn new(quantity: u32, unit_price: Price) -> Self {
        Self {
            quantity,
            unit_price,
        }
    }

    /// `quantity * unit_price`.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Overflow`] if the line total cannot be represented.
    pub fn line_total(&self) -> Result<Price, PriceError> {
        self.unit_price.times(self.quantity)
    }
}

/// Totals derived from a basket's lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BasketSummary {
    /// Sum of all line totals.
    pub subtotal: Price,

    /// Sum of quantities across lines (not the number of lines).
    pub item_count: u64,
}

/// Basket
#[derive(Debug, Clone, Default)]
pub struct Basket {
    lines: Vec<BasketLine>,
}

impl Basket {
    /// Create an empty basket.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a basket with the given lines.
    pub fn with_lines(lines: impl Into<Vec<BasketLine>>) -> Self {
        Self {
            lines: lines.into(),
        }
    }

    /// Add a line to the basket.
    pub fn push(&mut self, line: BasketLine) {
        self.lines.push(line);
    }

    /// Calculate the subtotal of the basket.
    ///
    /// # Errors
    ///
    /// Returns a `PriceError` if a line total or the running sum overflows.
    pub fn subtotal(&self) -> Result<Price, PriceError> {
        self.lines
            .iter()
            .try_fold(Price::ZERO, |total, line| total.checked_add(line.line_total()?))
    }

    /// Total number of units across every line.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Subtotal and unit count in one pass.
    ///
    /// # Errors
    ///
    /// Returns a `PriceError` if the subtotal overflows.
    pub fn summary(&self) -> Result<BasketSummary, PriceError> {
        Ok(BasketSummary {
            subtotal: self.subtotal()?,
            item_count: self.item_count(),
        })
    }

    /// Get the number of lines in the basket.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the basket is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterate over the lines.
    pub fn iter(&self) -> impl Iterator<Item = &BasketLine> {
        self.lines.iter()
    }
}

impl FromIterator<BasketLine> for Basket {
    fn from_iter<T: IntoIterator<Item = BasketLine>>(iter: T) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}
