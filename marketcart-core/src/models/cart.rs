//! The ordered, unique-by-id collection of cart lines.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::entry::{CartEntry, ProductInput, check_price};
use crate::error::CoreError;

/// The cart contents.
///
/// Entries keep insertion order. Three invariants hold for every value of
/// this type: no two entries share an `id`, every `quantity` is at least 1,
/// and every `price` is finite.
/// Raw entry lists only become a `CartState` through [`TryFrom`], which is
/// also the path taken by deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartEntry>", into = "Vec<CartEntry>")]
pub struct CartState {
    entries: Vec<CartEntry>,
}

impl CartState {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entries in display order.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Returns an iterator over the entries in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, CartEntry> {
        self.entries.iter()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a line by product id.
    pub fn get(&self, id: &str) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Returns true if a line with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Sum of all line quantities.
    pub fn total_quantity(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.quantity)).sum()
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Adds one unit of a product.
    ///
    /// An existing line with the same id is bumped by one; otherwise a new
    /// line with quantity 1 is appended. Returns the resulting quantity. A
    /// line already at `u32::MAX` is left as is.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCart`] if the price is not finite. The
    /// cart is unchanged in that case.
    pub fn add(&mut self, product: ProductInput) -> Result<u32, CoreError> {
        product.validate()?;
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == product.id) {
            entry.quantity = entry.quantity.saturating_add(1);
            return Ok(entry.quantity);
        }
        self.entries.push(CartEntry::from_product(product));
        Ok(1)
    }

    /// Bumps the quantity of an existing line.
    ///
    /// Returns false when nothing changed: the line is absent or already at
    /// `u32::MAX`.
    pub fn increment(&mut self, id: &str) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) if entry.quantity < u32::MAX => {
                entry.quantity += 1;
                true
            }
            _ => false,
        }
    }

    /// Lowers the quantity of an existing line.
    ///
    /// Quantity floors at 1: a single-unit line is left as is. Returns false
    /// when nothing changed.
    pub fn decrement(&mut self, id: &str) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) if entry.quantity > 1 => {
                entry.quantity -= 1;
                true
            }
            _ => false,
        }
    }

    /// Serializes the cart to its snapshot form.
    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a snapshot, validating every invariant.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl TryFrom<Vec<CartEntry>> for CartState {
    type Error = CoreError;

    fn try_from(entries: Vec<CartEntry>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if entry.quantity == 0 {
                return Err(CoreError::InvalidCart(format!(
                    "entry {} has quantity 0",
                    entry.id
                )));
            }
            check_price(&entry.id, entry.price)?;
            if !seen.insert(entry.id.as_str()) {
                return Err(CoreError::InvalidCart(format!(
                    "duplicate entry id {}",
                    entry.id
                )));
            }
        }
        Ok(Self { entries })
    }
}

impl From<CartState> for Vec<CartEntry> {
    fn from(state: CartState) -> Self {
        state.entries
    }
}

impl<'a> IntoIterator for &'a CartState {
    type Item = &'a CartEntry;
    type IntoIter = std::slice::Iter<'a, CartEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================
