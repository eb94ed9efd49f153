//! Cart line item types.
//!
//! - [`ProductInput`] - What the catalog hands over when a product is added
//! - [`CartEntry`] - A product line in the cart, with its quantity

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ============================================================================
// Product Input
// ============================================================================

/// A product descriptor as supplied to `add_to_cart`.
///
/// Carries everything a [`CartEntry`] has except the quantity, which the
/// store owns. A `quantity` field present in incoming JSON is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    /// Stable product identifier.
    pub id: String,
    /// Display name.
    pub title: String,
    /// Product image location.
    #[serde(rename = "imageUrl", alias = "image_url")]
    pub image_url: String,
    /// Unit price. Never interpreted by the cart.
    pub price: f64,
}

impl ProductInput {
    /// Creates a new product descriptor.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
        }
    }

    /// Checks that the product can enter a cart.
    ///
    /// JSON cannot represent NaN or infinity, so only finite prices are
    /// accepted.
    pub fn validate(&self) -> Result<(), CoreError> {
        check_price(&self.id, self.price)
    }
}

/// Fails with [`CoreError::InvalidCart`] unless `price` is finite.
pub(crate) fn check_price(id: &str, price: f64) -> Result<(), CoreError> {
    if price.is_finite() {
        Ok(())
    } else {
        Err(CoreError::InvalidCart(format!(
            "entry {id} has non-finite price {price}"
        )))
    }
}

// ============================================================================
// Cart Entry
// ============================================================================

/// One line item in the cart.
///
/// The wire shape is `{id, title, imageUrl, price, quantity}`. Snapshots
/// written by older app builds used `image_url`, which is still accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    /// Stable product identifier, unique within a cart.
    pub id: String,
    /// Display name.
    pub title: String,
    /// Product image location.
    #[serde(rename = "imageUrl", alias = "image_url")]
    pub image_url: String,
    /// Unit price.
    pub price: f64,
    /// Number of units, always at least 1 inside a valid cart.
    pub quantity: u32,
}

impl CartEntry {
    /// Creates a fresh line with quantity 1.
    pub fn from_product(product: ProductInput) -> Self {
        Self {
            id: product.id,
            title: product.title,
            image_url: product.image_url,
            price: product.price,
            quantity: 1,
        }
    }

    /// Returns a copy with the given quantity.
    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Returns the product part of this entry.
    pub fn product(&self) -> ProductInput {
        ProductInput {
            id: self.id.clone(),
            title: self.title.clone(),
            image_url: self.image_url.clone(),
            price: self.price,
        }
    }
}

impl From<ProductInput> for CartEntry {
    fn from(product: ProductInput) -> Self {
        Self::from_product(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_product_starts_at_one() {
        let entry = CartEntry::from_product(ProductInput::new("a", "Apple", "img://a", 1.5));
        assert_eq!(entry.quantity, 1);
        assert_eq!(entry.id, "a");
        assert_eq!(entry.image_url, "img://a");
    }

    #[test]
    fn test_product_strips_quantity() {
        let entry = CartEntry::from_product(ProductInput::new("a", "Apple", "img://a", 1.5))
            .with_quantity(4);
        let product = entry.product();
        assert_eq!(product, ProductInput::new("a", "Apple", "img://a", 1.5));
    }

    #[test]
    fn test_validate_rejects_non_finite_price() {
        for price in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let product = ProductInput::new("a", "Apple", "img://a", price);
            assert!(matches!(product.validate(), Err(CoreError::InvalidCart(_))));
        }
        assert!(ProductInput::new("a", "Apple", "img://a", -0.5).validate().is_ok());
    }
}
