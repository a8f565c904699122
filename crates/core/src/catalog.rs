//! Immutable product catalog.
//!
//! The catalog is parsed once from the static `products.json` file and then
//! shared read-only by the cart store, the marketplace filter and the HTTP
//! handlers.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Price, ProductId};

/// Errors that can occur while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The JSON document could not be parsed.
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two products share an identifier.
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),

    /// A product has a negative unit price.
    #[error("product {id} has a negative price ({price})")]
    NegativePrice {
        /// Offending product.
        id: ProductId,
        /// The price as listed.
        price: Decimal,
    },
}

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price in rupees.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Category label, e.g. "Wedding Wear".
    pub category: String,
    /// Image URL or asset path.
    pub image: String,
}

impl Product {
    /// The unit price with its currency.
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::inr(self.price)
    }
}

/// The static list of products, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from already-parsed products.
    ///
    /// # Errors
    ///
    /// Returns an error if two products share an ID or a price is negative.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            if product.price < Decimal::ZERO {
                return Err(CatalogError::NegativePrice {
                    id: product.id,
                    price: product.price,
                });
            }
        }
        Ok(Self { products })
    }

    /// Parse a catalog from the contents of `products.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or fails validation.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Whether the catalog lists this product.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// All products in file order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
