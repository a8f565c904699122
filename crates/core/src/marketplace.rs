//! Demographic and occasion filtering over the catalog.
//!
//! Demographic membership comes from a fixed allow-list of product IDs rather
//! than a product attribute; [`Demographic::includes`] is the only place that
//! knows this, so an explicit attribute can replace it later.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Product};
use crate::types::ProductId;

/// Product IDs in the men's collection. Every other product is women's wear.
const MENS_PRODUCT_IDS: &[i32] = &[102, 104, 108, 109, 112];

/// Which storefront collection is being browsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Demographic {
    #[default]
    Women,
    Men,
    Kids,
}

impl Demographic {
    pub const ALL: [Self; 3] = [Self::Women, Self::Men, Self::Kids];

    /// Parse a `gender` query value. Missing or blank values mean women's
    /// wear.
    ///
    /// # Errors
    ///
    /// Returns `UnknownLabel` for a value that names no collection.
    pub fn from_query(value: Option<&str>) -> Result<Self, UnknownLabel> {
        match value.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(label) => label.parse(),
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Women => "women",
            Self::Men => "men",
            Self::Kids => "kids",
        }
    }

    /// Whether `id` belongs to this collection.
    #[must_use]
    pub fn includes(&self, id: ProductId) -> bool {
        let mens = MENS_PRODUCT_IDS.contains(&id.as_i32());
        match self {
            Self::Men => mens,
            Self::Women => !mens,
            Self::Kids => false,
        }
    }

    /// Occasion buttons offered for this collection, after "All".
    #[must_use]
    pub const fn occasions(&self) -> &'static [Occasion] {
        match self {
            Self::Women => &[
                Occasion::Wedding,
                Occasion::Festive,
                Occasion::Party,
                Occasion::Casual,
            ],
            Self::Men => &[
                Occasion::Wedding,
                Occasion::Festive,
                Occasion::Ceremony,
                Occasion::Casual,
            ],
            Self::Kids => &[
                Occasion::Wedding,
                Occasion::Festive,
                Occasion::Birthday,
                Occasion::Casual,
            ],
        }
    }
}

impl fmt::Display for Demographic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Demographic {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}

/// Occasion filter value. `All` matches every category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Occasion {
    #[default]
    All,
    Wedding,
    Festive,
    Party,
    Casual,
    Ceremony,
    Birthday,
}

impl Occasion {
    pub const ALL_VALUES: [Self; 7] = [
        Self::All,
        Self::Wedding,
        Self::Festive,
        Self::Party,
        Self::Casual,
        Self::Ceremony,
        Self::Birthday,
    ];

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Wedding => "Wedding",
            Self::Festive => "Festive",
            Self::Party => "Party",
            Self::Casual => "Casual",
            Self::Ceremony => "Ceremony",
            Self::Birthday => "Birthday",
        }
    }

    /// Category labels this occasion selects. Empty for `All` and for
    /// occasions with no matching stock.
    #[must_use]
    pub const fn categories(&self) -> &'static [&'static str] {
        match self {
            Self::All | Self::Birthday => &[],
            Self::Wedding => &["Wedding Wear", "Bridal Wear"],
            Self::Festive => &["Festive Wear"],
            Self::Party => &["Party Wear"],
            Self::Casual => &["Casual Wear"],
            Self::Ceremony => &["Traditional Wear", "Formal Wear", "Contemporary Wear"],
        }
    }

    /// Whether a product in `category` matches this occasion.
    #[must_use]
    pub fn matches(&self, category: &str) -> bool {
        matches!(self, Self::All) || self.categories().contains(&category)
    }
}

impl fmt::Display for Occasion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Occasion {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL_VALUES
            .into_iter()
            .find(|o| o.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}

/// A filter label that names no known demographic or occasion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter value '{0}'")]
pub struct UnknownLabel(pub String);

/// The two selected filter axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MarketplaceFilter {
    pub demographic: Demographic,
    pub occasion: Occasion,
}

impl MarketplaceFilter {
    #[must_use]
    pub const fn new(demographic: Demographic, occasion: Occasion) -> Self {
        Self {
            demographic,
            occasion,
        }
    }

    /// Whether a single product passes both axes.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.demographic.includes(product.id) && self.occasion.matches(&product.category)
    }

    /// The matching products, in catalog order.
    #[must_use]
    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        catalog
            .products()
            .iter()
            .filter(|product| self.matches(product))
            .collect()
    }
}
