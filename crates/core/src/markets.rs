//! Market directory and map locator state.
//!
//! Markets are parsed from the static `markets.json` file. The locator only
//! lists `Traditional` markets; statistics cover the whole directory.

use std::collections::{BTreeSet, HashSet};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::types::{MarketId, ShopId};

/// Map centre shown when nothing is selected (geographic centre of India).
pub const DEFAULT_CENTER: Coordinates = Coordinates {
    lat: 22.5937,
    lng: 78.9629,
};
/// Zoom level for the whole-country view.
pub const DEFAULT_ZOOM: u8 = 5;
/// Zoom level after selecting a market.
pub const SELECTED_ZOOM: u8 = 14;

const TRADITIONAL: &str = "Traditional";
const DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/";
const FALLBACK_SHOP_LOCATION: &str = "Delhi, India";
const FALLBACK_SHOP_CONTACT: &str = "+91-9876543210";

/// Errors that can occur while loading the market directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("invalid market JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate market id {0}")]
    DuplicateMarketId(MarketId),

    #[error("duplicate shop id {0}")]
    DuplicateShopId(ShopId),
}

/// A latitude/longitude pair, stored as `[lat, lng]` in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl From<[f64; 2]> for Coordinates {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.lat, c.lng]
    }
}

/// A shop listed inside a market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    pub id: ShopId,
    pub name: String,
    pub category: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

impl Shop {
    /// Listed location, or the marketplace's default city.
    #[must_use]
    pub fn location_or_default(&self) -> &str {
        self.location.as_deref().unwrap_or(FALLBACK_SHOP_LOCATION)
    }

    /// Listed phone/WhatsApp number, or the marketplace's helpline.
    #[must_use]
    pub fn contact_or_default(&self) -> &str {
        self.contact.as_deref().unwrap_or(FALLBACK_SHOP_CONTACT)
    }

    /// Instagram handle derived from the shop name ("Rang Mahal" -> "rangmahal").
    #[must_use]
    pub fn instagram_handle(&self) -> String {
        self.name
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect()
    }
}

/// A market in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    pub id: MarketId,
    pub name: String,
    /// "City, State".
    pub city: String,
    /// Market type, e.g. "Traditional".
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Coordinates,
    pub established: i32,
    /// Number of shops trading in the market.
    pub shops: u32,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub description: String,
    /// Shops with their own listing page.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub listings: Vec<Shop>,
}

impl Market {
    #[must_use]
    pub fn is_traditional(&self) -> bool {
        self.kind == TRADITIONAL
    }

    /// The state part of `city`, if present.
    #[must_use]
    pub fn state(&self) -> Option<&str> {
        self.city.split(", ").nth(1)
    }

    /// Google Maps directions to this market.
    ///
    /// # Errors
    ///
    /// Returns an error if the directions URL cannot be built.
    pub fn directions_url(&self) -> Result<Url, url::ParseError> {
        let destination = format!("{},{}", self.coordinates.lat, self.coordinates.lng);
        Url::parse_with_params(
            DIRECTIONS_URL,
            &[("api", "1"), ("destination", destination.as_str())],
        )
    }
}

/// Aggregate figures shown under the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketStats {
    pub markets: usize,
    pub shops: u64,
    pub states: usize,
    /// Years since the oldest market was established.
    pub heritage_years: i32,
}

/// All markets, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketDirectory {
    markets: Vec<Market>,
}

impl MarketDirectory {
    /// Build a directory from already-parsed markets.
    ///
    /// # Errors
    ///
    /// Returns an error if market IDs or shop IDs are not unique.
    pub fn new(markets: Vec<Market>) -> Result<Self, DirectoryError> {
        let mut market_ids = HashSet::new();
        let mut shop_ids = HashSet::new();
        for market in &markets {
            if !market_ids.insert(market.id) {
                return Err(DirectoryError::DuplicateMarketId(market.id));
            }
            for shop in &market.listings {
                if !shop_ids.insert(shop.id) {
                    return Err(DirectoryError::DuplicateShopId(shop.id));
                }
            }
        }
        Ok(Self { markets })
    }

    /// Parse the directory from the contents of `markets.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or fails validation.
    pub fn from_json(json: &str) -> Result<Self, DirectoryError> {
        let markets: Vec<Market> = serde_json::from_str(json)?;
        Self::new(markets)
    }

    #[must_use]
    pub fn markets(&self) -> &[Market] {
        &self.markets
    }

    /// Markets shown on the locator map, in file order.
    pub fn traditional(&self) -> impl Iterator<Item = &Market> + '_ {
        self.markets.iter().filter(|m| m.is_traditional())
    }

    /// Find a shop listing and the market it belongs to.
    #[must_use]
    pub fn find_shop(&self, id: ShopId) -> Option<(&Market, &Shop)> {
        self.markets.iter().find_map(|market| {
            market
                .listings
                .iter()
                .find(|shop| shop.id == id)
                .map(|shop| (market, shop))
        })
    }

    /// Aggregate statistics as of `today`.
    #[must_use]
    pub fn stats(&self, today: NaiveDate) -> MarketStats {
        let states: BTreeSet<&str> = self.markets.iter().filter_map(Market::state).collect();
        let oldest = self.markets.iter().map(|m| m.established).min();

        MarketStats {
            markets: self.markets.len(),
            shops: self.markets.iter().map(|m| u64::from(m.shops)).sum(),
            states: states.len(),
            heritage_years: oldest.map_or(0, |year| today.year() - year),
        }
    }
}

/// Where the map camera points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Camera {
    pub center: Coordinates,
    pub zoom: u8,
}

/// Selection state of the locator map.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocatorState {
    selected: Option<(MarketId, Coordinates)>,
}

impl LocatorState {
    /// Toggle selection of `market`.
    ///
    /// Selecting the already-selected market clears the selection; any other
    /// market becomes the selection. Returns the new camera.
    pub fn select(&mut self, market: &Market) -> Camera {
        self.selected = match self.selected {
            Some((id, _)) if id == market.id => None,
            _ => Some((market.id, market.coordinates)),
        };
        self.camera()
    }

    #[must_use]
    pub fn selected(&self) -> Option<MarketId> {
        self.selected.map(|(id, _)| id)
    }

    /// Camera for the current selection: the market up close, or all of India.
    #[must_use]
    pub fn camera(&self) -> Camera {
        match self.selected {
            Some((_, center)) => Camera {
                center,
                zoom: SELECTED_ZOOM,
            },
            None => Camera {
                center: DEFAULT_CENTER,
                zoom: DEFAULT_ZOOM,
            },
        }
    }
}
