//! Pehenava Core - Storefront domain library.
//!
//! This crate holds everything the storefront knows about its static data and
//! the shopping cart. It is shared by:
//! - `storefront` - HTTP server exposing the catalog, markets and seller applications
//! - `cli` - Operator tool for validating and inspecting the data files
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no file I/O, no HTTP.
//! Data is parsed from JSON strings handed in by the caller.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices and emails
//! - [`catalog`] - Immutable product catalog
//! - [`cart`] - Observable in-memory cart store
//! - [`marketplace`] - Demographic and occasion filtering
//! - [`markets`] - Market directory and locator state

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod marketplace;
pub mod markets;
pub mod types;

pub use cart::{CartEvent, CartLine, CartStore, SubscriptionId, parse_quantity};
pub use catalog::{Catalog, CatalogError, Product};
pub use marketplace::{Demographic, MarketplaceFilter, Occasion, UnknownLabel};
pub use markets::{
    Camera, Coordinates, DirectoryError, LocatorState, Market, MarketDirectory, MarketStats, Shop,
};
pub use types::*;
