//! Static storefront data loaded at startup.
//!
//! `products.json` and `markets.json` are read once from the data directory
//! and shared read-only for the life of the process.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use pehenava_core::{Catalog, CatalogError, DirectoryError, MarketDirectory};
use thiserror::Error;

pub const PRODUCTS_FILE: &str = "products.json";
pub const MARKETS_FILE: &str = "markets.json";

/// Errors that can occur while loading the data directory.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Catalog {
        path: PathBuf,
        #[source]
        source: CatalogError,
    },

    #[error("{}: {source}", .path.display())]
    Markets {
        path: PathBuf,
        #[source]
        source: DirectoryError,
    },
}

/// The product catalog and market directory.
#[derive(Debug, Clone)]
pub struct StoreData {
    pub catalog: Arc<Catalog>,
    pub markets: Arc<MarketDirectory>,
}

impl StoreData {
    /// Load both data files from `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if either file is missing, unreadable, or invalid.
    pub fn load(dir: &Path) -> Result<Self, DataError> {
        let products_path = dir.join(PRODUCTS_FILE);
        let catalog = Catalog::from_json(&read(&products_path)?).map_err(|source| {
            DataError::Catalog {
                path: products_path.clone(),
                source,
            }
        })?;

        let markets_path = dir.join(MARKETS_FILE);
        let markets = MarketDirectory::from_json(&read(&markets_path)?).map_err(|source| {
            DataError::Markets {
                path: markets_path.clone(),
                source,
            }
        })?;

        tracing::info!(
            products = catalog.len(),
            markets = markets.markets().len(),
            dir = %dir.display(),
            "Loaded storefront data"
        );

        Ok(Self {
            catalog: Arc::new(catalog),
            markets: Arc::new(markets),
        })
    }
}

fn read(path: &Path) -> Result<String, DataError> {
    std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}
