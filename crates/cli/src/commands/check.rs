//! Data directory validation.
//!
//! # Usage
//!
//! ```bash
//! pehenava check
//! pehenava --data-dir ./data check
//! ```

use std::io::Write;
use std::path::Path;

use pehenava_storefront::data::StoreData;

use super::CommandError;

/// Load `products.json` and `markets.json` and report what was found.
///
/// # Errors
///
/// Returns an error if either file is missing or fails validation.
pub fn run(data_dir: &Path, out: &mut impl Write) -> Result<(), CommandError> {
    let data = StoreData::load(data_dir)?;

    let listings: usize = data
        .markets
        .markets()
        .iter()
        .map(|m| m.listings.len())
        .sum();

    writeln!(out, "Data directory: {}", data_dir.display())?;
    writeln!(out, "  products: {}", data.catalog.len())?;
    writeln!(
        out,
        "  markets:  {} ({} traditional)",
        data.markets.markets().len(),
        data.markets.traditional().count()
    )?;
    writeln!(out, "  shops:    {listings} with listing pages")?;
    writeln!(out, "OK")?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use pehenava_storefront::data::{MARKETS_FILE, PRODUCTS_FILE};

    use super::*;

    fn bundled_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../storefront/data")
    }

    #[test]
    fn test_check_bundled_data() {
        let mut out = Vec::new();
        run(&bundled_dir(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("products: 12"));
        assert!(out.ends_with("OK\n"));
    }

    #[test]
    fn test_check_rejects_duplicate_products() {
        let dir = tempfile::tempdir().unwrap();
        let product = r#"{"id":1,"name":"A","price":10,"category":"Casual Wear","image":"a.jpg"}"#;
        std::fs::write(
            dir.path().join(PRODUCTS_FILE),
            format!("[{product},{product}]"),
        )
        .unwrap();
        std::fs::write(dir.path().join(MARKETS_FILE), "[]").unwrap();

        let err = run(dir.path(), &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }
}
