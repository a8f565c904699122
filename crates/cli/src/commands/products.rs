//! Catalog listing.
//!
//! # Usage
//!
//! ```bash
//! pehenava products
//! pehenava products --gender men --occasion Ceremony
//! ```

use std::io::Write;
use std::path::Path;

use pehenava_core::{Demographic, MarketplaceFilter, Occasion};
use pehenava_storefront::data::StoreData;

use super::CommandError;

/// Print the products matching `gender` and `occasion`.
///
/// A missing gender means women's wear, as on the storefront. Unknown
/// genders and occasions are errors.
///
/// # Errors
///
/// Returns an error if the data fails to load or a filter value is unknown.
pub fn run(
    data_dir: &Path,
    gender: Option<&str>,
    occasion: Option<&str>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let occasion = occasion.map_or(Ok(Occasion::All), str::parse)?;
    let filter = MarketplaceFilter::new(Demographic::from_query(gender)?, occasion);
    let data = StoreData::load(data_dir)?;

    let products = filter.apply(&data.catalog);
    writeln!(
        out,
        "{} / {}: {} product(s)",
        filter.demographic,
        filter.occasion,
        products.len()
    )?;
    for product in products {
        writeln!(
            out,
            "  {:>4}  {:<32} {:>8}  {}",
            product.id.as_i32(),
            product.name,
            product.unit_price().to_string(),
            product.category
        )?;
    }

    Ok(())
}
