//! Market locator listing.
//!
//! # Usage
//!
//! ```bash
//! pehenava markets
//! ```

use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use pehenava_storefront::data::StoreData;

use super::CommandError;

/// Print the traditional markets in map order, then directory statistics.
///
/// # Errors
///
/// Returns an error if the data fails to load.
pub fn run(data_dir: &Path, today: NaiveDate, out: &mut impl Write) -> Result<(), CommandError> {
    let data = StoreData::load(data_dir)?;

    for (i, market) in data.markets.traditional().enumerate() {
        writeln!(
            out,
            "{:>2}. {} ({}) est. {}, {} shops",
            i + 1,
            market.name,
            market.city,
            market.established,
            market.shops
        )?;
        if !market.specialties.is_empty() {
            writeln!(out, "    {}", market.specialties.join(", "))?;
        }
    }

    let stats = data.markets.stats(today);
    writeln!(out)?;
    writeln!(out, "Markets:  {}", stats.markets)?;
    writeln!(out, "Shops:    {}", stats.shops)?;
    writeln!(out, "States:   {}", stats.states)?;
    writeln!(out, "Heritage: {} years", stats.heritage_years)?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn bundled_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../storefront/data")
    }

    #[test]
    fn test_lists_only_traditional_markets() {
        let mut out = Vec::new();
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        run(&bundled_dir(), today, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.starts_with(" 1. Chandni Chowk (Delhi, Delhi)"));
        assert!(!out.contains("Phoenix Palladium"));
        assert!(out.contains("Markets:  7"));
        assert!(out.contains("States:   7"));
        assert!(out.contains("Heritage: 435 years"));
    }
}
