//! Marketplace catalog endpoint.

use axum::{
    Json,
    extract::{Query, State},
};
use pehenava_core::{Demographic, MarketplaceFilter, Occasion, Product, UnknownLabel};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Filter query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    pub gender: Option<String>,
    pub occasion: Option<String>,
}

/// Filtered catalog, with the occasion buttons for the chosen collection.
#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub gender: Demographic,
    pub occasion: &'static str,
    pub occasions: Vec<&'static str>,
    pub products: Vec<Product>,
}

/// List products for a collection and occasion.
///
/// GET /api/products?gender=<men|women|kids>&occasion=<label>
///
/// A missing gender means women's wear; unknown genders and occasions are
/// rejected.
#[instrument(skip(state))]
pub async fn products(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Result<Json<ProductsResponse>> {
    let filter = filter_from_query(&query)?;

    let products: Vec<Product> = filter
        .apply(state.catalog())
        .into_iter()
        .cloned()
        .collect();
    tracing::debug!(count = products.len(), "Filtered catalog");

    Ok(Json(ProductsResponse {
        gender: filter.demographic,
        occasion: filter.occasion.label(),
        occasions: occasion_labels(filter.demographic),
        products,
    }))
}

/// Build a filter from raw query values.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for a gender or occasion label that doesn't
/// exist.
pub fn filter_from_query(query: &ProductsQuery) -> Result<MarketplaceFilter> {
    let demographic = Demographic::from_query(query.gender.as_deref())
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let occasion = match query.occasion.as_deref().map(str::trim) {
        None | Some("") => Occasion::All,
        Some(label) => label
            .parse()
            .map_err(|e: UnknownLabel| AppError::BadRequest(e.to_string()))?,
    };
    Ok(MarketplaceFilter::new(demographic, occasion))
}

/// "All" followed by the collection's own occasions.
#[must_use]
pub fn occasion_labels(demographic: Demographic) -> Vec<&'static str> {
    std::iter::once(Occasion::All)
        .chain(demographic.occasions().iter().copied())
        .map(|o| o.label())
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn query(gender: Option<&str>, occasion: Option<&str>) -> ProductsQuery {
        ProductsQuery {
            gender: gender.map(String::from),
            occasion: occasion.map(String::from),
        }
    }

    #[test]
    fn test_filter_defaults() {
        let filter = filter_from_query(&ProductsQuery::default()).unwrap();
        assert_eq!(filter, MarketplaceFilter::default());
    }

    #[test]
    fn test_blank_gender_means_women() {
        let filter = filter_from_query(&query(Some(""), None)).unwrap();
        assert_eq!(filter.demographic, Demographic::Women);
    }

    #[test]
    fn test_unknown_gender_is_rejected() {
        let err = filter_from_query(&query(Some("aliens"), None)).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m.contains("aliens")));
    }

    #[test]
    fn test_occasion_is_case_insensitive() {
        let filter = filter_from_query(&query(Some("men"), Some("ceremony"))).unwrap();
        assert_eq!(filter.demographic, Demographic::Men);
        assert_eq!(filter.occasion, Occasion::Ceremony);
    }

    #[test]
    fn test_unknown_occasion_is_rejected() {
        let err = filter_from_query(&query(None, Some("Graduation"))).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_occasion_labels_start_with_all() {
        assert_eq!(
            occasion_labels(Demographic::Kids),
            vec!["All", "Wedding", "Festive", "Birthday", "Casual"]
        );
    }
}
