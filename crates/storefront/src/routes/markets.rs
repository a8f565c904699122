//! Market locator and shop detail endpoints.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Local;
use pehenava_core::{Market, MarketId, MarketStats, Shop, ShopId};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// A traditional market as shown on the map.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketView {
    /// 1-based number on the map pin and list card.
    pub marker: usize,
    #[serde(flatten)]
    pub market: Market,
    pub directions_url: String,
}

/// Locator page payload.
#[derive(Debug, Serialize)]
pub struct MarketsResponse {
    pub markets: Vec<MarketView>,
    pub stats: MarketStats,
}

/// List traditional markets with aggregate statistics.
///
/// GET /api/markets
#[instrument(skip(state))]
pub async fn markets(State(state): State<AppState>) -> Result<Json<MarketsResponse>> {
    let directory = state.markets();

    let markets = directory
        .traditional()
        .enumerate()
        .map(|(i, market)| {
            let directions_url = market
                .directions_url()
                .map_err(|e| AppError::Internal(format!("directions url for {}: {e}", market.id)))?;
            Ok(MarketView {
                marker: i + 1,
                market: market.clone(),
                directions_url: directions_url.into(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let stats = directory.stats(Local::now().date_naive());

    Ok(Json(MarketsResponse { markets, stats }))
}

/// Market summary attached to a shop.
#[derive(Debug, Serialize)]
pub struct MarketRef {
    pub id: MarketId,
    pub name: String,
    pub city: String,
}

/// Shop detail payload with fallbacks applied.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopView {
    pub id: ShopId,
    pub name: String,
    pub category: String,
    pub description: String,
    pub location: String,
    pub contact: String,
    pub instagram: String,
    pub market: MarketRef,
}

impl ShopView {
    #[must_use]
    pub fn new(market: &Market, shop: &Shop) -> Self {
        Self {
            id: shop.id,
            name: shop.name.clone(),
            category: shop.category.clone(),
            description: shop.description.clone(),
            location: shop.location_or_default().to_string(),
            contact: shop.contact_or_default().to_string(),
            instagram: shop.instagram_handle(),
            market: MarketRef {
                id: market.id,
                name: market.name.clone(),
                city: market.city.clone(),
            },
        }
    }
}

/// Shop detail.
///
/// GET /api/shops/{id}
#[instrument(skip(state))]
pub async fn shop(State(state): State<AppState>, Path(id): Path<ShopId>) -> Result<Json<ShopView>> {
    let (market, shop) = state
        .markets()
        .find_shop(id)
        .ok_or_else(|| AppError::NotFound("Shop not found".to_string()))?;

    Ok(Json(ShopView::new(market, shop)))
}
