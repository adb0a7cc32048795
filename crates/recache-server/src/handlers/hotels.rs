//! Hotel catalog endpoint handlers.
//!
//! The read endpoints are the producers the cache layer wraps; the write
//! endpoint is the state-mutating operation that clears previously cached
//! listings so stale reads are never served past a mutation.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::catalog::{Hotel, NewHotel};
use crate::error::AppError;
use crate::state::AppState;

/// Query parameters for GET /api/hotels.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub city: Option<String>,
}

/// Response body for GET /api/hotels.
#[derive(Debug, Serialize)]
pub struct HotelListResponse {
    pub hotels: Vec<Hotel>,
}

/// GET /api/hotels
#[instrument(skip_all, fields(city = query.city.as_deref().unwrap_or("*")))]
pub async fn list_hotels(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<HotelListResponse> {
    let hotels = state.catalog().list(query.city.as_deref());
    Json(HotelListResponse { hotels })
}

/// GET /api/hotels/{id}
#[instrument(skip_all, fields(id = id))]
pub async fn get_hotel(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Hotel>, AppError> {
    state.catalog().get(id).map(Json).ok_or(AppError::NotFound(id))
}

/// POST /api/hotels
///
/// Creates a listing and clears the response cache: any previously cached
/// hotel listing would otherwise keep serving the pre-mutation state for up
/// to its TTL.
#[instrument(skip_all)]
pub async fn create_hotel(
    State(state): State<AppState>,
    Json(new): Json<NewHotel>,
) -> Result<(StatusCode, Json<Hotel>), AppError> {
    if new.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".to_string()));
    }
    if new.city.trim().is_empty() {
        return Err(AppError::BadRequest("city must not be empty".to_string()));
    }

    let hotel = state.catalog().add(new);

    state.cache().invalidate_all();
    info!(id = hotel.id, name = %hotel.name, "Hotel created, response cache cleared");

    Ok((StatusCode::CREATED, Json(hotel)))
}
