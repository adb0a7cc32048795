//! HTTP endpoint handlers.

pub mod admin;
pub mod health;
pub mod hotels;
pub mod metrics;

pub use admin::{ClearQuery, ClearResponse};
pub use health::HealthResponse;
pub use hotels::{HotelListResponse, ListQuery};
