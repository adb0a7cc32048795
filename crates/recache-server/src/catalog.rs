//! In-memory hotel catalog.
//!
//! Stands in for the booking database: just enough of a producer for the
//! cached read endpoints and the mutation that invalidates them. Shares the
//! store's locking discipline: plain `std::sync` guards, no operation spans
//! an `.await`.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};

/// A hotel listing as served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: u64,
    pub name: String,
    pub city: String,
    pub price_per_night: u32,
    pub available_rooms: u32,
}

/// Fields accepted when creating a hotel.
#[derive(Debug, Deserialize)]
pub struct NewHotel {
    pub name: String,
    pub city: String,
    pub price_per_night: u32,
    pub available_rooms: u32,
}

#[derive(Debug, Default)]
struct CatalogInner {
    hotels: Vec<Hotel>,
    next_id: u64,
}

/// Shared handle to the catalog. Cloning yields a handle to the same data.
#[derive(Clone, Default)]
pub struct Catalog {
    inner: Arc<RwLock<CatalogInner>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog pre-populated with a few listings, used at startup.
    pub fn seeded() -> Self {
        let catalog = Self::new();
        for (name, city, price, rooms) in [
            ("Grand Meridian", "New York", 289, 12),
            ("Harbor View Inn", "San Francisco", 199, 4),
            ("Palm Court Suites", "Los Angeles", 249, 9),
        ] {
            catalog.add(NewHotel {
                name: name.to_string(),
                city: city.to_string(),
                price_per_night: price,
                available_rooms: rooms,
            });
        }
        catalog
    }

    /// Lists hotels, optionally filtered by city (case-insensitive).
    pub fn list(&self, city: Option<&str>) -> Vec<Hotel> {
        let inner = self.read();
        match city {
            Some(city) => inner
                .hotels
                .iter()
                .filter(|h| h.city.eq_ignore_ascii_case(city))
                .cloned()
                .collect(),
            None => inner.hotels.clone(),
        }
    }

    pub fn get(&self, id: u64) -> Option<Hotel> {
        self.read().hotels.iter().find(|h| h.id == id).cloned()
    }

    /// Adds a hotel, assigning the next id, and returns the stored listing.
    pub fn add(&self, new: NewHotel) -> Hotel {
        let mut inner = self.write();
        inner.next_id += 1;
        let hotel = Hotel {
            id: inner.next_id,
            name: new.name,
            city: new.city,
            price_per_night: new.price_per_night,
            available_rooms: new.available_rooms,
        };
        inner.hotels.push(hotel.clone());
        hotel
    }

    pub fn len(&self) -> usize {
        self.read().hotels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().hotels.is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, CatalogInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, CatalogInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
