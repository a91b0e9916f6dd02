//! # Venue API Wire Types
//!
//! JSON shapes of the Home Assignment venue API, and their conversion into
//! dopc-core types.
//!
//! ## Static Endpoint
//! ```json
//! { "venue_raw": { "location": { "coordinates": [24.93087, 60.17094] } } }
//! ```
//! Note the GeoJSON order: `[longitude, latitude]`.
//!
//! ## Dynamic Endpoint
//! ```json
//! {
//!   "venue_raw": {
//!     "delivery_specs": {
//!       "order_minimum_no_surcharge": 1000,
//!       "delivery_pricing": {
//!         "base_price": 190,
//!         "distance_ranges": [
//!           { "min": 0,    "max": 500,  "a": 0,   "b": 0, "flag": null },
//!           { "min": 500,  "max": 1000, "a": 100, "b": 1, "flag": null },
//!           { "min": 1000, "max": 0,    "a": 0,   "b": 0, "flag": null }
//!         ]
//!       }
//!     }
//!   }
//! }
//! ```
//! `flag` and any other unknown fields are ignored.

use serde::{Deserialize, Serialize};

use dopc_core::{Coordinate, DistanceRange, Money, PricingSpec};

use crate::error::{VenueError, VenueResult};

// =============================================================================
// Static
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueStaticResponse {
    pub venue_raw: StaticVenueRaw,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticVenueRaw {
    pub location: VenueLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueLocation {
    /// `[longitude, latitude]`
    pub coordinates: [f64; 2],
}

impl VenueStaticResponse {
    /// The venue's position, with the GeoJSON order swapped back.
    pub fn location(&self) -> VenueResult<Coordinate> {
        let [longitude, latitude] = self.venue_raw.location.coordinates;
        Coordinate::new(latitude, longitude)
            .map_err(|e| VenueError::InvalidData(format!("venue location: {}", e)))
    }
}

// =============================================================================
// Dynamic
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueDynamicResponse {
    pub venue_raw: DynamicVenueRaw,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynamicVenueRaw {
    pub delivery_specs: DeliverySpecs,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliverySpecs {
    pub order_minimum_no_surcharge: i64,
    pub delivery_pricing: DeliveryPricing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryPricing {
    pub base_price: i64,
    pub distance_ranges: Vec<RawDistanceRange>,
}

/// A tier as the API sends it; `max == 0` marks "no delivery from `min`".
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RawDistanceRange {
    pub min: u64,
    pub max: u64,
    pub a: i64,
    pub b: i64,
}

impl VenueDynamicResponse {
    /// Converts the delivery specs into a [`PricingSpec`].
    ///
    /// Monetary fields and the per-distance coefficient `b` must be
    /// non-negative. Tier order and contiguity are left as sent; see
    /// [`PricingSpec::check_ranges`].
    pub fn pricing(&self) -> VenueResult<PricingSpec> {
        let specs = &self.venue_raw.delivery_specs;
        let pricing = &specs.delivery_pricing;

        let order_minimum = non_negative("order_minimum_no_surcharge", specs.order_minimum_no_surcharge)?;
        let base_price = non_negative("base_price", pricing.base_price)?;

        let distance_ranges = pricing
            .distance_ranges
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let a = non_negative(&format!("distance_ranges[{}].a", i), r.a)?;
                let b = u64::try_from(r.b).map_err(|_| {
                    VenueError::InvalidData(format!("distance_ranges[{}].b is negative ({})", i, r.b))
                })?;
                Ok(DistanceRange::from_raw(r.min, r.max, a, b))
            })
            .collect::<VenueResult<Vec<_>>>()?;

        Ok(PricingSpec {
            order_minimum_no_surcharge: order_minimum,
            base_price,
            distance_ranges,
        })
    }
}

fn non_negative(field: &str, cents: i64) -> VenueResult<Money> {
    if cents < 0 {
        return Err(VenueError::InvalidData(format!(
            "{} is negative ({})",
            field, cents
        )));
    }
    Ok(Money::from_cents(cents))
}

// =============================================================================
// Unit Tests
// =============================================================================
