//! # dopc-core: Pure Pricing Logic for DOPC
//!
//! This crate is the **heart** of the Delivery Order Price Calculator. It
//! contains all pricing logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          DOPC Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    dopc CLI (apps/dopc-cli)                     │   │
//! │  │    form flags ──► validate ──► fetch venue ──► print breakdown  │   │
//! │  └───────────────┬─────────────────────────────────┬───────────────┘   │
//! │                  │                                 │                    │
//! │  ┌───────────────▼─────────────────┐  ┌────────────▼───────────────┐   │
//! │  │   ★ dopc-core (THIS CRATE) ★    │  │        dopc-venue          │   │
//! │  │                                 │  │  static + dynamic venue    │   │
//! │  │  parse ─► distance ─► pricing   │◄─┤  data over HTTP            │   │
//! │  │                                 │  │                            │   │
//! │  │  NO I/O • NO NETWORK • PURE     │  └────────────────────────────┘   │
//! │  └─────────────────────────────────┘                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`parse`] - Form text to cents and coordinates
//! - [`distance`] - Haversine distance in whole meters
//! - [`pricing`] - Tier selection, surcharge, fee and total
//! - [`order`] - Whole-form validation
//! - [`types`] - Coordinate, DistanceRange, PricingSpec, PriceResult
//! - [`money`] - Integer euro cents
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use dopc_core::{calculate, Coordinate, DistanceRange, Money, PricingSpec};
//!
//! let pricing = PricingSpec {
//!     order_minimum_no_surcharge: Money::from_cents(1000),
//!     base_price: Money::from_cents(190),
//!     distance_ranges: vec![
//!         DistanceRange::from_raw(0, 500, Money::zero(), 0),
//!         DistanceRange::from_raw(500, 1000, Money::from_cents(100), 1),
//!         DistanceRange::from_raw(1000, 0, Money::zero(), 0),
//!     ],
//! };
//! let venue = Coordinate::new(60.17094, 24.93087).unwrap();
//!
//! let result = calculate("10", "60.17094", "24.93087", venue, &pricing).unwrap();
//! assert_eq!(result.total_price.cents(), 1190);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod distance;
pub mod error;
pub mod money;
pub mod order;
pub mod parse;
pub mod pricing;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{
    CoreError, CoreResult, ErrorKind, FieldErrors, FormField, ValidationError, ValidationResult,
};
pub use money::Money;
pub use order::OrderInput;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Latitude bound in degrees (inclusive, both signs).
pub const MAX_LATITUDE: i64 = 90;

/// Longitude bound in degrees (inclusive, both signs).
pub const MAX_LONGITUDE: i64 = 180;

// =============================================================================
// Entry Point
// =============================================================================

/// Prices an order from raw form text and fetched venue data.
///
/// Fails on the first field that does not parse, or when the venue does not
/// deliver to that distance. Use [`OrderInput::parse`] to collect every field
/// error instead.
pub fn calculate(
    cart_value: &str,
    user_latitude: &str,
    user_longitude: &str,
    venue_location: Coordinate,
    pricing: &PricingSpec,
) -> CoreResult<PriceResult> {
    let cart = parse::parse_euro_cents(cart_value)?;
    let user_location = Coordinate {
        latitude: parse::parse_latitude(user_latitude)?,
        longitude: parse::parse_longitude(user_longitude)?,
    };

    let distance = distance::great_circle_distance_meters(user_location, venue_location);
    pricing::price_order(cart, pricing, distance)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn helsinki() -> (Coordinate, PricingSpec) {
        let venue = Coordinate::new(60.17094, 24.93087).unwrap();
        let pricing = PricingSpec {
            order_minimum_no_surcharge: Money::from_cents(1000),
            base_price: Money::from_cents(190),
            distance_ranges: vec![
                DistanceRange::from_raw(0, 500, Money::zero(), 0),
                DistanceRange::from_raw(500, 1000, Money::from_cents(100), 1),
                DistanceRange::from_raw(1000, 0, Money::zero(), 0),
            ],
        };
        (venue, pricing)
    }

    #[test]
    fn test_user_at_venue() {
        let (venue, pricing) = helsinki();
        let result = calculate("10", "60.17094", "24.93087", venue, &pricing).unwrap();

        assert_eq!(result.cart_value.cents(), 1000);
        assert_eq!(result.small_order_surcharge.cents(), 0);
        assert_eq!(result.delivery_fee.cents(), 190);
        assert_eq!(result.delivery_distance, 0);
        assert_eq!(result.total_price.cents(), 1190);
    }

    #[test]
    fn test_user_beyond_delivery_limit() {
        let (venue, pricing) = helsinki();
        // ≈ 1112 m north of the venue
        let err = calculate("10", "60.18094", "24.93087", venue, &pricing).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::DeliveryNotAvailable);
        assert_eq!(
            err.to_string(),
            "Delivery is not available for distance 1112 m (limit starts at 1000 m)."
        );
    }

    #[test]
    fn test_empty_cart_value() {
        let (venue, pricing) = helsinki();
        let err = calculate("", "60.17094", "24.93087", venue, &pricing).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.to_string(), "Cart value is required.");
    }

    #[test]
    fn test_three_fraction_digits_rejected() {
        let (venue, pricing) = helsinki();
        let err = calculate("10.555", "60.17094", "24.93087", venue, &pricing).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.to_string(), "Cart value must be like 10 or 10.55");
    }

    #[test]
    fn test_latitude_out_of_range() {
        let (venue, pricing) = helsinki();
        let err = calculate("10", "95", "24.93087", venue, &pricing).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.to_string(), "Latitude must be between -90 and 90.");
    }

    #[test]
    fn test_largest_cart_value_overflows_cleanly() {
        let (venue, pricing) = helsinki();
        // i64::MAX cents parses; adding the 1,90 € fee cannot fit.
        let err = calculate("92233720368547758.07", "60.17094", "24.93087", venue, &pricing)
            .unwrap_err();

        assert_eq!(err, CoreError::AmountOverflow);
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_first_bad_field_wins() {
        let (venue, pricing) = helsinki();
        let err = calculate("abc", "x", "y", venue, &pricing).unwrap_err();
        assert_eq!(err.to_string(), "Cart value must be like 10 or 10.55");
    }
}
