//! # Order Input
//!
//! Whole-form validation for the calculator.
//!
//! Unlike [`crate::calculate`], which stops at the first bad field,
//! [`OrderInput::parse`] checks every field and reports all failures at once,
//! so each can be shown next to its input.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Venue slug: ""          ──► "Venue slug is required."                 │
//! │  Cart value: "10.555"    ──► "Cart value must be like 10 or 10.55"     │
//! │  Latitude:   "95"        ──► "Latitude must be between -90 and 90."    │
//! │  Longitude:  "24.93087"  ──► ok                                         │
//! │                                                                         │
//! │  → Err(FieldErrors[3]); nothing is fetched, nothing is priced          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::distance::great_circle_distance_meters;
use crate::error::{CoreResult, FieldErrors, FormField};
use crate::money::Money;
use crate::parse::{parse_euro_cents, parse_latitude, parse_longitude, validate_venue_slug};
use crate::pricing::price_order;
use crate::types::{Coordinate, PriceResult, PricingSpec};

/// A fully validated calculator form.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderInput {
    pub venue_slug: String,
    pub cart_value: Money,
    pub user_location: Coordinate,
}

impl OrderInput {
    /// Validates all four fields.
    ///
    /// ## Example
    /// ```rust
    /// use dopc_core::{FormField, OrderInput};
    ///
    /// let input = OrderInput::parse("venue", "10", "60.17094", "24.93087").unwrap();
    /// assert_eq!(input.cart_value.cents(), 1000);
    ///
    /// let errors = OrderInput::parse("", "", "95", "x").unwrap_err();
    /// assert_eq!(errors.len(), 4);
    /// assert!(errors.get(FormField::UserLatitude).is_some());
    /// ```
    pub fn parse(
        venue_slug: &str,
        cart_value: &str,
        user_latitude: &str,
        user_longitude: &str,
    ) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let venue_slug = validate_venue_slug(venue_slug)
            .map_err(|e| errors.push(FormField::VenueSlug, e))
            .ok();
        let cart_value = parse_euro_cents(cart_value)
            .map_err(|e| errors.push(FormField::CartValue, e))
            .ok();
        let latitude = parse_latitude(user_latitude)
            .map_err(|e| errors.push(FormField::UserLatitude, e))
            .ok();
        let longitude = parse_longitude(user_longitude)
            .map_err(|e| errors.push(FormField::UserLongitude, e))
            .ok();

        match (venue_slug, cart_value, latitude, longitude) {
            (Some(venue_slug), Some(cart_value), Some(latitude), Some(longitude)) => {
                Ok(OrderInput {
                    venue_slug: venue_slug.to_string(),
                    cart_value,
                    user_location: Coordinate {
                        latitude,
                        longitude,
                    },
                })
            }
            _ => Err(errors),
        }
    }

    /// Prices this order against a venue's location and pricing.
    pub fn price(&self, venue_location: Coordinate, pricing: &PricingSpec) -> CoreResult<PriceResult> {
        let distance = great_circle_distance_meters(self.user_location, venue_location);
        price_order(self.cart_value, pricing, distance)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
