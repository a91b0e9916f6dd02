//! # Domain Types
//!
//! Value types flowing through one price calculation.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────────┐   ┌─────────────────┐  │
//! │  │   Coordinate    │   │     PricingSpec      │   │   PriceResult   │  │
//! │  │  ─────────────  │   │  ──────────────────  │   │  ─────────────  │  │
//! │  │  latitude       │   │  order_minimum       │   │  cart_value     │  │
//! │  │  longitude      │   │  base_price          │   │  surcharge      │  │
//! │  └─────────────────┘   │  distance_ranges ──┐ │   │  delivery_fee   │  │
//! │                        └────────────────────┼─┘   │  distance       │  │
//! │                                             │     │  total_price    │  │
//! │                        ┌────────────────────▼─┐   └─────────────────┘  │
//! │                        │    DistanceRange     │                        │
//! │                        │  Bounded{min,max,a,b}│                        │
//! │                        │  Unavailable{min}    │                        │
//! │                        └──────────────────────┘                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All of these are immutable values built fresh for each calculation.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::{MAX_LATITUDE, MAX_LONGITUDE};

// =============================================================================
// Coordinate
// =============================================================================

/// A point on Earth in decimal degrees.
///
/// ## Invariant
/// latitude ∈ [-90, 90], longitude ∈ [-180, 180]
///
/// Deserialization goes through [`Coordinate::new`], so decoded values are
/// range-checked too.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(try_from = "UncheckedCoordinate")]
#[ts(export)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Deserialize)]
struct UncheckedCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<UncheckedCoordinate> for Coordinate {
    type Error = ValidationError;

    fn try_from(raw: UncheckedCoordinate) -> ValidationResult<Self> {
        Coordinate::new(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    /// Creates a coordinate, rejecting out-of-range values.
    ///
    /// ## Example
    /// ```rust
    /// use dopc_core::types::Coordinate;
    ///
    /// assert!(Coordinate::new(60.17094, 24.93087).is_ok());
    /// assert!(Coordinate::new(95.0, 24.93087).is_err());
    /// ```
    pub fn new(latitude: f64, longitude: f64) -> ValidationResult<Self> {
        Ok(Coordinate {
            latitude: check_latitude(latitude)?,
            longitude: check_longitude(longitude)?,
        })
    }
}

/// Range check for a latitude, labelled "Latitude" in the error.
pub fn check_latitude(value: f64) -> ValidationResult<f64> {
    check_bounds(value, "Latitude", MAX_LATITUDE)
}

/// Range check for a longitude, labelled "Longitude" in the error.
pub fn check_longitude(value: f64) -> ValidationResult<f64> {
    check_bounds(value, "Longitude", MAX_LONGITUDE)
}

fn check_bounds(value: f64, field: &str, max: i64) -> ValidationResult<f64> {
    let bound = max as f64;
    if (-bound..=bound).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: -max,
            max,
        })
    }
}

// =============================================================================
// Distance Range
// =============================================================================

/// One pricing tier of a venue.
///
/// The venue API marks the last tier with `max: 0`, meaning "no delivery
/// from `min` onward". That sentinel becomes its own variant here so tier
/// selection matches on shape instead of comparing against zero.
///
/// ```text
///   0 m        500 m        1000 m
///   ├───────────┼────────────┼──────────────────────────►
///   │ Bounded   │ Bounded    │ Unavailable
///   │ a=0, b=0  │ a=100, b=1 │ (delivery not possible)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DistanceRange {
    /// `[min, max)` in meters, fee = base + `a` + round(`b` × distance / 10).
    Bounded { min: u64, max: u64, a: Money, b: u64 },

    /// No delivery for distances `>= min`.
    Unavailable { min: u64 },
}

impl DistanceRange {
    /// Builds a tier from the venue API's raw fields, where `max == 0` is the
    /// unavailability sentinel.
    ///
    /// ## Example
    /// ```rust
    /// use dopc_core::money::Money;
    /// use dopc_core::types::DistanceRange;
    ///
    /// let last = DistanceRange::from_raw(1000, 0, Money::zero(), 0);
    /// assert_eq!(last, DistanceRange::Unavailable { min: 1000 });
    /// ```
    pub fn from_raw(min: u64, max: u64, a: Money, b: u64) -> Self {
        if max == 0 {
            DistanceRange::Unavailable { min }
        } else {
            DistanceRange::Bounded { min, max, a, b }
        }
    }

    /// Inclusive lower bound in meters.
    pub fn min(&self) -> u64 {
        match self {
            DistanceRange::Bounded { min, .. } | DistanceRange::Unavailable { min } => *min,
        }
    }

    /// Whether this is a bounded tier covering `distance`.
    pub fn covers(&self, distance: u64) -> bool {
        match self {
            DistanceRange::Bounded { min, max, .. } => *min <= distance && distance < *max,
            DistanceRange::Unavailable { .. } => false,
        }
    }
}

// =============================================================================
// Pricing Spec
// =============================================================================

/// Venue-level pricing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSpec {
    /// Carts below this value pay the difference as a surcharge.
    pub order_minimum_no_surcharge: Money,

    /// Flat part of every delivery fee.
    pub base_price: Money,

    /// Tiers ordered by ascending `min`, ending with an unavailable tier.
    pub distance_ranges: Vec<DistanceRange>,
}

impl PricingSpec {
    /// Checks that the tiers partition `[0, ∞)` without gaps or overlaps and
    /// end with an unavailable tier.
    ///
    /// Pricing itself never calls this. A gap only fails a calculation when a
    /// distance actually lands in it; this check lets callers find bad data
    /// up front.
    ///
    /// ## Example
    /// ```rust
    /// use dopc_core::money::Money;
    /// use dopc_core::types::{DistanceRange, PricingSpec, RangeIssue};
    ///
    /// let spec = PricingSpec {
    ///     order_minimum_no_surcharge: Money::from_cents(1000),
    ///     base_price: Money::from_cents(190),
    ///     distance_ranges: vec![
    ///         DistanceRange::from_raw(0, 500, Money::zero(), 0),
    ///         DistanceRange::from_raw(600, 0, Money::zero(), 0),
    ///     ],
    /// };
    /// assert_eq!(spec.check_ranges(), vec![RangeIssue::Gap { from: 500, to: 600 }]);
    /// ```
    pub fn check_ranges(&self) -> Vec<RangeIssue> {
        let mut issues = Vec::new();
        let mut expected_min = 0;
        let mut closed = false;

        for (index, range) in self.distance_ranges.iter().enumerate() {
            if closed {
                issues.push(RangeIssue::AfterUnavailable { index });
                continue;
            }

            let min = range.min();
            if index == 0 && min != 0 {
                issues.push(RangeIssue::DoesNotStartAtZero { min });
            } else if min > expected_min {
                issues.push(RangeIssue::Gap {
                    from: expected_min,
                    to: min,
                });
            } else if min < expected_min {
                issues.push(RangeIssue::Overlap {
                    index,
                    min,
                    previous_max: expected_min,
                });
            }

            match range {
                DistanceRange::Bounded { min, max, .. } => {
                    if max <= min {
                        issues.push(RangeIssue::Empty {
                            index,
                            min: *min,
                            max: *max,
                        });
                    }
                    expected_min = *max;
                }
                DistanceRange::Unavailable { .. } => closed = true,
            }
        }

        if !closed {
            issues.push(RangeIssue::MissingUnavailableTier);
        }

        issues
    }
}

/// A contiguity problem found by [`PricingSpec::check_ranges`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeIssue {
    DoesNotStartAtZero { min: u64 },
    Gap { from: u64, to: u64 },
    Overlap { index: usize, min: u64, previous_max: u64 },
    Empty { index: usize, min: u64, max: u64 },
    AfterUnavailable { index: usize },
    MissingUnavailableTier,
}

impl fmt::Display for RangeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeIssue::DoesNotStartAtZero { min } => {
                write!(f, "first range starts at {} m instead of 0 m", min)
            }
            RangeIssue::Gap { from, to } => write!(f, "no range covers {} m to {} m", from, to),
            RangeIssue::Overlap {
                index,
                min,
                previous_max,
            } => write!(
                f,
                "range {} starts at {} m, before the previous range ends at {} m",
                index, min, previous_max
            ),
            RangeIssue::Empty { index, min, max } => {
                write!(f, "range {} is empty ({} m to {} m)", index, min, max)
            }
            RangeIssue::AfterUnavailable { index } => {
                write!(f, "range {} follows the unavailable range", index)
            }
            RangeIssue::MissingUnavailableTier => f.write_str("no terminal unavailable range"),
        }
    }
}

// =============================================================================
// Price Result
// =============================================================================

/// The price breakdown of one order.
///
/// ## Invariant
/// `total_price == cart_value + small_order_surcharge + delivery_fee`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PriceResult {
    pub cart_value: Money,
    pub small_order_surcharge: Money,
    pub delivery_fee: Money,
    /// Meters between user and venue.
    pub delivery_distance: u64,
    pub total_price: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn helsinki_spec() -> PricingSpec {
        PricingSpec {
            order_minimum_no_surcharge: Money::from_cents(1000),
            base_price: Money::from_cents(190),
            distance_ranges: vec![
                DistanceRange::from_raw(0, 500, Money::zero(), 0),
                DistanceRange::from_raw(500, 1000, Money::from_cents(100), 1),
                DistanceRange::from_raw(1000, 0, Money::zero(), 0),
            ],
        }
    }

    #[test]
    fn test_coordinate_bounds_inclusive() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());

        let err = Coordinate::new(95.0, 0.0).unwrap_err();
        assert_eq!(err.to_string(), "Latitude must be between -90 and 90.");

        let err = Coordinate::new(0.0, -180.5).unwrap_err();
        assert_eq!(err.to_string(), "Longitude must be between -180 and 180.");

        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_coordinate_deserialize_is_range_checked() {
        let ok: Coordinate =
            serde_json::from_str(r#"{"latitude": 60.17094, "longitude": 24.93087}"#).unwrap();
        assert_eq!(ok, Coordinate::new(60.17094, 24.93087).unwrap());

        let err = serde_json::from_str::<Coordinate>(r#"{"latitude": 123.0, "longitude": 0.0}"#)
            .unwrap_err();
        assert!(err.to_string().contains("Latitude must be between -90 and 90."));

        assert!(serde_json::from_str::<Coordinate>(r#"{"latitude": 0.0, "longitude": 200.0}"#).is_err());
    }

    #[test]
    fn test_from_raw_sentinel() {
        assert_eq!(
            DistanceRange::from_raw(1000, 0, Money::zero(), 0),
            DistanceRange::Unavailable { min: 1000 }
        );
        assert!(matches!(
            DistanceRange::from_raw(0, 500, Money::zero(), 0),
            DistanceRange::Bounded { min: 0, max: 500, .. }
        ));
    }

    #[test]
    fn test_covers_is_half_open() {
        let range = DistanceRange::from_raw(500, 1000, Money::from_cents(100), 1);
        assert!(!range.covers(499));
        assert!(range.covers(500));
        assert!(range.covers(999));
        assert!(!range.covers(1000));
        assert!(!DistanceRange::Unavailable { min: 0 }.covers(5));
    }

    #[test]
    fn test_well_formed_ranges_partition_distance_line() {
        let spec = helsinki_spec();
        assert!(spec.check_ranges().is_empty());

        // Every distance below the limit lands in exactly one bounded range.
        for distance in 0..1000 {
            let matches = spec
                .distance_ranges
                .iter()
                .filter(|r| r.covers(distance))
                .count();
            assert_eq!(matches, 1, "distance {}", distance);
        }
    }

    #[test]
    fn test_check_ranges_reports_problems() {
        let spec = PricingSpec {
            distance_ranges: vec![
                DistanceRange::from_raw(100, 500, Money::zero(), 0),
                DistanceRange::from_raw(400, 400, Money::zero(), 0),
            ],
            ..helsinki_spec()
        };

        assert_eq!(
            spec.check_ranges(),
            vec![
                RangeIssue::DoesNotStartAtZero { min: 100 },
                RangeIssue::Overlap {
                    index: 1,
                    min: 400,
                    previous_max: 500
                },
                RangeIssue::Empty {
                    index: 1,
                    min: 400,
                    max: 400
                },
                RangeIssue::MissingUnavailableTier,
            ]
        );

        let spec = PricingSpec {
            distance_ranges: vec![
                DistanceRange::from_raw(0, 0, Money::zero(), 0),
                DistanceRange::from_raw(0, 500, Money::zero(), 0),
            ],
            ..helsinki_spec()
        };
        assert_eq!(
            spec.check_ranges(),
            vec![RangeIssue::AfterUnavailable { index: 1 }]
        );
    }

    #[test]
    fn test_price_result_serializes_camel_case() {
        let result = PriceResult {
            cart_value: Money::from_cents(1000),
            small_order_surcharge: Money::zero(),
            delivery_fee: Money::from_cents(190),
            delivery_distance: 177,
            total_price: Money::from_cents(1190),
        };

        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["cartValue"], 1000);
        assert_eq!(json["smallOrderSurcharge"], 0);
        assert_eq!(json["deliveryFee"], 190);
        assert_eq!(json["deliveryDistance"], 177);
        assert_eq!(json["totalPrice"], 1190);
    }
}
