//! # Pricing Engine
//!
//! Surcharge, tier selection, delivery fee and total.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  cart ──────────────┬──► small_order_surcharge(cart, minimum)          │
//! │                     │                                                   │
//! │  distance ──► find_distance_range(tiers) ──► delivery_fee(base, tier)  │
//! │                     │                                                   │
//! │                     └──► total_price(cart, surcharge, fee)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding
//! The distance component `b × distance / 10` is rounded half up, computed
//! in exact integer arithmetic.
//!
//! ## Overflow
//! Every sum is checked. A component that does not fit in i64 cents fails
//! with [`CoreError::AmountOverflow`] instead of wrapping.

use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{DistanceRange, PriceResult, PricingSpec};

/// Surcharge for carts below the venue minimum: `max(0, minimum − cart)`.
///
/// ## Example
/// ```rust
/// use dopc_core::money::Money;
/// use dopc_core::pricing::small_order_surcharge;
///
/// let minimum = Money::from_cents(1000);
/// assert_eq!(small_order_surcharge(Money::from_cents(890), minimum).cents(), 110);
/// assert_eq!(small_order_surcharge(Money::from_cents(1200), minimum).cents(), 0);
/// ```
pub fn small_order_surcharge(cart: Money, order_minimum_no_surcharge: Money) -> Money {
    order_minimum_no_surcharge.saturating_sub_to_zero(cart)
}

/// Picks the tier that applies to `distance`.
///
/// Tiers are scanned in order and the first bounded tier with
/// `min <= distance < max` wins. Reaching an unavailable tier whose `min` is
/// at or below the distance fails the calculation.
///
/// ## Errors
/// - [`CoreError::DeliveryNotAvailable`] - distance is in the unavailable tier
/// - [`CoreError::NoMatchingRange`] - no tier covers the distance (bad tier data)
pub fn find_distance_range(ranges: &[DistanceRange], distance: u64) -> CoreResult<&DistanceRange> {
    for range in ranges {
        match range {
            DistanceRange::Unavailable { min } if distance >= *min => {
                return Err(CoreError::DeliveryNotAvailable {
                    distance,
                    limit: *min,
                });
            }
            DistanceRange::Unavailable { .. } => continue,
            DistanceRange::Bounded { .. } if range.covers(distance) => {
                debug!(distance, min = range.min(), "Matched distance range");
                return Ok(range);
            }
            DistanceRange::Bounded { .. } => continue,
        }
    }

    Err(CoreError::NoMatchingRange { distance })
}

/// Delivery fee: `base + a + round(b × distance / 10)`.
///
/// ## Example
/// ```rust
/// use dopc_core::money::Money;
/// use dopc_core::pricing::delivery_fee;
/// use dopc_core::types::DistanceRange;
///
/// let ranges = [
///     DistanceRange::from_raw(0, 500, Money::zero(), 0),
///     DistanceRange::from_raw(500, 1000, Money::from_cents(100), 1),
///     DistanceRange::from_raw(1000, 0, Money::zero(), 0),
/// ];
///
/// // 190 + 100 + round(1 × 600 / 10)
/// let fee = delivery_fee(Money::from_cents(190), &ranges, 600).unwrap();
/// assert_eq!(fee.cents(), 350);
/// ```
pub fn delivery_fee(base_price: Money, ranges: &[DistanceRange], distance: u64) -> CoreResult<Money> {
    match find_distance_range(ranges, distance)? {
        DistanceRange::Bounded { a, b, .. } => {
            let fee = checked_sum(&[base_price, *a, distance_component(*b, distance)?])?;
            debug!(distance, fee = fee.cents(), "Computed delivery fee");
            Ok(fee)
        }
        DistanceRange::Unavailable { min } => Err(CoreError::DeliveryNotAvailable {
            distance,
            limit: *min,
        }),
    }
}

/// `round(b × distance / 10)`, ties up.
fn distance_component(b: u64, distance: u64) -> CoreResult<Money> {
    // u64 × u64 always fits in u128.
    let rounded = (u128::from(b) * u128::from(distance) + 5) / 10;
    i64::try_from(rounded)
        .map(Money::from_cents)
        .map_err(|_| CoreError::AmountOverflow)
}

fn checked_sum(parts: &[Money]) -> CoreResult<Money> {
    parts
        .iter()
        .try_fold(Money::zero(), |acc, part| acc.checked_add(*part))
        .ok_or(CoreError::AmountOverflow)
}

/// `cart + surcharge + fee`.
///
/// ## Errors
/// [`CoreError::AmountOverflow`] when the total does not fit in i64 cents.
pub fn total_price(cart: Money, surcharge: Money, fee: Money) -> CoreResult<Money> {
    checked_sum(&[cart, surcharge, fee])
}

/// Runs surcharge, fee and total for one order.
pub fn price_order(cart: Money, pricing: &PricingSpec, distance: u64) -> CoreResult<PriceResult> {
    let surcharge = small_order_surcharge(cart, pricing.order_minimum_no_surcharge);
    let fee = delivery_fee(pricing.base_price, &pricing.distance_ranges, distance)?;

    Ok(PriceResult {
        cart_value: cart,
        small_order_surcharge: surcharge,
        delivery_fee: fee,
        delivery_distance: distance,
        total_price: total_price(cart, surcharge, fee)?,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
