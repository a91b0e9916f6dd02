//! # Money Module
//!
//! Provides the `Money` type for handling euro amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Cart "10.55" → 1055 cents                                            │
//! │    Fee 190 + 100 + 60 → 350 cents                                       │
//! │    Every figure in the price breakdown is an exact integer             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use dopc_core::money::Money;
//!
//! let cart = Money::from_cents(1000);                         // 10,00 €
//! let total = cart.checked_add(Money::from_cents(190));       // 11,90 €
//! assert_eq!(total, Some(Money::from_cents(1190)));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Group separator and currency spacing of the Finnish locale (no-break space).
const NBSP: char = '\u{a0}';

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in euro cents (minor units).
///
/// ## Design Decisions
/// - **i64 (signed)**: keeps subtraction total; computed price fields are
///   clamped or summed so they never go below zero
/// - **Single field tuple struct**: serializes as the bare integer, which is
///   what the venue API and the JSON output use
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use dopc_core::money::Money;
    ///
    /// let fee = Money::from_cents(190);
    /// assert_eq!(fee.cents(), 190);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole euro portion.
    ///
    /// ## Example
    /// ```rust
    /// use dopc_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1055).euros(), 10);
    /// ```
    #[inline]
    pub const fn euros(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Adds `other`, or `None` when the sum does not fit in i64 cents.
    ///
    /// ## Example
    /// ```rust
    /// use dopc_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1000).checked_add(Money::from_cents(190)), Some(Money::from_cents(1190)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
    /// ```
    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Subtracts `other`, clamping the result at zero.
    ///
    /// ## Example
    /// ```rust
    /// use dopc_core::money::Money;
    ///
    /// let minimum = Money::from_cents(1000);
    /// assert_eq!(minimum.saturating_sub_to_zero(Money::from_cents(890)).cents(), 110);
    /// assert_eq!(minimum.saturating_sub_to_zero(Money::from_cents(1500)).cents(), 0);
    /// ```
    #[inline]
    pub fn saturating_sub_to_zero(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0).max(0))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Finnish euro formatting, as shown on the price breakdown: `1 234,56 €`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.euros().unsigned_abs().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(NBSP);
            }
            grouped.push(ch);
        }

        write!(f, "{}{},{:02}{}€", sign, grouped, self.cents_part(), NBSP)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
