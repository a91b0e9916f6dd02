//! # Input Parsing
//!
//! Turns the raw text of the calculator form into validated quantities.
//!
//! ## Accepted Input
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Field            Accepts                  Produces                     │
//! │  ───────────────  ───────────────────────  ──────────────────────────   │
//! │  Venue slug       any non-blank text       trimmed &str                │
//! │  Cart value       10 | 10.5 | 10.55        Money (1000 | 1050 | 1055)  │
//! │  User latitude    any finite number        f64 in [-90, 90]            │
//! │  User longitude   any finite number        f64 in [-180, 180]          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Surrounding whitespace is trimmed; nothing else is forgiven. No thousands
//! separators, no sign on the cart value, no comma as decimal separator.

use crate::error::{FormField, ValidationError, ValidationResult};
use crate::money::Money;
use crate::types::{check_latitude, check_longitude};

// =============================================================================
// Currency
// =============================================================================

/// Parses a euro amount into cents.
///
/// ## Rules
/// - digits, optionally followed by `.` and one or two digits
/// - one fractional digit means tens of cents (`10.5` → 1050)
///
/// ## Example
/// ```rust
/// use dopc_core::parse::parse_euro_cents;
///
/// assert_eq!(parse_euro_cents("10").unwrap().cents(), 1000);
/// assert_eq!(parse_euro_cents(" 10.5 ").unwrap().cents(), 1050);
/// assert_eq!(parse_euro_cents("10.55").unwrap().cents(), 1055);
/// assert!(parse_euro_cents("10.555").is_err());
/// assert!(parse_euro_cents("10,55").is_err());
/// ```
pub fn parse_euro_cents(input: &str) -> ValidationResult<Money> {
    let field = FormField::CartValue.label();
    let s = input.trim();

    if s.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let (euros, fraction) = match s.split_once('.') {
        Some((euros, fraction)) => (euros, Some(fraction)),
        None => (s, None),
    };

    let well_formed = is_ascii_digits(euros)
        && fraction.map_or(true, |f| (1..=2).contains(&f.len()) && is_ascii_digits(f));
    if !well_formed {
        return Err(ValidationError::InvalidCurrency {
            field: field.to_string(),
        });
    }

    let too_large = || ValidationError::TooLarge {
        field: field.to_string(),
    };

    let euros: i64 = euros.parse().map_err(|_| too_large())?;
    let cents: i64 = match fraction {
        // Right-pad to two digits: "5" is fifty cents.
        Some(f) if f.len() == 1 => f.parse::<i64>().map_err(|_| too_large())? * 10,
        Some(f) => f.parse().map_err(|_| too_large())?,
        None => 0,
    };

    euros
        .checked_mul(100)
        .and_then(|c| c.checked_add(cents))
        .map(Money::from_cents)
        .ok_or_else(too_large)
}

fn is_ascii_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

// =============================================================================
// Decimals & Coordinates
// =============================================================================

/// Parses a finite real number.
///
/// Accepts anything Rust's `f64` parser accepts (signs, exponents), then
/// rejects `NaN` and infinities. Range checks belong to the caller.
///
/// ## Example
/// ```rust
/// use dopc_core::parse::parse_decimal;
///
/// assert_eq!(parse_decimal("-12.5", "Offset").unwrap(), -12.5);
/// assert_eq!(parse_decimal("1e2", "Offset").unwrap(), 100.0);
/// assert_eq!(
///     parse_decimal("abc", "Offset").unwrap_err().to_string(),
///     "Offset must be a number."
/// );
/// ```
pub fn parse_decimal(input: &str, field: &str) -> ValidationResult<f64> {
    let s = input.trim();

    if s.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    match s.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(ValidationError::NotANumber {
            field: field.to_string(),
        }),
    }
}

/// Parses the user latitude field and checks it lies in [-90, 90].
pub fn parse_latitude(input: &str) -> ValidationResult<f64> {
    parse_decimal(input, FormField::UserLatitude.label()).and_then(check_latitude)
}

/// Parses the user longitude field and checks it lies in [-180, 180].
pub fn parse_longitude(input: &str) -> ValidationResult<f64> {
    parse_decimal(input, FormField::UserLongitude.label()).and_then(check_longitude)
}

// =============================================================================
// Venue Slug
// =============================================================================

/// Validates a venue slug and returns it trimmed.
///
/// ## Example
/// ```rust
/// use dopc_core::parse::validate_venue_slug;
///
/// assert_eq!(validate_venue_slug("  my-venue ").unwrap(), "my-venue");
/// assert!(validate_venue_slug("   ").is_err());
/// ```
pub fn validate_venue_slug(input: &str) -> ValidationResult<&str> {
    let slug = input.trim();

    if slug.is_empty() {
        return Err(ValidationError::Required {
            field: FormField::VenueSlug.label().to_string(),
        });
    }

    Ok(slug)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_euro_cents_valid() {
        assert_eq!(parse_euro_cents("10").unwrap().cents(), 1000);
        assert_eq!(parse_euro_cents("0").unwrap().cents(), 0);
        assert_eq!(parse_euro_cents("10.5").unwrap().cents(), 1050);
        assert_eq!(parse_euro_cents("10.05").unwrap().cents(), 1005);
        assert_eq!(parse_euro_cents("10.55").unwrap().cents(), 1055);
        assert_eq!(parse_euro_cents("\t8.9\n").unwrap().cents(), 890);
        assert_eq!(parse_euro_cents("007").unwrap().cents(), 700);
    }

    #[test]
    fn test_parse_euro_cents_required() {
        for input in ["", "   ", "\t"] {
            let err = parse_euro_cents(input).unwrap_err();
            assert_eq!(err.to_string(), "Cart value is required.");
        }
    }

    #[test]
    fn test_parse_euro_cents_rejects_bad_format() {
        for input in [
            "10.555", "10,55", "1 000", "1,000.00", "+10", "-10", "10.", ".5", "abc", "1e3",
            "10.5x", "１０",
        ] {
            let err = parse_euro_cents(input).unwrap_err();
            assert_eq!(
                err.to_string(),
                "Cart value must be like 10 or 10.55",
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_parse_euro_cents_too_large() {
        let err = parse_euro_cents("99999999999999999999").unwrap_err();
        assert!(matches!(err, ValidationError::TooLarge { .. }));

        let err = parse_euro_cents("92233720368547759").unwrap_err();
        assert!(matches!(err, ValidationError::TooLarge { .. }));
    }

    #[test]
    fn test_parse_euro_cents_round_trips_formatted_cents() {
        for cents in (0..=250_000i64).step_by(7) {
            let text = format!("{}.{:02}", cents / 100, cents % 100);
            assert_eq!(parse_euro_cents(&text).unwrap().cents(), cents, "{}", text);
        }
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal(" 60.17094 ", "User latitude").unwrap(), 60.17094);
        assert_eq!(parse_decimal("-0.5", "User latitude").unwrap(), -0.5);
        assert_eq!(parse_decimal("2.5e1", "User latitude").unwrap(), 25.0);

        assert_eq!(
            parse_decimal("", "User latitude").unwrap_err().to_string(),
            "User latitude is required."
        );
        for input in ["abc", "NaN", "inf", "-infinity", "1e400", "12,5"] {
            assert_eq!(
                parse_decimal(input, "User longitude").unwrap_err().to_string(),
                "User longitude must be a number.",
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_parse_coordinates_range_checked() {
        assert_eq!(parse_latitude("90").unwrap(), 90.0);
        assert_eq!(parse_longitude("-180").unwrap(), -180.0);

        assert_eq!(
            parse_latitude("95").unwrap_err().to_string(),
            "Latitude must be between -90 and 90."
        );
        assert_eq!(
            parse_longitude("180.0001").unwrap_err().to_string(),
            "Longitude must be between -180 and 180."
        );
        assert_eq!(
            parse_latitude("north").unwrap_err().to_string(),
            "User latitude must be a number."
        );
    }

    #[test]
    fn test_validate_venue_slug() {
        assert_eq!(
            validate_venue_slug("home-assignment-venue-helsinki").unwrap(),
            "home-assignment-venue-helsinki"
        );
        assert_eq!(
            validate_venue_slug("").unwrap_err().to_string(),
            "Venue slug is required."
        );
    }
}
