//! Price breakdown rendering, as text or JSON.

use dopc_core::PriceResult;

use crate::calculator::Calculation;

/// Human-readable breakdown:
///
/// ```text
/// Price breakdown
/// Cart value             10,00 €
/// Delivery fee            1,90 €
/// Delivery distance        177 m
/// Small order surcharge   0,00 €
/// Total price            11,90 €
/// ```
pub fn render_text(result: &PriceResult) -> String {
    let rows = [
        ("Cart value", result.cart_value.to_string()),
        ("Delivery fee", result.delivery_fee.to_string()),
        ("Delivery distance", format!("{} m", result.delivery_distance)),
        ("Small order surcharge", result.small_order_surcharge.to_string()),
        ("Total price", result.total_price.to_string()),
    ];

    let width = rows
        .iter()
        .map(|(_, value)| value.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::from("Price breakdown");
    for (label, value) in rows {
        let pad = width - value.chars().count();
        out.push_str(&format!("\n{:<22}{}{}", label, " ".repeat(pad), value));
    }
    out
}

/// Pretty JSON with raw integer cents and meters.
pub fn render_json(calculation: &Calculation) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(calculation)?)
}
