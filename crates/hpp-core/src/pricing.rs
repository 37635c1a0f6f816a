//! Selling-price suggestion from a target margin.

/// Margin offered when the user has not picked one.
pub const DEFAULT_MARGIN: f64 = 50.0;

/// Quick-pick margins, in percent.
pub const MARGIN_PRESETS: [f64; 3] = [30.0, 50.0, 70.0];

/// The price at which `margin_percent` of the price is profit:
/// `hpp_per_unit / (1 - margin_percent / 100)`.
///
/// Any margin is accepted. A result that would be infinite or `NaN` (e.g. at
/// a margin of exactly 100) is reported as zero. No rounding happens here.
pub fn suggest_price(hpp_per_unit: f64, margin_percent: f64) -> f64 {
  let denominator = 1.0 - margin_percent / 100.0;
  if denominator == 0.0 || !denominator.is_finite() {
    return 0.0;
  }
  let price = hpp_per_unit / denominator;
  if price.is_finite() { price } else { 0.0 }
}
