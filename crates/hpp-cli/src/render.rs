//! Plain-text views: the editing view, the print view and the history list.

use chrono::Local;
use hpp_core::{
  category::Category,
  editor::items_in,
  history::SavedRecord,
  pricing::{MARGIN_PRESETS, suggest_price},
  product::Product,
  totals::{CategoryShare, HppResult},
};

/// Append one formatted line to a `String`.
macro_rules! outln {
  ($out:expr, $($arg:tt)*) => {{
    $out.push_str(&format!($($arg)*));
    $out.push('\n');
  }};
}

/// Whole rupiah with `.` as thousands separator, e.g. `Rp 12.000`.
/// Rounding happens here and nowhere else.
pub fn rupiah(amount: f64) -> String {
  let rounded = if amount.is_finite() { amount.round() } else { 0.0 };
  let digits = format!("{:.0}", rounded.abs());

  let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, ch) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      grouped.push('.');
    }
    grouped.push(ch);
  }

  if rounded < 0.0 { format!("-Rp {grouped}") } else { format!("Rp {grouped}") }
}

fn display_name(name: &str) -> &str {
  if name.trim().is_empty() { "(unnamed)" } else { name }
}

/// The editing view: items grouped by category with their ids, then totals.
pub fn product_view(product: &Product, totals: &HppResult, margin: f64) -> String {
  let mut out = String::new();
  outln!(out, "Product  {}", display_name(&product.name));
  outln!(out, "Yield    {} unit(s)", product.production_yield);

  for category in Category::ALL {
    outln!(out, "\n{}  [{}]", category.label(), category.key());
    let mut any = false;
    for item in items_in(product, category) {
      any = true;
      let name = if item.name.is_empty() { category.placeholder() } else { item.name.as_str() };
      outln!(out, "  {}  {:<32} {:>16}", item.id, name, rupiah(item.unit_price));
    }
    if !any {
      outln!(out, "  (no items; `hpp add {}` to add one)", category.key());
    }
  }

  out.push('\n');
  out.push_str(&summary_block(product, totals, margin));
  out
}

/// The print view: no ids, breakdown with per-unit share and percentage.
pub fn print_view(
  product: &Product,
  totals: &HppResult,
  shares: &[CategoryShare],
  margin: f64,
) -> String {
  let mut out = String::new();
  outln!(out, "HPP CALCULATION: {}", display_name(&product.name));
  outln!(out, "{}", "=".repeat(64));

  for category in Category::ALL {
    let items: Vec<_> = items_in(product, category).collect();
    if items.is_empty() {
      continue;
    }
    outln!(out, "{}", category.label());
    for item in items {
      outln!(out, "  {:<44} {:>16}", item.name, rupiah(item.unit_price));
    }
  }

  outln!(out, "\nBreakdown");
  outln!(out, "  {:<14} {:>16} {:>16} {:>8}", "Category", "Subtotal", "Per unit", "Share");
  for share in shares {
    outln!(
      out,
      "  {:<14} {:>16} {:>16} {:>7.1}%",
      share.category.label(),
      rupiah(share.subtotal),
      rupiah(share.per_unit),
      share.percentage,
    );
  }

  out.push('\n');
  out.push_str(&summary_block(product, totals, margin));
  out
}

fn summary_block(product: &Product, totals: &HppResult, margin: f64) -> String {
  let mut out = String::new();
  outln!(out, "Total production cost  {}", rupiah(totals.total_cost));
  outln!(
    out,
    "HPP per unit           {}  (over {} unit(s))",
    rupiah(totals.hpp_per_unit),
    product.production_yield
  );
  outln!(
    out,
    "Suggested price        {}  (margin {margin}%)",
    rupiah(suggest_price(totals.hpp_per_unit, margin))
  );
  out
}

/// Suggested price at `margin` plus each preset margin.
pub fn price_view(hpp_per_unit: f64, margin: f64) -> String {
  let mut out = String::new();
  outln!(out, "HPP per unit  {}", rupiah(hpp_per_unit));
  outln!(out, "Margin {margin:>5}%  {}", rupiah(suggest_price(hpp_per_unit, margin)));
  for preset in MARGIN_PRESETS {
    if preset != margin {
      outln!(out, "Margin {preset:>5}%  {}", rupiah(suggest_price(hpp_per_unit, preset)));
    }
  }
  out
}

/// One line per record, newest first.
pub fn history_view(records: &[&SavedRecord], query: Option<&str>) -> String {
  if records.is_empty() {
    return match query {
      Some(q) if !q.trim().is_empty() => format!("No saved calculation matches {q:?}.\n"),
      _ => "History is empty.\n".to_owned(),
    };
  }

  let mut out = String::new();
  for record in records {
    let when = record.timestamp.with_timezone(&Local).format("%d %b %Y %H:%M");
    outln!(
      out,
      "{}  {}  {:<28} total {:>14}  per unit {:>12}",
      record.id,
      when,
      display_name(&record.product.name),
      rupiah(record.total_cost),
      rupiah(record.hpp_per_unit),
    );
  }
  out
}
