//! The totals engine: category breakdown, total cost and cost per unit.
//!
//! Totals are never stored. They are recomputed from the product on every
//! read, so there is nothing to invalidate.

use serde::Serialize;

use crate::{category::Category, product::Product};

// ─── Breakdown ───────────────────────────────────────────────────────────────

/// Batch cost per category, always holding all four categories.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Breakdown([f64; 4]);

impl Breakdown {
  pub fn get(&self, category: Category) -> f64 { self.0[category.index()] }

  fn add(&mut self, category: Category, amount: f64) {
    self.0[category.index()] += amount;
  }

  /// `(category, subtotal)` pairs in declaration order.
  pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
    Category::ALL.into_iter().map(|c| (c, self.get(c)))
  }

  pub fn sum(&self) -> f64 { self.0.iter().sum() }
}

impl Serialize for Breakdown {
  fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeMap;
    let mut map = serializer.serialize_map(Some(4))?;
    for (category, subtotal) in self.iter() {
      map.serialize_entry(category.key(), &subtotal)?;
    }
    map.end()
  }
}

// ─── HppResult ───────────────────────────────────────────────────────────────

/// Derived totals for a product.
///
/// `total_cost` equals both the breakdown sum and the sum of item prices.
/// `hpp_per_unit` is `total_cost / production_yield`, or zero when the yield
/// is not a positive number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HppResult {
  pub total_cost:   f64,
  pub breakdown:    Breakdown,
  pub hpp_per_unit: f64,
}

/// One row of the breakdown panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryShare {
  pub category:   Category,
  /// Batch cost for the category.
  pub subtotal:   f64,
  /// `subtotal / yield`, zero when the yield is not positive.
  pub per_unit:   f64,
  /// Share of the total in percent, zero when the total is not positive.
  pub percentage: f64,
}

/// Aggregate the product's items in a single pass. Never fails.
pub fn compute_totals(product: &Product) -> HppResult {
  let mut breakdown = Breakdown::default();
  for item in &product.items {
    breakdown.add(item.category, item.effective_price());
  }

  let total_cost = breakdown.sum();
  let hpp_per_unit = per_unit(total_cost, product.production_yield);

  HppResult { total_cost, breakdown, hpp_per_unit }
}

impl HppResult {
  /// Per-category subtotal, per-unit share and percentage of total.
  pub fn shares(&self, production_yield: f64) -> Vec<CategoryShare> {
    self
      .breakdown
      .iter()
      .map(|(category, subtotal)| CategoryShare {
        category,
        subtotal,
        per_unit: per_unit(subtotal, production_yield),
        percentage: if self.total_cost > 0.0 {
          subtotal / self.total_cost * 100.0
        } else {
          0.0
        },
      })
      .collect()
  }
}

/// `amount / production_yield`, guarded so `NaN` and infinities never escape.
fn per_unit(amount: f64, production_yield: f64) -> f64 {
  if production_yield > 0.0 && production_yield.is_finite() {
    amount / production_yield
  } else {
    0.0
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::product::CostItem;

  fn item(category: Category, price: f64) -> CostItem {
    CostItem { unit_price: price, ..CostItem::new(category) }
  }

  fn kue() -> Product {
    Product {
      name: "Kue".into(),
      production_yield: 10.0,
      items: vec![
        item(Category::RawMaterials, 50_000.0),
        item(Category::Packaging, 10_000.0),
      ],
      ..Product::new()
    }
  }

  #[test]
  fn kue_totals() {
    let t = compute_totals(&kue());
    assert_eq!(t.total_cost, 60_000.0);
    assert_eq!(t.hpp_per_unit, 6_000.0);
    assert_eq!(t.breakdown.get(Category::RawMaterials), 50_000.0);
    assert_eq!(t.breakdown.get(Category::Packaging), 10_000.0);
    assert_eq!(t.breakdown.get(Category::Labor), 0.0);
  }

  #[test]
  fn total_matches_item_sum_and_breakdown() {
    let mut p = kue();
    p.items.push(item(Category::Labor, 12_500.5));
    p.items.push(item(Category::Overhead, 3_000.25));
    p.items.push(item(Category::RawMaterials, 700.0));

    let t = compute_totals(&p);
    let item_sum: f64 = p.items.iter().map(|i| i.unit_price).sum();
    assert!((t.total_cost - item_sum).abs() < 1e-9);
    assert!((t.total_cost - t.breakdown.sum()).abs() < 1e-9);
  }

  #[test]
  fn non_positive_yield_gives_zero_per_unit() {
    for y in [0.0, -1.0, -250.0, f64::NAN] {
      let p = Product { production_yield: y, ..kue() };
      let t = compute_totals(&p);
      assert_eq!(t.hpp_per_unit, 0.0, "yield {y}");
      assert_eq!(t.total_cost, 60_000.0);
    }
  }

  #[test]
  fn empty_product_is_all_zero() {
    let t = compute_totals(&Product::new());
    assert_eq!(t.total_cost, 0.0);
    assert_eq!(t.hpp_per_unit, 0.0);
    assert!(t.breakdown.iter().all(|(_, v)| v == 0.0));
  }

  #[test]
  fn non_finite_price_counts_as_zero() {
    let mut p = kue();
    p.items.push(item(Category::Overhead, f64::NAN));
    assert_eq!(compute_totals(&p).total_cost, 60_000.0);
  }

  #[test]
  fn breakdown_iterates_in_declaration_order() {
    let order: Vec<Category> =
      compute_totals(&kue()).breakdown.iter().map(|(c, _)| c).collect();
    assert_eq!(order, Category::ALL.to_vec());
  }

  #[test]
  fn shares_report_per_unit_and_percentage() {
    let p = kue();
    let shares = compute_totals(&p).shares(p.production_yield);
    assert_eq!(shares.len(), 4);

    let raw = shares[0];
    assert_eq!(raw.category, Category::RawMaterials);
    assert_eq!(raw.per_unit, 5_000.0);
    assert!((raw.percentage - 83.333_333).abs() < 1e-4);

    let empty = compute_totals(&Product::new()).shares(0.0);
    assert!(empty.iter().all(|s| s.per_unit == 0.0 && s.percentage == 0.0));
  }

  #[test]
  fn breakdown_serialises_by_key() {
    let json = serde_json::to_value(compute_totals(&kue())).unwrap();
    assert_eq!(json["breakdown"]["raw_materials"], 50_000.0);
    assert_eq!(json["hppPerUnit"], 6_000.0);
  }
}
