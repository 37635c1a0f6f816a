//! Products and their cost items.
//!
//! Field names serialise in camelCase so the stored JSON keeps the layout the
//! calculator has always written.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::category::Category;

// ─── CostItem ────────────────────────────────────────────────────────────────

/// One cost line. The price covers the whole production batch, not one unit;
/// the yield divides it later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostItem {
  #[serde(deserialize_with = "stored_id")]
  pub id:         Uuid,
  pub category:   Category,
  pub name:       String,
  /// Missing or `null` in stored data decodes as zero.
  #[serde(default, deserialize_with = "price_or_zero")]
  pub unit_price: f64,
}

impl CostItem {
  /// A blank item in `category` with a fresh id.
  pub fn new(category: Category) -> Self {
    Self {
      id: Uuid::new_v4(),
      category,
      name: String::new(),
      unit_price: 0.0,
    }
  }

  /// The price as it counts towards totals: non-finite values count as zero.
  pub fn effective_price(&self) -> f64 {
    if self.unit_price.is_finite() { self.unit_price } else { 0.0 }
  }
}

/// Prices are never negative. Negative and non-finite input becomes zero,
/// both when editing and when loading stored data.
pub fn normalize_price(price: f64) -> f64 {
  if price.is_finite() && price >= 0.0 { price } else { 0.0 }
}

/// A non-finite yield becomes 1. Zero and negative yields are kept; the
/// totals engine guards them.
pub fn normalize_yield(production_yield: f64) -> f64 {
  if production_yield.is_finite() { production_yield } else { 1.0 }
}

fn price_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

fn yield_or_one<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(1.0))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
  Text(String),
  Number(serde_json::Number),
}

/// Ids written by older versions are arbitrary strings or numbers. Anything
/// that is not already a UUID maps to a name-based UUID derived from its text,
/// so the same stored id always decodes to the same value.
pub(crate) fn stored_id<'de, D>(deserializer: D) -> Result<Uuid, D::Error>
where
  D: Deserializer<'de>,
{
  let text = match RawId::deserialize(deserializer)? {
    RawId::Text(s) => s,
    RawId::Number(n) => n.to_string(),
  };
  Ok(
    Uuid::parse_str(&text)
      .unwrap_or_else(|_| Uuid::new_v5(&Uuid::NAMESPACE_OID, text.as_bytes())),
  )
}

// ─── Product ─────────────────────────────────────────────────────────────────

/// The product being costed: a name, a batch yield and its cost items.
///
/// `production_yield` is meant to be positive, but any value is accepted
/// while editing; the totals engine guards the division.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  #[serde(deserialize_with = "stored_id")]
  pub id:               Uuid,
  pub name:             String,
  /// `null` in stored data (how JSON writes a non-finite number) decodes as 1.
  #[serde(deserialize_with = "yield_or_one")]
  pub production_yield: f64,
  /// Insertion order. Grouping by category is done on read.
  pub items:            Vec<CostItem>,
}

impl Product {
  /// An empty product: fresh id, no name, yield 1, no items.
  pub fn new() -> Self {
    Self {
      id:               Uuid::new_v4(),
      name:             String::new(),
      production_yield: 1.0,
      items:            Vec::new(),
    }
  }

  /// Look up an item by id.
  pub fn item(&self, id: Uuid) -> Option<&CostItem> {
    self.items.iter().find(|item| item.id == id)
  }

  /// Same contents under a freshly generated id.
  pub fn with_fresh_id(&self) -> Self {
    Self { id: Uuid::new_v4(), ..self.clone() }
  }
}

impl Default for Product {
  fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn new_product_is_empty_with_unit_yield() {
    let p = Product::new();
    assert!(p.name.is_empty());
    assert_eq!(p.production_yield, 1.0);
    assert!(p.items.is_empty());
    assert_ne!(p.id, Product::new().id);
  }

  #[test]
  fn serialises_camel_case() {
    let mut p = Product::new();
    p.items.push(CostItem::new(Category::Packaging));
    let json = serde_json::to_value(&p).unwrap();
    assert!(json.get("productionYield").is_some());
    assert!(json["items"][0].get("unitPrice").is_some());
    assert_eq!(json["items"][0]["category"], "packaging");
  }

  #[test]
  fn missing_or_null_price_decodes_as_zero() {
    let id = Uuid::new_v4();
    let missing = format!(r#"{{"id":"{id}","category":"labor","name":"Masak"}}"#);
    let null =
      format!(r#"{{"id":"{id}","category":"labor","name":"Masak","unitPrice":null}}"#);

    let a: CostItem = serde_json::from_str(&missing).unwrap();
    let b: CostItem = serde_json::from_str(&null).unwrap();
    assert_eq!(a.unit_price, 0.0);
    assert_eq!(b.unit_price, 0.0);
  }

  #[test]
  fn non_uuid_ids_decode_to_stable_uuids() {
    let raw = r#"{"id":"lq3x9k2ab","category":"Bahan Baku","name":"Gula","unitPrice":1000}"#;
    let a: CostItem = serde_json::from_str(raw).unwrap();
    let b: CostItem = serde_json::from_str(raw).unwrap();
    assert_eq!(a.id, b.id);
    assert_eq!(a.category, Category::RawMaterials);

    let numeric: CostItem =
      serde_json::from_str(r#"{"id":1718000000000,"category":"labor","name":"Masak"}"#).unwrap();
    assert_ne!(numeric.id, a.id);

    let id = Uuid::new_v4();
    let kept: CostItem =
      serde_json::from_str(&format!(r#"{{"id":"{id}","category":"labor","name":"x"}}"#)).unwrap();
    assert_eq!(kept.id, id);
  }

  #[test]
  fn normalizing_prices_and_yields() {
    assert_eq!(normalize_price(2_500.0), 2_500.0);
    assert_eq!(normalize_price(-2_000.0), 0.0);
    assert_eq!(normalize_price(f64::NAN), 0.0);
    assert_eq!(normalize_price(f64::INFINITY), 0.0);
    assert_eq!(normalize_yield(-3.0), -3.0);
    assert_eq!(normalize_yield(0.0), 0.0);
    assert_eq!(normalize_yield(f64::NAN), 1.0);
  }

  #[test]
  fn fresh_id_keeps_contents() {
    let mut p = Product::new();
    p.name = "Kue".into();
    p.items.push(CostItem::new(Category::Labor));

    let copy = p.with_fresh_id();
    assert_ne!(copy.id, p.id);
    assert_eq!(copy.name, p.name);
    assert_eq!(copy.items, p.items);
  }
}
