//! JSON encoding of the persisted values, with validation on the way in.
//!
//! Decoding is typed, so a value of the wrong shape is an error rather than
//! something half-read. Values that have the right shape but impossible
//! contents are repaired:
//!
//! - negative or non-finite prices become zero;
//! - a non-finite yield becomes 1;
//! - a history record whose id repeats an earlier one is dropped.

use std::collections::HashSet;

use crate::{
  Result,
  history::{History, SavedRecord},
  product::{CostItem, Product, normalize_price, normalize_yield},
};

// ─── Product ─────────────────────────────────────────────────────────────────

pub fn encode_product(product: &Product) -> Result<String> {
  Ok(serde_json::to_string(product)?)
}

pub fn decode_product(s: &str) -> Result<Product> {
  let product: Product = serde_json::from_str(s)?;
  Ok(repair_product(product))
}

fn repair_product(mut product: Product) -> Product {
  product.production_yield = normalize_yield(product.production_yield);
  product.items = product.items.into_iter().map(repair_item).collect();
  product
}

fn repair_item(item: CostItem) -> CostItem {
  CostItem { unit_price: normalize_price(item.unit_price), ..item }
}

// ─── History ─────────────────────────────────────────────────────────────────

pub fn encode_history(history: &History) -> Result<String> {
  Ok(serde_json::to_string(history)?)
}

pub fn decode_history(s: &str) -> Result<History> {
  let records: Vec<SavedRecord> = serde_json::from_str(s)?;

  let mut seen = HashSet::with_capacity(records.len());
  let records = records
    .into_iter()
    .filter(|r| seen.insert(r.id))
    .map(|r| SavedRecord { product: repair_product(r.product), ..r })
    .collect();

  Ok(History::from_records(records))
}
