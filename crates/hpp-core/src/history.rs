//! Saved calculations.
//!
//! A [`SavedRecord`] is an immutable snapshot of a product and its totals.
//! The [`History`] keeps records newest first; insertion order is the only
//! ordering it enforces. Operations return a new history rather than
//! modifying the one they were given.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  error::ValidationError,
  product::{Product, stored_id},
  totals::HppResult,
};

// ─── SavedRecord ─────────────────────────────────────────────────────────────

/// A snapshot taken by [`History::save`]. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecord {
  #[serde(deserialize_with = "stored_id")]
  pub id:           Uuid,
  /// Informational only; not a sort key. Stored as epoch milliseconds.
  #[serde(with = "chrono::serde::ts_milliseconds")]
  pub timestamp:    DateTime<Utc>,
  /// Independent copy of the product at save time.
  pub product:      Product,
  pub total_cost:   f64,
  pub hpp_per_unit: f64,
}

// ─── Confirmation ────────────────────────────────────────────────────────────

/// The caller's answer to "delete this record?". Deletion cannot be undone,
/// so [`History::delete`] does nothing unless it is `Confirmed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
  Confirmed,
  Declined,
}

// ─── History ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
  records: Vec<SavedRecord>,
}

impl History {
  pub fn new() -> Self { Self::default() }

  /// Wrap records that are already newest first.
  pub fn from_records(records: Vec<SavedRecord>) -> Self { Self { records } }

  pub fn records(&self) -> &[SavedRecord] { &self.records }

  pub fn into_records(self) -> Vec<SavedRecord> { self.records }

  pub fn len(&self) -> usize { self.records.len() }

  pub fn is_empty(&self) -> bool { self.records.is_empty() }

  pub fn iter(&self) -> std::slice::Iter<'_, SavedRecord> { self.records.iter() }

  pub fn get(&self, id: Uuid) -> Option<&SavedRecord> {
    self.records.iter().find(|r| r.id == id)
  }

  /// Snapshot `product` with its `totals` and prepend it.
  ///
  /// The trimmed name must be non-empty and there must be at least one item;
  /// the name is checked first. On failure nothing is created.
  pub fn save(
    &self,
    product: &Product,
    totals: &HppResult,
  ) -> Result<(SavedRecord, History), ValidationError> {
    if product.name.trim().is_empty() {
      return Err(ValidationError::EmptyName);
    }
    if product.items.is_empty() {
      return Err(ValidationError::NoItems);
    }

    let record = SavedRecord {
      id:           Uuid::new_v4(),
      timestamp:    Utc::now(),
      product:      product.clone(),
      total_cost:   totals.total_cost,
      hpp_per_unit: totals.hpp_per_unit,
    };

    let mut records = Vec::with_capacity(self.records.len() + 1);
    records.push(record.clone());
    records.extend(self.records.iter().cloned());

    Ok((record, History { records }))
  }

  /// Remove the record with `id`. Declined confirmations and unknown ids leave
  /// the history as it was.
  pub fn delete(&self, id: Uuid, confirmation: Confirmation) -> History {
    if confirmation != Confirmation::Confirmed {
      return self.clone();
    }
    History {
      records: self.records.iter().filter(|r| r.id != id).cloned().collect(),
    }
  }

  /// Records whose product name contains `query`, ignoring case, newest
  /// first. A blank query matches everything.
  pub fn search(&self, query: &str) -> Vec<&SavedRecord> {
    if query.trim().is_empty() {
      return self.records.iter().collect();
    }
    let needle = query.to_lowercase();
    self
      .records
      .iter()
      .filter(|r| r.product.name.to_lowercase().contains(&needle))
      .collect()
  }
}

impl<'a> IntoIterator for &'a History {
  type IntoIter = std::slice::Iter<'a, SavedRecord>;
  type Item = &'a SavedRecord;

  fn into_iter(self) -> Self::IntoIter { self.records.iter() }
}

/// A copy of the record's product to edit, under a fresh id so that saving it
/// again creates a new record instead of touching the old one.
pub fn load(record: &SavedRecord) -> Product { record.product.with_fresh_id() }
