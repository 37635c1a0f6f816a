//! The four fixed cost categories.
//!
//! A category has a stable key (what gets persisted) and a display label
//! (what the user reads). Older stored data used the label as the key, so the
//! labels are accepted as aliases when decoding.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A cost classification. Declaration order is reporting order.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Category {
  #[serde(rename = "raw_materials", alias = "Bahan Baku")]
  RawMaterials,
  #[serde(rename = "packaging", alias = "Packaging")]
  Packaging,
  #[serde(rename = "labor", alias = "Tenaga Kerja")]
  Labor,
  #[serde(rename = "overhead", alias = "Operasional")]
  Overhead,
}

impl Category {
  /// Every category, in declaration order.
  pub const ALL: [Category; 4] = [
    Category::RawMaterials,
    Category::Packaging,
    Category::Labor,
    Category::Overhead,
  ];

  /// The stable identifier written to storage.
  /// Must match the serde renames above.
  pub fn key(self) -> &'static str {
    match self {
      Self::RawMaterials => "raw_materials",
      Self::Packaging => "packaging",
      Self::Labor => "labor",
      Self::Overhead => "overhead",
    }
  }

  /// Human-facing label, also used in exports.
  pub fn label(self) -> &'static str {
    match self {
      Self::RawMaterials => "Bahan Baku",
      Self::Packaging => "Packaging",
      Self::Labor => "Tenaga Kerja",
      Self::Overhead => "Operasional",
    }
  }

  /// Example item name shown next to an empty name field.
  pub fn placeholder(self) -> &'static str {
    match self {
      Self::RawMaterials => "Contoh: Tepung Terigu",
      Self::Packaging => "Contoh: Paper Bag / Box",
      Self::Labor => "Contoh: Jasa Masak / Packing",
      Self::Overhead => "Contoh: Listrik / Gas / Sewa",
    }
  }

  /// Position in [`Category::ALL`].
  pub(crate) fn index(self) -> usize {
    match self {
      Self::RawMaterials => 0,
      Self::Packaging => 1,
      Self::Labor => 2,
      Self::Overhead => 3,
    }
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

/// Returned when text names none of the four categories.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0:?}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
  type Err = UnknownCategory;

  /// Accepts either the key or the label, case-insensitively. Hyphens and
  /// spaces are interchangeable with underscores in keys.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let wanted = s.trim();
    let as_key = wanted.to_lowercase().replace(['-', ' '], "_");
    Category::ALL
      .into_iter()
      .find(|c| c.key() == as_key || c.label().eq_ignore_ascii_case(wanted))
      .ok_or_else(|| UnknownCategory(s.to_owned()))
  }
}
