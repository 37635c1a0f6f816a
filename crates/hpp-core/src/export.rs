//! Plain export data for a spreadsheet writer.
//!
//! The core only arranges the data. Writing the actual file is up to the
//! caller (the CLI writes CSV).

use std::sync::LazyLock;

use regex::Regex;

use crate::{product::Product, totals::HppResult};

/// Name used when the product has no name.
pub const FALLBACK_STEM: &str = "Export";

/// One cost item as an export row.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
  pub category:   &'static str,
  pub name:       String,
  pub unit_price: f64,
}

/// The block written after the item rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
  pub product_name:     String,
  pub production_yield: f64,
  pub total_cost:       f64,
  pub hpp_per_unit:     f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportSheet {
  pub rows:    Vec<ExportRow>,
  pub summary: ExportSummary,
}

impl ExportSheet {
  /// Rows in item order, followed by the summary of `totals`.
  pub fn from_product(product: &Product, totals: &HppResult) -> Self {
    let rows = product
      .items
      .iter()
      .map(|item| ExportRow {
        category:   item.category.label(),
        name:       item.name.clone(),
        unit_price: item.unit_price,
      })
      .collect();

    Self {
      rows,
      summary: ExportSummary {
        product_name:     product.name.clone(),
        production_yield: product.production_yield,
        total_cost:       totals.total_cost,
        hpp_per_unit:     totals.hpp_per_unit,
      },
    }
  }

  /// File name without extension; see [`export_file_stem`].
  pub fn file_stem(&self) -> String { export_file_stem(&self.summary.product_name) }
}

static WHITESPACE_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Characters that cannot appear in a file name on common file systems,
/// path separators included.
static UNSAFE_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#"[/\\:*?"<>|\x00-\x1f]"#).expect("unsafe-char pattern is valid"));

/// `HPP_` followed by the product name with every run of whitespace turned
/// into a single `_`. Path separators and other characters a file name cannot
/// hold also become `_`, so the stem always names a file directly inside the
/// export directory. An empty name becomes [`FALLBACK_STEM`].
pub fn export_file_stem(product_name: &str) -> String {
  let collapsed = WHITESPACE_RE.replace_all(product_name, "_");
  let cleaned = UNSAFE_RE.replace_all(&collapsed, "_");

  if cleaned.is_empty() {
    format!("HPP_{FALLBACK_STEM}")
  } else {
    format!("HPP_{cleaned}")
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{category::Category, product::CostItem, totals::compute_totals};

  #[test]
  fn stem_collapses_whitespace_runs() {
    assert_eq!(export_file_stem("Nasi  Goreng\tSpesial"), "HPP_Nasi_Goreng_Spesial");
    assert_eq!(export_file_stem("Kue"), "HPP_Kue");
    assert_eq!(export_file_stem(" Kue "), "HPP__Kue_");
  }

  #[test]
  fn stem_never_contains_path_separators() {
    assert_eq!(export_file_stem("Kue/Roti"), "HPP_Kue_Roti");
    assert_eq!(export_file_stem("../escaped"), "HPP_.._escaped");
    assert_eq!(export_file_stem(r"a\b:c*d?e"), "HPP_a_b_c_d_e");
    assert_eq!(export_file_stem("Kue \"Lapis\" <1|2>"), "HPP_Kue__Lapis___1_2_");
  }

  #[test]
  fn empty_name_falls_back() {
    assert_eq!(export_file_stem(""), "HPP_Export");
  }

  #[test]
  fn sheet_has_one_row_per_item_and_summary() {
    let p = Product {
      name: "Kue".into(),
      production_yield: 10.0,
      items: vec![
        CostItem {
          name: "Tepung".into(),
          unit_price: 50_000.0,
          ..CostItem::new(Category::RawMaterials)
        },
        CostItem {
          name: "Box".into(),
          unit_price: 10_000.0,
          ..CostItem::new(Category::Packaging)
        },
      ],
      ..Product::new()
    };
    let sheet = ExportSheet::from_product(&p, &compute_totals(&p));

    assert_eq!(sheet.rows.len(), 2);
    assert_eq!(sheet.rows[0], ExportRow {
      category:   "Bahan Baku",
      name:       "Tepung".into(),
      unit_price: 50_000.0,
    });
    assert_eq!(sheet.summary.total_cost, 60_000.0);
    assert_eq!(sheet.summary.hpp_per_unit, 6_000.0);
    assert_eq!(sheet.file_stem(), "HPP_Kue");
  }
}
