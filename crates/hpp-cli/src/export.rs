//! CSV output for an [`ExportSheet`].
//!
//! Layout follows the spreadsheet the calculator has always produced: a
//! header row, one row per item, a blank row, then the summary block.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use hpp_core::export::ExportSheet;

/// Write `sheet` to `<dir>/<stem>.csv` and return the path written.
pub fn write_csv(sheet: &ExportSheet, dir: &Path) -> anyhow::Result<PathBuf> {
  let path = dir.join(format!("{}.csv", sheet.file_stem()));

  let mut wtr = csv::WriterBuilder::new()
    .flexible(true)
    .from_path(&path)
    .with_context(|| format!("creating {}", path.display()))?;

  wtr.write_record(["Kategori", "Nama Item", "Harga"])?;
  for row in &sheet.rows {
    let price = row.unit_price.to_string();
    wtr.write_record([row.category, row.name.as_str(), price.as_str()])?;
  }

  let summary = &sheet.summary;
  wtr.write_record(["", "", ""])?;
  wtr.write_record(["RINGKASAN"])?;
  wtr.write_record(["Nama Produk", summary.product_name.as_str()])?;
  for (label, value) in [
    ("Hasil Produksi", summary.production_yield),
    ("Total Biaya Produksi", summary.total_cost),
    ("HPP Per Unit", summary.hpp_per_unit),
  ] {
    let value = value.to_string();
    wtr.write_record([label, value.as_str()])?;
  }
  wtr.flush().with_context(|| format!("writing {}", path.display()))?;

  Ok(path)
}

#[cfg(test)]
mod tests {
  use hpp_core::{
    category::Category,
    product::{CostItem, Product},
    totals::compute_totals,
  };

  use super::*;

  #[test]
  fn writes_rows_then_summary() {
    let p = Product {
      name: "Kue Lapis".into(),
      production_yield: 10.0,
      items: vec![
        CostItem {
          name: "Tepung, protein tinggi".into(),
          unit_price: 50_000.0,
          ..CostItem::new(Category::RawMaterials)
        },
        CostItem { name: "Box".into(), unit_price: 10_000.0, ..CostItem::new(Category::Packaging) },
      ],
      ..Product::new()
    };
    let sheet = ExportSheet::from_product(&p, &compute_totals(&p));
    let dir = tempfile::tempdir().unwrap();

    let path = write_csv(&sheet, dir.path()).unwrap();
    assert_eq!(path.file_name().unwrap(), "HPP_Kue_Lapis.csv");

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Kategori,Nama Item,Harga");
    assert_eq!(lines[1], "Bahan Baku,\"Tepung, protein tinggi\",50000");
    assert_eq!(lines[2], "Packaging,Box,10000");
    assert_eq!(lines[3], ",,");
    assert_eq!(lines[4], "RINGKASAN");
    assert_eq!(lines[5], "Nama Produk,Kue Lapis");
    assert_eq!(lines[7], "Total Biaya Produksi,60000");
    assert_eq!(lines[8], "HPP Per Unit,6000");
  }

  #[test]
  fn names_with_separators_stay_inside_the_directory() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["Kue/Roti", "../escaped"] {
      let p = Product { name: name.into(), ..Product::new() };
      let sheet = ExportSheet::from_product(&p, &compute_totals(&p));
      let path = write_csv(&sheet, dir.path()).unwrap();
      assert_eq!(path.parent().unwrap(), dir.path());
      assert!(path.exists());
    }
    assert!(dir.path().join("HPP_Kue_Roti.csv").exists());
  }

  #[test]
  fn missing_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let sheet = ExportSheet::from_product(&Product::new(), &compute_totals(&Product::new()));
    assert!(write_csv(&sheet, &dir.path().join("nope")).is_err());
  }
}
