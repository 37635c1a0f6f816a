//! Editing operations on a [`Product`].
//!
//! Every operation borrows the current product and returns a new one; the
//! input is never modified. Unknown item ids are no-ops, not errors.

use uuid::Uuid;

use crate::{
  category::Category,
  product::{CostItem, Product, normalize_price, normalize_yield},
};

/// Fields of a cost item that may change after creation. `None` leaves the
/// field as it is. An item's id and category are fixed once created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
  pub name:       Option<String>,
  pub unit_price: Option<f64>,
}

impl ItemPatch {
  pub fn is_empty(&self) -> bool {
    self.name.is_none() && self.unit_price.is_none()
  }
}

/// Replace the name verbatim. No trimming happens here.
pub fn rename_product(product: &Product, name: impl Into<String>) -> Product {
  Product { name: name.into(), ..product.clone() }
}

/// Replace the yield, zero and negative values included. A non-finite yield
/// is stored as 1, the same value it would reload as.
pub fn set_yield(product: &Product, production_yield: f64) -> Product {
  Product { production_yield: normalize_yield(production_yield), ..product.clone() }
}

/// Append a blank item in `category`. Returns the new product and the id of
/// the item that was added.
pub fn add_item(product: &Product, category: Category) -> (Product, Uuid) {
  let item = CostItem::new(category);
  let id = item.id;
  let mut next = product.clone();
  next.items.push(item);
  (next, id)
}

/// Apply `patch` to the item with `item_id`. A negative or non-finite price
/// is stored as zero.
pub fn update_item(product: &Product, item_id: Uuid, patch: &ItemPatch) -> Product {
  let items = product
    .items
    .iter()
    .map(|item| {
      if item.id != item_id {
        return item.clone();
      }
      CostItem {
        name: patch.name.clone().unwrap_or_else(|| item.name.clone()),
        unit_price: patch.unit_price.map_or(item.unit_price, normalize_price),
        ..item.clone()
      }
    })
    .collect();
  Product { items, ..product.clone() }
}

/// Drop the item with `item_id`.
pub fn remove_item(product: &Product, item_id: Uuid) -> Product {
  let items = product
    .items
    .iter()
    .filter(|item| item.id != item_id)
    .cloned()
    .collect();
  Product { items, ..product.clone() }
}

/// The items of one category, in insertion order.
pub fn items_in(product: &Product, category: Category) -> impl Iterator<Item = &CostItem> {
  product.items.iter().filter(move |item| item.category == category)
}
