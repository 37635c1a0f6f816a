//! The calculator session: current product and history, mirrored to a store.
//!
//! A [`Session`] owns the in-memory state and is the only thing that talks to
//! the [`KeyValueStore`]. Each accepted change is applied in memory first and
//! then written out. A failed write is logged and otherwise ignored; memory
//! stays the source of truth for the rest of the session. Reading at startup
//! fails soft the same way: anything missing or unreadable starts empty.

use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
  Result,
  category::Category,
  codec::{decode_history, decode_product, encode_history, encode_product},
  editor::{self, ItemPatch},
  error::ValidationError,
  export::ExportSheet,
  history::{self, Confirmation, History, SavedRecord},
  pricing::suggest_price,
  product::Product,
  store::{HISTORY_KEY, KeyValueStore, PRODUCT_KEY},
  totals::{CategoryShare, HppResult, compute_totals},
};

pub struct Session<S> {
  store:   S,
  product: Product,
  history: History,
}

impl<S: KeyValueStore> Session<S> {
  /// Load the current product and history from `store`.
  pub async fn hydrate(store: S) -> Self {
    let product = read_or_default(&store, PRODUCT_KEY, decode_product).await;
    let history = read_or_default(&store, HISTORY_KEY, decode_history).await;
    debug!(items = product.items.len(), records = history.len(), "session hydrated");
    Self { store, product, history }
  }

  pub fn store(&self) -> &S { &self.store }

  pub fn into_store(self) -> S { self.store }

  // ── Reads ─────────────────────────────────────────────────────────────────

  pub fn product(&self) -> &Product { &self.product }

  pub fn history(&self) -> &History { &self.history }

  pub fn totals(&self) -> HppResult { compute_totals(&self.product) }

  pub fn breakdown_shares(&self) -> Vec<CategoryShare> {
    self.totals().shares(self.product.production_yield)
  }

  pub fn suggested_price(&self, margin_percent: f64) -> f64 {
    suggest_price(self.totals().hpp_per_unit, margin_percent)
  }

  pub fn search(&self, query: &str) -> Vec<&SavedRecord> { self.history.search(query) }

  pub fn export_sheet(&self) -> ExportSheet {
    ExportSheet::from_product(&self.product, &self.totals())
  }

  // ── Product edits ─────────────────────────────────────────────────────────

  pub async fn rename(&mut self, name: impl Into<String>) {
    let next = editor::rename_product(&self.product, name);
    self.replace_product(next).await;
  }

  pub async fn set_yield(&mut self, production_yield: f64) {
    let next = editor::set_yield(&self.product, production_yield);
    self.replace_product(next).await;
  }

  /// Add a blank item and return its id.
  pub async fn add_item(&mut self, category: Category) -> Uuid {
    let (next, id) = editor::add_item(&self.product, category);
    self.replace_product(next).await;
    id
  }

  /// Returns `false` (and writes nothing) when no item has `item_id`.
  pub async fn update_item(&mut self, item_id: Uuid, patch: &ItemPatch) -> bool {
    if self.product.item(item_id).is_none() {
      return false;
    }
    let next = editor::update_item(&self.product, item_id, patch);
    self.replace_product(next).await;
    true
  }

  /// Returns `false` (and writes nothing) when no item has `item_id`.
  pub async fn remove_item(&mut self, item_id: Uuid) -> bool {
    if self.product.item(item_id).is_none() {
      return false;
    }
    let next = editor::remove_item(&self.product, item_id);
    self.replace_product(next).await;
    true
  }

  /// Discard the current product and start an empty one.
  pub async fn reset_product(&mut self) { self.replace_product(Product::new()).await; }

  // ── History ───────────────────────────────────────────────────────────────

  /// Snapshot the current product into history, then start an empty product.
  /// On a validation error nothing changes and nothing is written.
  pub async fn save_to_history(&mut self) -> Result<SavedRecord, ValidationError> {
    let (record, next) = self.history.save(&self.product, &self.totals())?;
    self.replace_history(next).await;
    self.replace_product(Product::new()).await;
    Ok(record)
  }

  /// Returns whether a record was removed.
  pub async fn delete_record(&mut self, record_id: Uuid, confirmation: Confirmation) -> bool {
    let next = self.history.delete(record_id, confirmation);
    if next.len() == self.history.len() {
      return false;
    }
    self.replace_history(next).await;
    true
  }

  /// Replace the current product with an editable copy of a saved record.
  /// Returns `None` when no record has `record_id`.
  pub async fn load_record(&mut self, record_id: Uuid) -> Option<&Product> {
    let next = history::load(self.history.get(record_id)?);
    self.replace_product(next).await;
    Some(&self.product)
  }

  // ── Persistence ───────────────────────────────────────────────────────────

  async fn replace_product(&mut self, next: Product) {
    self.product = next;
    let encoded = encode_product(&self.product);
    self.persist(PRODUCT_KEY, encoded).await;
  }

  async fn replace_history(&mut self, next: History) {
    self.history = next;
    let encoded = encode_history(&self.history);
    self.persist(HISTORY_KEY, encoded).await;
  }

  async fn persist(&self, key: &'static str, encoded: Result<String>) {
    let value = match encoded {
      Ok(v) => v,
      Err(e) => {
        warn!(key, error = %e, "could not encode value; not persisted");
        return;
      }
    };
    match self.store.set(key, value).await {
      Ok(()) => debug!(key, "persisted"),
      Err(e) => warn!(key, error = %e, "write failed; keeping in-memory state"),
    }
  }
}

async fn read_or_default<S, T>(store: &S, key: &str, decode: fn(&str) -> Result<T>) -> T
where
  S: KeyValueStore,
  T: Default,
{
  let raw = match store.get(key).await {
    Ok(Some(raw)) => raw,
    Ok(None) => return T::default(),
    Err(e) => {
      warn!(key, error = %e, "could not read stored value; starting empty");
      return T::default();
    }
  };
  decode(&raw).unwrap_or_else(|e| {
    warn!(key, error = %e, "stored value is corrupt; starting empty");
    T::default()
  })
}
