//! The `KeyValueStore` trait: the persistence gateway.
//!
//! The core only ever needs get/set/remove on string values. Backends
//! (e.g. `hpp-store-sqlite`) implement the trait; the [`crate::session`]
//! decides what to write and when.

use std::{collections::HashMap, convert::Infallible, future::Future, sync::Mutex};

// ─── Keys ────────────────────────────────────────────────────────────────────

/// The product currently being edited.
pub const PRODUCT_KEY: &str = "hpp_product_data";

/// The saved-calculation history, newest first.
pub const HISTORY_KEY: &str = "hpp_history";

/// Access-gate flag; see [`crate::access`].
pub const SESSION_FLAG_KEY: &str = "isLoggedIn";

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Durable string storage addressed by key.
///
/// All methods return `Send` futures so a store can be driven from a
/// multi-threaded runtime.
pub trait KeyValueStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// The value stored under `key`, or `None` if there is none.
  fn get<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;

  /// Store `value` under `key`, replacing any previous value.
  fn set<'a>(
    &'a self,
    key: &'a str,
    value: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Delete `key`. Removing a missing key is not an error.
  fn remove<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

// ─── MemoryStore ─────────────────────────────────────────────────────────────

/// A process-local store. Nothing survives the process; used in tests and
/// when no durable backend is wanted.
#[derive(Debug, Default)]
pub struct MemoryStore {
  values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
    // A poisoned map is still a valid map.
    self.values.lock().unwrap_or_else(|e| e.into_inner())
  }
}

impl KeyValueStore for MemoryStore {
  type Error = Infallible;

  async fn get(&self, key: &str) -> Result<Option<String>, Infallible> {
    Ok(self.lock().get(key).cloned())
  }

  async fn set(&self, key: &str, value: String) -> Result<(), Infallible> {
    self.lock().insert(key.to_owned(), value);
    Ok(())
  }

  async fn remove(&self, key: &str) -> Result<(), Infallible> {
    self.lock().remove(key);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn memory_store_get_set_remove() {
    let s = MemoryStore::new();
    assert_eq!(s.get("k").await.unwrap(), None);

    s.set("k", "one".into()).await.unwrap();
    s.set("k", "two".into()).await.unwrap();
    assert_eq!(s.get("k").await.unwrap().as_deref(), Some("two"));

    s.remove("k").await.unwrap();
    s.remove("k").await.unwrap();
    assert_eq!(s.get("k").await.unwrap(), None);
  }
}
