//! Integration tests for `SqliteStore` against an in-memory database.

use hpp_core::{
  category::Category,
  editor::ItemPatch,
  session::Session,
  store::{HISTORY_KEY, KeyValueStore, PRODUCT_KEY},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

// ─── Key-value operations ────────────────────────────────────────────────────

#[tokio::test]
async fn get_missing_key_returns_none() {
  let s = store().await;
  assert_eq!(s.get("nope").await.unwrap(), None);
}

#[tokio::test]
async fn set_then_get() {
  let s = store().await;
  s.set("greeting", "halo".into()).await.unwrap();
  assert_eq!(s.get("greeting").await.unwrap().as_deref(), Some("halo"));
}

#[tokio::test]
async fn set_overwrites_previous_value() {
  let s = store().await;
  s.set("k", "one".into()).await.unwrap();
  s.set("k", "two".into()).await.unwrap();
  assert_eq!(s.get("k").await.unwrap().as_deref(), Some("two"));
}

#[tokio::test]
async fn remove_deletes_and_tolerates_missing() {
  let s = store().await;
  s.set("k", "v".into()).await.unwrap();
  s.remove("k").await.unwrap();
  assert_eq!(s.get("k").await.unwrap(), None);

  s.remove("k").await.unwrap();
}

#[tokio::test]
async fn keys_are_independent() {
  let s = store().await;
  s.set("a", "1".into()).await.unwrap();
  s.set("b", "2".into()).await.unwrap();
  s.remove("a").await.unwrap();
  assert_eq!(s.get("b").await.unwrap().as_deref(), Some("2"));
}

#[tokio::test]
async fn clones_share_the_connection() {
  let s = store().await;
  let other = s.clone();
  s.set("k", "v".into()).await.unwrap();
  assert_eq!(other.get("k").await.unwrap().as_deref(), Some("v"));
}

// ─── With a session on top ───────────────────────────────────────────────────

#[tokio::test]
async fn session_state_survives_rehydration() {
  let mut session = Session::hydrate(store().await).await;
  session.rename("Kue").await;
  session.set_yield(10.0).await;
  let id = session.add_item(Category::RawMaterials).await;
  session
    .update_item(id, &ItemPatch { name: Some("Tepung".into()), unit_price: Some(50_000.0) })
    .await;
  let record = session.save_to_history().await.unwrap();

  let id = session.add_item(Category::Labor).await;
  session
    .update_item(id, &ItemPatch { name: None, unit_price: Some(7_500.0) })
    .await;

  let store = session.into_store();
  assert!(store.get(PRODUCT_KEY).await.unwrap().is_some());
  assert!(store.get(HISTORY_KEY).await.unwrap().is_some());

  let again = Session::hydrate(store).await;
  assert_eq!(again.history().len(), 1);
  assert_eq!(again.history().records()[0].id, record.id);
  assert_eq!(again.history().records()[0].hpp_per_unit, 5_000.0);
  assert_eq!(again.product().items.len(), 1);
  assert_eq!(again.totals().total_cost, 7_500.0);
}

#[tokio::test]
async fn corrupt_row_falls_back_to_empty() {
  let s = store().await;
  s.set(PRODUCT_KEY, "{\"id\":42}".into()).await.unwrap();

  let session = Session::hydrate(s).await;
  assert!(session.product().name.is_empty());
  assert!(session.product().items.is_empty());
}

#[tokio::test]
async fn file_store_creates_parent_directories() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("nested").join("hpp.sqlite3");

  let s = SqliteStore::open(&path).await.unwrap();
  s.set("k", "v".into()).await.unwrap();
  drop(s);

  let reopened = SqliteStore::open(&path).await.unwrap();
  assert_eq!(reopened.get("k").await.unwrap().as_deref(), Some("v"));
}
