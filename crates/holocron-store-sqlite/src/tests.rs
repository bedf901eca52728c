//! Integration tests for `SqliteStore` against an in-memory database.

use holocron_core::{person::PersonRow, store::PersonStore};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  let s = SqliteStore::open_in_memory()
    .await
    .expect("in-memory store");
  s.reset_schema().await.expect("reset schema");
  s
}

fn person(id: u32, name: &str) -> PersonRow {
  PersonRow {
    id,
    name: Some(name.into()),
    ..Default::default()
  }
}

// ─── Inserts ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_list() {
  let s = store().await;

  let luke = PersonRow {
    id:        1,
    name:      Some("Luke Skywalker".into()),
    height:    Some("172".into()),
    homeworld: Some("Tatooine".into()),
    films:     Some("A New Hope, 1977-05-25".into()),
    ..Default::default()
  };
  s.insert_people(vec![luke.clone(), person(2, "C-3PO")])
    .await
    .unwrap();

  let rows = s.list_people().await.unwrap();
  assert_eq!(rows.len(), 2);
  assert_eq!(rows[0], luke);
  assert_eq!(rows[1].name.as_deref(), Some("C-3PO"));
  assert_eq!(rows[1].homeworld, None);
}

#[tokio::test]
async fn list_is_ordered_by_id() {
  let s = store().await;
  s.insert_people(vec![person(12, "Wilhuff Tarkin")]).await.unwrap();
  s.insert_people(vec![person(3, "R2-D2"), person(7, "Beru Whitesun lars")])
    .await
    .unwrap();

  let ids: Vec<u32> = s.list_people().await.unwrap().iter().map(|p| p.id).collect();
  assert_eq!(ids, vec![3, 7, 12]);
}

#[tokio::test]
async fn count_people() {
  let s = store().await;
  assert_eq!(s.count_people().await.unwrap(), 0);
  s.insert_people(vec![person(1, "a"), person(2, "b"), person(3, "c")])
    .await
    .unwrap();
  assert_eq!(s.count_people().await.unwrap(), 3);
}

#[tokio::test]
async fn null_names_do_not_collide() {
  let s = store().await;
  s.insert_people(vec![
    PersonRow { id: 1, ..Default::default() },
    PersonRow { id: 2, ..Default::default() },
  ])
  .await
  .unwrap();
  assert_eq!(s.count_people().await.unwrap(), 2);
}

// ─── Constraints ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_name_rolls_back_whole_insert() {
  let s = store().await;

  let err = s
    .insert_people(vec![person(1, "Yoda"), person(2, "Palpatine"), person(3, "Yoda")])
    .await
    .unwrap_err();
  assert!(err.is_unique_violation(), "unexpected error: {err}");

  assert_eq!(s.count_people().await.unwrap(), 0);
}

#[tokio::test]
async fn duplicate_name_across_inserts() {
  let s = store().await;
  s.insert_people(vec![person(1, "Yoda")]).await.unwrap();

  let err = s.insert_people(vec![person(2, "Yoda")]).await.unwrap_err();
  assert!(err.is_unique_violation());
  assert_eq!(s.count_people().await.unwrap(), 1);
}

#[tokio::test]
async fn duplicate_id_is_not_a_unique_name_violation() {
  let s = store().await;
  s.insert_people(vec![person(1, "Yoda")]).await.unwrap();

  let err = s.insert_people(vec![person(1, "Dooku")]).await.unwrap_err();
  assert!(!err.is_unique_violation());
}

// ─── Schema lifecycle ────────────────────────────────────────────────────────

#[tokio::test]
async fn reset_schema_discards_rows() {
  let s = store().await;
  s.insert_people(vec![person(1, "a"), person(2, "b")]).await.unwrap();

  s.reset_schema().await.unwrap();
  assert_eq!(s.count_people().await.unwrap(), 0);

  // The same names are accepted again after a reset.
  s.insert_people(vec![person(1, "a"), person(2, "b")]).await.unwrap();
  assert_eq!(s.count_people().await.unwrap(), 2);
}

#[tokio::test]
async fn insert_before_reset_fails() {
  let s = SqliteStore::open_in_memory().await.unwrap();
  assert!(s.insert_people(vec![person(1, "a")]).await.is_err());
}

#[tokio::test]
async fn clones_fail_after_close() {
  let s = store().await;
  let other = s.clone();
  s.close().await.unwrap();
  assert!(other.count_people().await.is_err());
}
