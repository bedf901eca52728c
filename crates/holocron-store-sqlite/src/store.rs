//! [`SqliteStore`]: the SQLite implementation of [`PersonStore`].

use std::path::Path;

use holocron_core::{person::PersonRow, store::PersonStore};

use crate::{
  Result,
  schema::{PRAGMAS, RESET},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A person table backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. All clones
/// share one connection thread, so concurrent inserts are serialized there.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

const INSERT_PERSON: &str = "
INSERT INTO person (
  id, name, birth_year, gender, homeworld, height, mass,
  skin_color, hair_color, eye_color, films, species, starships, vehicles
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)";

const SELECT_PEOPLE: &str = "
SELECT
  id, name, birth_year, gender, homeworld, height, mass,
  skin_color, hair_color, eye_color, films, species, starships, vehicles
FROM person
ORDER BY id";

impl SqliteStore {
  /// Open (or create) a store at `path`. The schema is left alone until
  /// [`PersonStore::reset_schema`] is called.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.configure().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.configure().await?;
    Ok(store)
  }

  async fn configure(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(PRAGMAS)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── PersonStore impl ────────────────────────────────────────────────────────

impl PersonStore for SqliteStore {
  type Error = crate::Error;

  async fn reset_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(RESET)?;
        Ok(())
      })
      .await?;
    tracing::debug!("person table reset");
    Ok(())
  }

  async fn insert_people(&self, rows: Vec<PersonRow>) -> Result<()> {
    let count = rows.len();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare_cached(INSERT_PERSON)?;
          for row in &rows {
            stmt.execute(rusqlite::params![
              row.id,
              row.name,
              row.birth_year,
              row.gender,
              row.homeworld,
              row.height,
              row.mass,
              row.skin_color,
              row.hair_color,
              row.eye_color,
              row.films,
              row.species,
              row.starships,
              row.vehicles,
            ])?;
          }
        }
        // Dropping `tx` without committing rolls every row back.
        tx.commit()?;
        Ok(())
      })
      .await?;

    tracing::debug!(count, "people committed");
    Ok(())
  }

  async fn count_people(&self) -> Result<u64> {
    let count = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM person", [], |r| r.get::<_, i64>(0))?)
      })
      .await?;
    Ok(count.max(0) as u64)
  }

  async fn list_people(&self) -> Result<Vec<PersonRow>> {
    let rows = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(SELECT_PEOPLE)?;
        let rows = stmt
          .query_map([], |row| {
            Ok(PersonRow {
              id:         row.get(0)?,
              name:       row.get(1)?,
              birth_year: row.get(2)?,
              gender:     row.get(3)?,
              homeworld:  row.get(4)?,
              height:     row.get(5)?,
              mass:       row.get(6)?,
              skin_color: row.get(7)?,
              hair_color: row.get(8)?,
              eye_color:  row.get(9)?,
              films:      row.get(10)?,
              species:    row.get(11)?,
              starships:  row.get(12)?,
              vehicles:   row.get(13)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn close(self) -> Result<()> {
    self.conn.close().await?;
    tracing::debug!("store connection closed");
    Ok(())
  }
}
