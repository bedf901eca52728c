//! `PersonRow`: the persisted, denormalized person.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::record::{EnrichedRecord, normalize};

/// One row of the `person` table.
///
/// `id` is the upstream entity ID; every other column is nullable text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRow {
  pub id:         u32,
  pub name:       Option<String>,
  pub birth_year: Option<String>,
  pub gender:     Option<String>,
  pub homeworld:  Option<String>,
  pub height:     Option<String>,
  pub mass:       Option<String>,
  pub skin_color: Option<String>,
  pub hair_color: Option<String>,
  pub eye_color:  Option<String>,
  pub films:      Option<String>,
  pub species:    Option<String>,
  pub starships:  Option<String>,
  pub vehicles:   Option<String>,
}

impl PersonRow {
  /// Project an enriched record onto the row schema.
  ///
  /// Fields outside the schema are dropped; values are normalized with
  /// [`normalize`], so sentinels such as `"unknown"` land as `NULL`.
  pub fn from_enriched(record: &EnrichedRecord) -> Self {
    let f = &record.fields;
    Self {
      id:         record.id,
      name:       column(f, "name"),
      birth_year: column(f, "birth_year"),
      gender:     column(f, "gender"),
      homeworld:  column(f, "homeworld"),
      height:     column(f, "height"),
      mass:       column(f, "mass"),
      skin_color: column(f, "skin_color"),
      hair_color: column(f, "hair_color"),
      eye_color:  column(f, "eye_color"),
      films:      column(f, "films"),
      species:    column(f, "species"),
      starships:  column(f, "starships"),
      vehicles:   column(f, "vehicles"),
    }
  }
}

fn column(fields: &Map<String, Value>, name: &str) -> Option<String> {
  fields.get(name).and_then(normalize)
}
