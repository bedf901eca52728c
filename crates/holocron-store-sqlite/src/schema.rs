//! SQL schema for the Holocron SQLite store.
//!
//! The person table is rebuilt from scratch at the start of every harvest,
//! so there is no migration path: [`RESET`] drops and recreates it.

/// Connection-level settings, applied once when the store opens.
pub const PRAGMAS: &str = "
PRAGMA journal_mode = WAL;
PRAGMA busy_timeout = 5000;
";

/// Destructive reset of the `person` table.
pub const RESET: &str = "
DROP TABLE IF EXISTS person;

CREATE TABLE person (
    id          INTEGER PRIMARY KEY,   -- upstream entity ID
    name        TEXT UNIQUE,
    birth_year  TEXT,
    gender      TEXT,
    homeworld   TEXT,
    height      TEXT,
    mass        TEXT,
    skin_color  TEXT,
    hair_color  TEXT,
    eye_color   TEXT,
    -- flattened reference summaries, '; '-separated
    films       TEXT,
    species     TEXT,
    starships   TEXT,
    vehicles    TEXT
);
";
