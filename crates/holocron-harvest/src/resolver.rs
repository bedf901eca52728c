//! Reference resolution: turns a [`RawRecord`] into an [`EnrichedRecord`].

use holocron_core::{
  fetch::Fetcher,
  record::{EnrichedRecord, RawRecord},
  reference::{REFERENCE_FIELDS, ReferenceField},
};
use serde_json::Value;

use crate::{Result, mode::Mode};

/// Expands the reference fields of person records through a [`Fetcher`].
pub struct Resolver<'a, F> {
  fetcher:  &'a F,
  base_url: &'a str,
  mode:     Mode,
}

impl<'a, F: Fetcher> Resolver<'a, F> {
  /// `base_url` decides which single-string values count as references.
  pub fn new(fetcher: &'a F, base_url: &'a str, mode: Mode) -> Self {
    Self { fetcher, base_url, mode }
  }

  /// Replace every reference field of `record` with its flattened summary.
  ///
  /// In concurrent mode all referenced URLs of the record, across every
  /// field, are fetched in one wave. A non-URL list item, a failed fetch or a
  /// missing attribute fails the whole record. Fields that hold no reference are untouched.
  pub async fn resolve(&self, record: RawRecord) -> Result<EnrichedRecord> {
    let RawRecord { id, mut fields } = record;

    let mut plan: Vec<(&'static ReferenceField, Vec<String>)> = Vec::new();
    for field in REFERENCE_FIELDS {
      if let Some(urls) = field.urls(fields.get(field.name), self.base_url)? {
        plan.push((field, urls));
      }
    }

    let urls: Vec<&str> = plan
      .iter()
      .flat_map(|(_, urls)| urls.iter().map(String::as_str))
      .collect();
    let bodies: Vec<Value> = self
      .mode
      .run_all(urls.iter().copied(), |url| self.fetcher.fetch(url))
      .await?;

    tracing::debug!(id, references = bodies.len(), "references fetched");

    // Bodies come back in `urls` order; hand each field its own slice.
    let mut rest = bodies.as_slice();
    for (field, urls) in &plan {
      let (mine, tail) = rest.split_at(urls.len());
      rest = tail;
      let flat = field.flatten(urls.iter().map(String::as_str).zip(mine))?;
      fields.insert(field.name.to_owned(), Value::String(flat));
    }

    Ok(EnrichedRecord { id, fields })
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::tests::FakeApi;

  const BASE: &str = "https://swapi.test/api/";

  fn raw(id: u32, value: Value) -> RawRecord {
    RawRecord::from_json(id, "test", value).unwrap()
  }

  fn api() -> FakeApi {
    FakeApi::new()
      .with(format!("{BASE}planets/1/"), json!({"name": "Tatooine"}))
      .with(format!("{BASE}films/1/"), json!({"title": "A New Hope", "release_date": "1977-05-25"}))
      .with(
        format!("{BASE}films/2/"),
        json!({"title": "The Empire Strikes Back", "release_date": "1980-05-17"}),
      )
      .with(format!("{BASE}vehicles/14/"), json!({"name": "Snowspeeder", "model": "t-47 airspeeder"}))
      .with(format!("{BASE}species/2/"), json!({"name": "Droid"}))
  }

  #[tokio::test]
  async fn flattens_every_reference_field() {
    let api = api();
    let resolver = Resolver::new(&api, BASE, Mode::Concurrent);

    let record = raw(1, json!({
      "name":      "Luke Skywalker",
      "homeworld": format!("{BASE}planets/1/"),
      "films":     [format!("{BASE}films/1/"), format!("{BASE}films/2/")],
      "species":   [],
      "vehicles":  [format!("{BASE}vehicles/14/")],
    }));
    let enriched = resolver.resolve(record).await.unwrap();

    assert_eq!(enriched.id, 1);
    assert_eq!(enriched.fields["name"], "Luke Skywalker");
    assert_eq!(enriched.fields["homeworld"], "Tatooine");
    assert_eq!(
      enriched.fields["films"],
      "A New Hope, 1977-05-25; The Empire Strikes Back, 1980-05-17",
    );
    assert_eq!(enriched.fields["species"], "");
    assert_eq!(enriched.fields["vehicles"], "Snowspeeder, t-47 airspeeder");
    assert!(!enriched.fields.contains_key("starships"));
    assert_eq!(api.calls(), 4);
  }

  #[tokio::test]
  async fn single_url_matches_one_element_list() {
    let api = api();
    let resolver = Resolver::new(&api, BASE, Mode::Concurrent);

    let single = resolver
      .resolve(raw(2, json!({"name": "C-3PO", "species": format!("{BASE}species/2/")})))
      .await
      .unwrap();
    let listed = resolver
      .resolve(raw(2, json!({"name": "C-3PO", "species": [format!("{BASE}species/2/")]})))
      .await
      .unwrap();

    assert_eq!(single.fields["species"], "Droid");
    assert_eq!(single, listed);
  }

  #[tokio::test]
  async fn non_reference_strings_are_untouched() {
    let api = api();
    let resolver = Resolver::new(&api, BASE, Mode::Concurrent);

    let enriched = resolver
      .resolve(raw(3, json!({"name": "R2-D2", "homeworld": "Naboo", "films": null})))
      .await
      .unwrap();

    assert_eq!(enriched.fields["homeworld"], "Naboo");
    assert_eq!(enriched.fields["films"], Value::Null);
    assert_eq!(api.calls(), 0);
  }

  #[tokio::test]
  async fn one_failed_fetch_fails_the_record() {
    let api = api().failing(format!("{BASE}films/2/"));
    let resolver = Resolver::new(&api, BASE, Mode::Concurrent);

    let err = resolver
      .resolve(raw(1, json!({
        "name":  "Luke Skywalker",
        "films": [format!("{BASE}films/1/"), format!("{BASE}films/2/")],
      })))
      .await
      .unwrap_err();

    assert!(matches!(
      err,
      crate::Error::Core(holocron_core::Error::Network { ref url, .. }) if url.ends_with("films/2/")
    ));
  }

  #[tokio::test]
  async fn missing_sub_attribute_fails_the_record() {
    let api = FakeApi::new().with(format!("{BASE}starships/12/"), json!({"name": "X-wing"}));
    let resolver = Resolver::new(&api, BASE, Mode::Concurrent);

    let err = resolver
      .resolve(raw(1, json!({"name": "Luke", "starships": [format!("{BASE}starships/12/")]})))
      .await
      .unwrap_err();

    assert!(matches!(
      err,
      crate::Error::Core(holocron_core::Error::MissingAttribute { attribute: "model", .. })
    ));
  }

  #[tokio::test]
  async fn non_url_list_item_fails_before_any_fetch() {
    let api = api();
    let resolver = Resolver::new(&api, BASE, Mode::Concurrent);

    let err = resolver
      .resolve(raw(1, json!({
        "name":     "Luke Skywalker",
        "films":    [format!("{BASE}films/1/")],
        "vehicles": [format!("{BASE}vehicles/14/"), {"name": "Snowspeeder"}],
      })))
      .await
      .unwrap_err();

    assert!(matches!(
      err,
      crate::Error::Core(holocron_core::Error::InvalidReference { field: "vehicles", .. })
    ));
    assert_eq!(api.calls(), 0);
  }

  #[tokio::test]
  async fn sequential_mode_gives_the_same_result() {
    let api = api();
    let record = raw(1, json!({
      "name":      "Luke Skywalker",
      "homeworld": format!("{BASE}planets/1/"),
      "films":     [format!("{BASE}films/2/"), format!("{BASE}films/1/")],
    }));

    let concurrent = Resolver::new(&api, BASE, Mode::Concurrent)
      .resolve(record.clone())
      .await
      .unwrap();
    let sequential = Resolver::new(&api, BASE, Mode::Sequential)
      .resolve(record)
      .await
      .unwrap();

    assert_eq!(concurrent, sequential);
    assert_eq!(
      sequential.fields["films"],
      "The Empire Strikes Back, 1980-05-17; A New Hope, 1977-05-25",
    );
  }
}
