//! Weighted fuzzy index over registry entries.

use super::fuzzy::{field_score, normalize};
use crate::config::SearchConfig;
use crate::registry::{DatasetRegistry, RegistryEntry};
use crate::{Result, SheetdbError};

/// Entry field that takes part in search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Name,
    Title,
    Description,
    Publisher,
}

impl SearchField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Name => "name",
            SearchField::Title => "metadata.title",
            SearchField::Description => "metadata.description",
            SearchField::Publisher => "metadata.publisher",
        }
    }

    fn extract<'a>(&self, entry: &'a RegistryEntry) -> &'a str {
        match self {
            SearchField::Name => &entry.name,
            SearchField::Title => &entry.metadata.title,
            SearchField::Description => &entry.metadata.description,
            SearchField::Publisher => &entry.metadata.publisher,
        }
    }
}

/// A searched field and its weight. Weights are at least 1; larger is more important.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchKey {
    pub field: SearchField,
    pub weight: f64,
}

impl SearchKey {
    pub fn new(field: SearchField, weight: f64) -> Self {
        Self { field, weight }
    }
}

/// Matcher configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    /// Largest accepted per-field score, in `[0, 1]`.
    pub threshold: f64,
    pub keys: Vec<SearchKey>,
    /// Cap on the number of results; `None` returns every match.
    pub limit: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            threshold: SearchConfig::DEFAULT_THRESHOLD,
            keys: vec![
                SearchKey::new(SearchField::Name, SearchConfig::NAME_WEIGHT),
                SearchKey::new(SearchField::Title, SearchConfig::TITLE_WEIGHT),
                SearchKey::new(SearchField::Description, SearchConfig::DESCRIPTION_WEIGHT),
                SearchKey::new(SearchField::Publisher, SearchConfig::PUBLISHER_WEIGHT),
            ],
            limit: None,
        }
    }
}

impl SearchOptions {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Reject configurations that would break the ranking guarantees.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(SheetdbError::Config {
                message: format!(
                    "search threshold must be between 0 and 1, got {}",
                    self.threshold
                ),
            });
        }
        if self.keys.is_empty() {
            return Err(SheetdbError::Config {
                message: "at least one search key is required".to_string(),
            });
        }
        if let Some(key) = self.keys.iter().find(|k| k.weight.is_nan() || k.weight < 1.0) {
            return Err(SheetdbError::Config {
                message: format!(
                    "weight for {} must be at least 1, got {}",
                    key.field.as_str(),
                    key.weight
                ),
            });
        }
        Ok(())
    }
}

/// One search result: position of the entry in the registry and its score.
///
/// Lower scores are better; 0 is only produced for the empty query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit {
    pub position: usize,
    pub score: f64,
}

struct IndexedRecord {
    /// Normalized text per key, in `SearchOptions::keys` order.
    fields: Vec<Vec<char>>,
}

/// Read-only search index over a registry snapshot.
///
/// Field text is extracted and normalized once at build time. Positions in
/// returned hits refer to the registry the index was built from.
pub struct SearchIndex {
    records: Vec<IndexedRecord>,
    options: SearchOptions,
}

impl SearchIndex {
    pub fn build(registry: &DatasetRegistry, options: SearchOptions) -> Result<Self> {
        options.validate()?;

        let records = registry
            .iter()
            .map(|entry| IndexedRecord {
                fields: options
                    .keys
                    .iter()
                    .map(|key| normalize(key.field.extract(entry)))
                    .collect(),
            })
            .collect();

        Ok(Self { records, options })
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rank records against `query`.
    ///
    /// A blank query matches every record in registry order. Otherwise a record
    /// matches when at least one field scores within the threshold; its
    /// aggregate is the product of `max(score, EPSILON)^weight` over matching
    /// fields, so more and heavier hits rank higher. The aggregate is capped at
    /// the threshold, which only matters when the threshold is below `EPSILON`.
    /// Ties keep registry order.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let query = query.trim();
        if query.is_empty() {
            let mut hits: Vec<SearchHit> = (0..self.records.len())
                .map(|position| SearchHit {
                    position,
                    score: 0.0,
                })
                .collect();
            if let Some(limit) = self.options.limit {
                hits.truncate(limit);
            }
            return hits;
        }

        let pattern = normalize(query);
        let mut hits: Vec<SearchHit> = self
            .records
            .iter()
            .enumerate()
            .filter_map(|(position, record)| {
                self.score_record(&pattern, record)
                    .map(|score| SearchHit { position, score })
            })
            .collect();

        hits.sort_by(|a, b| a.score.total_cmp(&b.score));
        if let Some(limit) = self.options.limit {
            hits.truncate(limit);
        }
        hits
    }

    fn score_record(&self, pattern: &[char], record: &IndexedRecord) -> Option<f64> {
        let mut total = 1.0;
        let mut matched = false;

        for (key, text) in self.options.keys.iter().zip(&record.fields) {
            let score = field_score(pattern, text);
            if score > self.options.threshold {
                continue;
            }
            matched = true;
            total *= score.max(f64::EPSILON).powf(key.weight);
        }

        matched.then_some(total.min(self.options.threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::DatasetMetadata;

    fn entry(name: &str, title: &str, description: &str, publisher: &str) -> RegistryEntry {
        RegistryEntry::new(
            name,
            DatasetMetadata::new(title, description, publisher),
            format!("/data/{}.db", name),
        )
    }

    fn sample_registry() -> DatasetRegistry {
        DatasetRegistry::new(vec![
            entry("airports", "World Airports", "IATA codes and runways", "OpenFlights"),
            entry("census", "Census 2020", "Population counts by county", "Statistics Office"),
            entry("roads", "Road Network", "Highways and census tracts overlay", "Transport Agency"),
            entry("weather", "Daily Weather", "Station observations", "Met Service"),
        ])
    }

    fn names(registry: &DatasetRegistry, hits: &[SearchHit]) -> Vec<String> {
        hits.iter()
            .map(|hit| registry.entries()[hit.position].name.clone())
            .collect()
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let registry = sample_registry();
        let index = SearchIndex::build(&registry, SearchOptions::default()).unwrap();

        for query in ["", "   "] {
            let hits = index.search(query);
            assert_eq!(
                names(&registry, &hits),
                vec!["airports", "census", "roads", "weather"]
            );
        }
    }

    #[test]
    fn test_heavier_field_ranks_first() {
        let registry = sample_registry();
        let index = SearchIndex::build(&registry, SearchOptions::default()).unwrap();

        // "census" is the name/title of one entry and only in the description of another.
        let hits = index.search("census");
        assert_eq!(names(&registry, &hits), vec!["census", "roads"]);
        assert!(hits[0].score < hits[1].score);
    }

    #[test]
    fn test_typo_still_matches() {
        let registry = sample_registry();
        let index = SearchIndex::build(&registry, SearchOptions::default()).unwrap();

        let hits = index.search("Wether");
        assert_eq!(names(&registry, &hits), vec!["weather"]);
    }

    #[test]
    fn test_case_insensitive() {
        let registry = sample_registry();
        let index = SearchIndex::build(&registry, SearchOptions::default()).unwrap();

        assert_eq!(names(&registry, &index.search("OPENFLIGHTS")), vec!["airports"]);
    }

    #[test]
    fn test_unrelated_query_matches_nothing() {
        let registry = sample_registry();
        let index = SearchIndex::build(&registry, SearchOptions::default()).unwrap();

        assert!(index.search("zzzzqqqq").is_empty());
    }

    #[test]
    fn test_scores_within_threshold() {
        let registry = sample_registry();
        let options = SearchOptions::default();
        let threshold = options.threshold;
        let index = SearchIndex::build(&registry, options).unwrap();

        for query in ["census", "cenus", "road", "office", "station", "air"] {
            let hits = index.search(query);
            for pair in hits.windows(2) {
                assert!(pair[0].score <= pair[1].score);
            }
            for hit in hits {
                assert!(hit.score <= threshold, "{} scored {}", query, hit.score);
            }
        }
    }

    #[test]
    fn test_zero_threshold_requires_exact_substring() {
        let registry = sample_registry();
        let index =
            SearchIndex::build(&registry, SearchOptions::default().with_threshold(0.0)).unwrap();

        assert!(index.search("wether").is_empty());
        let hits = index.search("weath");
        assert_eq!(names(&registry, &hits), vec!["weather"]);
        assert!(hits.iter().all(|hit| hit.score <= 0.0));
    }

    #[test]
    fn test_limit_truncates_results() {
        let registry = sample_registry();
        let index =
            SearchIndex::build(&registry, SearchOptions::default().with_limit(2)).unwrap();

        assert_eq!(index.search("").len(), 2);
    }

    #[test]
    fn test_invalid_options_rejected() {
        let registry = sample_registry();
        assert!(SearchIndex::build(&registry, SearchOptions::default().with_threshold(1.5)).is_err());

        let mut options = SearchOptions::default();
        options.keys[0].weight = 0.5;
        assert!(SearchIndex::build(&registry, options).is_err());
    }
}
