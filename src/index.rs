//! In-memory facilities index with geohash proximity search.
//!
//! The index is built exactly once from a JSON-lines dataset: every line is
//! decoded through the full validation pipeline, and any failure aborts the
//! whole load so a partial dataset is never exposed. After construction the
//! backing data never mutates, so the index is safe for unlimited concurrent
//! reads without locking. Reloading means building a fresh instance and
//! swapping it in.
//!
//! Proximity queries use geohash bucketing: every facility is registered
//! under each prefix of its hash down to a minimum length, and a query
//! widens its prefix (dropping trailing characters) until a bucket matches
//! or the minimum length is reached.

use crate::config::LoadOptions;
use crate::constants::GEOHASH_PRECISION;
use crate::decoder;
use crate::error::{FacilitiesError, Result};
use crate::geohash;
use crate::models::Facility;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Immutable facilities dataset with key and geohash indexes.
#[derive(Debug)]
pub struct FacilitiesIndex {
    /// Full set of facility records, in dataset order.
    facilities: Vec<Facility>,

    /// Facility key IDs mapped to their slot in `facilities`.
    key_index: HashMap<String, usize>,

    /// Geohash prefixes mapped to the slots of facilities whose hash starts
    /// with that prefix. Keys cover every length from `min_prefix_length`
    /// up to the full precision.
    geohash_index: HashMap<String, Vec<usize>>,

    /// Shortest prefix length present in `geohash_index`.
    min_prefix_length: usize,
}

/// Statistics about a dataset load.
#[derive(Debug, Clone)]
pub struct LoadStats {
    /// Number of non-blank lines read from the source.
    pub lines_read: usize,

    /// Number of facilities loaded (equals `lines_read` on success).
    pub facilities_loaded: usize,

    /// Number of geohash prefix buckets in the index.
    pub bucket_count: usize,

    /// Time taken to decode and index the dataset.
    pub load_duration: std::time::Duration,
}

impl FacilitiesIndex {
    /// Load a facilities dataset from a JSON-lines file.
    ///
    /// # Errors
    /// * `Io` when the file cannot be opened or read.
    /// * Any decode error from the first failing record; the load aborts
    ///   and no index is produced.
    /// * `DuplicateKey` when two records share a facility ID.
    /// * `EmptyDataset` when the file holds no records.
    pub fn load(path: &Path, options: &LoadOptions) -> Result<(Self, LoadStats)> {
        info!("loading facilities dataset from {}", path.display());
        let reader = BufReader::new(File::open(path)?);
        Self::from_reader(reader, options)
    }

    /// Load a facilities dataset from any buffered reader of JSON lines.
    pub fn from_reader(reader: impl BufRead, options: &LoadOptions) -> Result<(Self, LoadStats)> {
        options.validate()?;
        let start = Instant::now();

        let progress = if options.show_progress {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap(),
            );
            bar.set_message("Decoding facility records...");
            Some(bar)
        } else {
            None
        };

        let mut facilities: Vec<Facility> = Vec::new();
        let mut key_index: HashMap<String, usize> = HashMap::new();
        let mut lines_read = 0usize;

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            lines_read += 1;

            let facility = decoder::decode_line(&line)?;
            let slot = facilities.len();
            if key_index
                .insert(facility.key.id.clone(), slot)
                .is_some()
            {
                return Err(FacilitiesError::duplicate_key(&facility.key.id));
            }
            facilities.push(facility);

            if let Some(bar) = &progress {
                if lines_read % 1000 == 0 {
                    bar.set_message(format!("Decoded {} facility records...", lines_read));
                    bar.tick();
                }
            }
        }

        if facilities.is_empty() {
            return Err(FacilitiesError::EmptyDataset);
        }

        info!("decoded {} facility records, indexing...", facilities.len());

        let min_prefix_length = options.min_prefix_length;
        let mut geohash_index: HashMap<String, Vec<usize>> = HashMap::new();
        for (slot, facility) in facilities.iter().enumerate() {
            let hash = &facility.location.hash;
            for length in min_prefix_length..=hash.len() {
                geohash_index
                    .entry(hash[..length].to_string())
                    .or_default()
                    .push(slot);
            }
        }

        if let Some(bar) = &progress {
            bar.finish_with_message(format!("Indexed {} facilities", facilities.len()));
        }

        let stats = LoadStats {
            lines_read,
            facilities_loaded: facilities.len(),
            bucket_count: geohash_index.len(),
            load_duration: start.elapsed(),
        };

        info!(
            "generated facility indexes (keys: {}, geohash buckets: {}) in {:.2}s",
            key_index.len(),
            geohash_index.len(),
            stats.load_duration.as_secs_f64()
        );

        Ok((
            Self {
                facilities,
                key_index,
                geohash_index,
                min_prefix_length,
            },
            stats,
        ))
    }

    /// Iterate over every facility. The iterator is restartable and always
    /// reflects the same immutable backing set.
    pub fn all(&self) -> impl Iterator<Item = &Facility> + '_ {
        self.facilities.iter()
    }

    /// Number of facilities in the index.
    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    /// Whether the index holds no facilities. Always false for an index
    /// built by `load`, which rejects empty datasets.
    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    /// Resolve a single facility by its key ID.
    pub fn resolve(&self, id: &str) -> Option<&Facility> {
        self.key_index.get(id).map(|&slot| &self.facilities[slot])
    }

    /// Facilities near the given geohash prefix.
    ///
    /// Matches every facility whose hash starts with the prefix. When the
    /// exact prefix has no matches the search widens: trailing characters
    /// are dropped one at a time until a bucket matches or the prefix
    /// reaches the minimum indexed length. Prefixes longer than the stored
    /// precision are truncated first. Results are unique per facility key;
    /// ordering is unspecified but stable per invocation.
    pub fn nearby_hash(&self, prefix: &str) -> impl Iterator<Item = &Facility> + '_ {
        let slots = self.nearby_slots(prefix);
        debug!("returning {} facilities for prefix '{}'", slots.len(), prefix);
        slots.into_iter().map(move |slot| &self.facilities[slot])
    }

    /// Facilities near the given point: the point's full-precision geohash
    /// is computed and handed to the widening prefix search.
    ///
    /// # Errors
    /// Returns `FacilitiesError::InvalidField` when the coordinates are out
    /// of range.
    pub fn nearby_point(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<impl Iterator<Item = &Facility> + '_> {
        let hash = geohash::encode(latitude, longitude, GEOHASH_PRECISION)?;
        debug!("querying nearby facilities for point hash '{}'", hash);
        Ok(self.nearby_hash_owned(hash))
    }

    fn nearby_hash_owned(&self, prefix: String) -> impl Iterator<Item = &Facility> + '_ {
        let slots = self.nearby_slots(&prefix);
        slots.into_iter().map(move |slot| &self.facilities[slot])
    }

    /// Widening prefix lookup over the geohash buckets.
    fn nearby_slots(&self, prefix: &str) -> Vec<usize> {
        let normalized = prefix.trim().to_lowercase();
        if normalized.is_empty() || !normalized.is_ascii() {
            return Vec::new();
        }

        let mut length = normalized.len().min(GEOHASH_PRECISION);
        if length < self.min_prefix_length {
            // Below the bucketed lengths: a single linear pass, no widening.
            return self
                .facilities
                .iter()
                .enumerate()
                .filter(|(_, facility)| facility.location.hash.starts_with(&normalized))
                .map(|(slot, _)| slot)
                .collect();
        }

        while length >= self.min_prefix_length {
            if let Some(slots) = self.geohash_index.get(&normalized[..length]) {
                return slots.clone();
            }
            length -= 1;
        }

        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Cursor;

    /// Render one valid dataset line with the given identity and point.
    fn record_line(id: &str, latitude: f64, longitude: f64) -> String {
        json!({
            "rowId": id,
            "objectId": format!("obj-{id}"),
            "name": "TEST FACILITY",
            "type": "GENERAL ACUTE CARE",
            "status": "OPEN",
            "naicsCode": "622110",
            "naicsDesc": "GENERAL MEDICAL AND SURGICAL HOSPITALS",
            "latitude": latitude,
            "longitude": longitude,
            "country": "US",
            "state": "CA",
            "county": "TEST",
            "city": "TESTVILLE",
            "zip": "00000",
            "address": "1 TEST WAY",
            "helipad": false
        })
        .to_string()
    }

    fn build_index(lines: &[String]) -> (FacilitiesIndex, LoadStats) {
        let data = lines.join("\n");
        FacilitiesIndex::from_reader(Cursor::new(data), &LoadOptions::default()).unwrap()
    }

    /// Castaner hospital point from the reference geohash vectors; its
    /// full-precision hash is "de0xfjt95ksc".
    fn castaner_line() -> String {
        record_line("700641", 18.2677131, -66.70128518)
    }

    #[test]
    fn test_load_requires_all_records_to_decode() {
        let good = castaner_line();
        let bad = r#"{"rowId":"2"}"#.to_string();
        let data = format!("{good}\n{bad}");
        let result = FacilitiesIndex::from_reader(Cursor::new(data), &LoadOptions::default());
        assert!(matches!(
            result.unwrap_err(),
            FacilitiesError::MissingField { .. }
        ));
    }

    #[test]
    fn test_duplicate_keys_abort_the_load() {
        let data = format!("{}\n{}", castaner_line(), castaner_line());
        let result = FacilitiesIndex::from_reader(Cursor::new(data), &LoadOptions::default());
        match result.unwrap_err() {
            FacilitiesError::DuplicateKey { id } => assert_eq!(id, "700641"),
            other => panic!("expected DuplicateKey, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_dataset_is_rejected() {
        let result =
            FacilitiesIndex::from_reader(Cursor::new("\n\n"), &LoadOptions::default());
        assert!(matches!(result.unwrap_err(), FacilitiesError::EmptyDataset));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let data = format!("\n{}\n\n{}\n", castaner_line(), record_line("2", 37.7, -122.5));
        let (index, stats) = FacilitiesIndex::from_reader(
            Cursor::new(data),
            &LoadOptions::default(),
        )
        .unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(stats.lines_read, 2);
        assert_eq!(stats.facilities_loaded, 2);
    }

    #[test]
    fn test_all_is_restartable_and_immutable() {
        let (index, _) = build_index(&[castaner_line(), record_line("2", 37.7, -122.5)]);
        let first: Vec<_> = index.all().collect();
        let second: Vec<_> = index.all().collect();
        assert_eq!(first.len(), second.len());
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_resolve_by_key() {
        let (index, _) = build_index(&[castaner_line(), record_line("2", 37.7, -122.5)]);
        assert_eq!(index.resolve("700641").unwrap().key.id, "700641");
        assert!(index.resolve("missing").is_none());
    }

    #[test]
    fn test_nearby_exact_prefix_match() {
        let (index, _) = build_index(&[castaner_line(), record_line("2", 37.7, -122.5)]);
        let matches: Vec<_> = index.nearby_hash("de0xfjt95ksc").collect();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].key.id, "700641");
    }

    #[test]
    fn test_nearby_shorter_prefix_widens_the_radius() {
        let (index, _) = build_index(&[
            castaner_line(),
            // second Puerto Rico facility, hash "de28z5uvjd48"
            record_line("2", 18.43455435, -66.4824951),
            record_line("3", 37.7, -122.5),
        ]);
        // "de" covers both Puerto Rico facilities but not California
        let matches: Vec<_> = index.nearby_hash("de").collect();
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn test_nearby_widening_finds_neighboring_bucket() {
        let (index, _) = build_index(&[castaner_line(), record_line("2", 37.7, -122.5)]);
        // No facility hashes start with this 12-char query, but widening
        // reaches the shared "de0xfjt95k" prefix of the Castaner record.
        let matches: Vec<_> = index.nearby_hash("de0xfjt95kxx").collect();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].key.id, "700641");
    }

    #[test]
    fn test_nearby_point_never_returns_empty_for_shared_coarse_bucket() {
        let (index, _) = build_index(&[castaner_line(), record_line("2", 37.7749, -122.4194)]);
        // Exact 12-char bucket for this point is empty; widening must reach
        // the coarse bucket shared with the downtown facility.
        let matches: Vec<_> = index.nearby_point(37.780727, -122.38876).unwrap().collect();
        assert!(!matches.is_empty());
        assert!(matches.iter().any(|f| f.key.id == "2"));
    }

    #[test]
    fn test_nearby_point_rejects_invalid_coordinates() {
        let (index, _) = build_index(&[castaner_line()]);
        assert!(index.nearby_point(120.0, 0.0).is_err());
    }

    #[test]
    fn test_nearby_unmatched_region_is_empty() {
        let (index, _) = build_index(&[castaner_line()]);
        // Entirely different part of the world; not even the minimum-length
        // bucket is shared, so the bounded widening gives up.
        let matches: Vec<_> = index.nearby_hash("u4pruydqqvj8").collect();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_nearby_ordering_is_stable_per_invocation() {
        let (index, _) = build_index(&[
            castaner_line(),
            record_line("2", 18.43455435, -66.4824951),
        ]);
        let first: Vec<_> = index.nearby_hash("de").map(|f| f.key.id.clone()).collect();
        let second: Vec<_> = index.nearby_hash("de").map(|f| f.key.id.clone()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_results_are_unique_per_key() {
        let (index, _) = build_index(&[castaner_line()]);
        let matches: Vec<_> = index.nearby_hash("de0xfjt95kxx").collect();
        let ids: std::collections::HashSet<_> = matches.iter().map(|f| &f.key.id).collect();
        assert_eq!(ids.len(), matches.len());
    }

    #[test]
    fn test_overlong_prefix_is_truncated() {
        let (index, _) = build_index(&[castaner_line()]);
        let matches: Vec<_> = index.nearby_hash("de0xfjt95kscjzyk5309").collect();
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_one_character_prefix_scans_linearly() {
        let (index, _) = build_index(&[castaner_line(), record_line("2", 37.7, -122.5)]);
        let matches: Vec<_> = index.nearby_hash("d").collect();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].key.id, "700641");
    }

    #[test]
    fn test_load_stats_report_buckets() {
        let (_, stats) = build_index(&[castaner_line()]);
        // One facility contributes one bucket per prefix length from the
        // minimum up to the full precision.
        assert_eq!(
            stats.bucket_count,
            GEOHASH_PRECISION - LoadOptions::default().min_prefix_length + 1
        );
    }

    #[test]
    fn test_index_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FacilitiesIndex>();
    }

    #[test]
    fn test_load_reports_missing_file() {
        let result = FacilitiesIndex::load(
            Path::new("/nonexistent/facilities.jsonl"),
            &LoadOptions::default(),
        );
        assert!(matches!(result.unwrap_err(), FacilitiesError::Io(_)));
    }
}
