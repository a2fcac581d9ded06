//! Folds directional stop IDs into physical stops.
//!
//! The MTA reports one physical platform under a stop ID per direction of
//! travel: Grand Central on the 7 is `723N` (toward Queens) and `723S`. Both
//! land in the `723` station, each kept as its own sub-bucket.

use std::collections::BTreeMap;

use crate::station::aggregate::StopBuckets;
use crate::station::types::StationStatus;

pub const NORTHBOUND_SUFFIX: char = 'N';
pub const SOUTHBOUND_SUFFIX: char = 'S';

/// Trailing characters that mark a stop ID as one direction of a physical stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionSuffixes(Vec<char>);

impl Default for DirectionSuffixes {
    fn default() -> Self {
        Self(vec![NORTHBOUND_SUFFIX, SOUTHBOUND_SUFFIX])
    }
}

impl DirectionSuffixes {
    pub fn new(suffixes: impl IntoIterator<Item = char>) -> Self {
        Self(suffixes.into_iter().collect())
    }

    pub fn as_slice(&self) -> &[char] {
        &self.0
    }

    /// Resolves a raw stop ID to its physical stop ID.
    ///
    /// The last character is removed only when it is a known suffix and
    /// something remains; `"N"` stays `"N"`.
    pub fn physical_stop_id<'a>(&self, raw_id: &'a str) -> &'a str {
        let mut chars = raw_id.chars();
        match chars.next_back() {
            Some(last) if self.0.contains(&last) && !chars.as_str().is_empty() => chars.as_str(),
            _ => raw_id,
        }
    }
}

/// Regroups raw-ID buckets under their physical stop, keeping the raw ID as
/// the sub-bucket key.
///
/// A suffixed ID whose stripped form equals an unsuffixed raw ID merges into
/// the same station.
pub fn normalize(buckets: StopBuckets, suffixes: &DirectionSuffixes) -> BTreeMap<String, StationStatus> {
    let mut stations: BTreeMap<String, StationStatus> = BTreeMap::new();

    for (raw_id, updates) in buckets {
        let stop_id = suffixes.physical_stop_id(&raw_id).to_string();
        let station = stations
            .entry(stop_id)
            .or_insert_with_key(|stop_id| StationStatus::new(stop_id.clone()));
        station.updates_by_raw_id.insert(raw_id, updates);
    }

    stations
}
