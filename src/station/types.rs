//! Station-centric view of a realtime feed snapshot.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// One predicted stop of one trip, taken from a stop-time update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationUpdate {
    pub trip_id: String,
    pub arrival: DateTime<Utc>,
    pub departure: DateTime<Utc>,
}

/// Every update seen for one physical stop, split by the raw (possibly
/// direction-suffixed) stop ID it was reported under.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StationStatus {
    pub stop_id: String,
    pub updates_by_raw_id: BTreeMap<String, Vec<StationUpdate>>,
}

impl StationStatus {
    pub fn new(stop_id: impl Into<String>) -> Self {
        Self {
            stop_id: stop_id.into(),
            updates_by_raw_id: BTreeMap::new(),
        }
    }

    /// Returns the updates reported under `raw_id` (e.g. `"723N"`).
    pub fn direction(&self, raw_id: &str) -> Option<&[StationUpdate]> {
        self.updates_by_raw_id.get(raw_id).map(Vec::as_slice)
    }

    /// All updates for the stop regardless of direction, ordered by arrival.
    ///
    /// Ties keep raw-ID order, then the order within each sub-bucket.
    pub fn all_updates(&self) -> Vec<&StationUpdate> {
        let mut all: Vec<&StationUpdate> = self.updates_by_raw_id.values().flatten().collect();
        all.sort_by_key(|u| u.arrival);
        all
    }
}

/// A service alert reduced to something a display can show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub effect: String,
    pub header: String,
}

/// The reshaped snapshot: stations keyed by physical stop ID, plus alerts in
/// feed order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedUpdate {
    pub station_status: BTreeMap<String, StationStatus>,
    pub alerts: Vec<Alert>,
}

impl FeedUpdate {
    pub fn station(&self, stop_id: &str) -> Option<&StationStatus> {
        self.station_status.get(stop_id)
    }
}
