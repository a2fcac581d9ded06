//! Reshapes a decoded feed snapshot into per-station arrivals and display
//! alerts.
//!
//! [`aggregate`] buckets stop-time updates by raw stop ID, [`normalize`]
//! folds directional stop IDs into their physical stop, and [`alerts`]
//! projects service alerts. [`FeedUpdate::from_feed`] runs all three.

pub mod aggregate;
pub mod alerts;
pub mod normalize;
pub mod types;

pub use normalize::DirectionSuffixes;
pub use types::{Alert, FeedUpdate, StationStatus, StationUpdate};

use tracing::debug;

use crate::gtfs_rt::FeedMessage;

impl FeedUpdate {
    /// Builds the station view using the `N`/`S` direction suffixes.
    pub fn from_feed(feed: &FeedMessage) -> Self {
        Self::from_feed_with(feed, &DirectionSuffixes::default())
    }

    /// Builds the station view, stripping the given direction suffixes.
    ///
    /// Incomplete entities and stop-time updates are skipped; this never fails.
    pub fn from_feed_with(feed: &FeedMessage, suffixes: &DirectionSuffixes) -> Self {
        let raw = aggregate::aggregate(feed);
        let bucket_count = raw.buckets.len();

        let alerts = alerts::project_alerts(&raw.alerts);
        let station_status = normalize::normalize(raw.buckets, suffixes);

        debug!(
            entities = feed.entity.len(),
            raw_stops = bucket_count,
            stations = station_status.len(),
            alerts = alerts.len(),
            "Feed reshaped into station view"
        );

        FeedUpdate {
            station_status,
            alerts,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::gtfs_rt::alert::Effect;

    #[test]
    fn test_from_feed_empty() {
        let update = FeedUpdate::from_feed(&feed(vec![]));

        assert!(update.station_status.is_empty());
        assert!(update.alerts.is_empty());
    }

    #[test]
    fn test_from_feed_groups_directions_and_alerts() {
        let update = FeedUpdate::from_feed(&feed(vec![
            trip_entity("1", Some("trip-a"), vec![stop("723N", T + 60, T + 90)]),
            trip_entity("2", Some("trip-b"), vec![stop("723S", T + 30, T + 45)]),
            alert_entity("3", Effect::SignificantDelays, &["Delays"]),
        ]));

        let station = update.station("723").unwrap();
        assert_eq!(station.stop_id, "723");
        assert_eq!(station.updates_by_raw_id.len(), 2);
        assert_eq!(station.direction("723N").unwrap()[0].trip_id, "trip-a");
        assert_eq!(station.direction("723S").unwrap()[0].trip_id, "trip-b");

        assert_eq!(
            update.alerts,
            vec![Alert {
                effect: "SIGNIFICANT_DELAYS".to_string(),
                header: "Delays".to_string(),
            }]
        );
    }

    #[test]
    fn test_from_feed_with_custom_suffixes() {
        let suffixes = DirectionSuffixes::new(['E', 'W']);
        let update = FeedUpdate::from_feed_with(
            &feed(vec![trip_entity(
                "1",
                Some("trip-a"),
                vec![stop("101E", T, T), stop("101N", T, T)],
            )]),
            &suffixes,
        );

        assert!(update.station("101").is_some());
        assert!(update.station("101N").is_some());
    }

    #[test]
    fn test_from_feed_is_repeatable() {
        let snapshot = feed(vec![
            trip_entity("1", Some("a"), vec![stop("R01N", T + 5, T + 6)]),
            trip_entity("2", Some("b"), vec![stop("R01S", T + 1, T + 2)]),
        ]);

        assert_eq!(FeedUpdate::from_feed(&snapshot), FeedUpdate::from_feed(&snapshot));
    }
}
