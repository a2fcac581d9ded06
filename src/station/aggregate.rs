//! First pass over a snapshot: bucket stop-time updates by raw stop ID and
//! collect alerts.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::trace;

use crate::gtfs_rt::trip_update::{StopTimeEvent, StopTimeUpdate};
use crate::gtfs_rt::{Alert, FeedMessage};
use crate::station::types::StationUpdate;

/// Capacity hint for the bucket map; one subway line serves about this many stops.
const AVG_STOPS_PER_LINE: usize = 30;

/// Raw stop ID (direction suffix included) to its updates, sorted by arrival.
pub type StopBuckets = HashMap<String, Vec<StationUpdate>>;

/// Output of [`aggregate`]: bucketed stop updates and the feed's alerts in
/// snapshot order.
#[derive(Debug, Default)]
pub struct RawFeed<'a> {
    pub buckets: StopBuckets,
    pub alerts: Vec<&'a Alert>,
}

/// Walks every entity once.
///
/// Entities without a trip ID and stop-time updates without a stop ID,
/// arrival time or departure time are skipped. Each bucket ends up sorted by
/// arrival; equal arrivals stay in feed order.
pub fn aggregate(feed: &FeedMessage) -> RawFeed<'_> {
    let mut buckets = StopBuckets::with_capacity(AVG_STOPS_PER_LINE);
    let mut alerts = Vec::new();

    for entity in &feed.entity {
        if let Some(alert) = &entity.alert {
            alerts.push(alert);
        }

        let Some(trip_update) = &entity.trip_update else {
            continue;
        };
        let Some(trip_id) = trip_update.trip.trip_id.as_deref() else {
            continue;
        };

        for stu in &trip_update.stop_time_update {
            if let Some((stop_id, update)) = station_update(trip_id, stu) {
                buckets.entry(stop_id.to_string()).or_default().push(update);
            }
        }
    }

    for updates in buckets.values_mut() {
        updates.sort_by_key(|u| u.arrival);
    }

    RawFeed { buckets, alerts }
}

fn station_update<'a>(trip_id: &str, stu: &'a StopTimeUpdate) -> Option<(&'a str, StationUpdate)> {
    let stop_id = stu.stop_id.as_deref().filter(|id| !id.is_empty())?;
    let arrival = event_time(stu.arrival.as_ref())?;
    let departure = event_time(stu.departure.as_ref())?;

    Some((
        stop_id,
        StationUpdate {
            trip_id: trip_id.to_string(),
            arrival,
            departure,
        },
    ))
}

/// Seconds since the epoch to an instant; `None` if unset or out of range.
fn event_time(event: Option<&StopTimeEvent>) -> Option<DateTime<Utc>> {
    let secs = event?.time?;
    let time = DateTime::from_timestamp(secs, 0);
    if time.is_none() {
        trace!(secs, "Stop time out of range, dropping update");
    }
    time
}
