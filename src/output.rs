//! Output formatting for the station view.
//!
//! Supports pretty-printing, JSON on stdout, and a flat CSV of arrivals.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use tracing::{debug, info};

use crate::station::FeedUpdate;

/// One row of the arrivals CSV.
#[derive(Debug, Serialize)]
struct ArrivalRecord<'a> {
    stop_id: &'a str,
    raw_stop_id: &'a str,
    trip_id: &'a str,
    arrival: DateTime<Utc>,
    departure: DateTime<Utc>,
}

/// Logs the update using Rust's debug pretty-print format.
pub fn print_pretty(update: &FeedUpdate) {
    debug!("{:#?}", update);
}

/// Writes `value` to stdout as pretty-printed JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes every arrival as a CSV row, stations in stop-ID order and rows in
/// sub-bucket order. Replaces the file if it exists.
pub fn write_arrivals_csv(path: &str, update: &FeedUpdate) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("creating '{path}'"))?;

    let mut rows = 0;
    for station in update.station_status.values() {
        for (raw_stop_id, updates) in &station.updates_by_raw_id {
            for u in updates {
                writer.serialize(ArrivalRecord {
                    stop_id: &station.stop_id,
                    raw_stop_id,
                    trip_id: &u.trip_id,
                    arrival: u.arrival,
                    departure: u.departure,
                })?;
                rows += 1;
            }
        }
    }
    writer.flush()?;

    info!(path, rows, "Arrivals CSV written");
    Ok(())
}
