//! Protobuf decoding of GTFS Realtime snapshots.

use anyhow::{Context, Result};
use prost::Message;

use crate::gtfs_rt::FeedMessage;

/// Decodes a protobuf-encoded [`FeedMessage`] from raw bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid protobuf for a `FeedMessage`.
pub fn parse_feed(bytes: &[u8]) -> Result<FeedMessage> {
    FeedMessage::decode(bytes).with_context(|| format!("decoding {} byte feed snapshot", bytes.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::station::fixtures::{T, feed, stop, trip_entity};

    #[test]
    fn test_parse_empty_bytes_returns_default_feed() {
        // Required fields decode to their defaults
        let feed = parse_feed(&[]).unwrap();
        assert_eq!(feed.header.gtfs_realtime_version, "");
        assert!(feed.entity.is_empty());
    }

    #[test]
    fn test_parse_invalid_bytes() {
        let result = parse_feed(&[0xFF, 0xFE, 0x00, 0x01]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_keeps_stop_time_updates() {
        let encoded = feed(vec![trip_entity(
            "1",
            Some("trip"),
            vec![stop("723N", T, T + 30)],
        )])
        .encode_to_vec();

        let parsed = parse_feed(&encoded).unwrap();

        assert_eq!(parsed.header.timestamp, Some(T as u64));
        let trip_update = parsed.entity[0].trip_update.as_ref().unwrap();
        assert_eq!(trip_update.trip.trip_id.as_deref(), Some("trip"));
        let stu = &trip_update.stop_time_update[0];
        assert_eq!(stu.stop_id.as_deref(), Some("723N"));
        assert_eq!(stu.departure.as_ref().and_then(|d| d.time), Some(T + 30));
    }
}
