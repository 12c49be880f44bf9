//! Header timestamps.
//!
//! Every entry header carries a stamp shaped like `2015/11/19 08:52:39.504 PST`. Stamps are
//! reduced to nanoseconds since the Unix epoch so entries from different sources compare
//! directly, whatever zone each source logged in.

mod zone;


use chrono::{DateTime, NaiveDateTime};
use thiserror::Error;

/// Layout of the date and time part of a stamp; the zone follows after one space.
pub const STAMP_LAYOUT: &str = "%Y/%m/%d %H:%M:%S%.3f";

const NANOS_PER_SECOND: i64 = 1_000_000_000;

#[derive(Debug, Error)]
pub enum TimestampError {
    #[error("timestamp '{stamp}' has no zone")]
    MissingZone { stamp: String },

    #[error("timestamp '{stamp}' does not match YYYY/MM/DD HH:MM:SS.mmm ZZZ: {source}")]
    Layout {
        stamp: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("timestamp '{stamp}' has an unrecognized zone '{zone}'")]
    Zone { stamp: String, zone: String },

    #[error("timestamp '{stamp}' is outside the representable range")]
    OutOfRange { stamp: String },
}

/// Parse a header stamp into nanoseconds since the Unix epoch.
pub fn parse_stamp(stamp: &str) -> Result<i64, TimestampError> {
    let stamp = stamp.trim();

    let Some((datetime, zone)) = stamp.rsplit_once(' ') else {
        return Err(TimestampError::MissingZone {
            stamp: stamp.to_string(),
        });
    };

    let naive = NaiveDateTime::parse_from_str(datetime.trim_end(), STAMP_LAYOUT).map_err(|e| {
        TimestampError::Layout {
            stamp: stamp.to_string(),
            source: e,
        }
    })?;

    let offset = zone::offset_seconds(zone).ok_or_else(|| TimestampError::Zone {
        stamp: stamp.to_string(),
        zone: zone.to_string(),
    })?;

    naive
        .and_utc()
        .timestamp_nanos_opt()
        .and_then(|local| local.checked_sub(i64::from(offset) * NANOS_PER_SECOND))
        .ok_or_else(|| TimestampError::OutOfRange {
            stamp: stamp.to_string(),
        })
}

/// Render nanoseconds since the epoch in the stamp layout, in UTC. Used for diagnostics.
pub fn format_stamp(nanos: i64) -> String {
    DateTime::from_timestamp_nanos(nanos)
        .format("%Y/%m/%d %H:%M:%S%.3f UTC")
        .to_string()
}
