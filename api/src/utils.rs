use chrono::{DateTime, NaiveDateTime, ParseResult, Utc};
use rand::{rngs::OsRng, RngCore};

use crate::consts::*;

/// Helper: a fresh client seed, 32 bytes from the OS CSPRNG rendered as lowercase hex.
pub fn generate_client_seed() -> String {
    let mut bytes = [0u8; CLIENT_SEED_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Helper: parse an ISO-8601 timestamp from the API into UTC. A trailing `Z` is read as
/// `+00:00`; timestamps without any offset are taken to be UTC already.
pub fn parse_timestamp(raw: &str) -> ParseResult<DateTime<Utc>> {
    let raw = raw.trim();
    let normalized = match raw.strip_suffix('Z') {
        Some(head) => format!("{}+00:00", head),
        None => raw.to_string(),
    };

    match DateTime::parse_from_rfc3339(&normalized) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(err) => NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|_| err),
    }
}

/// Helper: render a timestamp the way reward dates are reported.
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}
