//! Tolerant field decoders for producer payloads.
//!
//! The ticker server serialises decimals as numbers, but some exchanges
//! forward them as strings. Timestamps arrive as ISO local date-times by
//! default, occasionally as RFC 3339 instants, epoch milliseconds, or the
//! `[y, m, d, h, mi, s, nanos]` array form.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDecimal {
    Number(f64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    Text(String),
    Parts(Vec<u32>),
}

pub(crate) fn decimal<'de, D>(d: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawDecimal>::deserialize(d)? {
        None => Ok(None),
        Some(RawDecimal::Number(v)) => Ok(Some(v)),
        Some(RawDecimal::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<f64>()
                .map(Some)
                .map_err(|e| D::Error::custom(format!("invalid decimal {s:?}: {e}")))
        }
    }
}

pub(crate) fn timestamp<'de, D>(d: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<RawTimestamp>::deserialize(d)? else {
        return Ok(None);
    };

    let parsed = match raw {
        RawTimestamp::Millis(ms) => Utc.timestamp_millis_opt(ms).single(),
        RawTimestamp::Text(s) => parse_text(s.trim()),
        RawTimestamp::Parts(parts) => parse_parts(&parts),
    };

    parsed
        .map(Some)
        .ok_or_else(|| D::Error::custom("unrecognised timestamp"))
}

fn parse_text(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(local_to_utc)
}

fn parse_parts(parts: &[u32]) -> Option<DateTime<Utc>> {
    let [y, mo, d, rest @ ..] = parts else {
        return None;
    };
    let at = |i: usize| rest.get(i).copied().unwrap_or(0);

    let naive = NaiveDate::from_ymd_opt(i32::try_from(*y).ok()?, *mo, *d)?
        .and_hms_nano_opt(at(0), at(1), at(2), at(3))?;

    Some(local_to_utc(naive))
}

/// Zone-less producer times are wall-clock times of the local zone.
/// Inside a DST gap the value is taken as UTC.
fn local_to_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}
