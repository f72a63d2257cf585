use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Layouts carrying an explicit UTC offset. Parsed values are shifted to UTC.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

/// Layouts without offset, interpreted as UTC wall time.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a timestamp string into naive UTC wall time.
///
/// Returns `None` when the value matches none of the accepted layouts.
/// Blank strings are not timestamps; callers decide whether they mean null.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Some(dt.naive_utc());
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Minutes elapsed from `pickup` to `dropoff`.
///
/// Negative when the dropoff precedes the pickup; no correction is applied.
pub fn duration_minutes(pickup: NaiveDateTime, dropoff: NaiveDateTime) -> f64 {
    (dropoff - pickup).num_milliseconds() as f64 / 60_000.0
}

/// Batch front-end over [`parse_timestamp`] for whole columns.
pub struct TimestampParser;

impl TimestampParser {
    /// Parse every cell of a column.
    ///
    /// Nulls and blank cells map to `None`. The first non-blank cell that
    /// cannot be parsed is reported as `Err((row, value))`.
    pub fn parse_column<'a, I>(cells: I) -> Result<Vec<Option<NaiveDateTime>>, (usize, String)>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        cells
            .into_iter()
            .enumerate()
            .map(|(row, cell)| match cell {
                None => Ok(None),
                Some(raw) if raw.trim().is_empty() => Ok(None),
                Some(raw) => parse_timestamp(raw)
                    .map(Some)
                    .ok_or_else(|| (row, raw.to_string())),
            })
            .collect()
    }
}
