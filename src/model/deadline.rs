use crate::errors::StoreError;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value as JsonValue;

/// Parsed form of the JSON-encoded `deadline_spec` column.
///
/// The column holds either a single date/time string or an ordered list of
/// them. Blank strings, JSON null and empty lists all mean "no deadline".
/// Anything else that fails to parse is a hard error, never a silent
/// no-deadline default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeadlineSpec {
    None,
    Single(NaiveDateTime),
    Multiple(Vec<NaiveDateTime>),
}

impl DeadlineSpec {
    pub fn parse(raw: Option<&str>) -> Result<Self, StoreError> {
        let raw = match raw {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Ok(Self::None),
        };

        let value: JsonValue = serde_json::from_str(raw).map_err(|err| {
            StoreError::DeadlineFormat(format!("Malformed deadline JSON {:?}: {}", raw, err))
        })?;

        let entries = match value {
            JsonValue::Null => return Ok(Self::None),
            JsonValue::String(entry) => vec![entry],
            JsonValue::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    JsonValue::String(entry) => Ok(entry),
                    JsonValue::Null => Ok(String::new()),
                    other => Err(StoreError::DeadlineFormat(format!(
                        "Unexpected deadline entry: {}",
                        other
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()?,
            other => {
                return Err(StoreError::DeadlineFormat(format!(
                    "Unexpected deadline value: {}",
                    other
                )));
            }
        };

        let mut parsed = Vec::with_capacity(entries.len());
        for entry in &entries {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            parsed.push(parse_date_time(entry)?);
        }

        match parsed.len() {
            0 => Ok(Self::None),
            1 => Ok(Self::Single(parsed[0])),
            _ => Ok(Self::Multiple(parsed)),
        }
    }

    /// The deadline used for gating. With multiple entries the earliest one
    /// wins, tightening availability rather than loosening it.
    pub fn effective(&self) -> Option<NaiveDateTime> {
        match self {
            Self::None => None,
            Self::Single(at) => Some(*at),
            Self::Multiple(all) => all.iter().min().copied(),
        }
    }
}

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y"];

/// Parses a single deadline token in either SQLish (`2011-04-19 13:55`) or
/// day-first (`25.05.2012 14:56`) format. A bare date is normalized to the
/// end of that day, local time.
pub fn parse_date_time(input: &str) -> Result<NaiveDateTime, StoreError> {
    for format in DATE_TIME_FORMATS {
        if let Ok(at) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(at);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            if let Some(at) = date.and_hms_opt(23, 59, 59) {
                return Ok(at);
            }
        }
    }
    Err(StoreError::DeadlineFormat(format!(
        "Unparsable date: {:?}",
        input
    )))
}
