use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use std::io::Read;

/// One row of a temperature log export after header and cell cleanup.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TemperatureLogRow {
    pub(crate) line: u64,
    pub(crate) equipment: Option<String>,
    pub(crate) temperature: String,
    pub(crate) min: Option<String>,
    pub(crate) max: Option<String>,
    pub(crate) within_range: Option<String>,
    pub(crate) recorded_on: Option<NaiveDate>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<TemperatureLogRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut rows = Vec::new();

    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let raw: RawRow = record.deserialize(Some(&headers))?;
        rows.push(TemperatureLogRow {
            // Quoted cells may span lines, so the record index is only a fallback.
            line: record
                .position()
                .map_or(index as u64 + 2, |position| position.line()),
            equipment: raw.equipment,
            temperature: raw.temperature,
            min: raw.min,
            max: raw.max,
            within_range: raw.within_range,
            recorded_on: raw
                .recorded_at
                .as_deref()
                .and_then(parse_datetime)
                .map(|dt| dt.date()),
        });
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Equipment", default, deserialize_with = "empty_string_as_none")]
    equipment: Option<String>,
    #[serde(rename = "Temperature")]
    temperature: String,
    #[serde(rename = "Min", default, deserialize_with = "empty_string_as_none")]
    min: Option<String>,
    #[serde(rename = "Max", default, deserialize_with = "empty_string_as_none")]
    max: Option<String>,
    #[serde(
        rename = "Within Range",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    within_range: Option<String>,
    #[serde(
        rename = "Recorded At",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    recorded_at: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Parse a Norwegian- or English-formatted decimal ("3,5" or "3.5").
pub(crate) fn parse_decimal(value: &str) -> Option<f64> {
    let normalized = value
        .trim()
        .trim_end_matches("°C")
        .trim_end_matches('°')
        .trim()
        .replace(',', ".");
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Accepts yes/no answers in English, Norwegian, and Arabic.
pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "ja" | "ok" | "نعم" => Some(true),
        "false" | "no" | "n" | "0" | "nei" | "avvik" | "لا" => Some(false),
        _ => None,
    }
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M") {
        return Some(dt);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%d.%m.%Y") {
        return date.and_hms_opt(0, 0, 0);
    }

    None
}
