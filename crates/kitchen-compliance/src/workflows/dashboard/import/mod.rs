mod parser;

use super::domain::TemperatureReading;
use chrono::NaiveDate;
use std::io::Read;
use std::path::Path;

use parser::{parse_decimal, parse_flag, TemperatureLogRow};

#[derive(Debug, thiserror::Error)]
pub enum TemperatureImportError {
    #[error("failed to read temperature log: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid temperature log CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: '{value}' is not a temperature")]
    InvalidTemperature { line: u64, value: String },
}

/// A reading together with the equipment it was taken from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedTemperature {
    pub equipment: Option<String>,
    pub recorded_on: Option<NaiveDate>,
    pub reading: TemperatureReading,
}

/// Loads temperature logs exported from the kitchen's record sheets.
pub struct TemperatureLogImporter;

impl TemperatureLogImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<LoggedTemperature>, TemperatureImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<LoggedTemperature>, TemperatureImportError> {
        parser::parse_rows(reader)?
            .into_iter()
            .map(to_logged)
            .collect()
    }

    /// Readings recorded on `day`. Rows without a date are assumed to be from that day.
    pub fn readings_for_day<R: Read>(
        reader: R,
        day: NaiveDate,
    ) -> Result<Vec<TemperatureReading>, TemperatureImportError> {
        Ok(Self::from_reader(reader)?
            .into_iter()
            .filter(|logged| logged.recorded_on.map_or(true, |date| date == day))
            .map(|logged| logged.reading)
            .collect())
    }
}

fn to_logged(row: TemperatureLogRow) -> Result<LoggedTemperature, TemperatureImportError> {
    let value = parse_decimal(&row.temperature).ok_or_else(|| {
        TemperatureImportError::InvalidTemperature {
            line: row.line,
            value: row.temperature.clone(),
        }
    })?;

    let explicit = row.within_range.as_deref().and_then(parse_flag);
    let min = row.min.as_deref().and_then(parse_decimal);
    let max = row.max.as_deref().and_then(parse_decimal);

    Ok(LoggedTemperature {
        equipment: row.equipment,
        recorded_on: row.recorded_on,
        reading: TemperatureReading::resolve(value, min, max, explicit),
    })
}
