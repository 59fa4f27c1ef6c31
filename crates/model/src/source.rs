//! Source record shapes and their adapters to [`UnifiedRecord`].
//!
//! Fields are optional at the serde level so that an absent (or `null`)
//! field surfaces as [`Error::MissingField`] with its record position,
//! while a field of the wrong JSON type still fails parsing.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Number;

use crate::error::{Error, Result};
use crate::record::{EpochMillis, SourceFormat, UnifiedRecord};
use crate::timestamp::iso8601_to_millis;

/// A record shape that can be mapped onto [`UnifiedRecord`].
pub trait SourceRecord: DeserializeOwned {
    const FORMAT: SourceFormat;

    /// Converts one record; `index` is its position within the artifact.
    fn to_unified(&self, index: usize) -> Result<UnifiedRecord>;
}

/// Format A: `{"timestamp": "2024-01-01T00:00:10Z", "temp": 20, "hum": 50}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FormatARecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hum: Option<Number>,
}

/// Format B: `{"time": 1704067205000, "temperature_c": 19, "humidity_percent": 55}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FormatBRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<EpochMillis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity_percent: Option<Number>,
}

fn require<'a, T>(
    field: &'a Option<T>,
    format: SourceFormat,
    index: usize,
    name: &'static str,
) -> Result<&'a T> {
    field
        .as_ref()
        .ok_or_else(|| Error::missing_field(format, index, name))
}

impl SourceRecord for FormatARecord {
    const FORMAT: SourceFormat = SourceFormat::A;

    fn to_unified(&self, index: usize) -> Result<UnifiedRecord> {
        let timestamp = require(&self.timestamp, Self::FORMAT, index, "timestamp")?;
        let temperature = require(&self.temp, Self::FORMAT, index, "temp")?;
        let humidity = require(&self.hum, Self::FORMAT, index, "hum")?;

        let timestamp =
            iso8601_to_millis(timestamp).map_err(|source| Error::MalformedTimestamp {
                index,
                value: timestamp.clone(),
                source,
            })?;

        Ok(UnifiedRecord {
            timestamp,
            temperature: temperature.clone(),
            humidity: humidity.clone(),
        })
    }
}

impl SourceRecord for FormatBRecord {
    const FORMAT: SourceFormat = SourceFormat::B;

    fn to_unified(&self, index: usize) -> Result<UnifiedRecord> {
        let timestamp = *require(&self.time, Self::FORMAT, index, "time")?;
        let temperature = require(&self.temperature_c, Self::FORMAT, index, "temperature_c")?;
        let humidity = require(&self.humidity_percent, Self::FORMAT, index, "humidity_percent")?;

        Ok(UnifiedRecord {
            timestamp,
            temperature: temperature.clone(),
            humidity: humidity.clone(),
        })
    }
}

/// Converts every record in order. The first failing record aborts the whole batch.
pub fn convert_all<R: SourceRecord>(records: &[R]) -> Result<Vec<UnifiedRecord>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| record.to_unified(index))
        .collect()
}

/// A parsed artifact tagged with its encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceBatch {
    A(Vec<FormatARecord>),
    B(Vec<FormatBRecord>),
}

impl SourceBatch {
    pub fn format(&self) -> SourceFormat {
        match self {
            Self::A(_) => SourceFormat::A,
            Self::B(_) => SourceFormat::B,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::A(records) => records.len(),
            Self::B(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_unified(&self) -> Result<Vec<UnifiedRecord>> {
        match self {
            Self::A(records) => convert_all(records),
            Self::B(records) => convert_all(records),
        }
    }
}
