use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Epoch milliseconds, UTC.
pub type EpochMillis = i64;

/// The normalized reading every source is converted to.
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedRecord {
    pub timestamp: EpochMillis,
    /// Carried as the source's JSON number text (`arbitrary_precision`), so `20`
    /// stays `20`, `20.5` stays `20.5` and integers wider than 64 bits stay exact.
    pub temperature: Number,
    pub humidity: Number,
}

/// Which source encoding a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// ISO-8601 `timestamp`, `temp`, `hum`.
    A,
    /// Epoch-millisecond `time`, `temperature_c`, `humidity_percent`.
    B,
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => f.write_str("format A"),
            Self::B => f.write_str("format B"),
        }
    }
}
