use chrono::{DateTime, SecondsFormat};
use num_rational::Ratio;
use serde_json::Number;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::record::EpochMillis;
use crate::source::{FormatARecord, FormatBRecord};

/// A synthetic reading in one of the two source encodings.
#[derive(Debug, Clone, PartialEq)]
pub enum Reading {
    A(FormatARecord),
    B(FormatBRecord),
}

/// Endless stream of plausible sensor readings, interleaving both formats.
pub struct SampleGenerator {
    rng: SmallRng,
    cursor: EpochMillis,
    last_a: Option<EpochMillis>,
}

impl SampleGenerator {
    /// 2024-01-01T00:00:00Z
    pub const START: EpochMillis = 1_704_067_200_000;

    const FORMAT_A_SHARE: Ratio<u32> = Ratio::new_raw(1, 2);
    /// Share of format B readings stamped with the latest format A instant.
    const SHARED_INSTANT: Ratio<u32> = Ratio::new_raw(1, 10);

    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> Self {
        SampleGenerator {
            rng,
            cursor: Self::START,
            last_a: None,
        }
    }

    fn random_ratio(&mut self, ratio: Ratio<u32>) -> bool {
        self.rng.random_ratio(*ratio.numer(), *ratio.denom())
    }

    fn tenths(&mut self, range: std::ops::RangeInclusive<i64>) -> Number {
        let tenths = self.rng.random_range(range);
        Number::from_f64(tenths as f64 / 10.0).unwrap_or_else(|| Number::from(tenths / 10))
    }
}

impl Default for SampleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for SampleGenerator {
    type Item = Reading;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor += self.rng.random_range(1_000..=10_000);
        let temperature = self.tenths(150..=300);
        let humidity = self.tenths(300..=700);

        if self.random_ratio(Self::FORMAT_A_SHARE) {
            let instant = DateTime::from_timestamp_millis(self.cursor)?;
            self.last_a = Some(self.cursor);
            return Some(Reading::A(FormatARecord {
                timestamp: Some(instant.to_rfc3339_opts(SecondsFormat::Millis, true)),
                temp: Some(temperature),
                hum: Some(humidity),
            }));
        }

        let last_a = self.last_a;
        let time = match last_a {
            Some(shared) if self.random_ratio(Self::SHARED_INSTANT) => shared,
            _ => self.cursor,
        };
        Some(Reading::B(FormatBRecord {
            time: Some(time),
            temperature_c: Some(temperature),
            humidity_percent: Some(humidity),
        }))
    }
}

/// Splits readings into the two per-format collections, keeping order.
pub fn partition(readings: impl IntoIterator<Item = Reading>) -> (Vec<FormatARecord>, Vec<FormatBRecord>) {
    let mut format_a = Vec::new();
    let mut format_b = Vec::new();
    for reading in readings {
        match reading {
            Reading::A(record) => format_a.push(record),
            Reading::B(record) => format_b.push(record),
        }
    }
    (format_a, format_b)
}
