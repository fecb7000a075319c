//! Raw sub-daily samples and the per-day buckets they are grouped into.

use chrono::NaiveDate;
use std::collections::HashMap;

/// One provider sample: an epoch plus named values (`"temp"` → 23.1, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct RawSample {
    pub epoch_seconds: i64,
    pub values: HashMap<String, f64>,
}

impl RawSample {
    pub fn new(epoch_seconds: i64) -> Self {
        Self {
            epoch_seconds,
            values: HashMap::new(),
        }
    }

    /// Adds a named value, builder style.
    pub fn with_value(mut self, variable: impl Into<String>, value: f64) -> Self {
        self.values.insert(variable.into(), value);
        self
    }

    pub fn value(&self, variable: &str) -> Option<f64> {
        self.values.get(variable).copied()
    }
}

/// All samples that fall on one provider-local calendar day, in epoch order.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyBucket {
    pub calendar_date: NaiveDate,
    pub samples: Vec<RawSample>,
}

/// Min/max of one variable over a bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketSummary {
    pub date: NaiveDate,
    pub min: f64,
    pub max: f64,
    /// Number of samples that carried a finite value for the variable.
    pub sample_count: usize,
}
