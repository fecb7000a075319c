//! Buckets raw sub-daily samples into provider-local calendar days and
//! reduces each day to a min/max summary.

use crate::types::sample::{BucketSummary, DailyBucket, RawSample};
use crate::types::window::ForecastWindow;
use chrono::{DateTime, NaiveDate};
use log::warn;
use ordered_float::OrderedFloat;

const SECONDS_PER_DAY: i64 = 86_400;

/// Groups samples into days for providers that do not send daily rollups.
///
/// The first bucket is assumed to be a partial "today" and is dropped under
/// [`LeadingDay::Skip`](crate::LeadingDay::Skip); the next `days` buckets are
/// returned. Fewer buckets than requested is not an error: the shorter result
/// is returned as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyAggregator {
    utc_offset_seconds: i64,
    window: ForecastWindow,
}

impl DailyAggregator {
    pub fn new(utc_offset_seconds: i32, window: ForecastWindow) -> Self {
        Self {
            utc_offset_seconds: i64::from(utc_offset_seconds),
            window,
        }
    }

    /// Sorts `samples` by epoch, groups them by local calendar day and applies
    /// the window.
    ///
    /// # Examples
    ///
    /// ```
    /// use forecastkit::{DailyAggregator, ForecastWindow, LeadingDay, RawSample};
    ///
    /// let day = 86_400;
    /// let samples = (0..4)
    ///     .map(|d| RawSample::new(d * day + 43_200).with_value("temp", d as f64))
    ///     .collect();
    /// let aggregator = DailyAggregator::new(0, ForecastWindow::new(2, LeadingDay::Skip));
    /// let buckets = aggregator.aggregate(samples);
    /// assert_eq!(buckets.len(), 2);
    /// assert_eq!(buckets[0].samples[0].value("temp"), Some(1.0));
    /// ```
    pub fn aggregate(&self, mut samples: Vec<RawSample>) -> Vec<DailyBucket> {
        samples.sort_by_key(|s| s.epoch_seconds);

        let mut buckets: Vec<(i64, DailyBucket)> = Vec::new();
        for sample in samples {
            let Some(day_number) = self.local_day_number(sample.epoch_seconds) else {
                warn!(
                    "Dropping sample at epoch {}: local time overflows",
                    sample.epoch_seconds
                );
                continue;
            };
            if let Some((current_day, bucket)) = buckets.last_mut() {
                if *current_day == day_number {
                    bucket.samples.push(sample);
                    continue;
                }
            }
            let Some(calendar_date) = day_number_to_date(day_number) else {
                warn!(
                    "Dropping sample at epoch {}: date out of range",
                    sample.epoch_seconds
                );
                continue;
            };
            buckets.push((
                day_number,
                DailyBucket {
                    calendar_date,
                    samples: vec![sample],
                },
            ));
        }

        self.window
            .select(buckets.into_iter().map(|(_, bucket)| bucket))
    }

    /// `floor((epoch + offset) / 86400)`, flooring toward negative infinity.
    fn local_day_number(&self, epoch_seconds: i64) -> Option<i64> {
        epoch_seconds
            .checked_add(self.utc_offset_seconds)
            .map(|local| local.div_euclid(SECONDS_PER_DAY))
    }
}

fn day_number_to_date(day_number: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(day_number.checked_mul(SECONDS_PER_DAY)?, 0)
        .map(|utc| utc.date_naive())
}

/// Reduces one bucket to the min and max of `variable`.
///
/// Non-finite values are ignored. Returns `None` if no sample in the bucket
/// carries a finite value for the variable.
pub fn summarize(bucket: &DailyBucket, variable: &str) -> Option<BucketSummary> {
    let values: Vec<OrderedFloat<f64>> = bucket
        .samples
        .iter()
        .filter_map(|s| s.value(variable))
        .filter(|v| v.is_finite())
        .map(OrderedFloat)
        .collect();

    Some(BucketSummary {
        date: bucket.calendar_date,
        min: values.iter().min()?.into_inner(),
        max: values.iter().max()?.into_inner(),
        sample_count: values.len(),
    })
}
