//! Expands compact `(start, end, interval)` time encodings into explicit
//! timestamps aligned with a provider's parallel value arrays.

use crate::providers::error::ProviderError;
use chrono::{DateTime, FixedOffset};

/// A compact time axis as sent by columnar providers.
///
/// Covers `start, start + interval, ...` strictly before `end`, with
/// `utc_offset_seconds` giving the provider-local offset of every entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeAxisSpec {
    pub start_epoch_seconds: i64,
    pub end_epoch_seconds: i64,
    pub interval_seconds: i64,
    pub utc_offset_seconds: i32,
}

impl TimeAxisSpec {
    pub fn new(start: i64, end: i64, interval: i64, utc_offset_seconds: i32) -> Self {
        Self {
            start_epoch_seconds: start,
            end_epoch_seconds: end,
            interval_seconds: interval,
            utc_offset_seconds,
        }
    }

    /// The regular axis that starts at `times[0]` and has one entry per
    /// element of `times`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidTimeAxis`] if the axis end does not fit
    /// in an epoch.
    pub fn covering(
        times: &[i64],
        interval: i64,
        utc_offset_seconds: i32,
    ) -> Result<Self, ProviderError> {
        let start = times.first().copied().unwrap_or_default();
        let end = i64::try_from(times.len())
            .ok()
            .and_then(|count| count.checked_mul(interval))
            .and_then(|span| start.checked_add(span))
            .ok_or(ProviderError::InvalidTimeAxis {
                start,
                end: start,
                interval,
            })?;
        Ok(Self::new(start, end, interval, utc_offset_seconds))
    }

    /// Number of entries on the axis, `(end - start) / interval`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidTimeAxis`] if the interval is not
    /// positive, `end` precedes `start`, the span overflows, or the span is
    /// not a whole number of intervals.
    pub fn len(&self) -> Result<usize, ProviderError> {
        let span = self
            .end_epoch_seconds
            .checked_sub(self.start_epoch_seconds)
            .ok_or_else(|| self.invalid())?;
        if self.interval_seconds <= 0 || span < 0 || span % self.interval_seconds != 0 {
            return Err(self.invalid());
        }
        usize::try_from(span / self.interval_seconds).map_err(|_| self.invalid())
    }

    fn invalid(&self) -> ProviderError {
        ProviderError::InvalidTimeAxis {
            start: self.start_epoch_seconds,
            end: self.end_epoch_seconds,
            interval: self.interval_seconds,
        }
    }
}

/// Reconstructs the explicit timestamps of an axis.
///
/// Every returned timestamp carries the axis' UTC offset, so its
/// `date_naive()` is the provider-local calendar date while `timestamp()`
/// still reports the absolute instant. Entries are strictly increasing and
/// there are exactly [`TimeAxisSpec::len`] of them.
///
/// # Examples
///
/// ```
/// use forecastkit::{reconstruct, TimeAxisSpec};
///
/// let axis = TimeAxisSpec::new(1_700_000_000, 1_700_000_000 + 3 * 86_400, 86_400, 0);
/// let stamps = reconstruct(&axis).unwrap();
/// assert_eq!(stamps.len(), 3);
/// assert_eq!(stamps[2].timestamp(), 1_700_000_000 + 2 * 86_400);
/// ```
pub fn reconstruct(spec: &TimeAxisSpec) -> Result<Vec<DateTime<FixedOffset>>, ProviderError> {
    let len = spec.len()?;
    let offset = FixedOffset::east_opt(spec.utc_offset_seconds)
        .ok_or(ProviderError::InvalidOffset(spec.utc_offset_seconds))?;

    (0..len as i64)
        .map(|i| {
            let epoch = i
                .checked_mul(spec.interval_seconds)
                .and_then(|step| spec.start_epoch_seconds.checked_add(step))
                .ok_or(ProviderError::TimestampOutOfRange(spec.start_epoch_seconds))?;
            DateTime::from_timestamp(epoch, 0)
                .map(|utc| utc.with_timezone(&offset))
                .ok_or(ProviderError::TimestampOutOfRange(epoch))
        })
        .collect()
}

/// Checks that a value array matches the length of its reconstructed axis.
///
/// A mismatch means the payload is corrupt; it is never truncated or padded.
pub fn ensure_aligned<T>(
    axis_len: usize,
    variable: &str,
    values: &[T],
) -> Result<(), ProviderError> {
    if values.len() == axis_len {
        Ok(())
    } else {
        Err(ProviderError::AxisLengthMismatch {
            variable: variable.to_string(),
            expected: axis_len,
            found: values.len(),
        })
    }
}

/// Checks that explicit provider timestamps sit on a reconstructed axis,
/// allowing each one to drift by up to `tolerance_seconds`.
pub fn ensure_on_axis(
    stamps: &[DateTime<FixedOffset>],
    times: &[i64],
    tolerance_seconds: u64,
) -> Result<(), ProviderError> {
    ensure_aligned(stamps.len(), "time", times)?;
    for (index, (stamp, &found)) in stamps.iter().zip(times).enumerate() {
        let expected = stamp.timestamp();
        if expected.abs_diff(found) > tolerance_seconds {
            return Err(ProviderError::OffAxisTimestamp {
                index,
                expected,
                found,
            });
        }
    }
    Ok(())
}
