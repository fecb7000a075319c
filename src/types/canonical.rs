//! The canonical per-location series every provider is normalized into.
//!
//! Values stored here are already rounded by [`round_display`]; nothing
//! downstream rounds again, so exporting a series twice yields identical text.

use crate::providers::error::ProviderError;
use crate::types::rounding::round_display;
use chrono::NaiveDate;
use serde::Serialize;

/// Current conditions at fetch time, in °C and mm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub temperature: f64,
    /// Rain right now. Providers define this differently (last hour, current
    /// interval) or not at all, so it is only comparable within one provider.
    pub rain: Option<f64>,
}

/// Index-aligned daily arrays: `dates[i]`, `min_temp[i]`, `max_temp[i]` and
/// `rain_sum[i]` all describe the same provider-local day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySeries {
    dates: Vec<NaiveDate>,
    min_temp: Vec<f64>,
    max_temp: Vec<f64>,
    rain_sum: Option<Vec<f64>>,
}

impl DailySeries {
    /// Builds a series from already rounded arrays, checking that they all
    /// have the length of `dates`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::SeriesLengthMismatch`] naming the first array
    /// whose length differs.
    pub fn new(
        dates: Vec<NaiveDate>,
        min_temp: Vec<f64>,
        max_temp: Vec<f64>,
        rain_sum: Option<Vec<f64>>,
    ) -> Result<Self, ProviderError> {
        let expected = dates.len();
        let check = |field: &'static str, found: usize| {
            if found == expected {
                Ok(())
            } else {
                Err(ProviderError::SeriesLengthMismatch {
                    field,
                    expected,
                    found,
                })
            }
        };
        check("minTemp", min_temp.len())?;
        check("maxTemp", max_temp.len())?;
        if let Some(rain) = &rain_sum {
            check("rainSum", rain.len())?;
        }
        Ok(Self {
            dates,
            min_temp,
            max_temp,
            rain_sum,
        })
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn min_temp(&self) -> &[f64] {
        &self.min_temp
    }

    pub fn max_temp(&self) -> &[f64] {
        &self.max_temp
    }

    /// Daily rain totals, when the provider reports them.
    pub fn rain_sum(&self) -> Option<&[f64]> {
        self.rain_sum.as_deref()
    }

    /// The values for day `index` (zero based) as one row.
    pub fn day(&self, index: usize) -> Option<DayValues> {
        Some(DayValues {
            date: *self.dates.get(index)?,
            min_temp: *self.min_temp.get(index)?,
            max_temp: *self.max_temp.get(index)?,
            rain_sum: self
                .rain_sum
                .as_ref()
                .and_then(|rain| rain.get(index).copied()),
        })
    }

    pub fn days(&self) -> impl Iterator<Item = DayValues> + '_ {
        (0..self.len()).filter_map(|i| self.day(i))
    }
}

/// One day of a [`DailySeries`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayValues {
    pub date: NaiveDate,
    pub min_temp: f64,
    pub max_temp: f64,
    pub rain_sum: Option<f64>,
}

/// The unified per-location forecast.
///
/// Built fresh on every fetch cycle and never mutated afterwards; the next
/// cycle replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalLocationSeries {
    pub name: String,
    pub current: CurrentConditions,
    pub daily: DailySeries,
}

/// One provider-native day before rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RawDay {
    pub date: NaiveDate,
    pub min_temp: f64,
    pub max_temp: f64,
    pub rain_sum: Option<f64>,
}

impl CanonicalLocationSeries {
    /// The single place provider values pass through the rounding policy.
    ///
    /// Daily rain is kept only if every day carries it.
    pub(crate) fn from_raw(
        name: impl Into<String>,
        current_temperature: f64,
        current_rain: Option<f64>,
        days: &[RawDay],
    ) -> Result<Self, ProviderError> {
        let dates = days.iter().map(|d| d.date).collect();
        let min_temp = days.iter().map(|d| round_display(d.min_temp)).collect();
        let max_temp = days.iter().map(|d| round_display(d.max_temp)).collect();
        let rain_sum = if days.is_empty() {
            None
        } else {
            days.iter()
                .map(|d| d.rain_sum.map(round_display))
                .collect::<Option<Vec<_>>>()
        };

        Ok(Self {
            name: name.into(),
            current: CurrentConditions {
                temperature: round_display(current_temperature),
                rain: current_rain.map(round_display),
            },
            daily: DailySeries::new(dates, min_temp, max_temp, rain_sum)?,
        })
    }
}
