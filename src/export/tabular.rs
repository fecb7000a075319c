//! Flattens canonical series into string rows for spreadsheet output.

use crate::export::locale::{format_rain, format_temperature, DateStyle, ExportLocale, PLACEHOLDER};
use crate::types::canonical::CanonicalLocationSeries;

pub const NAME_COLUMN: &str = "Name";

/// Layout of the exported rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RowShape {
    /// One row per location, with `Day{i}Date/Min/Max/Rain` columns.
    #[default]
    Wide,
    /// One row per location and day, led by a current-conditions row.
    PerDay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ExportOptions {
    pub shape: RowShape,
    pub locale: ExportLocale,
    pub date_style: DateStyle,
}

/// One flattened row: the location name plus `(column, value)` pairs in
/// column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub name: String,
    pub fields: Vec<(String, String)>,
}

/// Projects `series` into rows. Every row of one call has the same columns;
/// the input is only read.
///
/// # Examples
///
/// ```
/// use forecastkit::{flatten, ExportOptions};
///
/// assert!(flatten(&[], ExportOptions::default()).is_empty());
/// ```
pub fn flatten(series: &[CanonicalLocationSeries], options: ExportOptions) -> Vec<ExportRow> {
    match options.shape {
        RowShape::Wide => flatten_wide(series, options),
        RowShape::PerDay => flatten_per_day(series, options),
    }
}

fn flatten_wide(series: &[CanonicalLocationSeries], options: ExportOptions) -> Vec<ExportRow> {
    // Shorter series are padded so every row has the same columns.
    let width = series.iter().map(|s| s.daily.len()).max().unwrap_or(0);

    series
        .iter()
        .map(|location| {
            let mut fields = Vec::with_capacity(4 * width + 2);
            fields.push((
                "CurrentTemp".to_string(),
                format_temperature(location.current.temperature),
            ));
            fields.push(("CurrentRain".to_string(), format_rain(location.current.rain)));

            for index in 0..width {
                let day = location.daily.day(index);
                let n = index + 1;
                let (date, min, max, rain) = match day {
                    Some(day) => (
                        options.locale.format_date(day.date, options.date_style),
                        format_temperature(day.min_temp),
                        format_temperature(day.max_temp),
                        format_rain(day.rain_sum),
                    ),
                    None => (
                        PLACEHOLDER.to_string(),
                        PLACEHOLDER.to_string(),
                        PLACEHOLDER.to_string(),
                        PLACEHOLDER.to_string(),
                    ),
                };
                fields.push((format!("Day{n}Date"), date));
                fields.push((format!("Day{n}Min"), min));
                fields.push((format!("Day{n}Max"), max));
                fields.push((format!("Day{n}Rain"), rain));
            }

            ExportRow {
                name: location.name.clone(),
                fields,
            }
        })
        .collect()
}

fn per_day_row(
    name: &str,
    date: String,
    current: String,
    min: String,
    max: String,
    rain: String,
) -> ExportRow {
    ExportRow {
        name: name.to_string(),
        fields: vec![
            ("Date".to_string(), date),
            ("Current".to_string(), current),
            ("Min".to_string(), min),
            ("Max".to_string(), max),
            ("Rain".to_string(), rain),
        ],
    }
}

fn flatten_per_day(series: &[CanonicalLocationSeries], options: ExportOptions) -> Vec<ExportRow> {
    let mut rows = Vec::new();
    for location in series {
        rows.push(per_day_row(
            &location.name,
            options.locale.now_label().to_string(),
            format_temperature(location.current.temperature),
            PLACEHOLDER.to_string(),
            PLACEHOLDER.to_string(),
            format_rain(location.current.rain),
        ));
        for day in location.daily.days() {
            rows.push(per_day_row(
                &location.name,
                options.locale.format_date(day.date, options.date_style),
                PLACEHOLDER.to_string(),
                format_temperature(day.min_temp),
                format_temperature(day.max_temp),
                format_rain(day.rain_sum),
            ));
        }
    }
    rows
}
