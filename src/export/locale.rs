//! Localized date labels and unit-suffixed value strings.

use chrono::{Datelike, NaiveDate, Weekday};

/// Placeholder for a value a row has no data for.
pub const PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExportLocale {
    /// Brazilian Portuguese (`seg.`, `02/03/2024`).
    #[default]
    PtBr,
    /// US English (`Mon`, `03/02/2024`).
    EnUs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DateStyle {
    /// Abbreviated weekday only.
    #[default]
    Weekday,
    /// Full numeric date in the locale's order.
    Numeric,
}

impl ExportLocale {
    pub fn format_date(&self, date: NaiveDate, style: DateStyle) -> String {
        match style {
            DateStyle::Weekday => self.weekday(date.weekday()).to_string(),
            DateStyle::Numeric => match self {
                ExportLocale::PtBr => date.format("%d/%m/%Y").to_string(),
                ExportLocale::EnUs => date.format("%m/%d/%Y").to_string(),
            },
        }
    }

    /// Label of the current-conditions pseudo-row.
    pub fn now_label(&self) -> &'static str {
        match self {
            ExportLocale::PtBr => "Atual",
            ExportLocale::EnUs => "Now",
        }
    }

    fn weekday(&self, weekday: Weekday) -> &'static str {
        match self {
            ExportLocale::PtBr => match weekday {
                Weekday::Sun => "dom.",
                Weekday::Mon => "seg.",
                Weekday::Tue => "ter.",
                Weekday::Wed => "qua.",
                Weekday::Thu => "qui.",
                Weekday::Fri => "sex.",
                Weekday::Sat => "sáb.",
            },
            ExportLocale::EnUs => match weekday {
                Weekday::Sun => "Sun",
                Weekday::Mon => "Mon",
                Weekday::Tue => "Tue",
                Weekday::Wed => "Wed",
                Weekday::Thu => "Thu",
                Weekday::Fri => "Fri",
                Weekday::Sat => "Sat",
            },
        }
    }
}

pub fn format_temperature(celsius: f64) -> String {
    format!("{celsius}°C")
}

pub fn format_rain(millimeters: Option<f64>) -> String {
    millimeters.map_or_else(|| PLACEHOLDER.to_string(), |mm| format!("{mm}mm"))
}
