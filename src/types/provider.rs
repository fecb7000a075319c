//! Defines the closed set of forecast providers the crate can normalize.

use std::fmt;

/// Identifies a forecast provider and, with it, the response schema to expect.
///
/// Dispatch always goes through this tag; call sites never sniff the shape of
/// a response to decide how to read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Open-Meteo: one batched call for all locations, each answered with a
    /// daily `time` array and parallel value arrays.
    OpenMeteo,
    /// Tomorrow.io: one call per location, pre-aggregated daily intervals
    /// nested under `data.timelines[0].intervals`.
    TomorrowIo,
    /// OpenWeather: two calls per location (current conditions and a 3-hourly
    /// forecast list) that must be bucketed into days locally.
    OpenWeather,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [
        ProviderKind::OpenMeteo,
        ProviderKind::TomorrowIo,
        ProviderKind::OpenWeather,
    ];

    pub(crate) fn slug(&self) -> &'static str {
        match self {
            ProviderKind::OpenMeteo => "open-meteo",
            ProviderKind::TomorrowIo => "tomorrow-io",
            ProviderKind::OpenWeather => "openweather",
        }
    }

    /// Name of the environment variable holding this provider's API key, if it needs one.
    pub fn credential_variable(&self) -> Option<&'static str> {
        match self {
            ProviderKind::OpenMeteo => None,
            ProviderKind::TomorrowIo => Some("TOMORROW_API_KEY"),
            ProviderKind::OpenWeather => Some("OPENWEATHER_API_KEY"),
        }
    }
}

/// Formats the provider using its slug.
///
/// # Examples
///
/// ```
/// use forecastkit::ProviderKind;
///
/// assert_eq!(ProviderKind::TomorrowIo.to_string(), "tomorrow-io");
/// ```
impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}
