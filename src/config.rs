//! Endpoints, credentials and defaults for a [`Forecaster`](crate::Forecaster).

use crate::error::ForecastError;
use crate::types::provider::ProviderKind;
use crate::types::window::ForecastWindow;
use bon::Builder;
use std::env;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_TOMORROW_IO_URL: &str = "https://api.tomorrow.io/v4/timelines";
pub const DEFAULT_OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";
/// UTC-3, Brasília time.
pub const DEFAULT_UTC_OFFSET_SECONDS: i32 = -10_800;

/// Configuration shared by every fetch cycle.
///
/// Credentials are optional at construction time. A missing credential only
/// matters once a cycle for the provider that needs it starts, and then it
/// fails with [`ForecastError::Configuration`] before anything is sent.
///
/// # Examples
///
/// ```
/// use forecastkit::{ForecastConfig, ForecastWindow, LeadingDay};
///
/// let config = ForecastConfig::builder()
///     .tomorrow_api_key("my-key")
///     .window(ForecastWindow::new(5, LeadingDay::Skip))
///     .build();
/// assert_eq!(config.window().days, 5);
/// assert_eq!(config.timezone(), "America/Sao_Paulo");
/// ```
#[derive(Clone, Builder)]
pub struct ForecastConfig {
    #[builder(into)]
    tomorrow_api_key: Option<String>,

    #[builder(into)]
    openweather_api_key: Option<String>,

    #[builder(into, default = DEFAULT_OPEN_METEO_URL.to_string())]
    open_meteo_url: String,

    #[builder(into, default = DEFAULT_TOMORROW_IO_URL.to_string())]
    tomorrow_io_url: String,

    /// Base URL; `/weather` and `/forecast` are appended.
    #[builder(into, default = DEFAULT_OPENWEATHER_URL.to_string())]
    openweather_url: String,

    /// IANA name sent to the columnar provider so its days follow local time.
    #[builder(into, default = DEFAULT_TIMEZONE.to_string())]
    timezone: String,

    /// Used to derive "today" and to date timeline intervals.
    #[builder(default = DEFAULT_UTC_OFFSET_SECONDS)]
    utc_offset_seconds: i32,

    #[builder(default = Duration::from_secs(10))]
    timeout: Duration,

    #[builder(default)]
    window: ForecastWindow,
}

impl ForecastConfig {
    /// Defaults plus whatever credentials the process environment provides.
    /// Blank values count as missing.
    pub fn from_env() -> Self {
        let read = |variable: &str| env::var(variable).ok().filter(|v| !v.trim().is_empty());
        Self::builder()
            .maybe_tomorrow_api_key(read("TOMORROW_API_KEY"))
            .maybe_openweather_api_key(read("OPENWEATHER_API_KEY"))
            .build()
    }

    /// The credential `provider` needs, `Ok(None)` if it needs none.
    pub fn credential(&self, provider: ProviderKind) -> Result<Option<&str>, ForecastError> {
        let key = match provider {
            ProviderKind::OpenMeteo => return Ok(None),
            ProviderKind::TomorrowIo => self.tomorrow_api_key.as_deref(),
            ProviderKind::OpenWeather => self.openweather_api_key.as_deref(),
        };
        match (key, provider.credential_variable()) {
            (Some(key), _) => Ok(Some(key)),
            (None, Some(variable)) => Err(ForecastError::Configuration { provider, variable }),
            (None, None) => Ok(None),
        }
    }

    /// Endpoint for `provider`.
    pub fn base_url(&self, provider: ProviderKind) -> &str {
        match provider {
            ProviderKind::OpenMeteo => &self.open_meteo_url,
            ProviderKind::TomorrowIo => &self.tomorrow_io_url,
            ProviderKind::OpenWeather => &self.openweather_url,
        }
    }

    pub fn open_meteo_url(&self) -> &str {
        &self.open_meteo_url
    }

    pub fn tomorrow_io_url(&self) -> &str {
        &self.tomorrow_io_url
    }

    pub fn openweather_url(&self) -> &str {
        &self.openweather_url
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    pub fn utc_offset_seconds(&self) -> i32 {
        self.utc_offset_seconds
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn window(&self) -> ForecastWindow {
        self.window
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

// Keys are redacted so a logged config never leaks them.
impl fmt::Debug for ForecastConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |key: &Option<String>| key.as_ref().map(|_| "<redacted>");
        f.debug_struct("ForecastConfig")
            .field("tomorrow_api_key", &redact(&self.tomorrow_api_key))
            .field("openweather_api_key", &redact(&self.openweather_api_key))
            .field("open_meteo_url", &self.open_meteo_url)
            .field("tomorrow_io_url", &self.tomorrow_io_url)
            .field("openweather_url", &self.openweather_url)
            .field("timezone", &self.timezone)
            .field("utc_offset_seconds", &self.utc_offset_seconds)
            .field("timeout", &self.timeout)
            .field("window", &self.window)
            .finish()
    }
}
