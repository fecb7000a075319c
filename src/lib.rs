mod aggregation;
mod clock;
mod config;
mod correlation;
mod error;
mod export;
mod forecaster;
mod providers;
mod snapshot;
mod time_axis;
mod types;

pub use error::ForecastError;
pub use forecaster::*;

pub use aggregation::{summarize, DailyAggregator};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::*;
pub use correlation::{correlate, BatchOutcome, CorrelatedSlot, LocationFailure, Slot};
pub use snapshot::{CycleTicket, Snapshot, SnapshotStore};
pub use time_axis::{ensure_aligned, ensure_on_axis, reconstruct, TimeAxisSpec};

pub use providers::open_meteo::{ColumnarCurrent, ColumnarDaily, ColumnarLocation};
pub use providers::openweather::{
    City, CurrentWeather, ForecastEntry, ForecastList, MainBlock, OpenWeatherPayload, RainBlock,
};
pub use providers::tomorrow_io::{
    IntervalValues, Timeline, TimelineData, TimelineInterval, TimelineResponse,
};
pub use providers::{NormalizeContext, ProviderPayload};

pub use types::canonical::{CanonicalLocationSeries, CurrentConditions, DailySeries, DayValues};
pub use types::location::LocationRequest;
pub use types::provider::ProviderKind;
pub use types::rounding::round_display;
pub use types::sample::{BucketSummary, DailyBucket, RawSample};
pub use types::window::{ForecastWindow, LeadingDay};

pub use export::locale::{format_rain, format_temperature, DateStyle, ExportLocale};
pub use export::tabular::{flatten, ExportOptions, ExportRow, RowShape};
pub use export::writer::{default_export_path, rows_to_dataframe, write_csv, DEFAULT_FILE_NAME};

pub use export::error::ExportError;
pub use providers::error::ProviderError;
