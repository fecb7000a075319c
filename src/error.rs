use crate::export::error::ExportError;
use crate::providers::error::ProviderError;
use crate::types::provider::ProviderKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForecastError {
    // Raised before any request is sent.
    #[error("Missing credential for {provider}: set the {variable} environment variable")]
    Configuration {
        provider: ProviderKind,
        variable: &'static str,
    },

    #[error("All {attempted} location(s) failed for {provider}")]
    AllLocationsFailed {
        provider: ProviderKind,
        attempted: usize,
        #[source]
        last_error: ProviderError,
    },

    #[error("Nothing to fetch: no locations or zero forecast days requested")]
    EmptyRequest,

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Export(#[from] ExportError),
}
