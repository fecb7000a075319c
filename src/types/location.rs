//! Defines the location requests a forecast batch is built from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single location to fetch a forecast for.
///
/// The position of a request inside a batch is significant: providers answer
/// in request order and responses are paired back to requests by index, never
/// by the coordinates a provider echoes back.
///
/// # Examples
///
/// ```
/// use forecastkit::LocationRequest;
///
/// let recife = LocationRequest::new("Recife", -8.0539, -34.8811);
/// assert_eq!(recife.name, "Recife");
/// assert_eq!(recife.coordinate_pair(), "-8.0539,-34.8811");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRequest {
    /// Display name carried through to the canonical series and the export.
    pub name: String,
    /// Latitude in decimal degrees (positive north).
    pub latitude: f64,
    /// Longitude in decimal degrees (positive east).
    pub longitude: f64,
}

impl LocationRequest {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// The default batch: São Paulo, Rio de Janeiro and Brasília, in that order.
    pub fn brazilian_capitals() -> Vec<LocationRequest> {
        vec![
            LocationRequest::new("São Paulo", -23.5475, -46.6361),
            LocationRequest::new("Rio de Janeiro", -22.9064, -43.1822),
            LocationRequest::new("Brasília", -15.7797, -47.9297),
        ]
    }

    /// `lat,lon` as used by providers taking a single `location` parameter.
    pub fn coordinate_pair(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

impl fmt::Display for LocationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.latitude, self.longitude)
    }
}
