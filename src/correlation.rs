//! Pairs the ordered location requests of a batch with the ordered responses
//! a provider returned for them.
//!
//! Pairing is strictly positional: response `i` belongs to request `i`. No
//! attempt is made to match responses by the coordinates a provider echoes
//! back.

use crate::providers::error::ProviderError;
use crate::types::location::LocationRequest;
use log::warn;

/// What a batch produced for one request position.
#[derive(Debug)]
pub enum Slot<T> {
    Present(T),
    Absent(ProviderError),
}

/// A request together with what the provider returned for it.
#[derive(Debug)]
pub struct CorrelatedSlot<T> {
    pub request: LocationRequest,
    pub slot: Slot<T>,
}

impl<T> CorrelatedSlot<T> {
    /// Runs a fallible step on a present value. An error turns the slot
    /// absent; an already absent slot is passed through untouched.
    pub fn and_then<U>(
        self,
        f: impl FnOnce(&LocationRequest, T) -> Result<U, ProviderError>,
    ) -> CorrelatedSlot<U> {
        let slot = match self.slot {
            Slot::Present(value) => match f(&self.request, value) {
                Ok(mapped) => Slot::Present(mapped),
                Err(e) => Slot::Absent(e),
            },
            Slot::Absent(e) => Slot::Absent(e),
        };
        CorrelatedSlot {
            request: self.request,
            slot,
        }
    }
}

/// One location that produced no canonical series in a cycle.
#[derive(Debug)]
pub struct LocationFailure {
    pub request: LocationRequest,
    pub error: ProviderError,
}

/// Pairs `requests[i]` with the `i`-th response.
///
/// The output always has one slot per request, in request order. A request
/// left without a response (the provider sent fewer than asked for) gets an
/// absent slot carrying [`ProviderError::MissingResponse`]; surplus responses
/// are dropped.
pub fn correlate<T>(
    requests: &[LocationRequest],
    responses: impl IntoIterator<Item = Result<T, ProviderError>>,
) -> Vec<CorrelatedSlot<T>> {
    let mut responses = responses.into_iter();
    let slots: Vec<CorrelatedSlot<T>> = requests
        .iter()
        .enumerate()
        .map(|(index, request)| {
            let slot = match responses.next() {
                Some(Ok(value)) => Slot::Present(value),
                Some(Err(e)) => Slot::Absent(e),
                None => Slot::Absent(ProviderError::MissingResponse(index)),
            };
            CorrelatedSlot {
                request: request.clone(),
                slot,
            }
        })
        .collect();

    let surplus = responses.count();
    if surplus > 0 {
        warn!(
            "Provider returned {} more response(s) than the {} requested; ignoring the surplus",
            surplus,
            requests.len()
        );
    }
    slots
}

/// The present values of a batch, in request order, plus the failed slots.
#[derive(Debug)]
pub struct BatchOutcome<T> {
    pub present: Vec<T>,
    pub failures: Vec<LocationFailure>,
}

impl<T> BatchOutcome<T> {
    pub fn attempted(&self) -> usize {
        self.present.len() + self.failures.len()
    }
}

impl<T> FromIterator<CorrelatedSlot<T>> for BatchOutcome<T> {
    fn from_iter<I: IntoIterator<Item = CorrelatedSlot<T>>>(iter: I) -> Self {
        let mut outcome = BatchOutcome {
            present: Vec::new(),
            failures: Vec::new(),
        };
        for CorrelatedSlot { request, slot } in iter {
            match slot {
                Slot::Present(value) => outcome.present.push(value),
                Slot::Absent(error) => {
                    warn!("Skipping {}: {}", request, error);
                    outcome.failures.push(LocationFailure { request, error });
                }
            }
        }
        outcome
    }
}
