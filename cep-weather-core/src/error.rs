use thiserror::Error;

/// Failure kinds surfaced by a CEP temperature lookup.
///
/// The HTTP layer maps each variant to exactly one status code; the payload
/// of [`ServiceError::Upstream`] is only ever logged.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The postal code is not exactly 8 ASCII digits.
    #[error("invalid zipcode")]
    InvalidInput,

    /// The address lookup service has no record of the postal code.
    #[error("can not find zipcode")]
    NotFound,

    /// Transport, parsing, configuration or upstream-reported failure.
    #[error("upstream failure: {0:#}")]
    Upstream(#[from] anyhow::Error),
}
