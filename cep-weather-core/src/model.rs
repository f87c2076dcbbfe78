use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ServiceError;

/// A Brazilian postal code: exactly 8 ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cep(String);

impl Cep {
    pub const LEN: usize = 8;

    pub fn parse(raw: &str) -> Result<Self, ServiceError> {
        if raw.len() == Self::LEN && raw.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(raw.to_owned()))
        } else {
            Err(ServiceError::InvalidInput)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Current temperature in the three units returned to callers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureResponse {
    #[serde(rename = "TempC")]
    pub temp_c: f64,
    #[serde(rename = "TempF")]
    pub temp_f: f64,
    #[serde(rename = "TempK")]
    pub temp_k: f64,
}

impl TemperatureResponse {
    /// F = C × 1.8 + 32, K = C + 273.
    pub fn from_celsius(celsius: f64) -> Self {
        Self {
            temp_c: celsius,
            temp_f: celsius * 1.8 + 32.0,
            temp_k: celsius + 273.0,
        }
    }
}
