//! Core library for the `cep-weather` service.
//!
//! This crate defines:
//! - Configuration read from the environment
//! - The ViaCEP address resolver and the WeatherAPI temperature resolver
//! - The lookup pipeline and the HTTP router that exposes it
//!
//! It is used by `cep-weather-server`, but the router can be mounted by any axum application.

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod service;

pub use api::router;
pub use config::Config;
pub use error::ServiceError;
pub use model::{Cep, TemperatureResponse};
pub use provider::{AddressResolver, TemperatureResolver};
pub use service::TemperatureService;
