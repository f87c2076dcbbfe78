use crate::{
    Config,
    error::ServiceError,
    model::Cep,
    provider::{viacep::ViaCepResolver, weatherapi::WeatherApiResolver},
};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use std::{fmt::Debug, sync::Arc};

pub mod viacep;
pub mod weatherapi;

/// Resolves a postal code to the name of its city.
#[async_trait]
pub trait AddressResolver: Send + Sync + Debug {
    /// Returns [`ServiceError::NotFound`] when the lookup service has no
    /// record of `cep`.
    async fn resolve_city(&self, cep: &Cep) -> Result<String, ServiceError>;
}

/// Resolves a city name to its current temperature in Celsius.
#[async_trait]
pub trait TemperatureResolver: Send + Sync + Debug {
    async fn current_celsius(&self, city: &str) -> Result<f64, ServiceError>;
}

/// HTTP client shared by both resolvers.
pub fn http_client(config: &Config) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(config.request_timeout)
        .build()
        .context("Failed to build HTTP client")
}

/// Construct the ViaCEP and WeatherAPI resolvers from config.
pub fn resolvers_from_config(
    config: &Config,
) -> anyhow::Result<(Arc<dyn AddressResolver>, Arc<dyn TemperatureResolver>)> {
    let http = http_client(config)?;

    let address: Arc<dyn AddressResolver> =
        Arc::new(ViaCepResolver::new(config.viacep_base_url.clone(), http.clone()));
    let weather: Arc<dyn TemperatureResolver> = Arc::new(WeatherApiResolver::new(
        config.weatherapi_base_url.clone(),
        config.weather_api_key.clone(),
        http,
    ));

    Ok((address, weather))
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
