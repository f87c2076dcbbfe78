use std::sync::Arc;

use crate::{
    Config,
    error::ServiceError,
    model::{Cep, TemperatureResponse},
    provider::{AddressResolver, TemperatureResolver, resolvers_from_config},
};

/// CEP → city → current temperature pipeline.
///
/// Holds no per-request state; a single instance is shared by every request.
#[derive(Debug, Clone)]
pub struct TemperatureService {
    address: Arc<dyn AddressResolver>,
    weather: Arc<dyn TemperatureResolver>,
}

impl TemperatureService {
    pub fn new(address: Arc<dyn AddressResolver>, weather: Arc<dyn TemperatureResolver>) -> Self {
        Self { address, weather }
    }

    /// Wire the ViaCEP and WeatherAPI resolvers described by `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let (address, weather) = resolvers_from_config(config)?;
        Ok(Self::new(address, weather))
    }

    pub async fn lookup(&self, raw_cep: &str) -> Result<TemperatureResponse, ServiceError> {
        let cep = Cep::parse(raw_cep)?;
        let city = self.address.resolve_city(&cep).await?;
        let celsius = self.weather.current_celsius(&city).await?;

        tracing::debug!(%cep, %city, celsius, "temperature resolved");
        Ok(TemperatureResponse::from_celsius(celsius))
    }
}
