use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::{error::ServiceError, provider::truncate_body};

use super::TemperatureResolver;

/// Current temperature backed by WeatherAPI.com (`/v1/current.json`).
#[derive(Debug, Clone)]
pub struct WeatherApiResolver {
    base_url: String,
    api_key: Option<String>,
    http: Client,
}

impl WeatherApiResolver {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, http: Client) -> Self {
        Self { base_url: base_url.into(), api_key, http }
    }

    /// Form encoding writes the word breaks of the normalized city as `+`
    /// and percent-encodes everything else that is reserved.
    pub fn current_url(&self, api_key: &str, city: &str) -> Result<Url> {
        let base = format!("{}/v1/current.json", self.base_url.trim_end_matches('/'));
        let mut url = Url::parse(&base).with_context(|| format!("Invalid WeatherAPI base URL: {base}"))?;

        let words = normalize_city(city).replace('+', " ");
        url.query_pairs_mut().append_pair("key", api_key).append_pair("q", &words);

        Ok(url)
    }

    async fn fetch_current(&self, city: &str) -> Result<f64> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("WEATHERAPI_KEY not set"))?;

        let url = self.current_url(api_key, city)?;
        tracing::debug!(city, q = %normalize_city(city), "querying WeatherAPI");

        let res = self
            .http
            .get(url)
            .send()
            .await
            .context("Failed to send request to WeatherAPI.com (current)")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read WeatherAPI current response body")?;

        let parsed: WaResponse = serde_json::from_str(&body).with_context(|| {
            format!("Failed to parse WeatherAPI current JSON (status {}): {}", status, truncate_body(&body))
        })?;

        if let Some(err) = parsed.error.filter(|e| !e.message.is_empty()) {
            return Err(anyhow!("weatherapi error {}: {}", err.code, err.message));
        }

        if !status.is_success() {
            return Err(anyhow!(
                "WeatherAPI current request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let current = parsed
            .current
            .ok_or_else(|| anyhow!("WeatherAPI response for '{city}' has no current data"))?;

        Ok(current.temp_c)
    }
}

/// Fold a city name into the form WeatherAPI expects in `q`: lower-case,
/// ASCII whitespace runs become a single `+`, Portuguese diacritics are stripped.
pub fn normalize_city(city: &str) -> String {
    let mut out = String::with_capacity(city.len());
    let mut in_space = false;

    for ch in city.to_lowercase().chars() {
        if ch.is_ascii_whitespace() {
            if !in_space {
                out.push('+');
            }
            in_space = true;
            continue;
        }

        in_space = false;
        out.push(strip_diacritic(ch));
    }

    out
}

fn strip_diacritic(ch: char) -> char {
    match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' => 'a',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        other => other,
    }
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
}

#[derive(Debug, Deserialize)]
struct WaError {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    current: Option<WaCurrent>,
    error: Option<WaError>,
}

#[async_trait]
impl TemperatureResolver for WeatherApiResolver {
    async fn current_celsius(&self, city: &str) -> Result<f64, ServiceError> {
        Ok(self.fetch_current(city).await?)
    }
}
