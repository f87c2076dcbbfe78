use anyhow::{Context, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer};

use crate::{error::ServiceError, model::Cep, provider::truncate_body};

use super::AddressResolver;

/// Address lookup backed by ViaCEP (`/ws/{cep}/json/`).
#[derive(Debug, Clone)]
pub struct ViaCepResolver {
    base_url: String,
    http: Client,
}

impl ViaCepResolver {
    pub fn new(base_url: impl Into<String>, http: Client) -> Self {
        Self { base_url: base_url.into(), http }
    }

    pub fn lookup_url(&self, cep: &Cep) -> String {
        format!("{}/ws/{}/json/", self.base_url.trim_end_matches('/'), cep)
    }
}

#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    localidade: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    erro: bool,
}

/// ViaCEP has sent `"erro": true` as well as `"erro": "true"`; `null` reads as false.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(b)) => b,
        Some(Flag::Text(s)) => s.eq_ignore_ascii_case("true"),
        None => false,
    })
}

#[async_trait]
impl AddressResolver for ViaCepResolver {
    async fn resolve_city(&self, cep: &Cep) -> Result<String, ServiceError> {
        let url = self.lookup_url(cep);
        tracing::debug!(%cep, %url, "querying ViaCEP");

        let res = self
            .http
            .get(&url)
            .send()
            .await
            .context("Failed to send request to ViaCEP")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read ViaCEP response body")?;

        let parsed: ViaCepResponse = serde_json::from_str(&body).with_context(|| {
            format!("Failed to parse ViaCEP JSON (status {}): {}", status, truncate_body(&body))
        })?;

        if parsed.erro {
            tracing::debug!(%cep, "ViaCEP reports unknown cep");
            return Err(ServiceError::NotFound);
        }

        parsed
            .localidade
            .ok_or_else(|| anyhow!("ViaCEP response for {cep} has no localidade").into())
    }
}
