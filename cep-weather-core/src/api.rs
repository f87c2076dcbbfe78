//! HTTP surface: `GET /?cep=NNNNNNNN`.
//!
//! | outcome                  | status | body                   |
//! |--------------------------|--------|------------------------|
//! | temperature resolved     | 200    | `{TempC, TempF, TempK}`|
//! | malformed or missing cep | 422    | `invalid zipcode`      |
//! | cep unknown to ViaCEP    | 404    | `can not find zipcode` |
//! | any upstream failure     | 500    | `internal error`       |

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;

use crate::{error::ServiceError, model::TemperatureResponse, service::TemperatureService};

pub type SharedService = Arc<TemperatureService>;

/// Value of the first `cep` pair; later duplicates are ignored and a missing
/// pair yields an empty string.
fn first_cep(pairs: Vec<(String, String)>) -> String {
    pairs.into_iter().find(|(name, _)| name == "cep").map(|(_, value)| value).unwrap_or_default()
}

pub fn router(service: TemperatureService) -> Router {
    Router::new()
        .route("/", get(temperature_by_cep))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(service))
}

async fn temperature_by_cep(
    State(service): State<SharedService>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<TemperatureResponse>, ServiceError> {
    let Ok(Query(pairs)) = query else {
        return Err(ServiceError::InvalidInput);
    };
    let cep = first_cep(pairs);

    match service.lookup(&cep).await {
        Ok(resp) => Ok(Json(resp)),
        Err(err) => {
            if let ServiceError::Upstream(cause) = &err {
                tracing::error!(%cep, error = %format!("{cause:#}"), "temperature lookup failed");
            }
            Err(err)
        }
    }
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::InvalidInput => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Fixed text sent to the client; upstream detail never leaves the process.
    pub fn public_message(&self) -> &'static str {
        match self {
            ServiceError::InvalidInput => "invalid zipcode",
            ServiceError::NotFound => "can not find zipcode",
            ServiceError::Upstream(_) => "internal error",
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        (self.status(), self.public_message()).into_response()
    }
}
