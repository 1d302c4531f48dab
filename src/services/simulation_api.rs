use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::scenario::ScenarioParameters;
use crate::domain::simulation_result::SimulationResult;
use crate::services::client_config::ClientConfig;

#[derive(Error, Debug)]
pub enum SimulationApiError {
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    #[error("failed to build http client: {0}")]
    Client(String),
    #[error("connection error")]
    Connection,
    #[error("simulation service responded with status {0}")]
    Status(u16),
    #[error("malformed simulation response: {0}")]
    MalformedResponse(String),
}

/// Describes the remote service that turns a scenario into ROI figures.
pub trait SimulationApi {
    async fn simulate(
        &self,
        params: &ScenarioParameters,
    ) -> Result<SimulationResult, SimulationApiError>;
}

pub struct HttpSimulationClient {
    endpoint: Url,
    client: Client,
}

impl HttpSimulationClient {
    pub fn new(config: &ClientConfig) -> Result<Self, SimulationApiError> {
        let endpoint = simulate_endpoint(&config.base_url)?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|err| SimulationApiError::Client(err.to_string()))?;

        Ok(Self { endpoint, client })
    }
}

impl SimulationApi for HttpSimulationClient {
    async fn simulate(
        &self,
        params: &ScenarioParameters,
    ) -> Result<SimulationResult, SimulationApiError> {
        debug!(endpoint = %self.endpoint, scenario = %params.scenario_name, "posting scenario");
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(params)
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, "simulation request failed");
                SimulationApiError::Connection
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SimulationApiError::Status(status.as_u16()));
        }

        let payload = response
            .json::<Value>()
            .await
            .map_err(|err| SimulationApiError::MalformedResponse(err.to_string()))?;
        parse_results(payload)
    }
}

fn simulate_endpoint(base_url: &str) -> Result<Url, SimulationApiError> {
    let trimmed = base_url.trim_end_matches('/');
    let base = Url::parse(trimmed)
        .map_err(|_| SimulationApiError::InvalidBaseUrl(base_url.to_string()))?;
    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(SimulationApiError::InvalidBaseUrl(base_url.to_string()));
    }
    Url::parse(&format!("{trimmed}/simulate"))
        .map_err(|_| SimulationApiError::InvalidBaseUrl(base_url.to_string()))
}

fn parse_results(mut payload: Value) -> Result<SimulationResult, SimulationApiError> {
    let results = payload
        .get_mut("results")
        .map(Value::take)
        .filter(|value| !value.is_null())
        .ok_or_else(|| SimulationApiError::MalformedResponse("missing results".to_string()))?;
    serde_json::from_value(results)
        .map_err(|err| SimulationApiError::MalformedResponse(err.to_string()))
}
