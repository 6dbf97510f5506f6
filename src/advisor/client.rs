//! Recommendation service client
//!
//! One request per submission, no retry and no timeout. Every failure collapses
//! into a single user-facing message rendered in the result panel.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use super::controller::WizardController;
use super::inputs::CropInputs;
use super::payload::RecommendationRequest;
use super::response::RecommendationResponse;
use super::view::{OutputContent, WizardView};
use crate::report::RecommendationReport;

/// Path of the recommendation endpoint relative to the server URL
pub const RECOMMENDATION_PATH: &str = "/get_recommendation";

/// Fallback when the backend reports failure without a message
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Failure modes of a recommendation request. `Display` is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("Server error: {0}")]
    Status(u16),

    #[error("Network Error: {0}")]
    Network(String),

    #[error("Network Error: {0}")]
    Decode(String),

    #[error("Error from Backend: {0}")]
    Application(String),
}

/// Anything that can answer a recommendation request.
/// The binary uses [`HttpRecommendationService`]; tests plug in fakes.
#[async_trait]
pub trait RecommendationService: Send + Sync {
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResponse, ClientError>;
}

/// `POST {server}/get_recommendation` over HTTP
pub struct HttpRecommendationService {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRecommendationService {
    pub fn new(server_url: &str) -> Self {
        Self::with_client(server_url, reqwest::Client::new())
    }

    /// Use a preconfigured client (proxy, TLS or pool settings)
    pub fn with_client(server_url: &str, client: reqwest::Client) -> Self {
        let base = server_url.trim_end_matches('/');
        Self {
            client,
            endpoint: format!("{}{}", base, RECOMMENDATION_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RecommendationService for HttpRecommendationService {
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResponse, ClientError> {
        info!(endpoint = %self.endpoint, crop = %request.crop_name, "Requesting recommendation");

        let resp = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ClientError::Status(resp.status().as_u16()));
        }

        resp.json::<RecommendationResponse>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

/// Turn a decoded body into a report, rejecting application-level failures
pub fn interpret(response: RecommendationResponse) -> Result<RecommendationReport, ClientError> {
    if !response.is_success() {
        let message = response
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
        return Err(ClientError::Application(message));
    }
    Ok(RecommendationReport::from_response(&response))
}

/// How a request ended
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(RecommendationReport),
    Failure(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RecommendationPhase {
    #[default]
    Idle,
    Loading,
    Settled(Outcome),
}

/// Drives the result panel through Idle → Loading → Settled
#[derive(Debug, Default)]
pub struct RecommendationSession {
    phase: RecommendationPhase,
}

impl RecommendationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &RecommendationPhase {
        &self.phase
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.phase {
            RecommendationPhase::Settled(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Swap the input view for the result view and show the placeholder
    pub fn begin<V: WizardView>(&mut self, inputs: &CropInputs, view: &mut V) {
        view.set_main_content_visible(false);
        view.set_result_visible(true);
        view.render_output(OutputContent::Loading);
        view.render_summary(inputs.summary_rows());
        self.phase = RecommendationPhase::Loading;
    }

    /// Record the result of the request and render it
    pub fn settle<V: WizardView>(
        &mut self,
        result: Result<RecommendationResponse, ClientError>,
        view: &mut V,
    ) -> Outcome {
        let outcome = match result.and_then(interpret) {
            Ok(report) => {
                info!("Recommendation received");
                view.render_output(OutputContent::Report(report.clone()));
                Outcome::Success(report)
            }
            Err(e) => {
                warn!(error = %e, "Recommendation failed");
                let message = e.to_string();
                view.render_output(OutputContent::Error(message.clone()));
                Outcome::Failure(message)
            }
        };
        self.phase = RecommendationPhase::Settled(outcome.clone());
        outcome
    }

    /// Send exactly one request and settle on its result
    pub async fn submit<V, S>(
        &mut self,
        controller: &mut WizardController<V>,
        service: &S,
        request: &RecommendationRequest,
    ) -> Outcome
    where
        V: WizardView,
        S: RecommendationService + ?Sized,
    {
        {
            let (inputs, view) = controller.parts_mut();
            self.begin(inputs, view);
        }
        let result = service.recommend(request).await;
        self.settle(result, controller.view_mut())
    }
}
