//! HTTP request handlers
//!
//! Axum handlers for the prediction form and the `/predict` endpoint.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Html,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::inference::Prediction;
use crate::model::RiskModel;

use super::page;

/// Body of a `/predict` response.
///
/// Serializes as `{"result", "message", "confidence"}` on success and as
/// `{"error"}` on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictResponse {
    Scored {
        /// "Yes" or "No".
        result: String,
        message: String,
        /// Probability in percent, one decimal place.
        confidence: String,
    },
    Failed {
        error: String,
    },
}

impl PredictResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        PredictResponse::Failed {
            error: message.into(),
        }
    }
}

impl From<Prediction> for PredictResponse {
    fn from(prediction: Prediction) -> Self {
        let result = prediction.class.label();
        PredictResponse::Scored {
            result: result.to_string(),
            message: format!("Diabetes Risk: {result}"),
            confidence: percent_one_decimal(prediction.probability * 100.0),
        }
    }
}

/// Format a non-negative value with one decimal, exact ties rounding up.
///
/// `{:.1}` rounds exact ties to even (`52.25` becomes `52.2`); the form
/// expects `52.3`. In binary floating point a value sits exactly halfway
/// between two tenths only when its fraction is `.25` or `.75`, so those are
/// nudged up explicitly and everything else goes through `{:.1}`.
fn percent_one_decimal(value: f64) -> String {
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters.rem_euclid(2.0) == 1.0 {
        let tenths = (value * 10.0 + 0.5).floor();
        return format!("{:.1}", tenths / 10.0);
    }
    format!("{:.1}", value)
}

/// Serve the prediction form.
pub async fn index(State(model): State<Arc<RiskModel>>) -> Html<String> {
    Html(page::render(model.gender_labels()))
}

/// Score one JSON request.
///
/// 400 for a body that is not JSON or fails input validation, 500 for any
/// other failure.
pub async fn predict(
    State(model): State<Arc<RiskModel>>,
    body: Result<Json<Value>, JsonRejection>,
) -> (StatusCode, Json<PredictResponse>) {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!(reason = %rejection.body_text(), "rejected request body");
            return (
                StatusCode::BAD_REQUEST,
                Json(PredictResponse::failure(rejection.body_text())),
            );
        }
    };

    match model.predict_json(&body) {
        Ok(prediction) => {
            debug!(
                probability = prediction.probability,
                class = prediction.class.as_u8(),
                "scored request"
            );
            (StatusCode::OK, Json(prediction.into()))
        }
        Err(e) if e.is_client_error() => {
            warn!(error = %e, "invalid prediction request");
            (StatusCode::BAD_REQUEST, Json(PredictResponse::failure(e.to_string())))
        }
        Err(e) => {
            error!(error = %e, "prediction failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(PredictResponse::failure(e.to_string())),
            )
        }
    }
}
