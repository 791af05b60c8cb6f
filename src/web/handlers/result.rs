// POST /api/result — score a message and/or screenshot.
//
// Returns 200 with the ToxicityResult JSON on success.
// Returns 400 (plain text) when neither a message nor a usable image is sent.
// Returns 500 (plain text, fixed body) when the model call or validation fails.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

use crate::toxicity::handler::analyze;
use crate::toxicity::models::AnalysisRequest;
use crate::web::{plain_error, AppState, PROCESSING_FAILED};

pub async fn analyze_result(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Response {
    match analyze(state.model.as_ref(), &request).await {
        Ok(result) => Json(result).into_response(),
        Err(e) if e.is_client_error() => {
            warn!(error = %e, "Rejected analysis request");
            plain_error(StatusCode::BAD_REQUEST, e.to_string())
        }
        Err(e) => {
            error!(error = %e, "Analysis failed");
            plain_error(StatusCode::INTERNAL_SERVER_ERROR, PROCESSING_FAILED)
        }
    }
}
