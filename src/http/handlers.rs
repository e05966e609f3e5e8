//! HTTP handlers for the REST API.
//!
//! Each handler parses the wire request, delegates to the analysis service,
//! and maps domain errors to HTTP status codes via [`AppError`].

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::dto::{
    AnalyzeRequest, ExportQuery, HealthResponse, VariableInfo, VariableListResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::export;
use crate::models::{AnalysisResult, WeatherVariable};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
    })
}

/// GET /v1/variables
///
/// List the supported variables with their units, data sources, and default
/// thresholds.
pub async fn list_variables(State(state): State<AppState>) -> Json<VariableListResponse> {
    let config = state.analyzer.config();
    let variables: Vec<VariableInfo> = WeatherVariable::ALL
        .iter()
        .map(|&variable| {
            let vc = config.variable(variable);
            VariableInfo {
                name: variable.display_name().to_string(),
                units: vc.units.clone(),
                data_source: vc.data_source.clone(),
                default_threshold: vc.default_threshold,
            }
        })
        .collect();
    let total = variables.len();
    Json(VariableListResponse { variables, total })
}

/// POST /v1/analyses
///
/// Run a full analysis and return the result as JSON.
pub async fn run_analysis(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> HandlerResult<AnalysisResult> {
    let request = request.into_request(state.analyzer.config())?;
    let result = state.analyzer.analyze(&request).await?;
    Ok(Json(result))
}

/// POST /v1/analyses/export?format=csv|timeseries-csv|json|report
///
/// Run an analysis and return it rendered in the requested export format.
pub async fn export_analysis(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Response, AppError> {
    let request = request.into_request(state.analyzer.config())?;
    let result = state.analyzer.analyze(&request).await?;

    let format = query.format.as_deref().unwrap_or("json");
    let response = match format {
        "csv" => text_response("text/csv; charset=utf-8", export::to_csv(&result)),
        "timeseries-csv" => {
            text_response("text/csv; charset=utf-8", export::to_timeseries_csv(&result))
        }
        "json" => Json(export::to_json_document(&result)).into_response(),
        "report" => text_response(
            "text/plain; charset=utf-8",
            export::to_text_report(&result),
        ),
        other => {
            return Err(AppError::BadRequest(format!(
                "Unknown export format: {}",
                other
            )))
        }
    };
    Ok(response)
}

fn text_response(content_type: &'static str, body: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type)],
        body,
    )
        .into_response()
}
