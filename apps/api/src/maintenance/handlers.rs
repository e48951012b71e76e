//! Axum route handlers for the Maintenance API.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::{ApiJson, ApiQuery};
use crate::maintenance::analyzer::{analyze, build_context};
use crate::maintenance::models::{AnalysisResult, Category, Urgency};
use crate::maintenance::store::ListFilter;
use crate::maintenance::validation::{
    validate_analyze_request, validate_save_request, AnalyzeRequest, SaveRequest,
};
use crate::models::maintenance::{CreatedRequest, MaintenanceRequestRow, NewMaintenanceRequest};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Success envelope: `{"success": true, "data": ...}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

/// An analysis together with the input it was produced from, ready to be saved.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedRequest {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(flatten)]
    pub analysis: AnalysisResult,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub urgency: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub success: bool,
    pub data: Vec<MaintenanceRequestRow>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/maintenance/analyze
///
/// Validates the issue, runs one model call and returns the structured analysis.
/// Nothing is persisted; the client saves the result separately.
pub async fn handle_analyze(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(request): ApiJson<AnalyzeRequest>,
) -> Result<Json<ApiResponse<AnalyzedRequest>>, AppError> {
    let request = validate_analyze_request(request).map_err(AppError::InvalidInput)?;

    let context = build_context(request.property_address.as_deref(), request.category);
    info!(
        "Analyzing maintenance request for user {} (category: {:?})",
        user.user_id, request.category
    );

    let analysis = analyze(state.llm.as_ref(), &request.description, context.as_deref()).await?;

    Ok(ApiResponse::ok(AnalyzedRequest {
        description: request.description,
        property_address: request.property_address,
        category: request.category,
        analysis,
        timestamp: Utc::now(),
    }))
}

/// POST /api/v1/maintenance/save
pub async fn handle_save(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(request): ApiJson<SaveRequest>,
) -> Result<Json<ApiResponse<CreatedRequest>>, AppError> {
    let request = validate_save_request(request).map_err(AppError::InvalidInput)?;

    let created = state
        .store
        .create(NewMaintenanceRequest {
            user_id: user.user_id,
            description: request.description,
            property_address: request.property_address,
            category: request.category,
            diagnosis: request.diagnosis,
            urgency: request.urgency,
            estimated_cost: request.estimated_cost,
            contractor_type: request.contractor_type,
            next_steps: request.next_steps,
        })
        .await?;

    Ok(ApiResponse::ok(created))
}

/// GET /api/v1/maintenance/list?urgency=&page=&limit=
///
/// An unrecognised urgency filter is ignored rather than rejected.
pub async fn handle_list(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Result<Json<ListResponse>, AppError> {
    let urgency = query
        .urgency
        .as_deref()
        .and_then(|u| u.parse::<Urgency>().ok());
    let filter = ListFilter::new(urgency, query.page, query.limit);

    let page = state.store.list(user.user_id, &filter).await?;

    Ok(Json(ListResponse {
        success: true,
        data: page.items,
        pagination: Pagination {
            page: filter.page,
            limit: filter.limit,
            total: page.total,
            total_pages: page.total.div_ceil(u64::from(filter.limit)),
        },
    }))
}

/// GET /api/v1/maintenance/:id
pub async fn handle_get(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MaintenanceRequestRow>>, AppError> {
    let id = parse_request_id(&id)?;
    let row = state.store.get(id, user.user_id).await?;
    Ok(ApiResponse::ok(row))
}

/// DELETE /api/v1/maintenance/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeleteResponse>>, AppError> {
    let id = parse_request_id(&id)?;
    state.store.delete(id, user.user_id).await?;
    Ok(ApiResponse::ok(DeleteResponse {
        message: "Request deleted successfully.".to_string(),
    }))
}

fn parse_request_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::Validation(format!("Invalid request ID '{raw}'")))
}
