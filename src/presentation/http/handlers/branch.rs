//! Branch Handlers
//!
//! Thin translation between HTTP and `BranchService`; no business rules
//! live here.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::{
    branch_responses, holiday_responses, AddHolidaysRequest, BranchResponse,
    CreateBranchRequest, HolidayCheckParams, HolidayResponse, RemoveHolidaysParams,
    UpdatePhoneParams,
};
use crate::presentation::http::extractors::{QueryParams, ValidatedJson};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// List all branches
pub async fn list_branches(
    State(state): State<AppState>,
) -> Result<Json<Vec<BranchResponse>>, AppError> {
    let branches = state.branch_service.list_branches().await?;
    Ok(Json(branch_responses(branches)))
}

/// Create a new branch
pub async fn create_branch(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateBranchRequest>,
) -> Result<(StatusCode, Json<BranchResponse>), AppError> {
    let branch = state.branch_service.create_branch(body.into()).await?;
    Ok((StatusCode::CREATED, Json(BranchResponse::from(branch))))
}

/// Get branch by ID
pub async fn get_branch(
    State(state): State<AppState>,
    Path(branch_id): Path<String>,
) -> Result<Json<BranchResponse>, AppError> {
    let branch = state.branch_service.get_branch_by_id(&branch_id).await?;
    Ok(Json(BranchResponse::from(branch)))
}

/// Update branch phone number
pub async fn update_branch_phone(
    State(state): State<AppState>,
    Path(branch_id): Path<String>,
    QueryParams(params): QueryParams<UpdatePhoneParams>,
) -> Result<Json<BranchResponse>, AppError> {
    let branch = state
        .branch_service
        .update_branch_phone(&branch_id, params.phone_number)
        .await?;
    Ok(Json(BranchResponse::from(branch)))
}

/// Add holidays to a branch
pub async fn add_holidays(
    State(state): State<AppState>,
    Path(branch_id): Path<String>,
    ValidatedJson(body): ValidatedJson<AddHolidaysRequest>,
) -> Result<Json<BranchResponse>, AppError> {
    let branch = state
        .branch_service
        .add_holidays(&branch_id, body.into_holidays())
        .await?;
    Ok(Json(BranchResponse::from(branch)))
}

/// Remove holidays from a branch by date
pub async fn remove_holidays(
    State(state): State<AppState>,
    Path(branch_id): Path<String>,
    QueryParams(params): QueryParams<RemoveHolidaysParams>,
) -> Result<Json<BranchResponse>, AppError> {
    let dates = params.parse_dates().map_err(AppError::BadRequest)?;
    let branch = state
        .branch_service
        .remove_holidays(&branch_id, dates)
        .await?;
    Ok(Json(BranchResponse::from(branch)))
}

/// Get branch holidays
pub async fn get_branch_holidays(
    State(state): State<AppState>,
    Path(branch_id): Path<String>,
) -> Result<Json<Vec<HolidayResponse>>, AppError> {
    let holidays = state.branch_service.get_branch_holidays(&branch_id).await?;
    Ok(Json(holiday_responses(holidays)))
}

/// Check whether a date is a holiday for a branch
pub async fn check_holiday(
    State(state): State<AppState>,
    Path(branch_id): Path<String>,
    QueryParams(params): QueryParams<HolidayCheckParams>,
) -> Result<Json<bool>, AppError> {
    let is_holiday = state
        .branch_service
        .is_holiday(&branch_id, params.date)
        .await?;
    Ok(Json(is_holiday))
}
