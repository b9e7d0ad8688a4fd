//! Request DTOs
//!
//! Data structures for API request bodies and query strings.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::application::services::CreateBranchDto;
use crate::domain::Holiday;
use crate::shared::validation::{not_blank, PHONE_NUMBER_REGEX};

/// Create branch request.
///
/// Server-assigned fields (`id`, timestamps, `branchHolidays`) are ignored
/// if a client sends them. Missing text fields default to empty so they
/// surface as validation errors instead of deserialization failures.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBranchRequest {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Email address is required"),
        email(message = "Invalid email format")
    )]
    pub email_address: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,

    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Phone number is required"),
        regex(path = *PHONE_NUMBER_REGEX, message = "Invalid phone number format")
    )]
    pub phone_number: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "State is required"))]
    pub state: String,
}

impl From<CreateBranchRequest> for CreateBranchDto {
    fn from(request: CreateBranchRequest) -> Self {
        Self {
            email_address: request.email_address,
            name: request.name,
            phone_number: request.phone_number,
            state: request.state,
        }
    }
}

/// A single holiday in an add-holidays body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct HolidayRequest {
    #[validate(required(message = "Holiday date is required"))]
    pub date: Option<NaiveDate>,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Holiday name is required"))]
    pub name: String,
}

/// Add holidays request: a bare JSON array of holidays
#[derive(Debug, Deserialize, Validate)]
#[serde(transparent)]
pub struct AddHolidaysRequest {
    #[validate(nested)]
    pub holidays: Vec<HolidayRequest>,
}

impl AddHolidaysRequest {
    /// Convert validated holidays into domain values.
    ///
    /// Entries without a date are skipped; validation rejects them first.
    pub fn into_holidays(self) -> Vec<Holiday> {
        self.holidays
            .into_iter()
            .filter_map(|h| h.date.map(|date| Holiday::new(date, h.name)))
            .collect()
    }
}

/// `PATCH /branches/{id}/phone` query parameters
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePhoneParams {
    pub phone_number: String,
}

/// `DELETE /branches/{id}/holidays` query parameters.
///
/// Accepts `dates=2024-01-01&dates=2024-12-25` as well as
/// `dates=2024-01-01,2024-12-25`.
#[derive(Debug, Deserialize)]
pub struct RemoveHolidaysParams {
    #[serde(default)]
    pub dates: Vec<String>,
}

impl RemoveHolidaysParams {
    /// Parse every ISO-8601 date, failing on the first malformed value.
    pub fn parse_dates(&self) -> Result<Vec<NaiveDate>, String> {
        let dates: Vec<NaiveDate> = self
            .dates
            .iter()
            .flat_map(|raw| raw.split(','))
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(|raw| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| format!("Invalid date '{}', expected YYYY-MM-DD", raw))
            })
            .collect::<Result<_, _>>()?;

        if dates.is_empty() {
            return Err("At least one date is required".to_string());
        }
        Ok(dates)
    }
}

/// `GET /branches/{id}/holidays/check` query parameters
#[derive(Debug, Deserialize)]
pub struct HolidayCheckParams {
    pub date: NaiveDate,
}
