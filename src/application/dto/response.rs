//! Response DTOs
//!
//! Wire representation of branches and holidays. Field names follow the
//! public JSON contract (camelCase); conversion from the domain model is
//! written out by hand.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Branch, Holiday};

/// Holiday response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayResponse {
    pub date: NaiveDate,
    pub name: String,
}

impl From<Holiday> for HolidayResponse {
    fn from(holiday: Holiday) -> Self {
        Self {
            date: holiday.date,
            name: holiday.name,
        }
    }
}

impl From<HolidayResponse> for Holiday {
    fn from(response: HolidayResponse) -> Self {
        Holiday::new(response.date, response.name)
    }
}

/// Branch response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchResponse {
    pub id: String,
    pub email_address: String,
    pub name: String,
    pub phone_number: String,
    pub state: String,
    pub creation_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
    pub branch_holidays: Vec<HolidayResponse>,
}

impl From<Branch> for BranchResponse {
    fn from(branch: Branch) -> Self {
        Self {
            id: branch.id.unwrap_or_default(),
            email_address: branch.email_address,
            name: branch.name,
            phone_number: branch.phone_number,
            state: branch.state,
            creation_date: branch.creation_date,
            last_modified_date: branch.last_modified_date,
            branch_holidays: branch
                .branch_holidays
                .into_iter()
                .map(HolidayResponse::from)
                .collect(),
        }
    }
}

impl From<BranchResponse> for Branch {
    fn from(response: BranchResponse) -> Self {
        Self {
            id: Some(response.id).filter(|id| !id.is_empty()),
            email_address: response.email_address,
            name: response.name,
            phone_number: response.phone_number,
            state: response.state,
            creation_date: response.creation_date,
            last_modified_date: response.last_modified_date,
            branch_holidays: response
                .branch_holidays
                .into_iter()
                .map(Holiday::from)
                .collect(),
        }
    }
}

/// Map a list of branches to their wire form, keeping order.
pub fn branch_responses(branches: Vec<Branch>) -> Vec<BranchResponse> {
    branches.into_iter().map(BranchResponse::from).collect()
}

/// Map a holiday calendar to its wire form, keeping insertion order.
pub fn holiday_responses(holidays: Vec<Holiday>) -> Vec<HolidayResponse> {
    holidays.into_iter().map(HolidayResponse::from).collect()
}
