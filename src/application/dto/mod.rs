//! Data Transfer Objects
//!
//! DTOs for API request/response serialization and their explicit
//! conversions to and from the domain model.

pub mod request;
pub mod response;

pub use request::{
    AddHolidaysRequest, CreateBranchRequest, HolidayCheckParams, HolidayRequest,
    RemoveHolidaysParams, UpdatePhoneParams,
};
pub use response::{branch_responses, holiday_responses, BranchResponse, HolidayResponse};
