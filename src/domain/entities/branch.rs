//! Branch entity, its holiday calendar, and the repository trait.
//!
//! A branch is persisted as one aggregate: the holiday list is embedded in
//! the branch document and never stored on its own.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, SubsecRound, Utc};

use crate::shared::error::AppError;

/// A named calendar date on which a branch does not operate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Holiday {
    /// Calendar day, no time component
    pub date: NaiveDate,

    /// Label such as "New Year's Day"
    pub name: String,
}

impl Holiday {
    pub fn new(date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            date,
            name: name.into(),
        }
    }
}

/// Represents a bank branch.
///
/// Stored in the `branches` collection:
/// - id: opaque snowflake string, assigned on first save
/// - email_address: unique across all branches
/// - name, phone_number, state: contact and status details
/// - creation_date: set once on first save
/// - last_modified_date: bumped on every mutation
/// - branch_holidays: embedded, insertion ordered, duplicates allowed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    /// `None` until the repository assigns an id
    pub id: Option<String>,

    pub email_address: String,

    pub name: String,

    /// Matches `^\+?[0-9]{10,13}$`
    pub phone_number: String,

    /// Freeform status label (e.g. "ACTIVE")
    pub state: String,

    pub creation_date: DateTime<Utc>,

    pub last_modified_date: DateTime<Utc>,

    pub branch_holidays: Vec<Holiday>,
}

impl Branch {
    /// Build a branch that has not been persisted yet.
    ///
    /// Both timestamps start equal and the holiday calendar starts empty.
    pub fn new(
        email_address: String,
        name: String,
        phone_number: String,
        state: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            email_address,
            name,
            phone_number,
            state,
            creation_date: now,
            last_modified_date: now,
            branch_holidays: Vec::new(),
        }
    }

    /// Record a mutation at `now`.
    ///
    /// The modification stamp only ever moves forward, even if two
    /// mutations land within the same clock tick.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        let floor = self.last_modified_date + Duration::microseconds(1);
        self.last_modified_date = if now < floor { floor } else { now };
    }

    pub fn update_phone(&mut self, phone_number: String, now: DateTime<Utc>) {
        self.phone_number = phone_number;
        self.touch(now);
    }

    /// Append holidays in the given order. No deduplication.
    pub fn add_holidays<I>(&mut self, holidays: I, now: DateTime<Utc>)
    where
        I: IntoIterator<Item = Holiday>,
    {
        self.branch_holidays.extend(holidays);
        self.touch(now);
    }

    /// Drop every holiday whose date is in `dates`, regardless of name.
    ///
    /// Returns how many entries were removed.
    pub fn remove_holidays(&mut self, dates: &[NaiveDate], now: DateTime<Utc>) -> usize {
        let before = self.branch_holidays.len();
        self.branch_holidays.retain(|h| !dates.contains(&h.date));
        self.touch(now);
        before - self.branch_holidays.len()
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.branch_holidays.iter().any(|h| h.date == date)
    }
}

/// Current time truncated to the microsecond precision the store keeps.
pub fn now_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Persistence collection for branch aggregates.
///
/// Implementations perform no business validation, with one exception:
/// `save` must refuse a second record carrying an email address that is
/// already stored, returning [`AppError::Conflict`].
#[async_trait]
pub trait BranchRepository: Send + Sync {
    /// All branches in the store's natural order (creation order).
    async fn find_all(&self) -> Result<Vec<Branch>, AppError>;

    /// Find a branch by id.
    async fn find_by_id(&self, id: &str) -> Result<Option<Branch>, AppError>;

    /// Insert or replace a branch, assigning an id when it has none.
    async fn save(&self, branch: Branch) -> Result<Branch, AppError>;

    /// Whether any branch uses this email address.
    async fn exists_by_email(&self, email_address: &str) -> Result<bool, AppError>;

    /// Cheap round trip to the backing store.
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
