//! Branch Service
//!
//! Business rules for branches and their holiday calendars: email
//! uniqueness on create, phone validation, existence checks, and the
//! holiday add/remove/check logic.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, warn};
use validator::ValidateEmail;

use crate::domain::{now_timestamp, Branch, BranchRepository, Holiday};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;
use crate::shared::validation::is_valid_phone_number;

/// Branch service trait
#[async_trait]
pub trait BranchService: Send + Sync {
    /// List every branch in storage order
    async fn list_branches(&self) -> Result<Vec<Branch>, BranchError>;

    /// Create a branch with an empty holiday calendar
    async fn create_branch(&self, request: CreateBranchDto) -> Result<Branch, BranchError>;

    /// Get branch by ID
    async fn get_branch_by_id(&self, id: &str) -> Result<Branch, BranchError>;

    /// Replace the branch phone number
    async fn update_branch_phone(&self, id: &str, phone_number: String) -> Result<Branch, BranchError>;

    /// Append holidays to the branch calendar
    async fn add_holidays(&self, id: &str, holidays: Vec<Holiday>) -> Result<Branch, BranchError>;

    /// Remove every holiday falling on one of `dates`
    async fn remove_holidays(&self, id: &str, dates: Vec<NaiveDate>) -> Result<Branch, BranchError>;

    /// The branch calendar in insertion order
    async fn get_branch_holidays(&self, id: &str) -> Result<Vec<Holiday>, BranchError>;

    /// Whether any holiday of the branch falls on `date`
    async fn is_holiday(&self, id: &str, date: NaiveDate) -> Result<bool, BranchError>;

    /// Round trip to the persistence layer
    async fn check_storage(&self) -> Result<(), BranchError>;
}

/// Create branch request
#[derive(Debug, Clone)]
pub struct CreateBranchDto {
    pub email_address: String,
    pub name: String,
    pub phone_number: String,
    pub state: String,
}

impl CreateBranchDto {
    fn validate(&self) -> Result<(), BranchError> {
        if self.email_address.trim().is_empty() {
            return Err(BranchError::Validation("Email address is required".into()));
        }
        if !self.email_address.validate_email() {
            return Err(BranchError::Validation("Invalid email format".into()));
        }
        if self.name.trim().is_empty() {
            return Err(BranchError::Validation("Name is required".into()));
        }
        if !is_valid_phone_number(&self.phone_number) {
            return Err(BranchError::Validation("Invalid phone number format".into()));
        }
        if self.state.trim().is_empty() {
            return Err(BranchError::Validation("State is required".into()));
        }
        Ok(())
    }
}

/// Branch service errors
#[derive(Debug, thiserror::Error)]
pub enum BranchError {
    #[error("Branch not found with id: {0}")]
    NotFound(String),

    #[error("Branch with email {0} already exists")]
    DuplicateEmail(String),

    #[error("{0}")]
    Validation(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl From<AppError> for BranchError {
    fn from(error: AppError) -> Self {
        BranchError::Infrastructure(error.to_string())
    }
}

impl From<BranchError> for AppError {
    fn from(error: BranchError) -> Self {
        match error {
            BranchError::NotFound(_) => AppError::NotFound(error.to_string()),
            BranchError::DuplicateEmail(_) | BranchError::Validation(_) => {
                AppError::Validation(error.to_string())
            }
            BranchError::Infrastructure(msg) => AppError::Internal(msg),
        }
    }
}

/// Per-branch critical sections for read-modify-write operations.
#[derive(Debug, Default)]
struct BranchLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl BranchLocks {
    async fn acquire(&self, id: &str) -> BranchLockGuard<'_> {
        let mutex = self.locks.entry(id.to_string()).or_default().clone();
        let guard = mutex.lock_owned().await;
        BranchLockGuard {
            locks: &self.locks,
            id: id.to_string(),
            guard: Some(guard),
        }
    }
}

struct BranchLockGuard<'a> {
    locks: &'a DashMap<String, Arc<Mutex<()>>>,
    id: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for BranchLockGuard<'_> {
    fn drop(&mut self) {
        self.guard.take();
        // Forget the mutex once nobody else holds or waits on it
        self.locks
            .remove_if(&self.id, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}

/// BranchService implementation
pub struct BranchServiceImpl<R>
where
    R: BranchRepository,
{
    branch_repo: Arc<R>,
    locks: BranchLocks,
}

impl<R> BranchServiceImpl<R>
where
    R: BranchRepository,
{
    pub fn new(branch_repo: Arc<R>) -> Self {
        Self {
            branch_repo,
            locks: BranchLocks::default(),
        }
    }

    async fn load(&self, id: &str) -> Result<Branch, BranchError> {
        self.branch_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| BranchError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl<R> BranchService for BranchServiceImpl<R>
where
    R: BranchRepository + 'static,
{
    async fn list_branches(&self) -> Result<Vec<Branch>, BranchError> {
        info!("Getting all branches");
        let branches = self.branch_repo.find_all().await?;
        info!(count = branches.len(), "Found branches");
        Ok(branches)
    }

    async fn create_branch(&self, request: CreateBranchDto) -> Result<Branch, BranchError> {
        info!(email = %request.email_address, "Creating new branch");
        request.validate()?;

        // Fast path only; the store's unique index is the real guarantee
        if self
            .branch_repo
            .exists_by_email(&request.email_address)
            .await?
        {
            warn!(email = %request.email_address, "Duplicate branch email");
            return Err(BranchError::DuplicateEmail(request.email_address));
        }

        let branch = Branch::new(
            request.email_address,
            request.name,
            request.phone_number,
            request.state,
            now_timestamp(),
        );
        let email = branch.email_address.clone();

        let saved = self.branch_repo.save(branch).await.map_err(|e| match e {
            AppError::Conflict(_) => {
                warn!(email = %email, "Duplicate branch email rejected by store");
                BranchError::DuplicateEmail(email.clone())
            }
            e => BranchError::from(e),
        })?;

        info!(branch_id = ?saved.id, "Branch created successfully");
        Ok(saved)
    }

    async fn get_branch_by_id(&self, id: &str) -> Result<Branch, BranchError> {
        info!(branch_id = %id, "Getting branch");
        let branch = self.load(id).await?;
        debug!(branch_id = %id, "Branch found");
        Ok(branch)
    }

    async fn update_branch_phone(&self, id: &str, phone_number: String) -> Result<Branch, BranchError> {
        info!(branch_id = %id, "Updating branch phone number");
        let _lock = self.locks.acquire(id).await;

        let mut branch = self.load(id).await?;
        if !is_valid_phone_number(&phone_number) {
            return Err(BranchError::Validation("Invalid phone number format".into()));
        }

        branch.update_phone(phone_number, now_timestamp());
        let saved = self.branch_repo.save(branch).await?;

        info!(branch_id = %id, "Branch phone number updated");
        Ok(saved)
    }

    async fn add_holidays(&self, id: &str, holidays: Vec<Holiday>) -> Result<Branch, BranchError> {
        let count = holidays.len();
        info!(branch_id = %id, count, "Adding holidays to branch");
        let _lock = self.locks.acquire(id).await;

        let mut branch = self.load(id).await?;
        branch.add_holidays(holidays, now_timestamp());
        let saved = self.branch_repo.save(branch).await?;
        metrics::record_holiday_changes("added", count);

        info!(branch_id = %id, total = saved.branch_holidays.len(), "Holidays added");
        Ok(saved)
    }

    async fn remove_holidays(&self, id: &str, dates: Vec<NaiveDate>) -> Result<Branch, BranchError> {
        info!(branch_id = %id, dates = dates.len(), "Removing holidays from branch");
        let _lock = self.locks.acquire(id).await;

        let mut branch = self.load(id).await?;
        let removed = branch.remove_holidays(&dates, now_timestamp());
        let saved = self.branch_repo.save(branch).await?;
        metrics::record_holiday_changes("removed", removed);

        info!(branch_id = %id, removed, "Holidays removed");
        Ok(saved)
    }

    async fn get_branch_holidays(&self, id: &str) -> Result<Vec<Holiday>, BranchError> {
        info!(branch_id = %id, "Getting holidays for branch");
        Ok(self.load(id).await?.branch_holidays)
    }

    async fn is_holiday(&self, id: &str, date: NaiveDate) -> Result<bool, BranchError> {
        info!(branch_id = %id, %date, "Checking holiday");
        Ok(self.load(id).await?.is_holiday(date))
    }

    async fn check_storage(&self) -> Result<(), BranchError> {
        self.branch_repo.ping().await?;
        Ok(())
    }
}
