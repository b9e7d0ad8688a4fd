//! Branch Repository Implementation
//!
//! PostgreSQL implementation of the BranchRepository trait. Each branch is
//! one row of the `branches` table with its holiday calendar embedded as a
//! JSONB document, so an aggregate is always read and written as a unit.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::domain::{Branch, BranchRepository, Holiday};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

/// Persisted form of an embedded holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct HolidayDocument {
    date: NaiveDate,
    name: String,
}

impl From<&Holiday> for HolidayDocument {
    fn from(holiday: &Holiday) -> Self {
        Self {
            date: holiday.date,
            name: holiday.name.clone(),
        }
    }
}

impl From<HolidayDocument> for Holiday {
    fn from(document: HolidayDocument) -> Self {
        Holiday::new(document.date, document.name)
    }
}

/// Database row representation matching the branches table schema.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct BranchRow {
    id: String,
    email_address: String,
    name: String,
    phone_number: String,
    state: String,
    creation_date: DateTime<Utc>,
    last_modified_date: DateTime<Utc>,
    branch_holidays: Json<Vec<HolidayDocument>>,
}

impl BranchRow {
    /// Convert database row to domain Branch entity.
    fn into_branch(self) -> Branch {
        Branch {
            id: Some(self.id),
            email_address: self.email_address,
            name: self.name,
            phone_number: self.phone_number,
            state: self.state,
            creation_date: self.creation_date,
            last_modified_date: self.last_modified_date,
            branch_holidays: self.branch_holidays.0.into_iter().map(Holiday::from).collect(),
        }
    }
}

fn holiday_documents(branch: &Branch) -> Json<Vec<HolidayDocument>> {
    Json(branch.branch_holidays.iter().map(HolidayDocument::from).collect())
}

/// PostgreSQL branch repository implementation.
#[derive(Clone)]
pub struct PgBranchRepository {
    pool: PgPool,
    id_generator: Arc<SnowflakeGenerator>,
}

impl PgBranchRepository {
    /// Create a new PgBranchRepository with the given connection pool.
    pub fn new(pool: PgPool, id_generator: Arc<SnowflakeGenerator>) -> Self {
        Self { pool, id_generator }
    }
}

#[async_trait]
impl BranchRepository for PgBranchRepository {
    async fn find_all(&self) -> Result<Vec<Branch>, AppError> {
        let start = Instant::now();
        let rows = sqlx::query_as::<_, BranchRow>(
            r#"
            SELECT id, email_address, name, phone_number, state,
                   creation_date, last_modified_date, branch_holidays
            FROM branches
            ORDER BY creation_date, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        metrics::record_db_query("select", "branches", start.elapsed().as_secs_f64());

        Ok(rows.into_iter().map(BranchRow::into_branch).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Branch>, AppError> {
        let start = Instant::now();
        let row = sqlx::query_as::<_, BranchRow>(
            r#"
            SELECT id, email_address, name, phone_number, state,
                   creation_date, last_modified_date, branch_holidays
            FROM branches
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        metrics::record_db_query("select", "branches", start.elapsed().as_secs_f64());

        Ok(row.map(BranchRow::into_branch))
    }

    /// Upsert a branch. `creation_date` is never overwritten on update.
    async fn save(&self, branch: Branch) -> Result<Branch, AppError> {
        let id = branch
            .id
            .clone()
            .unwrap_or_else(|| self.id_generator.next_id());

        let start = Instant::now();
        let row = sqlx::query_as::<_, BranchRow>(
            r#"
            INSERT INTO branches (id, email_address, name, phone_number, state,
                                  creation_date, last_modified_date, branch_holidays)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE
            SET email_address = EXCLUDED.email_address,
                name = EXCLUDED.name,
                phone_number = EXCLUDED.phone_number,
                state = EXCLUDED.state,
                last_modified_date = EXCLUDED.last_modified_date,
                branch_holidays = EXCLUDED.branch_holidays
            RETURNING id, email_address, name, phone_number, state,
                      creation_date, last_modified_date, branch_holidays
            "#,
        )
        .bind(&id)
        .bind(&branch.email_address)
        .bind(&branch.name)
        .bind(&branch.phone_number)
        .bind(&branch.state)
        .bind(branch.creation_date)
        .bind(branch.last_modified_date)
        .bind(holiday_documents(&branch))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(format!(
                        "Branch with email {} already exists",
                        branch.email_address
                    ));
                }
            }
            AppError::Database(e)
        })?;
        metrics::record_db_query("upsert", "branches", start.elapsed().as_secs_f64());

        Ok(row.into_branch())
    }

    async fn exists_by_email(&self, email_address: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM branches WHERE email_address = $1)",
        )
        .bind(email_address)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
