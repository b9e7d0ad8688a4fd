//! In-memory Branch Repository
//!
//! Process-local implementation of BranchRepository. Keeps branches in
//! insertion order and enforces the same unique-email contract as the
//! PostgreSQL store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::{Branch, BranchRepository};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

#[derive(Debug, Default)]
struct Collection {
    branches: Vec<Branch>,
    /// id -> position in `branches`
    by_id: HashMap<String, usize>,
    /// email -> id
    by_email: HashMap<String, String>,
}

/// In-memory branch repository
#[derive(Debug, Clone)]
pub struct InMemoryBranchRepository {
    collection: Arc<RwLock<Collection>>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl InMemoryBranchRepository {
    pub fn new(machine_id: u64) -> Self {
        Self::with_generator(Arc::new(SnowflakeGenerator::new(machine_id)))
    }

    pub fn with_generator(id_generator: Arc<SnowflakeGenerator>) -> Self {
        Self {
            collection: Arc::new(RwLock::new(Collection::default())),
            id_generator,
        }
    }

    pub fn len(&self) -> usize {
        self.collection.read().branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl BranchRepository for InMemoryBranchRepository {
    async fn find_all(&self) -> Result<Vec<Branch>, AppError> {
        Ok(self.collection.read().branches.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Branch>, AppError> {
        let collection = self.collection.read();
        Ok(collection
            .by_id
            .get(id)
            .map(|&index| collection.branches[index].clone()))
    }

    async fn save(&self, mut branch: Branch) -> Result<Branch, AppError> {
        let id = branch
            .id
            .clone()
            .unwrap_or_else(|| self.id_generator.next_id());
        branch.id = Some(id.clone());

        let mut collection = self.collection.write();

        if let Some(owner) = collection.by_email.get(&branch.email_address) {
            if *owner != id {
                return Err(AppError::Conflict(format!(
                    "Branch with email {} already exists",
                    branch.email_address
                )));
            }
        }

        match collection.by_id.get(&id).copied() {
            Some(index) => {
                let previous = &collection.branches[index];
                branch.creation_date = previous.creation_date;
                let old_email = previous.email_address.clone();
                if old_email != branch.email_address {
                    collection.by_email.remove(&old_email);
                }
                collection
                    .by_email
                    .insert(branch.email_address.clone(), id.clone());
                collection.branches[index] = branch.clone();
            }
            None => {
                let index = collection.branches.len();
                collection.by_id.insert(id.clone(), index);
                collection
                    .by_email
                    .insert(branch.email_address.clone(), id.clone());
                collection.branches.push(branch.clone());
            }
        }

        Ok(branch)
    }

    async fn exists_by_email(&self, email_address: &str) -> Result<bool, AppError> {
        Ok(self.collection.read().by_email.contains_key(email_address))
    }
}
