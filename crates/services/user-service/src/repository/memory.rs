//! In-memory user repository for tests and local runs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::debug;

use super::{within_deadline, UserRepository};
use domain::{DomainError, DomainResult, RequestContext, User};

/// In-memory user store; identifiers start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<i32, User>>,
    last_id: AtomicI32,
}

impl MemoryUserStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserStore {
    async fn create(&self, ctx: &RequestContext, name: String, dob: NaiveDate) -> DomainResult<User> {
        let mut users = within_deadline(ctx, self.users.write()).await?;
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let user = User::new(id, name, dob);
        users.insert(id, user.clone());

        debug!(request_id = %ctx.request_id(), user_id = id, "Memory: Created user");
        Ok(user)
    }

    async fn get_by_id(&self, ctx: &RequestContext, id: i32) -> DomainResult<User> {
        let users = within_deadline(ctx, self.users.read()).await?;
        users
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("User {}", id)))
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        id: i32,
        name: String,
        dob: NaiveDate,
    ) -> DomainResult<User> {
        let mut users = within_deadline(ctx, self.users.write()).await?;
        let user = users
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(format!("User {}", id)))?;

        user.name = name;
        user.dob = dob;
        Ok(user.clone())
    }

    async fn delete(&self, ctx: &RequestContext, id: i32) -> DomainResult<()> {
        let mut users = within_deadline(ctx, self.users.write()).await?;
        if users.remove(&id).is_none() {
            debug!(request_id = %ctx.request_id(), user_id = id, "Memory: No user to delete");
        }
        Ok(())
    }

    async fn list(&self, ctx: &RequestContext) -> DomainResult<Vec<User>> {
        let users = within_deadline(ctx, self.users.read()).await?;
        Ok(users.values().cloned().collect())
    }
}
