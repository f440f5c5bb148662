//! User repository implementation over SeaORM.

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set};
use tracing::debug;

use super::entities::user::{ActiveModel, Entity as UserEntity};
use super::within_deadline;
use domain::{DomainError, DomainResult, RequestContext, StorageError, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Implementations must be safe to call concurrently. Concurrent writes to
/// the same row are last-write-wins; per-row atomicity is the backend's job.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; the backend assigns the identifier
    async fn create(&self, ctx: &RequestContext, name: String, dob: NaiveDate) -> DomainResult<User>;

    /// Fetch a user, `NotFound` if no row has this identifier
    async fn get_by_id(&self, ctx: &RequestContext, id: i32) -> DomainResult<User>;

    /// Overwrite name and date of birth of an existing user
    async fn update(
        &self,
        ctx: &RequestContext,
        id: i32,
        name: String,
        dob: NaiveDate,
    ) -> DomainResult<User>;

    /// Remove a user; removing a missing row is not an error
    async fn delete(&self, ctx: &RequestContext, id: i32) -> DomainResult<()>;

    /// All users, in no particular order
    async fn list(&self, ctx: &RequestContext) -> DomainResult<Vec<User>>;
}

/// Concrete implementation of UserRepository backed by PostgreSQL
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn not_found(id: i32) -> DomainError {
    DomainError::not_found(format!("User {}", id))
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, ctx: &RequestContext, name: String, dob: NaiveDate) -> DomainResult<User> {
        debug!(request_id = %ctx.request_id(), name = %name, "DB: Creating user");

        let active_model = ActiveModel {
            name: Set(name),
            dob: Set(dob),
            ..Default::default()
        };

        let model = within_deadline(ctx, active_model.insert(&self.db))
            .await?
            .map_err(StorageError::backend)?;
        Ok(User::from(model))
    }

    async fn get_by_id(&self, ctx: &RequestContext, id: i32) -> DomainResult<User> {
        debug!(request_id = %ctx.request_id(), user_id = id, "DB: Getting user by ID");

        within_deadline(ctx, UserEntity::find_by_id(id).one(&self.db))
            .await?
            .map_err(StorageError::backend)?
            .map(User::from)
            .ok_or_else(|| not_found(id))
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        id: i32,
        name: String,
        dob: NaiveDate,
    ) -> DomainResult<User> {
        debug!(request_id = %ctx.request_id(), user_id = id, "DB: Updating user");

        // Single UPDATE ... RETURNING; no row matched means the user is gone
        let active_model = ActiveModel {
            id: Set(id),
            name: Set(name),
            dob: Set(dob),
        };

        match within_deadline(ctx, active_model.update(&self.db)).await? {
            Ok(model) => Ok(User::from(model)),
            Err(DbErr::RecordNotUpdated) => Err(not_found(id)),
            Err(e) => Err(StorageError::backend(e).into()),
        }
    }

    async fn delete(&self, ctx: &RequestContext, id: i32) -> DomainResult<()> {
        debug!(request_id = %ctx.request_id(), user_id = id, "DB: Deleting user");

        let result = within_deadline(ctx, UserEntity::delete_by_id(id).exec(&self.db))
            .await?
            .map_err(StorageError::backend)?;

        if result.rows_affected == 0 {
            debug!(request_id = %ctx.request_id(), user_id = id, "DB: No user row to delete");
        }

        Ok(())
    }

    async fn list(&self, ctx: &RequestContext) -> DomainResult<Vec<User>> {
        debug!(request_id = %ctx.request_id(), "DB: Listing all users");

        let models = within_deadline(ctx, UserEntity::find().all(&self.db))
            .await?
            .map_err(StorageError::backend)?;

        Ok(models.into_iter().map(User::from).collect())
    }
}
