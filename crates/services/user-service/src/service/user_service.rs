//! User service - Handles user-related business logic.
//!
//! Parses dates of birth, delegates persistence to the repository and builds
//! responses whose age is derived at call time. Holds no state of its own.

use async_trait::async_trait;
use std::sync::Arc;

use domain::{
    parse_dob, Clock, CreateUserRequest, DomainResult, RequestContext, SystemClock,
    UpdateUserRequest, User, UserResponse,
};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
///
/// Requests reaching this layer have already passed validation.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a user; `DateFormat` if the date of birth does not parse
    async fn create_user(
        &self,
        ctx: &RequestContext,
        req: CreateUserRequest,
    ) -> DomainResult<UserResponse>;

    /// Get a user by ID
    async fn get_user(&self, ctx: &RequestContext, id: i32) -> DomainResult<UserResponse>;

    /// Replace name and date of birth of an existing user
    async fn update_user(
        &self,
        ctx: &RequestContext,
        id: i32,
        req: UpdateUserRequest,
    ) -> DomainResult<UserResponse>;

    /// Delete a user
    async fn delete_user(&self, ctx: &RequestContext, id: i32) -> DomainResult<()>;

    /// List all users
    async fn list_users(&self, ctx: &RequestContext) -> DomainResult<Vec<UserResponse>>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self::with_clock(repo, Arc::new(SystemClock))
    }

    /// Create a service that reads "today" from the given clock
    pub fn with_clock(repo: Arc<dyn UserRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    fn to_response(&self, user: User) -> UserResponse {
        UserResponse::from_user(user, self.clock.today())
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(
        &self,
        ctx: &RequestContext,
        req: CreateUserRequest,
    ) -> DomainResult<UserResponse> {
        let dob = parse_dob(&req.dob)?;
        let user = self.repo.create(ctx, req.name, dob).await?;

        Ok(self.to_response(user))
    }

    async fn get_user(&self, ctx: &RequestContext, id: i32) -> DomainResult<UserResponse> {
        let user = self.repo.get_by_id(ctx, id).await?;
        Ok(self.to_response(user))
    }

    async fn update_user(
        &self,
        ctx: &RequestContext,
        id: i32,
        req: UpdateUserRequest,
    ) -> DomainResult<UserResponse> {
        let dob = parse_dob(&req.dob)?;
        let user = self.repo.update(ctx, id, req.name, dob).await?;

        Ok(self.to_response(user))
    }

    async fn delete_user(&self, ctx: &RequestContext, id: i32) -> DomainResult<()> {
        self.repo.delete(ctx, id).await
    }

    async fn list_users(&self, ctx: &RequestContext) -> DomainResult<Vec<UserResponse>> {
        let users = self.repo.list(ctx).await?;
        Ok(users.into_iter().map(|user| self.to_response(user)).collect())
    }
}
