//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the user entity and its transfer objects, the age rule, the wire date
//! format and the per-request context threaded through every layer.

pub mod age;
pub mod constants;
pub mod context;
pub mod date;
pub mod error;
pub mod user;

pub use age::{age_on, Clock, FixedClock, SystemClock};
pub use constants::*;
pub use context::{RequestContext, RequestId};
pub use date::{format_dob, parse_dob};
pub use error::{DomainError, DomainResult, StorageError};
pub use user::{CreateUserRequest, UpdateUserRequest, User, UserResponse};
