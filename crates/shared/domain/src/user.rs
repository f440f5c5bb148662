//! User domain entity and related types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::age::age_on;
use crate::date::format_dob;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Storage-assigned identifier, never changes
    pub id: i32,
    pub name: String,
    pub dob: NaiveDate,
}

impl User {
    pub fn new(id: i32, name: impl Into<String>, dob: NaiveDate) -> Self {
        Self {
            id,
            name: name.into(),
            dob,
        }
    }

    /// Age in whole years on the given date
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        age_on(self.dob, today)
    }
}

/// User creation data transfer object
///
/// Missing fields deserialize as empty strings so that presence is reported
/// by validation rather than by the JSON parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateUserRequest {
    /// Display name (2-100 characters)
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "Alice Johnson"))]
    pub name: String,
    /// Date of birth, `YYYY-MM-DD`
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "1990-05-10"))]
    pub dob: String,
}

/// User update data transfer object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateUserRequest {
    /// New display name (2-100 characters)
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "Alice Smith"))]
    pub name: String,
    /// New date of birth, `YYYY-MM-DD`
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "1990-05-10"))]
    pub dob: String,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    /// Unique user identifier
    pub id: i32,
    /// User display name
    pub name: String,
    /// Date of birth, `YYYY-MM-DD`
    pub dob: String,
    /// Age in whole years, computed when the response is built
    pub age: i32,
}

impl UserResponse {
    /// Build a response, deriving the age relative to `today`
    pub fn from_user(user: User, today: NaiveDate) -> Self {
        let age = user.age_on(today);
        Self {
            id: user.id,
            dob: format_dob(user.dob),
            name: user.name,
            age,
        }
    }
}
