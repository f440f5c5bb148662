//! Declarative request validation.
//!
//! Each request type lists its constrained fields as [`FieldRule`]s. A single
//! [`RequestValidator`] is built at startup, stored in the app state and
//! applied by the `ValidatedJson` extractor before any handler runs.

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

use common::{AppError, AppResult};
use domain::{CreateUserRequest, UpdateUserRequest, MAX_NAME_LENGTH, MIN_NAME_LENGTH};

/// Constraints on one string field of a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: &'static str,
    pub required: bool,
    /// Minimum length in characters
    pub min_len: Option<usize>,
    /// Maximum length in characters
    pub max_len: Option<usize>,
}

impl FieldRule {
    /// A field that must be present and non-empty.
    pub const fn required(field: &'static str) -> Self {
        Self {
            field,
            required: true,
            min_len: None,
            max_len: None,
        }
    }

    /// Bound the field's length (inclusive, counted in characters).
    pub const fn length(mut self, min: usize, max: usize) -> Self {
        self.min_len = Some(min);
        self.max_len = Some(max);
        self
    }

    /// First violated constraint, if any.
    fn check(&self, value: &str) -> Option<ValidationError> {
        if value.is_empty() {
            if self.required {
                return Some(violation("required", format!("{} is required", self.field)));
            }
            return None;
        }

        let len = value.chars().count();
        if let Some(min) = self.min_len.filter(|min| len < *min) {
            let mut error = violation(
                "length",
                format!("{} must be at least {} characters", self.field, min),
            );
            error.add_param(Cow::from("min"), &min);
            return Some(error);
        }
        if let Some(max) = self.max_len.filter(|max| len > *max) {
            let mut error = violation(
                "length",
                format!("{} must be at most {} characters", self.field, max),
            );
            error.add_param(Cow::from("max"), &max);
            return Some(error);
        }

        None
    }
}

fn violation(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}

/// Display name: required, 2 to 100 characters.
pub static USER_NAME: FieldRule = FieldRule::required("name").length(MIN_NAME_LENGTH, MAX_NAME_LENGTH);

/// Date of birth: required; its format is checked by the service.
pub static USER_DOB: FieldRule = FieldRule::required("dob");

/// A request body whose fields carry declarative rules.
pub trait Validatable {
    /// Every constrained field paired with its current value.
    fn constrained_fields(&self) -> Vec<(&'static FieldRule, &str)>;
}

impl Validatable for CreateUserRequest {
    fn constrained_fields(&self) -> Vec<(&'static FieldRule, &str)> {
        vec![(&USER_NAME, &self.name), (&USER_DOB, &self.dob)]
    }
}

impl Validatable for UpdateUserRequest {
    fn constrained_fields(&self) -> Vec<(&'static FieldRule, &str)> {
        vec![(&USER_NAME, &self.name), (&USER_DOB, &self.dob)]
    }
}

/// Applies field rules to request bodies. Stateless and cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct RequestValidator;

impl RequestValidator {
    pub fn new() -> Self {
        Self
    }

    /// Collect every rule violation of `value`.
    pub fn check<T: Validatable>(&self, value: &T) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for (rule, field_value) in value.constrained_fields() {
            if let Some(error) = rule.check(field_value) {
                errors.add(rule.field, error);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate `value`, turning violations into a `Validation` error.
    pub fn validate<T: Validatable>(&self, value: &T) -> AppResult<()> {
        self.check(value)
            .map_err(|errors| AppError::validation(format_validation_errors(&errors)))
    }
}

/// Format validation errors into a user-friendly message.
fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}
