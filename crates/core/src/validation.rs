//! Field-level validation for typed commands.
//!
//! Commands derive [`validator::Validate`]; [`Valid`] is the only way to hand
//! a command to the lifecycle layer, so every mutation sees checked input.
//! Failures are collected per field into [`CoreError::InvalidFields`] rather
//! than stopping at the first problem.

use std::ops::Deref;

use serde::Serialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::CoreError;

/// Message used when a required field is missing or blank.
pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A command with checks that span more than one field.
///
/// The default implementation adds nothing; override it for rules such as
/// "both password fields must match".
pub trait Command: Validate {
    fn cross_field_errors(&self) -> Vec<FieldError> {
        Vec::new()
    }
}

/// A command that has passed validation.
#[derive(Debug, Clone)]
pub struct Valid<T>(T);

impl<T: Command> Valid<T> {
    /// Validate `cmd`, returning every field error at once on failure.
    pub fn new(cmd: T) -> Result<Self, CoreError> {
        let mut errors = match cmd.validate() {
            Ok(()) => Vec::new(),
            Err(e) => field_errors(&e),
        };
        errors.extend(cmd.cross_field_errors());

        if errors.is_empty() {
            Ok(Self(cmd))
        } else {
            Err(CoreError::InvalidFields(errors))
        }
    }
}

impl<T> Valid<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Valid<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

/// Flatten `validator` output into a stable, field-sorted list.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({})", e.code));
                FieldError::new(field.clone(), message)
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

/// Reject empty or whitespace-only strings.
pub fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(REQUIRED_MESSAGE.into());
        return Err(err);
    }
    Ok(())
}
