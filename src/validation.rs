// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed form validation.
//!
//! Each field rule is a small predicate returning a [`Violation`]. Rules are
//! composed per field with [`Validator::field`], and cross-field checks with
//! [`Validator::check`]. Validation runs entirely client-side; a form that
//! fails here never reaches the network.

use std::fmt;
use validator::ValidateEmail;

/// Field names as they appear in forms and error reports.
pub mod fields {
    pub const USERNAME: &str = "username";
    pub const EMAIL: &str = "email";
    pub const PASSWORD: &str = "password";
    pub const CONFIRM_PASSWORD: &str = "confirmPassword";
}

/// Why a single field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Required,
    MinLength { min: usize },
    Email,
    PasswordMismatch,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Required => write!(f, "required"),
            Violation::MinLength { min } => write!(f, "must be at least {min} characters"),
            Violation::Email => write!(f, "must be a valid email address"),
            Violation::PasswordMismatch => write!(f, "passwords don't match"),
        }
    }
}

/// A rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub violation: Violation,
}

/// All field errors of one submission, in form order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// First violation reported for `field`, if any.
    pub fn for_field(&self, field: &str) -> Option<Violation> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.violation)
    }

    pub fn contains(&self, field: &str, violation: Violation) -> bool {
        self.0
            .iter()
            .any(|e| e.field == field && e.violation == violation)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", e.field, e.violation)?;
        }
        Ok(())
    }
}

/// A predicate over a single field value.
pub trait Rule {
    fn check(&self, value: &str) -> Result<(), Violation>;
}

impl<F> Rule for F
where
    F: Fn(&str) -> Result<(), Violation>,
{
    fn check(&self, value: &str) -> Result<(), Violation> {
        self(value)
    }
}

/// Value must not be blank.
pub struct Required;

impl Rule for Required {
    fn check(&self, value: &str) -> Result<(), Violation> {
        if value.trim().is_empty() {
            Err(Violation::Required)
        } else {
            Ok(())
        }
    }
}

/// Value must have at least `n` characters (not bytes).
pub struct MinLength(pub usize);

impl Rule for MinLength {
    fn check(&self, value: &str) -> Result<(), Violation> {
        if value.chars().count() < self.0 {
            Err(Violation::MinLength { min: self.0 })
        } else {
            Ok(())
        }
    }
}

/// Value must look like an email address.
pub struct Email;

impl Rule for Email {
    fn check(&self, value: &str) -> Result<(), Violation> {
        if value.validate_email() {
            Ok(())
        } else {
            Err(Violation::Email)
        }
    }
}

/// Accumulates field errors; the first failing rule of each field wins.
#[derive(Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `rules` in order against `value`, recording the first violation.
    pub fn field(&mut self, field: &'static str, value: &str, rules: &[&dyn Rule]) -> &mut Self {
        if let Some(violation) = rules.iter().find_map(|r| r.check(value).err()) {
            self.errors.push(FieldError { field, violation });
        }
        self
    }

    /// Record `violation` on `field` unless `ok` holds.
    pub fn check(&mut self, field: &'static str, ok: bool, violation: Violation) -> &mut Self {
        if !ok && !self.errors.iter().any(|e| e.field == field) {
            self.errors.push(FieldError { field, violation });
        }
        self
    }

    /// Tagged result: the validated value, or every recorded error.
    pub fn finish<T>(&mut self, value: T) -> Result<T, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(ValidationErrors(std::mem::take(&mut self.errors)))
        }
    }
}

/// Raw login form input.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Login input that passed validation.
#[derive(Debug, Clone)]
pub struct ValidLogin {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<ValidLogin, ValidationErrors> {
        let email = self.email.trim();
        Validator::new()
            .field(fields::EMAIL, email, &[&Required, &Email])
            .field(fields::PASSWORD, &self.password, &[&MinLength(6)])
            .finish(ValidLogin {
                email: email.to_string(),
                password: self.password.clone(),
            })
    }
}

/// Raw registration form input.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Registration input that passed validation.
#[derive(Debug, Clone)]
pub struct ValidRegistration {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<ValidRegistration, ValidationErrors> {
        let username = self.username.trim();
        let email = self.email.trim();
        Validator::new()
            .field(fields::USERNAME, username, &[&Required, &MinLength(3)])
            .field(fields::EMAIL, email, &[&Required, &Email])
            .field(fields::PASSWORD, &self.password, &[&MinLength(6)])
            .check(
                fields::CONFIRM_PASSWORD,
                self.password == self.confirm_password,
                Violation::PasswordMismatch,
            )
            .finish(ValidRegistration {
                username: username.to_string(),
                email: email.to_string(),
                password: self.password.clone(),
            })
    }
}
