// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login and registration form submission.

use crate::error::ClientError;
use crate::i18n::{Language, Message};
use crate::models::{User, UserCreate};
use crate::services::SessionStore;
use crate::validation::{LoginForm, RegisterForm, ValidationErrors};

/// A localized message next to a form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMessage {
    pub field: &'static str,
    pub message: String,
}

/// What a form shows after submit.
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    Submitted(User),
    /// Rejected client-side; nothing was sent
    Invalid(Vec<FieldMessage>),
    /// The request failed; one message for the whole form
    Failed(String),
}

fn field_messages(errors: &ValidationErrors, language: &Language) -> Vec<FieldMessage> {
    errors
        .errors()
        .iter()
        .map(|e| FieldMessage {
            field: e.field,
            message: Message::Invalid(e.violation).localize(language),
        })
        .collect()
}

fn failure_message(error: &ClientError, fallback: Message<'_>, language: &Language) -> String {
    error
        .user_message()
        .unwrap_or_else(|| fallback.localize(language))
}

pub async fn submit_login(
    session: &SessionStore,
    language: &Language,
    form: &LoginForm,
) -> FormOutcome {
    let valid = match form.validate() {
        Ok(valid) => valid,
        Err(errors) => return FormOutcome::Invalid(field_messages(&errors, language)),
    };

    match session.login(&valid.email, &valid.password).await {
        Ok(user) => FormOutcome::Submitted(user),
        Err(e) => FormOutcome::Failed(failure_message(&e, Message::LoginError, language)),
    }
}

pub async fn submit_register(
    session: &SessionStore,
    language: &Language,
    form: &RegisterForm,
) -> FormOutcome {
    let valid = match form.validate() {
        Ok(valid) => valid,
        Err(errors) => return FormOutcome::Invalid(field_messages(&errors, language)),
    };

    let user = UserCreate {
        username: valid.username,
        email: valid.email,
        password: valid.password,
        ..Default::default()
    };

    match session.register(&user).await {
        Ok(user) => FormOutcome::Submitted(user),
        Err(e) => FormOutcome::Failed(failure_message(&e, Message::RegisterError, language)),
    }
}
