// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Terminal views: forms, dashboard and language switcher.

pub mod dashboard;
pub mod forms;
pub mod language;

pub use dashboard::render_dashboard;
pub use forms::{submit_login, submit_register, FieldMessage, FormOutcome};
pub use language::render_language_switcher;
