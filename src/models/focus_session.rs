// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Focus session model (timed work blocks, e.g. pomodoro).

use crate::time_utils::utc_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded focus session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusSession {
    pub id: String,
    pub user_id: String,
    /// Technique used (e.g. "pomodoro", "deep_work")
    pub method: String,
    #[serde(with = "utc_timestamp")]
    pub started_at: DateTime<Utc>,
    /// Duration in minutes
    pub duration: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<String>,
}

/// Payload for `POST /focus-sessions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusSessionCreate {
    pub user_id: String,
    pub method: String,
    #[serde(with = "utc_timestamp")]
    pub started_at: DateTime<Utc>,
    pub duration: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<String>,
}

/// Partial update for `PUT /focus-sessions/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FocusSessionUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(
        default,
        with = "utc_timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<String>,
}
