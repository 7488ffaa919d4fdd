// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Goal model (personal or group goals with XP rewards).

use crate::time_utils::utc_timestamp;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A goal as returned by `/goals`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Goal type (e.g. "personal", "group")
    #[serde(rename = "type")]
    pub kind: String,
    /// Status (e.g. "pending", "in_progress", "completed")
    pub status: String,
    pub creator_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_ai: Option<bool>,
    #[serde(
        default,
        with = "utc_timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewards_xp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewards_custom_reward: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewards_unlock: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default)]
    pub assigned_user_ids: Vec<String>,
}

impl Goal {
    /// Whether the goal belongs to the given user (creator or assignee).
    pub fn involves(&self, user_id: &str) -> bool {
        self.creator_id == user_id || self.assigned_user_ids.iter().any(|id| id == user_id)
    }

    pub fn is_completed(&self) -> bool {
        self.status.eq_ignore_ascii_case("completed")
    }
}

/// Payload for `POST /goals`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalCreate {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub creator_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewards_xp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default)]
    pub assigned_user_ids: Vec<String>,
}

/// Partial update for `PUT /goals/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewards_xp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_user_ids: Option<Vec<String>>,
}
