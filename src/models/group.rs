// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Crew groups ("ships") that users can join.

use serde::{Deserialize, Serialize};

/// A group as returned by `/groups`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    /// Join code shared between members
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motto: Option<String>,
    /// Shared progress, 0.0 to 100.0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    /// Member user IDs
    #[serde(default)]
    pub members: Vec<String>,
    /// Goal IDs shared by the whole group
    #[serde(default)]
    pub shared_goals: Vec<String>,
}

/// Payload for `POST /groups`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupCreate {
    pub name: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motto: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
}

/// Partial update for `PUT /groups/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motto: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
}
