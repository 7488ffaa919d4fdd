// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user exploration progress through the Orbitah map.

use serde::{Deserialize, Serialize};

/// Exploration state as returned by `/exploration/{user_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorationState {
    pub user_id: String,
    #[serde(default)]
    pub unlocked_locations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lore_progress: Option<String>,
    /// Codes of unlocked achievements
    #[serde(default)]
    pub achievements: Vec<String>,
}

impl ExplorationState {
    pub fn has_achievement(&self, code: &str) -> bool {
        self.achievements.iter().any(|c| c == code)
    }
}

/// Partial update for `PUT /exploration/{user_id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExplorationStateUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_locations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lore_progress: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievements: Option<Vec<String>>,
}
