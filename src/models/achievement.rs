// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Achievement catalogue entries.

use serde::{Deserialize, Serialize};

/// An achievement definition. Unlocked achievements are tracked per user
/// in [`ExplorationState::achievements`](super::ExplorationState).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    /// Stable machine-readable code (e.g. "first_focus")
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xp_reward: Option<i64>,
}
