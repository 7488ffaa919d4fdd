// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Resource endpoints of the Orbitah API.

use super::api::{resource_path, ApiClient, Page};
use crate::error::Result;
use crate::models::{
    Achievement, ExplorationState, ExplorationStateUpdate, FocusSession, FocusSessionCreate,
    FocusSessionUpdate, Goal, GoalCreate, GoalUpdate, Group, GroupCreate, GroupUpdate, User,
    UserUpdate,
};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const GROUPS: &str = "groups";
    pub const GOALS: &str = "goals";
    pub const FOCUS_SESSIONS: &str = "focus-sessions";
    pub const ACHIEVEMENTS: &str = "achievements";
    pub const EXPLORATION: &str = "exploration";
}

use collections::*;

// ─── Users ───────────────────────────────────────────────────────────────────

impl ApiClient {
    pub async fn list_users(&self, page: Page) -> Result<Vec<User>> {
        self.list(&format!("/{USERS}"), page).await
    }

    pub async fn get_user(&self, user_id: &str) -> Result<User> {
        self.get(&resource_path(USERS, user_id)).await
    }

    pub async fn update_user(&self, user_id: &str, update: &UserUpdate) -> Result<User> {
        self.put(&resource_path(USERS, user_id), update).await
    }

    pub async fn delete_user(&self, user_id: &str) -> Result<User> {
        self.delete(&resource_path(USERS, user_id)).await
    }
}

// ─── Groups ──────────────────────────────────────────────────────────────────

impl ApiClient {
    pub async fn list_groups(&self, page: Page) -> Result<Vec<Group>> {
        self.list(&format!("/{GROUPS}"), page).await
    }

    pub async fn get_group(&self, group_id: &str) -> Result<Group> {
        self.get(&resource_path(GROUPS, group_id)).await
    }

    pub async fn create_group(&self, group: &GroupCreate) -> Result<Group> {
        self.post(&format!("/{GROUPS}"), group).await
    }

    pub async fn update_group(&self, group_id: &str, update: &GroupUpdate) -> Result<Group> {
        self.put(&resource_path(GROUPS, group_id), update).await
    }

    pub async fn delete_group(&self, group_id: &str) -> Result<Group> {
        self.delete(&resource_path(GROUPS, group_id)).await
    }
}

// ─── Goals ───────────────────────────────────────────────────────────────────

impl ApiClient {
    pub async fn list_goals(&self, page: Page) -> Result<Vec<Goal>> {
        self.list(&format!("/{GOALS}"), page).await
    }

    pub async fn get_goal(&self, goal_id: &str) -> Result<Goal> {
        self.get(&resource_path(GOALS, goal_id)).await
    }

    pub async fn create_goal(&self, goal: &GoalCreate) -> Result<Goal> {
        self.post(&format!("/{GOALS}"), goal).await
    }

    pub async fn update_goal(&self, goal_id: &str, update: &GoalUpdate) -> Result<Goal> {
        self.put(&resource_path(GOALS, goal_id), update).await
    }

    pub async fn delete_goal(&self, goal_id: &str) -> Result<Goal> {
        self.delete(&resource_path(GOALS, goal_id)).await
    }
}

// ─── Focus sessions ──────────────────────────────────────────────────────────

impl ApiClient {
    pub async fn list_focus_sessions(&self, page: Page) -> Result<Vec<FocusSession>> {
        self.list(&format!("/{FOCUS_SESSIONS}"), page).await
    }

    pub async fn get_focus_session(&self, session_id: &str) -> Result<FocusSession> {
        self.get(&resource_path(FOCUS_SESSIONS, session_id)).await
    }

    pub async fn create_focus_session(&self, session: &FocusSessionCreate) -> Result<FocusSession> {
        self.post(&format!("/{FOCUS_SESSIONS}"), session).await
    }

    pub async fn update_focus_session(
        &self,
        session_id: &str,
        update: &FocusSessionUpdate,
    ) -> Result<FocusSession> {
        self.put(&resource_path(FOCUS_SESSIONS, session_id), update)
            .await
    }

    pub async fn delete_focus_session(&self, session_id: &str) -> Result<FocusSession> {
        self.delete(&resource_path(FOCUS_SESSIONS, session_id)).await
    }
}

// ─── Achievements ────────────────────────────────────────────────────────────

impl ApiClient {
    pub async fn list_achievements(&self, page: Page) -> Result<Vec<Achievement>> {
        self.list(&format!("/{ACHIEVEMENTS}"), page).await
    }

    pub async fn get_achievement(&self, achievement_id: &str) -> Result<Achievement> {
        self.get(&resource_path(ACHIEVEMENTS, achievement_id)).await
    }
}

// ─── Exploration ─────────────────────────────────────────────────────────────

impl ApiClient {
    pub async fn get_exploration_state(&self, user_id: &str) -> Result<ExplorationState> {
        self.get(&resource_path(EXPLORATION, user_id)).await
    }

    pub async fn update_exploration_state(
        &self,
        user_id: &str,
        update: &ExplorationStateUpdate,
    ) -> Result<ExplorationState> {
        self.put(&resource_path(EXPLORATION, user_id), update).await
    }
}
