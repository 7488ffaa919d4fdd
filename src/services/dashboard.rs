// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard view model for the signed-in user.

use super::api::{ApiClient, Page};
use crate::error::Result;
use crate::models::{Achievement, ExplorationState, FocusSession, Goal, Group, User};

/// Everything the dashboard shows.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub user: User,
    /// Goals created by or assigned to the user
    pub goals: Vec<Goal>,
    pub focus_sessions: Vec<FocusSession>,
    pub group: Option<Group>,
    /// Full achievement catalogue
    pub achievements: Vec<Achievement>,
    /// `None` until the user starts exploring
    pub exploration: Option<ExplorationState>,
}

impl Dashboard {
    pub fn experience_points(&self) -> i64 {
        self.user.experience_points.unwrap_or(0)
    }

    pub fn streak_days(&self) -> i64 {
        self.user.streak_days.unwrap_or(0)
    }

    pub fn active_goals(&self) -> usize {
        self.goals.iter().filter(|g| !g.is_completed()).count()
    }

    pub fn completed_goals(&self) -> usize {
        self.goals.iter().filter(|g| g.is_completed()).count()
    }

    pub fn focus_minutes(&self) -> i64 {
        self.focus_sessions.iter().map(|s| s.duration.max(0)).sum()
    }

    pub fn unlocked_achievements(&self) -> usize {
        let Some(exploration) = &self.exploration else {
            return 0;
        };
        self.achievements
            .iter()
            .filter(|a| exploration.has_achievement(&a.code))
            .count()
    }

    pub fn unlocked_locations(&self) -> usize {
        self.exploration
            .as_ref()
            .map_or(0, |e| e.unlocked_locations.len())
    }
}

/// Loads dashboards from the API.
#[derive(Clone)]
pub struct DashboardService {
    api: ApiClient,
}

impl DashboardService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetch all dashboard data for `user`. Independent requests run
    /// concurrently; the first failure aborts the load.
    pub async fn load(&self, user: &User) -> Result<Dashboard> {
        let page = Page::default();

        let (goals, focus_sessions, achievements, group, exploration) = tokio::try_join!(
            self.api.list_goals(page),
            self.api.list_focus_sessions(page),
            self.api.list_achievements(page),
            self.load_group(user),
            self.load_exploration(user),
        )?;

        let goals: Vec<Goal> = goals.into_iter().filter(|g| g.involves(&user.id)).collect();
        let focus_sessions: Vec<FocusSession> = focus_sessions
            .into_iter()
            .filter(|s| s.user_id == user.id)
            .collect();

        tracing::debug!(
            user_id = %user.id,
            goals = goals.len(),
            focus_sessions = focus_sessions.len(),
            "Dashboard loaded"
        );

        Ok(Dashboard {
            user: user.clone(),
            goals,
            focus_sessions,
            group,
            achievements,
            exploration,
        })
    }

    async fn load_group(&self, user: &User) -> Result<Option<Group>> {
        let Some(group_id) = user.group_id.as_deref().filter(|id| !id.is_empty()) else {
            return Ok(None);
        };
        match self.api.get_group(group_id).await {
            Ok(group) => Ok(Some(group)),
            Err(e) if e.is_not_found() => {
                tracing::warn!(group_id, "User's group no longer exists");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn load_exploration(&self, user: &User) -> Result<Option<ExplorationState>> {
        match self.api.get_exploration_state(&user.id).await {
            Ok(state) => Ok(Some(state)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}
