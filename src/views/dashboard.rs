// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Plain-text dashboard.

use crate::i18n::{Language, Message};
use crate::services::Dashboard;
use crate::time_utils::{format_minutes, format_utc_rfc3339};
use std::fmt::Write;

const RULE_WIDTH: usize = 44;

fn card(out: &mut String, title: &str, lines: &[String]) {
    let _ = writeln!(out, "┌─ {title}");
    for line in lines {
        let _ = writeln!(out, "│  {line}");
    }
    let _ = writeln!(out, "└{}", "─".repeat(RULE_WIDTH));
}

/// Render the dashboard as card blocks in `language`.
pub fn render_dashboard(dashboard: &Dashboard, language: &Language) -> String {
    let t = |m: Message<'_>| m.localize(language);
    let user = &dashboard.user;
    let mut out = String::new();

    let _ = writeln!(out, "{}", t(Message::Welcome { username: &user.username }));
    let _ = writeln!(out);

    let rank = user
        .rank
        .clone()
        .unwrap_or_else(|| t(Message::DefaultRank));
    let location = user
        .current_location
        .clone()
        .unwrap_or_else(|| t(Message::UnknownLocation));

    card(
        &mut out,
        &t(Message::Profile),
        &[
            format!("{}: {}", t(Message::ExperiencePoints), dashboard.experience_points()),
            format!("{}: {}", t(Message::CurrentRank), rank),
            format!("{}: {}", t(Message::StreakDays), dashboard.streak_days()),
            format!("{}: {}", t(Message::Location), location),
        ],
    );

    let mut goal_lines = vec![t(Message::GoalsSummary {
        active: dashboard.active_goals(),
        completed: dashboard.completed_goals(),
    })];
    goal_lines.extend(
        dashboard
            .goals
            .iter()
            .filter(|g| !g.is_completed())
            .map(|g| match g.rewards_xp {
                Some(xp) if xp > 0 => format!("• {} (+{} XP)", g.title, xp),
                _ => format!("• {}", g.title),
            }),
    );
    card(&mut out, &t(Message::Goals), &goal_lines);

    let total = format_minutes(dashboard.focus_minutes());
    let mut focus_lines = vec![t(Message::FocusSummary {
        count: dashboard.focus_sessions.len(),
        total: &total,
    })];
    if let Some(session) = dashboard.focus_sessions.iter().max_by_key(|s| s.started_at) {
        focus_lines.push(format!(
            "↳ {} · {} · {}",
            format_utc_rfc3339(session.started_at),
            session.method,
            format_minutes(session.duration)
        ));
    }
    card(&mut out, &t(Message::FocusSessions), &focus_lines);

    let group_lines = match &dashboard.group {
        Some(group) => {
            let mut lines = vec![format!("{} [{}]", group.name, group.code)];
            if let Some(motto) = &group.motto {
                lines.push(format!("\"{motto}\""));
            }
            lines
        }
        None => vec![t(Message::GroupsEmpty)],
    };
    card(&mut out, &t(Message::Groups), &group_lines);

    card(
        &mut out,
        &t(Message::Achievements),
        &[t(Message::AchievementsSummary {
            unlocked: dashboard.unlocked_achievements(),
            total: dashboard.achievements.len(),
        })],
    );

    let exploration_line = match &dashboard.exploration {
        Some(_) => t(Message::ExplorationSummary {
            unlocked: dashboard.unlocked_locations(),
        }),
        None => t(Message::ExplorationNotStarted),
    };
    card(&mut out, &t(Message::Exploration), &[exploration_line]);

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{ENGLISH, SPANISH};
    use crate::models::User;

    fn empty_dashboard() -> Dashboard {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "u1", "username": "nova", "email": "nova@orbitah.dev"
        }))
        .unwrap();
        Dashboard {
            user,
            goals: vec![],
            focus_sessions: vec![],
            group: None,
            achievements: vec![],
            exploration: None,
        }
    }

    #[test]
    fn test_defaults_for_new_user() {
        let text = render_dashboard(&empty_dashboard(), &ENGLISH);
        assert!(text.starts_with("Welcome, nova!"));
        assert!(text.contains("Experience Points: 0"));
        assert!(text.contains("Current Rank: Novice"));
        assert!(text.contains("Streak Days: 0"));
        assert!(text.contains("Location: Unknown"));
        assert!(text.contains("Your journey has not started yet"));
    }

    #[test]
    fn test_latest_focus_session_shown() {
        let mut dashboard = empty_dashboard();
        dashboard.focus_sessions = serde_json::from_value(serde_json::json!([
            { "id": "f1", "user_id": "u1", "method": "pomodoro",
              "started_at": "2025-03-02T07:30:00", "duration": 25 },
            { "id": "f2", "user_id": "u1", "method": "deep_work",
              "started_at": "2025-03-02T09:00:00+01:00", "duration": 90 }
        ]))
        .unwrap();

        let text = render_dashboard(&dashboard, &ENGLISH);
        assert!(text.contains("2 sessions, 1h 55m focused"));
        assert!(text.contains("↳ 2025-03-02T08:00:00Z · deep_work · 1h 30m"));
    }

    #[test]
    fn test_spanish_labels() {
        let text = render_dashboard(&empty_dashboard(), &SPANISH);
        assert!(text.contains("Rango Actual: Novato"));
        assert!(text.contains("Únete o crea grupos de estudio"));
    }
}
