// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model and authentication payloads.

use serde::{Deserialize, Serialize};

/// User profile as returned by the Orbitah API.
///
/// Also cached in durable storage as the `user` snapshot; the snapshot is
/// never trusted over a live `/auth/me` result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routine_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_preference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_points: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streak_days: Option<i64>,
}

/// Registration payload for `POST /auth/register`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routine_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_preference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_location: Option<String>,
}

/// Partial profile update for `PUT /users/{id}`. Unset fields are omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routine_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_preference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_points: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streak_days: Option<i64>,
}

/// Credentials for `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLogin {
    pub email: String,
    pub password: String,
}

/// Bearer token issued by `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime in seconds, as declared by the backend.
    pub expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_accepts_missing_optional_fields() {
        let user: User = serde_json::from_str(
            r#"{"id":"u1","username":"nova","email":"nova@orbitah.dev"}"#,
        )
        .unwrap();

        assert_eq!(user.username, "nova");
        assert!(user.rank.is_none());
        assert!(user.experience_points.is_none());
    }

    #[test]
    fn test_user_update_omits_unset_fields() {
        let update = UserUpdate {
            rank: Some("Explorer".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "rank": "Explorer" }));
    }
}
