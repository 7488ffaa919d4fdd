// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed access to the persisted credential keys.

use super::{keys, KeyValueStore, StorageError};
use crate::models::{Token, User};
use crate::time_utils::format_utc_rfc3339;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

/// View over a [`KeyValueStore`] for the bearer token, its declared expiry
/// and the cached user snapshot.
#[derive(Clone)]
pub struct CredentialStore {
    storage: Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    pub fn token(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .storage
            .get(keys::ACCESS_TOKEN)?
            .filter(|t| !t.is_empty()))
    }

    /// Declared expiry of the stored token. Unparseable values read as `None`.
    pub fn expires_at(&self) -> Result<Option<DateTime<Utc>>, StorageError> {
        let Some(raw) = self.storage.get(keys::ACCESS_TOKEN_EXPIRES_AT)? else {
            return Ok(None);
        };
        match DateTime::parse_from_rfc3339(&raw) {
            Ok(dt) => Ok(Some(dt.with_timezone(&Utc))),
            Err(e) => {
                tracing::warn!(error = %e, value = %raw, "Ignoring unparseable token expiry");
                Ok(None)
            }
        }
    }

    /// Whether the stored token's declared expiry has passed.
    /// Tokens without a recorded expiry are assumed live.
    pub fn is_expired(&self, now: DateTime<Utc>) -> Result<bool, StorageError> {
        Ok(self.expires_at()?.is_some_and(|exp| exp <= now))
    }

    pub fn set_user(&self, user: &User) -> Result<(), StorageError> {
        let json =
            serde_json::to_string(user).map_err(|e| StorageError::Serialize(e.to_string()))?;
        self.storage.set(keys::USER, &json)
    }

    /// Persist a confirmed token/user pair.
    pub fn store(&self, token: &Token, user: &User) -> Result<(), StorageError> {
        let expires_at = Utc::now() + Duration::seconds(token.expires_in.max(0));

        self.storage.set(keys::ACCESS_TOKEN, &token.access_token)?;
        self.storage
            .set(keys::ACCESS_TOKEN_EXPIRES_AT, &format_utc_rfc3339(expires_at))?;
        self.set_user(user)
    }

    /// Remove token, expiry and user snapshot.
    ///
    /// Every key is attempted even if an earlier removal fails; the first
    /// error is returned.
    pub fn clear(&self) -> Result<(), StorageError> {
        let results = [
            self.storage.remove(keys::ACCESS_TOKEN),
            self.storage.remove(keys::ACCESS_TOKEN_EXPIRES_AT),
            self.storage.remove(keys::USER),
        ];
        results.into_iter().collect()
    }
}
