// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Locale store: which language the client speaks.
//!
//! Initial resolution, first match wins:
//! 1. persisted `preferredLanguage`, if supported
//! 2. the runtime language (primary subtag), if supported
//! 3. geolocation against the language regions (asynchronous)
//! 4. the default, `en`
//!
//! Steps 1, 2 and 4 are applied immediately. Step 3 only runs when neither
//! 1 nor 2 matched, and its answer lands later: last write wins.
//!
//! Only a runtime or geolocation match is persisted; a fallback to the
//! default never is, so a later launch still gets to run step 3.

use super::geolocation::Geolocator;
use super::regions::RegionMap;
use crate::error::{ClientError, Result};
use crate::i18n::{self, Language};
use crate::storage::{keys, KeyValueStore};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Where the initial language came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleSource {
    Stored,
    Runtime,
    Geolocation,
    Default,
}

/// Outcome of the synchronous part of locale resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub language: &'static Language,
    pub source: LocaleSource,
}

impl Resolution {
    /// Whether the geolocation step still has a say.
    pub fn awaits_geolocation(&self) -> bool {
        self.source == LocaleSource::Default
    }

    /// Whether applying this resolution should write `preferredLanguage`.
    pub fn should_persist(&self) -> bool {
        matches!(self.source, LocaleSource::Runtime | LocaleSource::Geolocation)
    }
}

/// Result of [`LocaleStore::initialize`].
pub struct LocaleInit {
    /// The language applied synchronously
    pub resolution: Resolution,
    /// Geolocation refinement still running, if any
    pub refinement: Option<JoinHandle<()>>,
}

/// Locale store.
pub struct LocaleStore {
    storage: Arc<dyn KeyValueStore>,
    runtime_language: Option<String>,
    geolocator: Arc<dyn Geolocator>,
    regions: RegionMap,
    current: watch::Sender<&'static Language>,
}

impl LocaleStore {
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        runtime_language: Option<String>,
        geolocator: Arc<dyn Geolocator>,
        regions: RegionMap,
    ) -> Self {
        let (current, _) = watch::channel(i18n::default_language());
        Self {
            storage,
            runtime_language,
            geolocator,
            regions,
            current,
        }
    }

    pub fn current_language(&self) -> &'static Language {
        *self.current.borrow()
    }

    pub fn current_code(&self) -> &'static str {
        self.current_language().code
    }

    pub fn available_languages(&self) -> &'static [&'static Language] {
        i18n::available_languages()
    }

    /// Receiver that observes every language change (re-render hook).
    pub fn subscribe(&self) -> watch::Receiver<&'static Language> {
        self.current.subscribe()
    }

    /// Switch language and persist the choice.
    ///
    /// The in-memory language changes even if persisting fails; the storage
    /// error is still returned.
    pub fn change_language(&self, code: &str) -> Result<&'static Language> {
        let language = i18n::find_language(code)
            .ok_or_else(|| ClientError::UnsupportedLanguage(code.to_string()))?;

        self.current.send_replace(language);
        self.storage.set(keys::PREFERRED_LANGUAGE, language.code)?;

        tracing::debug!(language = language.code, "Language changed");
        Ok(language)
    }

    /// Apply a detected language, persisting it only when
    /// [`Resolution::should_persist`] says so.
    pub fn apply(&self, resolution: Resolution) {
        self.current.send_replace(resolution.language);
        if !resolution.should_persist() {
            return;
        }
        if let Err(e) = self
            .storage
            .set(keys::PREFERRED_LANGUAGE, resolution.language.code)
        {
            tracing::warn!(error = %e, "Failed to persist detected language");
        }
    }

    /// Synchronous precedence chain (steps 1, 2 and 4).
    pub fn detect(&self) -> Resolution {
        if let Some(language) = self.stored_preference() {
            return Resolution {
                language,
                source: LocaleSource::Stored,
            };
        }

        if let Some(language) = self.runtime_match() {
            return Resolution {
                language,
                source: LocaleSource::Runtime,
            };
        }

        Resolution {
            language: i18n::default_language(),
            source: LocaleSource::Default,
        }
    }

    /// Geolocation step.
    ///
    /// - position inside a region of a supported language: that language
    /// - position outside every region: `None` (keep what is applied)
    /// - lookup failed: the runtime language if supported, else the default
    pub async fn detect_from_position(&self) -> Option<Resolution> {
        match self.geolocator.locate().await {
            Ok(position) => {
                let code = self.regions.language_at(position)?;
                let language = i18n::find_language(code)?;
                tracing::debug!(
                    latitude = position.latitude,
                    longitude = position.longitude,
                    language = code,
                    "Position matched a language region"
                );
                Some(Resolution {
                    language,
                    source: LocaleSource::Geolocation,
                })
            }
            Err(e) => {
                tracing::debug!(error = %e, "Geolocation failed, using fallback language");
                Some(match self.runtime_match() {
                    Some(language) => Resolution {
                        language,
                        source: LocaleSource::Runtime,
                    },
                    None => Resolution {
                        language: i18n::default_language(),
                        source: LocaleSource::Default,
                    },
                })
            }
        }
    }

    /// Resolve and apply the initial language.
    ///
    /// The synchronous result is applied before this returns. When the chain
    /// fell through to the default, a task is spawned that may override it
    /// once geolocation answers.
    pub fn initialize(self: &Arc<Self>) -> LocaleInit {
        let resolution = self.detect();

        self.apply(resolution);
        tracing::info!(
            language = resolution.language.code,
            source = ?resolution.source,
            "Language resolved"
        );

        let refinement = resolution.awaits_geolocation().then(|| {
            let store = Arc::clone(self);
            tokio::spawn(async move {
                let Some(refined) = store.detect_from_position().await else {
                    return;
                };
                if refined.language != store.current_language() {
                    tracing::info!(
                        language = refined.language.code,
                        source = ?refined.source,
                        "Language refined"
                    );
                }
                store.apply(refined);
            })
        });

        LocaleInit {
            resolution,
            refinement,
        }
    }

    fn stored_preference(&self) -> Option<&'static Language> {
        match self.storage.get(keys::PREFERRED_LANGUAGE) {
            Ok(Some(code)) => i18n::find_language(&code),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read language preference");
                None
            }
        }
    }

    fn runtime_match(&self) -> Option<&'static Language> {
        let tag = self.runtime_language.as_deref()?;
        i18n::find_language(&i18n::primary_subtag(tag))
    }
}
