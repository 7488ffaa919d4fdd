// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Orbitah client: sessions, locale and API access for the Orbitah
//! productivity game.
//!
//! All game rules live behind the Orbitah REST API. This crate keeps the
//! client-side state (who is signed in, which language to speak) and wraps
//! the API calls that the terminal views need.

pub mod config;
pub mod error;
pub mod i18n;
pub mod models;
pub mod services;
pub mod storage;
pub mod time_utils;
pub mod validation;
pub mod views;

use config::Config;
use services::{
    ApiClient, DashboardService, FixedPosition, Geolocator, HttpGeolocator, LocaleStore,
    RegionMap, SessionCell, SessionStore, Unavailable,
};
use std::sync::Arc;
use storage::{FileStore, KeyValueStore};

/// Client state, built once at startup and handed to every view.
pub struct ClientContext {
    pub config: Config,
    pub api: ApiClient,
    pub session: SessionStore,
    pub locale: Arc<LocaleStore>,
    pub dashboard: DashboardService,
}

impl ClientContext {
    /// Build the context from configuration, opening the storage file and
    /// loading language regions.
    pub fn new(config: Config) -> error::Result<Self> {
        let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&config.storage_path)?);

        let regions = match &config.locale_regions_path {
            Some(path) => RegionMap::load_from_file(path)
                .map_err(|e| error::ClientError::Internal(anyhow::anyhow!(e)))?,
            None => RegionMap::builtin(),
        };

        let geolocator: Arc<dyn Geolocator> =
            match (config.geo_position, config.geolocation_url.as_deref()) {
                (Some(position), _) => Arc::new(FixedPosition(position)),
                (None, Some(url)) => Arc::new(HttpGeolocator::new(url.to_string())),
                (None, None) => Arc::new(Unavailable),
            };

        Ok(Self::with_parts(config, storage, geolocator, regions))
    }

    /// Build the context over explicit parts (tests, embedding).
    pub fn with_parts(
        config: Config,
        storage: Arc<dyn KeyValueStore>,
        geolocator: Arc<dyn Geolocator>,
        regions: RegionMap,
    ) -> Self {
        let cell = Arc::new(SessionCell::new(Arc::clone(&storage)));
        let api = ApiClient::new(&config.api_base_url, cell);
        let session = SessionStore::new(api.clone());
        let locale = Arc::new(LocaleStore::new(
            storage,
            config.runtime_language.clone(),
            geolocator,
            regions,
        ));
        let dashboard = DashboardService::new(api.clone());

        Self {
            config,
            api,
            session,
            locale,
            dashboard,
        }
    }
}
