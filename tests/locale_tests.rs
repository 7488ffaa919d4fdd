// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Locale resolution tests: persisted choice, runtime language and
//! geolocation refinement.

mod common;

use axum::{routing::get, Json, Router};
use common::{client_with, UNREACHABLE_URL};
use futures_util::future::BoxFuture;
use orbitah_client::services::geolocation::GeolocationError;
use orbitah_client::services::{
    Coordinates, FixedPosition, Geolocator, HttpGeolocator, LocaleSource, Unavailable,
};
use orbitah_client::storage::{keys, KeyValueStore, MemoryStore};
use std::sync::Arc;
use tokio::sync::Notify;

/// Answers only after `release` is notified.
struct SlowGeolocator {
    position: Coordinates,
    release: Arc<Notify>,
}

impl Geolocator for SlowGeolocator {
    fn locate(&self) -> BoxFuture<'_, Result<Coordinates, GeolocationError>> {
        Box::pin(async move {
            self.release.notified().await;
            Ok(self.position)
        })
    }
}

fn madrid() -> Coordinates {
    Coordinates::new(40.4168, -3.7038).unwrap()
}

#[tokio::test]
async fn test_change_language_survives_reload() {
    let storage = MemoryStore::new();
    let runtime = Some("en_US.UTF-8");

    let first = client_with(UNREACHABLE_URL, &storage, runtime, Arc::new(Unavailable));
    first.locale.initialize();
    assert_eq!(first.locale.current_code(), "en");
    first.locale.change_language("es").unwrap();
    assert_eq!(
        storage.get(keys::PREFERRED_LANGUAGE).unwrap().as_deref(),
        Some("es")
    );

    let second = client_with(UNREACHABLE_URL, &storage, runtime, Arc::new(Unavailable));
    let init = second.locale.initialize();
    assert_eq!(init.resolution.source, LocaleSource::Stored);
    assert_eq!(second.locale.current_code(), "es");
}

#[tokio::test]
async fn test_denied_geolocation_keeps_default() {
    let storage = MemoryStore::new();
    let ctx = client_with(UNREACHABLE_URL, &storage, None, Arc::new(Unavailable));

    let init = ctx.locale.initialize();
    assert_eq!(ctx.locale.current_code(), "en");

    init.refinement
        .expect("Default language should wait for geolocation")
        .await
        .unwrap();
    assert_eq!(ctx.locale.current_code(), "en");
    assert!(storage.get(keys::PREFERRED_LANGUAGE).unwrap().is_none());
}

#[tokio::test]
async fn test_stored_spanish_wins_over_runtime_and_position() {
    let storage = MemoryStore::new();
    storage.set(keys::PREFERRED_LANGUAGE, "es").unwrap();
    let paris = Coordinates::new(48.8566, 2.3522).unwrap();

    let ctx = client_with(
        UNREACHABLE_URL,
        &storage,
        Some("en_US.UTF-8"),
        Arc::new(FixedPosition(paris)),
    );
    let init = ctx.locale.initialize();

    assert!(init.refinement.is_none());
    assert_eq!(ctx.locale.current_code(), "es");
}

#[tokio::test]
async fn test_runtime_language_skips_geolocation() {
    let storage = MemoryStore::new();
    let ctx = client_with(
        UNREACHABLE_URL,
        &storage,
        Some("es_MX.UTF-8"),
        Arc::new(FixedPosition(madrid())),
    );

    let init = ctx.locale.initialize();

    assert_eq!(init.resolution.source, LocaleSource::Runtime);
    assert!(init.refinement.is_none());
    assert_eq!(ctx.locale.current_code(), "es");
}

#[tokio::test]
async fn test_geolocation_refines_default_after_transient_english() {
    let storage = MemoryStore::new();
    let release = Arc::new(Notify::new());
    let geolocator = SlowGeolocator {
        position: madrid(),
        release: release.clone(),
    };
    let ctx = client_with(UNREACHABLE_URL, &storage, None, Arc::new(geolocator));
    let mut changes = ctx.locale.subscribe();

    let init = ctx.locale.initialize();

    // Transient default while the lookup is pending
    assert_eq!(ctx.locale.current_code(), "en");

    release.notify_one();
    init.refinement.unwrap().await.unwrap();

    assert_eq!(ctx.locale.current_code(), "es");
    assert_eq!(changes.borrow_and_update().code, "es");
    assert_eq!(
        storage.get(keys::PREFERRED_LANGUAGE).unwrap().as_deref(),
        Some("es")
    );
}

#[tokio::test]
async fn test_position_outside_regions_keeps_default() {
    let storage = MemoryStore::new();
    let tokyo = Coordinates::new(35.6762, 139.6503).unwrap();
    let ctx = client_with(
        UNREACHABLE_URL,
        &storage,
        None,
        Arc::new(FixedPosition(tokyo)),
    );

    let init = ctx.locale.initialize();
    init.refinement.unwrap().await.unwrap();

    assert_eq!(ctx.locale.current_code(), "en");
}

#[tokio::test]
async fn test_fallback_language_does_not_pin_later_launches() {
    let storage = MemoryStore::new();
    let tokyo = Coordinates::new(35.6762, 139.6503).unwrap();

    let first = client_with(UNREACHABLE_URL, &storage, None, Arc::new(FixedPosition(tokyo)));
    first.locale.initialize().refinement.unwrap().await.unwrap();
    assert_eq!(first.locale.current_code(), "en");
    assert!(storage.get(keys::PREFERRED_LANGUAGE).unwrap().is_none());

    // Next launch from Madrid still consults geolocation
    let second = client_with(UNREACHABLE_URL, &storage, None, Arc::new(FixedPosition(madrid())));
    let init = second.locale.initialize();
    assert_eq!(init.resolution.source, LocaleSource::Default);
    init.refinement.unwrap().await.unwrap();

    assert_eq!(second.locale.current_code(), "es");
    assert_eq!(
        storage.get(keys::PREFERRED_LANGUAGE).unwrap().as_deref(),
        Some("es")
    );
}

#[tokio::test]
async fn test_http_geolocator_reads_position() {
    let app = Router::new().route(
        "/json",
        get(|| async {
            Json(serde_json::json!({
                "ip": "203.0.113.7",
                "latitude": 19.4326,
                "longitude": -99.1332,
                "city": "Mexico City"
            }))
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let storage = MemoryStore::new();
    let geolocator = HttpGeolocator::new(format!("http://{addr}/json"));
    let ctx = client_with(UNREACHABLE_URL, &storage, None, Arc::new(geolocator));

    let init = ctx.locale.initialize();
    init.refinement.unwrap().await.unwrap();

    assert_eq!(ctx.locale.current_code(), "es");
}

#[tokio::test]
async fn test_unreachable_geolocator_falls_back() {
    let storage = MemoryStore::new();
    let geolocator = HttpGeolocator::new(format!("{UNREACHABLE_URL}/json"));
    let ctx = client_with(UNREACHABLE_URL, &storage, None, Arc::new(geolocator));

    let init = ctx.locale.initialize();
    init.refinement.unwrap().await.unwrap();

    assert_eq!(ctx.locale.current_code(), "en");
}
