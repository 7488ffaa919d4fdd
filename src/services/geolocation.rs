// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Geolocation providers used by locale detection.

use futures_util::future::BoxFuture;
use serde::Deserialize;

/// A WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Returns `None` when either component is out of range or not finite.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        valid.then_some(Self {
            latitude,
            longitude,
        })
    }

    pub fn to_point(self) -> geo::Point<f64> {
        geo::Point::new(self.longitude, self.latitude)
    }
}

/// Source of the device position.
pub trait Geolocator: Send + Sync {
    fn locate(&self) -> BoxFuture<'_, Result<Coordinates, GeolocationError>>;
}

/// Geolocation switched off or permission denied.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

impl Geolocator for Unavailable {
    fn locate(&self) -> BoxFuture<'_, Result<Coordinates, GeolocationError>> {
        Box::pin(async { Err(GeolocationError::Unavailable) })
    }
}

/// Always reports the same position (from configuration).
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coordinates);

impl Geolocator for FixedPosition {
    fn locate(&self) -> BoxFuture<'_, Result<Coordinates, GeolocationError>> {
        let position = self.0;
        Box::pin(async move { Ok(position) })
    }
}

/// Asks an HTTP endpoint (IP geolocation service) for the position.
///
/// The endpoint must answer with a JSON object carrying `latitude` and
/// `longitude` fields.
#[derive(Clone)]
pub struct HttpGeolocator {
    http: reqwest::Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct PositionResponse {
    latitude: f64,
    longitude: f64,
}

impl HttpGeolocator {
    pub fn new(url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            url,
        }
    }

    async fn fetch(&self) -> Result<Coordinates, GeolocationError> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| GeolocationError::Lookup(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GeolocationError::Lookup(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body: PositionResponse = response
            .json()
            .await
            .map_err(|e| GeolocationError::Lookup(format!("JSON parse error: {}", e)))?;

        Coordinates::new(body.latitude, body.longitude).ok_or(GeolocationError::OutOfRange)
    }
}

impl Geolocator for HttpGeolocator {
    fn locate(&self) -> BoxFuture<'_, Result<Coordinates, GeolocationError>> {
        Box::pin(self.fetch())
    }
}

/// Errors from geolocation lookups.
#[derive(Debug, thiserror::Error)]
pub enum GeolocationError {
    #[error("Geolocation unavailable")]
    Unavailable,

    #[error("Geolocation lookup failed: {0}")]
    Lookup(String),

    #[error("Geolocation returned coordinates out of range")]
    OutOfRange,
}
