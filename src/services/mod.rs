// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - API access and client-side state.

pub mod api;
pub mod dashboard;
pub mod geolocation;
pub mod locale;
pub mod regions;
pub mod resources;
pub mod session;

pub use api::{ApiClient, Page};
pub use dashboard::{Dashboard, DashboardService};
pub use geolocation::{Coordinates, FixedPosition, Geolocator, HttpGeolocator, Unavailable};
pub use locale::{LocaleInit, LocaleSource, LocaleStore, Resolution};
pub use regions::RegionMap;
pub use session::{Session, SessionCell, SessionState, SessionStore};
