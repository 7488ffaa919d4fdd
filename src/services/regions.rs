// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Language regions: which language a coordinate suggests.
//!
//! The built-in map is a handful of coarse bounding boxes around
//! Spanish-speaking territories. They overlap non-Spanish-speaking areas
//! (Brazil, Belize, the Guianas...), so a match is a hint, not a fact.

use super::geolocation::Coordinates;
use geo::{coord, Intersects, MultiPolygon, Polygon, Rect};
use geojson::GeoJson;
use std::fs;
use std::path::Path;

/// A named area associated with a language code.
#[derive(Debug, Clone)]
pub struct LanguageRegion {
    pub name: String,
    pub language: String,
    pub geometry: RegionGeometry,
}

/// Region geometry - a simple polygon or a multi-polygon.
#[derive(Debug, Clone)]
pub enum RegionGeometry {
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
}

impl RegionGeometry {
    /// Boundary points count as inside.
    pub fn contains(&self, point: &geo::Point<f64>) -> bool {
        match self {
            RegionGeometry::Polygon(p) => point.intersects(p),
            RegionGeometry::MultiPolygon(mp) => point.intersects(mp),
        }
    }
}

/// (name, min_lat, max_lat, min_lng, max_lng)
const BUILTIN_SPANISH_BOXES: [(&str, f64, f64, f64, f64); 5] = [
    ("Spain", 35.9, 43.8, -9.4, 3.3),
    ("Mexico", 14.5, 32.7, -118.4, -86.7),
    ("Central America", 7.2, 18.5, -92.2, -77.1),
    ("South America", -55.0, 12.0, -81.4, -34.8),
    ("Caribbean", 17.7, 23.2, -84.9, -61.2),
];

/// Ordered set of language regions. The first matching region wins.
#[derive(Debug, Clone, Default)]
pub struct RegionMap {
    regions: Vec<LanguageRegion>,
}

impl RegionMap {
    /// The built-in Spanish-speaking bounding boxes.
    pub fn builtin() -> Self {
        let regions = BUILTIN_SPANISH_BOXES
            .iter()
            .map(|&(name, min_lat, max_lat, min_lng, max_lng)| LanguageRegion {
                name: name.to_string(),
                language: "es".to_string(),
                geometry: RegionGeometry::Polygon(
                    Rect::new(
                        coord! { x: min_lng, y: min_lat },
                        coord! { x: max_lng, y: max_lat },
                    )
                    .to_polygon(),
                ),
            })
            .collect();
        Self { regions }
    }

    /// Load regions from a GeoJSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, RegionError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| RegionError::IoError(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Load regions from a GeoJSON `FeatureCollection` string.
    ///
    /// Each feature needs a `language` property; `name` is optional.
    /// Features without a language are skipped.
    pub fn load_from_json(json_data: &str) -> Result<Self, RegionError> {
        let geojson: GeoJson = json_data
            .parse()
            .map_err(|e: geojson::Error| RegionError::ParseError(e.to_string()))?;

        let GeoJson::FeatureCollection(collection) = geojson else {
            return Err(RegionError::NotAFeatureCollection);
        };

        let mut regions = Vec::new();
        for feature in collection.features {
            let language = feature
                .property("language")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();

            if language.is_empty() {
                continue;
            }

            let name = feature
                .property("name")
                .and_then(|v| v.as_str())
                .unwrap_or("Unknown")
                .to_string();

            if let Some(geom) = feature.geometry {
                let geometry = Self::convert_geometry(geom.value)?;
                regions.push(LanguageRegion {
                    name,
                    language,
                    geometry,
                });
            }
        }

        tracing::info!(count = regions.len(), "Loaded language regions");
        Ok(Self { regions })
    }

    fn convert_geometry(value: geojson::Value) -> Result<RegionGeometry, RegionError> {
        use std::convert::TryInto;

        let poly_result: Result<Polygon<f64>, _> = value.clone().try_into();
        if let Ok(poly) = poly_result {
            return Ok(RegionGeometry::Polygon(poly));
        }

        let multi_result: Result<MultiPolygon<f64>, _> = value.try_into();
        if let Ok(multi) = multi_result {
            return Ok(RegionGeometry::MultiPolygon(multi));
        }

        Err(RegionError::UnsupportedGeometry)
    }

    pub fn regions(&self) -> &[LanguageRegion] {
        &self.regions
    }

    /// First region containing `position`.
    pub fn region_at(&self, position: Coordinates) -> Option<&LanguageRegion> {
        let point = position.to_point();
        self.regions.iter().find(|r| r.geometry.contains(&point))
    }

    /// Language suggested by `position`, if any region contains it.
    pub fn language_at(&self, position: Coordinates) -> Option<&str> {
        self.region_at(position).map(|r| r.language.as_str())
    }
}

/// Errors from region loading.
#[derive(Debug, thiserror::Error)]
pub enum RegionError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to parse GeoJSON: {0}")]
    ParseError(String),

    #[error("Expected a GeoJSON FeatureCollection")]
    NotAFeatureCollection,

    #[error("Unsupported geometry type (expected Polygon or MultiPolygon)")]
    UnsupportedGeometry,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(lat: f64, lng: f64) -> Coordinates {
        Coordinates::new(lat, lng).unwrap()
    }

    #[test]
    fn test_builtin_matches_spanish_capitals() {
        let map = RegionMap::builtin();
        assert_eq!(map.language_at(at(40.42, -3.70)), Some("es")); // Madrid
        assert_eq!(map.language_at(at(19.43, -99.13)), Some("es")); // Mexico City
        assert_eq!(map.language_at(at(-34.60, -58.38)), Some("es")); // Buenos Aires
        assert_eq!(map.language_at(at(23.11, -82.37)), Some("es")); // Havana
    }

    #[test]
    fn test_builtin_misses_elsewhere() {
        let map = RegionMap::builtin();
        assert_eq!(map.language_at(at(51.51, -0.13)), None); // London
        assert_eq!(map.language_at(at(40.71, -74.01)), None); // New York
        assert_eq!(map.language_at(at(35.68, 139.69)), None); // Tokyo
    }

    #[test]
    fn test_box_edges_are_inclusive() {
        let map = RegionMap::builtin();
        assert_eq!(map.language_at(at(43.8, 3.3)), Some("es"));
        assert_eq!(map.language_at(at(35.9, -9.4)), Some("es"));
    }

    #[test]
    fn test_first_match_names_region() {
        let map = RegionMap::builtin();
        let region = map.region_at(at(40.42, -3.70)).unwrap();
        assert_eq!(region.name, "Spain");
    }

    #[test]
    fn test_load_from_json_skips_regions_without_language() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": { "name": "Nowhere" },
                    "geometry": { "type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,1],[0,0]]] }
                },
                {
                    "type": "Feature",
                    "properties": { "name": "Quebec", "language": "fr" },
                    "geometry": { "type": "Polygon", "coordinates": [[[-80,45],[-57,45],[-57,62],[-80,62],[-80,45]]] }
                }
            ]
        }"#;

        let map = RegionMap::load_from_json(json).unwrap();
        assert_eq!(map.regions().len(), 1);
        assert_eq!(map.language_at(at(46.8, -71.2)), Some("fr"));
    }

    #[test]
    fn test_load_rejects_bare_geometry() {
        let json = r#"{ "type": "Point", "coordinates": [0, 0] }"#;
        assert!(matches!(
            RegionMap::load_from_json(json),
            Err(RegionError::NotAFeatureCollection)
        ));
    }
}
