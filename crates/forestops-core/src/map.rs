//! Map model: markers, the forest boundary layer and the view cursor.
//!
//! Marker storage is an ordinary record list; `MapState` only carries what
//! the map view itself owns.

use std::cmp::Ordering;
use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use crate::error::ForestError;
use crate::list::{Draft, Record, SortKey};
use crate::validate::{self, FILL_ALL_FIELDS};

pub const LOCATION_DENIED: &str = "Permission to access location was denied";
pub const LEGEND: &str =
    "Green Area: Forest Boundary\nRed Markers: Points of Interest\nBlue Marker: Your Location";

/// Degrees moved per cursor step.
pub const CURSOR_STEP: f64 = 0.0002;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Planar squared distance; fine at forest scale.
    pub fn distance2(&self, other: &Coordinate) -> f64 {
        let dl = self.latitude - other.latitude;
        let dn = self.longitude - other.longitude;
        dl * dl + dn * dn
    }
}

pub const FOREST_BOUNDARY: [Coordinate; 4] = [
    Coordinate::new(37.78725, -122.4314),
    Coordinate::new(37.79125, -122.4314),
    Coordinate::new(37.79125, -122.4374),
    Coordinate::new(37.78725, -122.4374),
];

pub const INITIAL_CENTER: Coordinate = Coordinate::new(37.78825, -122.4324);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub id: String,
    pub title: String,
    pub description: String,
    pub coordinate: Coordinate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerSort {
    Title,
}

impl SortKey for MarkerSort {
    const ALL: &'static [Self] = &[MarkerSort::Title];

    fn label(&self) -> &'static str {
        "Title"
    }
}

impl Record for MapMarker {
    type Status = Infallible;
    type Key = MarkerSort;

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn label(&self) -> &str {
        &self.title
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.description]
    }

    fn compare(&self, other: &Self, _key: MarkerSort) -> Ordering {
        self.title.cmp(&other.title)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMarker {
    pub title: String,
    pub description: String,
    pub coordinate: Coordinate,
}

impl Draft<MapMarker> for NewMarker {
    fn build(self) -> Result<MapMarker, ForestError> {
        Ok(MapMarker {
            id: String::new(),
            title: validate::required(&self.title, FILL_ALL_FIELDS)?,
            description: validate::required(&self.description, FILL_ALL_FIELDS)?,
            coordinate: self.coordinate,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapType {
    #[default]
    Standard,
    Satellite,
}

impl MapType {
    pub fn toggled(&self) -> Self {
        match self {
            MapType::Standard => MapType::Satellite,
            MapType::Satellite => MapType::Standard,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MapType::Standard => "Standard",
            MapType::Satellite => "Satellite",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapState {
    pub map_type: MapType,
    pub boundary_visible: bool,
    pub user_location: Option<Coordinate>,
    pub cursor: Coordinate,
    pub selected: Option<String>,
}

impl Default for MapState {
    fn default() -> Self {
        Self {
            map_type: MapType::Standard,
            boundary_visible: true,
            user_location: None,
            cursor: INITIAL_CENTER,
            selected: None,
        }
    }
}

impl MapState {
    pub fn toggle_type(&mut self) {
        self.map_type = self.map_type.toggled();
    }

    pub fn toggle_boundary(&mut self) {
        self.boundary_visible = !self.boundary_visible;
    }

    /// Move the cursor by whole steps north (`dlat`) and east (`dlon`).
    pub fn nudge(&mut self, dlat: i32, dlon: i32) {
        self.cursor.latitude += f64::from(dlat) * CURSOR_STEP;
        self.cursor.longitude += f64::from(dlon) * CURSOR_STEP;
    }

    /// Select the marker closest to the cursor.
    pub fn select_nearest(&mut self, markers: &[MapMarker]) -> Option<String> {
        let cursor = self.cursor;
        self.selected = markers
            .iter()
            .min_by(|a, b| {
                a.coordinate
                    .distance2(&cursor)
                    .total_cmp(&b.coordinate.distance2(&cursor))
            })
            .map(|m| m.id.clone());
        self.selected.clone()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Bounds `(south, north, west, east)` that keep the boundary, every
    /// marker, the user and the cursor in view.
    pub fn bounds(&self, markers: &[MapMarker]) -> (f64, f64, f64, f64) {
        let points = FOREST_BOUNDARY
            .iter()
            .copied()
            .chain(markers.iter().map(|m| m.coordinate))
            .chain(self.user_location)
            .chain(std::iter::once(self.cursor));
        let (mut s, mut n, mut w, mut e) = (f64::MAX, f64::MIN, f64::MAX, f64::MIN);
        for p in points {
            s = s.min(p.latitude);
            n = n.max(p.latitude);
            w = w.min(p.longitude);
            e = e.max(p.longitude);
        }
        let pad_lat = (n - s).max(CURSOR_STEP) * 0.1;
        let pad_lon = (e - w).max(CURSOR_STEP) * 0.1;
        (s - pad_lat, n + pad_lat, w - pad_lon, e + pad_lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(id: &str, lat: f64, lon: f64) -> MapMarker {
        MapMarker {
            id: id.into(),
            title: format!("M{id}"),
            description: "d".into(),
            coordinate: Coordinate::new(lat, lon),
        }
    }

    #[test]
    fn toggles() {
        let mut s = MapState::default();
        assert!(s.boundary_visible);
        s.toggle_boundary();
        s.toggle_type();
        assert!(!s.boundary_visible);
        assert_eq!(s.map_type, MapType::Satellite);
        s.toggle_type();
        assert_eq!(s.map_type, MapType::Standard);
    }

    #[test]
    fn nearest_marker_is_selected() {
        let markers = vec![
            marker("1", 37.78825, -122.4324),
            marker("2", 37.78925, -122.4344),
        ];
        let mut s = MapState::default();
        s.cursor = Coordinate::new(37.7892, -122.4343);
        assert_eq!(s.select_nearest(&markers), Some("2".to_string()));
        assert_eq!(s.select_nearest(&[]), None);
    }

    #[test]
    fn marker_needs_title_and_description() {
        let err = NewMarker {
            title: "Sector D".into(),
            description: "".into(),
            coordinate: INITIAL_CENTER,
        }
        .build();
        assert_eq!(err, Err(ForestError::invalid(FILL_ALL_FIELDS)));
    }

    #[test]
    fn bounds_cover_boundary_and_cursor() {
        let mut s = MapState::default();
        s.nudge(100, 0);
        let (south, north, west, east) = s.bounds(&[]);
        assert!(north > s.cursor.latitude);
        assert!(south < 37.78725);
        assert!(west < -122.4374 && east > -122.4314);
    }
}
