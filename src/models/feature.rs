// Copyright (c) 2026, Carta contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Map feature data structures.
//!
//! This module defines the core data structures for representing
//! point, line and polygon features in map coordinates.

use serde::{Deserialize, Serialize};

/// A 2D point in map units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub x: f64,
    pub y: f64,
}

impl MapPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Geometry kind of a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Point,
    LineString,
    Polygon,
}

/// A map feature with a name and vertices in map units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FeatureKind,
    pub vertices: Vec<MapPoint>,
}

impl Feature {
    /// Create a new feature with the given name and kind.
    pub fn new(name: String, kind: FeatureKind) -> Self {
        Self {
            name,
            kind,
            vertices: Vec::new(),
        }
    }

    /// Add a vertex to the feature.
    pub fn add_vertex(&mut self, point: MapPoint) {
        self.vertices.push(point);
    }

    /// Replace the vertex at `index`, ignoring out-of-range indices.
    pub fn update_vertex(&mut self, index: usize, point: MapPoint) {
        if let Some(v) = self.vertices.get_mut(index) {
            *v = point;
        }
    }

    /// Translate every vertex by the given delta.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        for v in &mut self.vertices {
            v.x += dx;
            v.y += dy;
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Check if the feature's outline is closed (polygon).
    pub fn is_closed(&self) -> bool {
        matches!(self.kind, FeatureKind::Polygon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_moves_all_vertices() {
        let mut feature = Feature::new("road 1".to_string(), FeatureKind::LineString);
        feature.add_vertex(MapPoint::new(0.0, 0.0));
        feature.add_vertex(MapPoint::new(10.0, 5.0));

        feature.translate(2.0, -1.0);

        assert_eq!(feature.vertices[0], MapPoint::new(2.0, -1.0));
        assert_eq!(feature.vertices[1], MapPoint::new(12.0, 4.0));
    }

    #[test]
    fn test_update_vertex_out_of_range_is_ignored() {
        let mut feature = Feature::new("point 1".to_string(), FeatureKind::Point);
        feature.add_vertex(MapPoint::new(1.0, 1.0));

        feature.update_vertex(5, MapPoint::new(9.0, 9.0));

        assert_eq!(feature.vertex_count(), 1);
        assert_eq!(feature.vertices[0], MapPoint::new(1.0, 1.0));
    }
}
