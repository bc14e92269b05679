// Copyright (c) 2026, Carta contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides coordinate transformations between map units and
//! screen pixels, plus the hit tests used for feature selection.

use crate::models::feature::{Feature, FeatureKind, MapPoint};

/// Convert a point in map units to screen coordinates within `rect`.
pub fn map_to_screen(
    p: MapPoint,
    rect: &egui::Rect,
    center: MapPoint,
    scale: f32,
) -> egui::Pos2 {
    egui::pos2(
        rect.center().x + ((p.x - center.x) * scale as f64) as f32,
        rect.center().y + ((p.y - center.y) * scale as f64) as f32,
    )
}

/// Convert a screen position within `rect` to map units.
pub fn screen_to_map(
    pos: egui::Pos2,
    rect: &egui::Rect,
    center: MapPoint,
    scale: f32,
) -> MapPoint {
    MapPoint::new(
        center.x + ((pos.x - rect.center().x) / scale) as f64,
        center.y + ((pos.y - rect.center().y) / scale) as f64,
    )
}

/// Distance from `p` to the segment `a`-`b`, in map units.
pub fn dist_to_segment(p: MapPoint, a: MapPoint, b: MapPoint) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return ((p.x - a.x).powi(2) + (p.y - a.y).powi(2)).sqrt();
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0);
    let (cx, cy) = (a.x + t * dx, a.y + t * dy);
    ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}

/// Even-odd point-in-polygon test.
pub fn point_in_polygon(p: MapPoint, vertices: &[MapPoint]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (vi, vj) = (vertices[i], vertices[j]);
        if (vi.y > p.y) != (vj.y > p.y)
            && p.x < (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Test whether `p` hits the feature within `tolerance` map units.
pub fn hit_test(feature: &Feature, p: MapPoint, tolerance: f64) -> bool {
    let vs = &feature.vertices;
    match feature.kind {
        FeatureKind::Point => vs
            .first()
            .is_some_and(|v| dist_to_segment(p, *v, *v) <= tolerance),
        FeatureKind::LineString => vs
            .windows(2)
            .any(|w| dist_to_segment(p, w[0], w[1]) <= tolerance),
        FeatureKind::Polygon => {
            if point_in_polygon(p, vs) {
                return true;
            }
            if vs.is_empty() {
                return false;
            }
            // Near an edge counts too, including the closing edge.
            let n = vs.len();
            (0..n).any(|i| dist_to_segment(p, vs[i], vs[(i + 1) % n]) <= tolerance)
        }
    }
}

/// Index of the first vertex of `feature` within `tolerance` of `p`.
pub fn nearest_vertex(feature: &Feature, p: MapPoint, tolerance: f64) -> Option<usize> {
    feature
        .vertices
        .iter()
        .position(|v| dist_to_segment(p, *v, *v) <= tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_screen_roundtrip() {
        let rect = egui::Rect::from_min_size(egui::pos2(10.0, 20.0), egui::vec2(800.0, 600.0));
        let center = MapPoint::new(100.0, -40.0);
        let scale = 2.5;

        let p = MapPoint::new(123.0, -7.5);
        let screen = map_to_screen(p, &rect, center, scale);
        let back = screen_to_map(screen, &rect, center, scale);

        assert!((back.x - p.x).abs() < 0.001);
        assert!((back.y - p.y).abs() < 0.001);
    }

    #[test]
    fn test_map_center_maps_to_rect_center() {
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(400.0, 400.0));
        let center = MapPoint::new(5.0, 5.0);
        let screen = map_to_screen(center, &rect, center, 1.0);
        assert_eq!(screen, rect.center());
    }

    #[test]
    fn test_dist_to_segment() {
        let a = MapPoint::new(0.0, 0.0);
        let b = MapPoint::new(10.0, 0.0);
        assert!((dist_to_segment(MapPoint::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-9);
        // Beyond the endpoint the distance is to the endpoint itself.
        assert!((dist_to_segment(MapPoint::new(13.0, 4.0), a, b) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_in_polygon() {
        let square = [
            MapPoint::new(0.0, 0.0),
            MapPoint::new(10.0, 0.0),
            MapPoint::new(10.0, 10.0),
            MapPoint::new(0.0, 10.0),
        ];
        assert!(point_in_polygon(MapPoint::new(5.0, 5.0), &square));
        assert!(!point_in_polygon(MapPoint::new(15.0, 5.0), &square));
        assert!(!point_in_polygon(MapPoint::new(5.0, 5.0), &square[..2]));
    }

    #[test]
    fn test_hit_test_line() {
        let mut line = Feature::new("line 1".to_string(), FeatureKind::LineString);
        line.add_vertex(MapPoint::new(0.0, 0.0));
        line.add_vertex(MapPoint::new(10.0, 0.0));

        assert!(hit_test(&line, MapPoint::new(5.0, 1.0), 2.0));
        assert!(!hit_test(&line, MapPoint::new(5.0, 5.0), 2.0));
    }

    #[test]
    fn test_nearest_vertex() {
        let mut poly = Feature::new("region 1".to_string(), FeatureKind::Polygon);
        poly.add_vertex(MapPoint::new(0.0, 0.0));
        poly.add_vertex(MapPoint::new(10.0, 0.0));
        poly.add_vertex(MapPoint::new(10.0, 10.0));

        assert_eq!(nearest_vertex(&poly, MapPoint::new(9.5, 0.5), 1.0), Some(1));
        assert_eq!(nearest_vertex(&poly, MapPoint::new(5.0, 5.0), 1.0), None);
    }
}
