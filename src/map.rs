// Copyright (c) 2026, Carta contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Map view state.
//!
//! The viewer is the map's default pan/zoom/select interaction mode. It is
//! suspended while an editing action is active and restored when the action
//! finishes.

use crate::models::feature::MapPoint;

const DEFAULT_SCALE: f32 = 1.0;
const MIN_SCALE: f32 = 0.05;
const MAX_SCALE: f32 = 50.0;

/// Interface the toolbar and editor use to talk to the map view.
pub trait MapView {
    /// Stable identifier used to namespace widgets attached to this map.
    fn map_id(&self) -> &str;

    /// Suspend normal pan/zoom/select interaction while editing.
    fn disable_viewer(&mut self);

    /// Restore normal pan/zoom/select interaction.
    fn enable_viewer(&mut self);

    fn viewer_enabled(&self) -> bool;
}

/// Pan/zoom state of the map canvas.
pub struct MapViewport {
    map_id: String,
    pub center: MapPoint,
    pub scale: f32,
    viewer_enabled: bool,
}

impl MapViewport {
    pub fn new(map_id: &str) -> Self {
        Self {
            map_id: map_id.to_string(),
            center: MapPoint::new(0.0, 0.0),
            scale: DEFAULT_SCALE,
            viewer_enabled: true,
        }
    }

    /// Pan the view by a screen-space delta.
    pub fn pan(&mut self, delta: egui::Vec2) {
        self.center.x -= (delta.x / self.scale) as f64;
        self.center.y -= (delta.y / self.scale) as f64;
    }

    /// Multiply the scale, clamped to a sane range.
    pub fn zoom_by(&mut self, factor: f32) {
        self.scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
    }

    pub fn zoom_in(&mut self) {
        self.zoom_by(1.25);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_by(0.8);
    }

    pub fn reset_view(&mut self) {
        self.center = MapPoint::new(0.0, 0.0);
        self.scale = DEFAULT_SCALE;
    }
}

impl MapView for MapViewport {
    fn map_id(&self) -> &str {
        &self.map_id
    }

    fn disable_viewer(&mut self) {
        self.viewer_enabled = false;
    }

    fn enable_viewer(&mut self) {
        self.viewer_enabled = true;
    }

    fn viewer_enabled(&self) -> bool {
        self.viewer_enabled
    }
}
