// Copyright (c) 2026, Carta contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Map canvas.
//!
//! This module renders the basemap, the document's feature layers and the
//! editor's in-progress sketch, and turns pointer input into canvas
//! actions. While the viewer is enabled, drags pan and scrolling zooms;
//! while it is suspended for editing, pointer input is reported to the
//! caller for the editor to consume.

use crate::map::{MapView, MapViewport};
use crate::models::document::MapDocument;
use crate::models::feature::{Feature, FeatureKind, MapPoint};
use crate::util::geometry;

const VERTEX_GRAB_PIXELS: f32 = 10.0;

/// Result of canvas interaction, in map coordinates.
pub enum CanvasAction {
    None,
    Clicked(MapPoint),
    DoubleClicked(MapPoint),
    DragStarted {
        at: MapPoint,
        /// Vertex of the selected feature under the pointer, if any.
        vertex: Option<usize>,
    },
    DragMoved(MapPoint),
    DragEnded,
}

/// Display the map canvas and handle pointer interactions.
pub fn show(
    ui: &mut egui::Ui,
    doc: &MapDocument,
    viewport: &mut MapViewport,
    basemap: &Option<egui::TextureHandle>,
    basemap_size: Option<(u32, u32)>,
    in_progress: Option<&Feature>,
) -> CanvasAction {
    let mut action = CanvasAction::None;
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available_size = ui.available_size();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        let center = viewport.center;
        let scale = viewport.scale;

        // Basemap raster, anchored at the map origin, one unit per pixel.
        if let (Some(texture), Some((w, h))) = (basemap, basemap_size) {
            let min = geometry::map_to_screen(MapPoint::new(0.0, 0.0), &rect, center, scale);
            let max = geometry::map_to_screen(
                MapPoint::new(w as f64, h as f64),
                &rect,
                center,
                scale,
            );
            painter.image(
                texture.id(),
                egui::Rect::from_min_max(min, max),
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }

        // Layers in render order, last on top.
        for (li, layer) in doc.layers.iter().enumerate() {
            if !layer.visible {
                continue;
            }
            for (fi, feature) in layer.features.iter().enumerate() {
                let selected = doc.selected
                    == Some(crate::models::document::FeatureRef {
                        layer: li,
                        feature: fi,
                    });
                let color = if selected {
                    egui::Color32::from_rgb(255, 165, 0)
                } else {
                    egui::Color32::YELLOW
                };
                draw_feature(&painter, feature, &rect, center, scale, color, selected, false);
            }
        }

        if let Some(sketch) = in_progress {
            draw_feature(
                &painter,
                sketch,
                &rect,
                center,
                scale,
                egui::Color32::LIGHT_BLUE,
                true,
                true,
            );
        }

        if viewport.viewer_enabled() {
            // Viewing mode: drag pans, scroll zooms, click selects.
            if response.dragged() {
                viewport.pan(response.drag_delta());
            }
            if response.hovered() {
                let scroll = ui.input(|i| i.raw_scroll_delta.y);
                if scroll != 0.0 {
                    viewport.zoom_by((scroll * 0.005).exp());
                }
            }
            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    action = CanvasAction::Clicked(geometry::screen_to_map(
                        pos, &rect, center, scale,
                    ));
                }
            }
        } else {
            // Editing mode: report pointer input for the editor.
            if let Some(pos) = response.interact_pointer_pos() {
                let p = geometry::screen_to_map(pos, &rect, center, scale);
                if response.drag_started() {
                    let tolerance = (VERTEX_GRAB_PIXELS / scale) as f64;
                    let vertex = doc
                        .selected
                        .and_then(|r| doc.feature(r))
                        .and_then(|f| geometry::nearest_vertex(f, p, tolerance));
                    action = CanvasAction::DragStarted { at: p, vertex };
                } else if response.dragged() {
                    action = CanvasAction::DragMoved(p);
                } else if response.clicked() {
                    action = CanvasAction::Clicked(p);
                }
                if response.double_clicked() {
                    action = CanvasAction::DoubleClicked(p);
                }
            }
            if response.drag_stopped() {
                action = CanvasAction::DragEnded;
            }
        }
    });

    // Status line.
    ui.separator();
    ui.horizontal(|ui| {
        if viewport.viewer_enabled() {
            ui.label("Viewing");
        } else {
            ui.label("Editing");
        }
        ui.separator();
        ui.label(format!(
            "Layer: {}",
            doc.layers
                .get(doc.active_layer)
                .map(|l| l.name.as_str())
                .unwrap_or("-")
        ));
        if let Some(feature) = doc.selected.and_then(|r| doc.feature(r)) {
            ui.separator();
            ui.label(format!("Selected: {}", feature.name));
        }
        ui.separator();
        ui.label(format!("Zoom: {:.2}x", viewport.scale));
    });

    action
}

/// Draw one feature into the canvas.
fn draw_feature(
    painter: &egui::Painter,
    feature: &Feature,
    rect: &egui::Rect,
    center: MapPoint,
    scale: f32,
    color: egui::Color32,
    show_vertices: bool,
    sketch: bool,
) {
    let screen_points: Vec<egui::Pos2> = feature
        .vertices
        .iter()
        .map(|p| geometry::map_to_screen(*p, rect, center, scale))
        .collect();
    if screen_points.is_empty() {
        return;
    }

    match feature.kind {
        FeatureKind::Point => {
            painter.circle_filled(screen_points[0], 5.0, color);
            painter.circle_stroke(
                screen_points[0],
                5.0,
                egui::Stroke::new(1.0, egui::Color32::BLACK),
            );
        }
        FeatureKind::LineString | FeatureKind::Polygon => {
            for w in screen_points.windows(2) {
                painter.line_segment([w[0], w[1]], egui::Stroke::new(2.0, color));
            }
            // A committed polygon is closed; a sketch stays open.
            if feature.is_closed() && !sketch && screen_points.len() > 2 {
                painter.line_segment(
                    [screen_points[screen_points.len() - 1], screen_points[0]],
                    egui::Stroke::new(2.0, color),
                );
            }
        }
    }

    if show_vertices {
        let vertex_color = if sketch { egui::Color32::WHITE } else { color };
        for point in &screen_points {
            painter.circle_filled(*point, 4.0, vertex_color);
            painter.circle_stroke(*point, 4.0, egui::Stroke::new(1.0, egui::Color32::BLACK));
        }
    }
}
