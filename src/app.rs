// Copyright (c) 2026, Carta contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait, wiring the toolbar, editor, map viewport, canvas
//! and properties panel together.

use crate::editor::{EditInput, FeatureEditor};
use crate::io::media::{self, LoadedImage};
use crate::map::{MapView, MapViewport};
use crate::models::document::{FeatureRef, MapDocument};
use crate::ui::{canvas, properties, toolbar::Toolbar};
use crate::util::geometry;
use std::sync::mpsc::{channel, Receiver};

const SELECT_TOLERANCE_PIXELS: f32 = 6.0;

/// Main application state.
pub struct CartaApp {
    /// The document being annotated
    document: MapDocument,

    /// Pan/zoom state and viewer mode of the map
    viewport: MapViewport,

    /// Editing collaborator driven by the toolbar
    editor: FeatureEditor,

    /// The annotation toolbar
    toolbar: Toolbar,

    /// Loaded basemap texture for display
    basemap_texture: Option<egui::TextureHandle>,

    /// Basemap dimensions (width, height)
    basemap_size: Option<(u32, u32)>,

    /// Receiver for background basemap loading
    basemap_loader: Option<Receiver<Result<LoadedImage, String>>>,

    /// Loading state message
    loading_message: Option<String>,
}

impl Default for CartaApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CartaApp {
    /// Create a new Carta application instance.
    pub fn new() -> Self {
        let viewport = MapViewport::new("carta");
        let mut toolbar = Toolbar::new(viewport.map_id());
        toolbar.show();

        Self {
            document: MapDocument::new("untitled map".to_string()),
            viewport,
            editor: FeatureEditor::new(),
            toolbar,
            basemap_texture: None,
            basemap_size: None,
            basemap_loader: None,
            loading_message: None,
        }
    }

    /// Load a basemap image file and create a texture for display
    /// (asynchronously).
    fn load_basemap(&mut self, path: std::path::PathBuf) {
        let (sender, receiver) = channel();
        self.basemap_loader = Some(receiver);
        self.loading_message = Some("Loading basemap image...".to_string());

        // Spawn background thread for loading
        std::thread::spawn(move || {
            let result = media::load_image(&path)
                .map(|img| {
                    log::info!(
                        "Loaded basemap: {} ({}x{})",
                        path.display(),
                        img.width,
                        img.height
                    );
                    img
                })
                .map_err(|e| format!("Failed to load basemap: {}", e));
            let _ = sender.send(result);
        });
    }

    /// Import a map document from a file, replacing the current document.
    fn import_document(&mut self, path: std::path::PathBuf) {
        match crate::io::serialization::import_document(&path) {
            Ok(doc) => {
                log::info!(
                    "Imported '{}' with {} layers from {}",
                    doc.name,
                    doc.layers.len(),
                    path.display()
                );
                self.document = doc;
            }
            Err(e) => log::error!("Failed to import map: {}", e),
        }
    }

    /// Export the current document to a file.
    fn export_document(&self, path: std::path::PathBuf) {
        match crate::io::serialization::export_document(&self.document, &path) {
            Ok(_) => log::info!("Exported map to {}", path.display()),
            Err(e) => log::error!("Failed to export map: {}", e),
        }
    }

    /// Select the topmost visible feature at `p`, or clear the selection.
    fn select_feature_at(&mut self, p: crate::models::feature::MapPoint) {
        let tolerance = (SELECT_TOLERANCE_PIXELS / self.viewport.scale) as f64;
        for (li, layer) in self.document.layers.iter().enumerate().rev() {
            if !layer.visible {
                continue;
            }
            for (fi, feature) in layer.features.iter().enumerate().rev() {
                if geometry::hit_test(feature, p, tolerance) {
                    log::info!("Selected feature '{}'", feature.name);
                    self.document.selected = Some(FeatureRef {
                        layer: li,
                        feature: fi,
                    });
                    return;
                }
            }
        }
        self.document.selected = None;
    }
}

impl eframe::App for CartaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for completed basemap loading
        if let Some(receiver) = &self.basemap_loader {
            if let Ok(result) = receiver.try_recv() {
                self.basemap_loader = None;
                self.loading_message = None;

                match result {
                    Ok(img) => {
                        let size = [img.width as usize, img.height as usize];
                        let color_image =
                            egui::ColorImage::from_rgba_unmultiplied(size, &img.pixels);
                        let texture = ctx.load_texture(
                            "basemap",
                            color_image,
                            egui::TextureOptions::LINEAR,
                        );
                        self.basemap_texture = Some(texture);
                        self.basemap_size = Some((img.width, img.height));
                    }
                    Err(e) => log::error!("{}", e),
                }
            }
        }

        // Request repaint while background work or an action is in flight
        if self.loading_message.is_some() || self.toolbar.action_pending() {
            ctx.request_repaint();
        }

        // Immediate editor actions and toolbar completions
        self.editor.update(&mut self.document);
        self.toolbar.poll(&mut self.viewport);

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Map...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Map documents", &["json", "yaml", "yml"])
                            .pick_file()
                        {
                            self.import_document(path);
                        }
                        ui.close_menu();
                    }
                    if ui.button("Open Basemap...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &["jpg", "jpeg", "png", "bmp", "tiff", "tif"])
                            .pick_file()
                        {
                            self.load_basemap(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Save Map As...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Map documents", &["json", "yaml", "yml"])
                            .set_file_name(format!("{}.json", self.document.name))
                            .save_file()
                        {
                            self.export_document(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("View", |ui| {
                    let mut toolbar_visible = self.toolbar.is_visible();
                    if ui.checkbox(&mut toolbar_visible, "Toolbar").changed() {
                        if toolbar_visible {
                            self.toolbar.show();
                        } else {
                            self.toolbar.hide();
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Zoom In").clicked() {
                        self.viewport.zoom_in();
                        ui.close_menu();
                    }
                    if ui.button("Zoom Out").clicked() {
                        self.viewport.zoom_out();
                        ui.close_menu();
                    }
                    if ui.button("Reset View").clicked() {
                        self.viewport.reset_view();
                        ui.close_menu();
                    }
                });
            });
        });

        // Toolbar, anchored to the map view
        if self.toolbar.is_visible() {
            let panel_id = egui::Id::new(self.toolbar.id().to_string());
            egui::TopBottomPanel::top(panel_id).show(ctx, |ui| {
                self.toolbar
                    .ui(ui, &mut self.viewport, Some(&mut self.editor));
            });
        }

        // Properties panel (right side)
        let properties_action = egui::SidePanel::right("properties")
            .default_width(220.0)
            .show(ctx, |ui| properties::show(ui, &self.document))
            .inner;

        match properties_action {
            properties::PropertiesAction::SelectLayer(i) => {
                self.document.active_layer = i;
            }
            properties::PropertiesAction::ToggleLayerVisibility(i) => {
                if let Some(layer) = self.document.layers.get_mut(i) {
                    layer.visible = !layer.visible;
                }
            }
            properties::PropertiesAction::AddLayer => {
                let name = format!("Layer {}", self.document.layers.len() + 1);
                self.document.add_layer(name);
            }
            properties::PropertiesAction::SelectFeature(r) => {
                self.document.selected = Some(r);
            }
            properties::PropertiesAction::None => {}
        }

        // Keyboard: Escape finishes or cancels the editor mode, otherwise
        // clears the selection
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            if self.editor.is_active() {
                self.editor.handle(&mut self.document, EditInput::Escape);
            } else {
                self.document.selected = None;
            }
        }

        // Main canvas (center)
        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                // Show loading overlay if loading
                if let Some(message) = &self.loading_message {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.add_space(20.0);
                            ui.spinner();
                            ui.add_space(10.0);
                            ui.label(
                                egui::RichText::new(message)
                                    .size(16.0)
                                    .color(egui::Color32::from_gray(200)),
                            );
                        });
                    });
                    canvas::CanvasAction::None
                } else {
                    canvas::show(
                        ui,
                        &self.document,
                        &mut self.viewport,
                        &self.basemap_texture,
                        self.basemap_size,
                        self.editor.in_progress(),
                    )
                }
            })
            .inner;

        // Route canvas actions
        match canvas_action {
            canvas::CanvasAction::Clicked(p) => {
                if self.viewport.viewer_enabled() {
                    self.select_feature_at(p);
                } else {
                    self.editor.handle(&mut self.document, EditInput::Click(p));
                }
            }
            canvas::CanvasAction::DoubleClicked(p) => {
                self.editor
                    .handle(&mut self.document, EditInput::DoubleClick(p));
            }
            canvas::CanvasAction::DragStarted { at, vertex } => {
                self.editor
                    .handle(&mut self.document, EditInput::DragStart { at, vertex });
            }
            canvas::CanvasAction::DragMoved(p) => {
                self.editor.handle(&mut self.document, EditInput::DragTo(p));
            }
            canvas::CanvasAction::DragEnded => {
                self.editor.handle(&mut self.document, EditInput::DragEnd);
            }
            canvas::CanvasAction::None => {}
        }
    }
}
