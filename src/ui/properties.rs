// Copyright (c) 2026, Carta contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Layer and feature properties panel.
//!
//! Side panel listing the document's layers and the active layer's
//! features. Interactions are reported back to the app as actions.

use crate::models::document::{FeatureRef, MapDocument};

/// Result of properties panel interaction.
pub enum PropertiesAction {
    None,
    SelectLayer(usize),
    ToggleLayerVisibility(usize),
    AddLayer,
    SelectFeature(FeatureRef),
}

/// Display the properties panel.
pub fn show(ui: &mut egui::Ui, doc: &MapDocument) -> PropertiesAction {
    let mut action = PropertiesAction::None;

    ui.heading("Layers");
    ui.separator();

    // Top of the render order first.
    for (i, layer) in doc.layers.iter().enumerate().rev() {
        ui.horizontal(|ui| {
            let mut visible = layer.visible;
            if ui.checkbox(&mut visible, "").changed() {
                action = PropertiesAction::ToggleLayerVisibility(i);
            }
            if ui
                .selectable_label(i == doc.active_layer, &layer.name)
                .clicked()
            {
                action = PropertiesAction::SelectLayer(i);
            }
        });
    }
    if ui.button("Add layer").clicked() {
        action = PropertiesAction::AddLayer;
    }

    ui.add_space(8.0);
    ui.heading("Features");
    ui.separator();

    if let Some(layer) = doc.layers.get(doc.active_layer) {
        if layer.features.is_empty() {
            ui.label(egui::RichText::new("No features on this layer").weak());
        }
        for (fi, feature) in layer.features.iter().enumerate() {
            let r = FeatureRef {
                layer: doc.active_layer,
                feature: fi,
            };
            if ui
                .selectable_label(doc.selected == Some(r), &feature.name)
                .clicked()
            {
                action = PropertiesAction::SelectFeature(r);
            }
        }
    }

    action
}
