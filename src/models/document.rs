// Copyright (c) 2026, Carta contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Map document state.
//!
//! This module manages the document being annotated: an ordered stack of
//! feature layers, the active layer, and the transient selection.

use super::feature::Feature;
use serde::{Deserialize, Serialize};

/// Reference to a feature by layer and position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureRef {
    pub layer: usize,
    pub feature: usize,
}

/// A named layer holding an ordered list of features.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureLayer {
    pub name: String,
    pub visible: bool,
    pub features: Vec<Feature>,
}

impl FeatureLayer {
    /// Create a new empty, visible layer.
    pub fn new(name: String) -> Self {
        Self {
            name,
            visible: true,
            features: Vec::new(),
        }
    }
}

/// Complete map document for serialization.
///
/// Layers are kept in render order: the last layer is drawn on top.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapDocument {
    pub name: String,
    pub layers: Vec<FeatureLayer>,
    pub active_layer: usize,
    #[serde(skip)]
    pub selected: Option<FeatureRef>,
}

impl MapDocument {
    /// Create a new document with a single empty layer.
    pub fn new(name: String) -> Self {
        Self {
            name,
            layers: vec![FeatureLayer::new("Layer 1".to_string())],
            active_layer: 0,
            selected: None,
        }
    }

    /// Append a new empty layer on top and make it active.
    pub fn add_layer(&mut self, name: String) {
        self.layers.push(FeatureLayer::new(name));
        self.active_layer = self.layers.len() - 1;
    }

    /// Add a feature to the active layer and return its reference.
    pub fn add_feature(&mut self, feature: Feature) -> FeatureRef {
        let layer = &mut self.layers[self.active_layer];
        layer.features.push(feature);
        FeatureRef {
            layer: self.active_layer,
            feature: layer.features.len() - 1,
        }
    }

    /// Look up a feature by reference.
    pub fn feature(&self, r: FeatureRef) -> Option<&Feature> {
        self.layers.get(r.layer)?.features.get(r.feature)
    }

    /// Look up a feature mutably by reference.
    pub fn feature_mut(&mut self, r: FeatureRef) -> Option<&mut Feature> {
        self.layers.get_mut(r.layer)?.features.get_mut(r.feature)
    }

    /// Remove a feature by reference. Clears or shifts the selection so it
    /// keeps pointing at the feature it pointed at before, if any.
    pub fn remove_feature(&mut self, r: FeatureRef) -> Option<Feature> {
        let layer = self.layers.get_mut(r.layer)?;
        if r.feature >= layer.features.len() {
            return None;
        }
        let removed = layer.features.remove(r.feature);
        if let Some(sel) = self.selected {
            if sel.layer == r.layer {
                if sel.feature == r.feature {
                    self.selected = None;
                } else if sel.feature > r.feature {
                    self.selected = Some(FeatureRef {
                        layer: sel.layer,
                        feature: sel.feature - 1,
                    });
                }
            }
        }
        Some(removed)
    }

    /// Move the active layer one step up in render order (towards the top).
    /// Returns false when the layer is already topmost.
    pub fn raise_active_layer(&mut self) -> bool {
        if self.active_layer + 1 >= self.layers.len() {
            return false;
        }
        self.layers.swap(self.active_layer, self.active_layer + 1);
        self.retarget_selection(self.active_layer, self.active_layer + 1);
        self.active_layer += 1;
        true
    }

    /// Move the active layer one step down in render order.
    /// Returns false when the layer is already at the bottom.
    pub fn lower_active_layer(&mut self) -> bool {
        if self.active_layer == 0 {
            return false;
        }
        self.layers.swap(self.active_layer, self.active_layer - 1);
        self.retarget_selection(self.active_layer - 1, self.active_layer);
        self.active_layer -= 1;
        true
    }

    // After swapping layers a and b, selections into either must follow.
    fn retarget_selection(&mut self, a: usize, b: usize) {
        if let Some(sel) = &mut self.selected {
            if sel.layer == a {
                sel.layer = b;
            } else if sel.layer == b {
                sel.layer = a;
            }
        }
    }
}
