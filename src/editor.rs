// Copyright (c) 2026, Carta contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Feature editing actions.
//!
//! The toolbar hands an action identifier to the editor and waits for the
//! action to resolve. Immediate actions (delete, layer reorder, save)
//! resolve on the next frame tick; interactive actions (draw, move, edit)
//! enter a mode driven by canvas and keyboard input until they resolve.
//! Every started action resolves exactly once, on the channel returned by
//! [`Editor::action`].

use crate::io::serialization;
use crate::models::document::MapDocument;
use crate::models::feature::{Feature, FeatureKind, MapPoint};
use std::sync::mpsc::{channel, Receiver, Sender};

/// An editing operation a toolbar tool can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolAction {
    MoveFeature,
    EditFeature,
    DeleteFeature,
    DrawPoint,
    DrawLine,
    DrawPolygon,
    RaiseLayer,
    LowerLayer,
    SaveFeatures,
}

impl ToolAction {
    /// The opaque identifier naming this operation.
    pub fn id(self) -> &'static str {
        match self {
            ToolAction::MoveFeature => "move-feature",
            ToolAction::EditFeature => "edit-feature",
            ToolAction::DeleteFeature => "delete-feature",
            ToolAction::DrawPoint => "draw-Point",
            ToolAction::DrawLine => "draw-LineString",
            ToolAction::DrawPolygon => "draw-Polygon",
            ToolAction::RaiseLayer => "layer-raise",
            ToolAction::LowerLayer => "layer-lower",
            ToolAction::SaveFeatures => "save-features",
        }
    }
}

/// How an editing action resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The editing flow completed; the map returns to viewing mode.
    Finished,
    /// The action resolved but the flow is not complete; the tool stays
    /// active and the flow is re-entered by clicking it again.
    Unfinished,
    Cancelled,
    Failed(String),
}

/// External collaborator performing map edits on behalf of the toolbar.
pub trait Editor {
    /// Start the named action. The returned channel receives the outcome
    /// exactly once, when the action resolves.
    fn action(&mut self, action: ToolAction) -> Receiver<ActionOutcome>;
}

/// Pointer and keyboard input routed to the editor while a mode is active.
#[derive(Debug, Clone, Copy)]
pub enum EditInput {
    Click(MapPoint),
    DoubleClick(MapPoint),
    DragStart {
        at: MapPoint,
        /// Vertex of the selected feature under the pointer, if any.
        vertex: Option<usize>,
    },
    DragTo(MapPoint),
    DragEnd,
    Escape,
}

#[derive(Debug, Clone, Copy)]
enum EditMode {
    Idle,
    DeleteFeature,
    RaiseLayer,
    LowerLayer,
    SaveFeatures,
    DrawPoint,
    DrawLine,
    DrawPolygon,
    MoveFeature { last: Option<MapPoint> },
    EditFeature { dragging: Option<usize> },
}

/// The editor implementation working on a [`MapDocument`].
pub struct FeatureEditor {
    mode: EditMode,
    in_progress: Option<Feature>,
    done: Option<Sender<ActionOutcome>>,
    feature_counter: usize,
}

impl Default for FeatureEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureEditor {
    pub fn new() -> Self {
        Self {
            mode: EditMode::Idle,
            in_progress: None,
            done: None,
            feature_counter: 0,
        }
    }

    /// Whether an editing mode is currently active.
    pub fn is_active(&self) -> bool {
        !matches!(self.mode, EditMode::Idle)
    }

    /// The feature currently being sketched, for canvas overlay drawing.
    pub fn in_progress(&self) -> Option<&Feature> {
        self.in_progress.as_ref()
    }

    /// Frame tick: runs immediate actions and validates mode preconditions.
    pub fn update(&mut self, doc: &mut MapDocument) {
        match self.mode {
            EditMode::DeleteFeature => {
                let outcome = match doc.selected.and_then(|r| doc.remove_feature(r)) {
                    Some(f) => {
                        log::info!("deleted feature '{}'", f.name);
                        ActionOutcome::Finished
                    }
                    None => ActionOutcome::Failed("no feature selected".to_string()),
                };
                self.finish(outcome);
            }
            EditMode::RaiseLayer => {
                if doc.raise_active_layer() {
                    log::info!("raised layer to position {}", doc.active_layer);
                }
                self.finish(ActionOutcome::Finished);
            }
            EditMode::LowerLayer => {
                if doc.lower_active_layer() {
                    log::info!("lowered layer to position {}", doc.active_layer);
                }
                self.finish(ActionOutcome::Finished);
            }
            EditMode::SaveFeatures => {
                let outcome = save_document(doc);
                self.finish(outcome);
            }
            EditMode::MoveFeature { .. } | EditMode::EditFeature { .. } => {
                if doc.selected.is_none() {
                    self.finish(ActionOutcome::Failed("no feature selected".to_string()));
                }
            }
            _ => {}
        }
    }

    /// Route one canvas or keyboard event into the active mode.
    pub fn handle(&mut self, doc: &mut MapDocument, input: EditInput) {
        match self.mode {
            EditMode::DrawPoint => {
                if let EditInput::Click(p) = input {
                    self.feature_counter += 1;
                    let mut f =
                        Feature::new(format!("point {}", self.feature_counter), FeatureKind::Point);
                    f.add_vertex(p);
                    log::info!("added point feature at ({:.1}, {:.1})", p.x, p.y);
                    doc.selected = Some(doc.add_feature(f));
                    self.finish(ActionOutcome::Finished);
                }
            }
            EditMode::DrawLine => match input {
                EditInput::Click(p) => self.add_sketch_vertex(FeatureKind::LineString, "line", p),
                EditInput::Escape => {
                    let committed = self.commit_sketch(doc, 2);
                    self.finish(if committed {
                        ActionOutcome::Finished
                    } else {
                        ActionOutcome::Cancelled
                    });
                }
                _ => {}
            },
            EditMode::DrawPolygon => match input {
                EditInput::Click(p) => self.add_sketch_vertex(FeatureKind::Polygon, "region", p),
                EditInput::DoubleClick(_) => {
                    // A short sketch keeps collecting vertices instead.
                    if self.commit_sketch(doc, 3) {
                        self.finish(ActionOutcome::Finished);
                    }
                }
                EditInput::Escape => self.finish(ActionOutcome::Cancelled),
                _ => {}
            },
            EditMode::MoveFeature { last } => match input {
                EditInput::DragStart { at, .. } => {
                    self.mode = EditMode::MoveFeature { last: Some(at) };
                }
                EditInput::DragTo(p) => {
                    if let (Some(prev), Some(r)) = (last, doc.selected) {
                        if let Some(f) = doc.feature_mut(r) {
                            f.translate(p.x - prev.x, p.y - prev.y);
                        }
                        self.mode = EditMode::MoveFeature { last: Some(p) };
                    }
                }
                EditInput::DragEnd => {
                    if last.is_some() {
                        self.finish(ActionOutcome::Finished);
                    }
                }
                EditInput::Escape => self.finish(ActionOutcome::Cancelled),
                _ => {}
            },
            EditMode::EditFeature { dragging } => match input {
                EditInput::DragStart {
                    vertex: Some(i), ..
                } => {
                    self.mode = EditMode::EditFeature { dragging: Some(i) };
                }
                EditInput::DragTo(p) => {
                    if let (Some(i), Some(r)) = (dragging, doc.selected) {
                        if let Some(f) = doc.feature_mut(r) {
                            f.update_vertex(i, p);
                        }
                    }
                }
                EditInput::DragEnd => {
                    self.mode = EditMode::EditFeature { dragging: None };
                }
                EditInput::Escape => self.finish(ActionOutcome::Finished),
                _ => {}
            },
            _ => {}
        }
    }

    fn add_sketch_vertex(&mut self, kind: FeatureKind, stem: &str, p: MapPoint) {
        if self.in_progress.is_none() {
            self.feature_counter += 1;
            self.in_progress = Some(Feature::new(
                format!("{} {}", stem, self.feature_counter),
                kind,
            ));
        }
        if let Some(sketch) = &mut self.in_progress {
            sketch.add_vertex(p);
            log::debug!(
                "sketch vertex at ({:.1}, {:.1}), total {}",
                p.x,
                p.y,
                sketch.vertex_count()
            );
        }
    }

    fn commit_sketch(&mut self, doc: &mut MapDocument, min_vertices: usize) -> bool {
        match self.in_progress.take() {
            Some(f) if f.vertex_count() >= min_vertices => {
                log::info!("added {} with {} vertices", f.name, f.vertex_count());
                doc.selected = Some(doc.add_feature(f));
                true
            }
            short => {
                self.in_progress = short;
                false
            }
        }
    }

    fn finish(&mut self, outcome: ActionOutcome) {
        log::debug!("editor action resolved: {:?}", outcome);
        if let Some(done) = self.done.take() {
            let _ = done.send(outcome);
        }
        self.mode = EditMode::Idle;
        self.in_progress = None;
    }
}

impl Editor for FeatureEditor {
    fn action(&mut self, action: ToolAction) -> Receiver<ActionOutcome> {
        let (tx, rx) = channel();
        if let Some(prev) = self.done.take() {
            let _ = prev.send(ActionOutcome::Cancelled);
            log::debug!("superseding an unresolved editor action");
        }
        self.in_progress = None;
        self.done = Some(tx);
        self.mode = match action {
            ToolAction::MoveFeature => EditMode::MoveFeature { last: None },
            ToolAction::EditFeature => EditMode::EditFeature { dragging: None },
            ToolAction::DeleteFeature => EditMode::DeleteFeature,
            ToolAction::DrawPoint => EditMode::DrawPoint,
            ToolAction::DrawLine => EditMode::DrawLine,
            ToolAction::DrawPolygon => EditMode::DrawPolygon,
            ToolAction::RaiseLayer => EditMode::RaiseLayer,
            ToolAction::LowerLayer => EditMode::LowerLayer,
            ToolAction::SaveFeatures => EditMode::SaveFeatures,
        };
        log::debug!("editor action '{}' started", action.id());
        rx
    }
}

fn save_document(doc: &MapDocument) -> ActionOutcome {
    let Some(path) = rfd::FileDialog::new()
        .add_filter("Map documents", &["json", "yaml", "yml"])
        .set_file_name(format!("{}.json", doc.name))
        .save_file()
    else {
        return ActionOutcome::Cancelled;
    };
    match serialization::export_document(doc, &path) {
        Ok(()) => {
            log::info!("saved map to {}", path.display());
            ActionOutcome::Finished
        }
        Err(e) => {
            log::error!("failed to save map: {}", e);
            ActionOutcome::Failed(e.to_string())
        }
    }
}
