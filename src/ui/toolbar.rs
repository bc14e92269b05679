// Copyright (c) 2026, Carta contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar and tool selection UI.
//!
//! A row of clickable tool icons overlaid on the map view. Clicking a tool
//! highlights it and, when the tool carries an action, suspends the map
//! viewer and hands the action to the editor. The toolbar polls the editor's
//! completion channel once per frame; a finished action clears the highlight
//! and restores the viewer.
//!
//! At most one tool is highlighted at any time. Clicks arriving while an
//! action is still pending are ignored; a new action can only start once the
//! pending one resolves.

use crate::editor::{ActionOutcome, Editor, ToolAction};
use crate::map::MapView;
use std::sync::mpsc::{Receiver, TryRecvError};

const ICON_SIZE: f32 = 18.0;
const SPACER_WIDTH: f32 = 12.0;

/// Icon family tag, rendered as a text weight in egui.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconFamily {
    Solid,
    Regular,
}

/// Icon style applied to a tool at construction: family tag plus glyph.
#[derive(Debug, Clone, Copy)]
pub struct ToolStyle {
    pub family: IconFamily,
    pub glyph: &'static str,
}

/// A single toolbar icon bound to an optional editor action.
pub struct Tool {
    style: ToolStyle,
    tooltip: Option<String>,
    action: Option<ToolAction>,
    highlighted: bool,
}

impl Tool {
    fn new(style: ToolStyle, tooltip: Option<&str>, action: Option<ToolAction>) -> Self {
        Self {
            style,
            tooltip: tooltip.map(str::to_string),
            action,
            highlighted: false,
        }
    }

    /// The editor action this tool requests, if any. Tools without an
    /// action (select) are handled entirely on the viewer side.
    pub fn action(&self) -> Option<ToolAction> {
        self.action
    }

    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    /// Set or clear the selected marker on this tool.
    pub fn highlight(&mut self, selected: bool) {
        self.highlighted = selected;
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }
}

enum ToolbarItem {
    Tool(Tool),
    Spacer,
}

struct PendingAction {
    tool: usize,
    done: Receiver<ActionOutcome>,
}

/// The map annotation toolbar.
///
/// Items are kept in insertion order, which is also display and highlight
/// scan order. The toolbar is constructed hidden.
pub struct Toolbar {
    id: String,
    items: Vec<ToolbarItem>,
    select_tool: usize,
    visible: bool,
    pending: Option<PendingAction>,
}

impl Toolbar {
    /// Build the toolbar for the map with the given identifier, with the
    /// fixed tool sequence.
    pub fn new(map_id: &str) -> Self {
        let mut toolbar = Self {
            id: format!("{map_id}-toolbar"),
            items: Vec::new(),
            select_tool: 0,
            visible: false,
            pending: None,
        };

        toolbar.add_styled_tool(IconFamily::Solid, "⬉", "Select", None);
        toolbar.select_tool = toolbar.items.len() - 1;
        toolbar.add_styled_tool(IconFamily::Regular, "✋", "Move", Some(ToolAction::MoveFeature));
        toolbar.add_styled_tool(IconFamily::Regular, "✏", "Edit", Some(ToolAction::EditFeature));
        toolbar.add_styled_tool(
            IconFamily::Regular,
            "🗑",
            "Delete",
            Some(ToolAction::DeleteFeature),
        );
        toolbar.add_spacer();
        toolbar.add_styled_tool(IconFamily::Solid, "📌", "Add point", Some(ToolAction::DrawPoint));
        toolbar.add_styled_tool(IconFamily::Solid, "⟋", "Add line", Some(ToolAction::DrawLine));
        toolbar.add_styled_tool(
            IconFamily::Solid,
            "▱",
            "Add polygon",
            Some(ToolAction::DrawPolygon),
        );
        toolbar.add_spacer();
        toolbar.add_spacer();
        toolbar.add_styled_tool(
            IconFamily::Solid,
            "⬆",
            "Raise layer",
            Some(ToolAction::RaiseLayer),
        );
        toolbar.add_styled_tool(
            IconFamily::Solid,
            "⬇",
            "Lower layer",
            Some(ToolAction::LowerLayer),
        );
        toolbar.add_spacer();
        toolbar.add_styled_tool(
            IconFamily::Solid,
            "💾",
            "Save changes",
            Some(ToolAction::SaveFeatures),
        );

        toolbar
    }

    /// Widget id, derived from the map identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Item index of the default selection tool.
    pub fn default_tool(&self) -> usize {
        self.select_tool
    }

    /// Append a non-interactive separator.
    pub fn add_spacer(&mut self) {
        self.items.push(ToolbarItem::Spacer);
    }

    /// Append a styled tool. Call order defines display and scan order.
    pub fn add_styled_tool(
        &mut self,
        family: IconFamily,
        glyph: &'static str,
        tooltip: &str,
        action: Option<ToolAction>,
    ) {
        let style = ToolStyle { family, glyph };
        self.items
            .push(ToolbarItem::Tool(Tool::new(style, Some(tooltip), action)));
    }

    /// The tools in display order, spacers excluded.
    pub fn tools(&self) -> impl Iterator<Item = &Tool> {
        self.items.iter().filter_map(|item| match item {
            ToolbarItem::Tool(tool) => Some(tool),
            ToolbarItem::Spacer => None,
        })
    }

    /// Item index of the highlighted tool, scanning the sequence.
    pub fn active_tool(&self) -> Option<usize> {
        self.items.iter().position(|item| {
            matches!(item, ToolbarItem::Tool(tool) if tool.is_highlighted())
        })
    }

    /// Highlight exactly the tool at `target`, unhighlighting every other
    /// tool. A target outside the tool sequence clears all highlights.
    pub fn set_active(&mut self, target: Option<usize>) {
        for (i, item) in self.items.iter_mut().enumerate() {
            if let ToolbarItem::Tool(tool) = item {
                tool.highlight(target == Some(i));
            }
        }
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Per-click entry point.
    ///
    /// Highlights the clicked tool synchronously. When an editor is present
    /// and the tool carries an action, suspends the viewer and starts the
    /// action; completion is picked up by [`Toolbar::poll`].
    pub fn tool_clicked(
        &mut self,
        index: usize,
        map: &mut dyn MapView,
        editor: Option<&mut dyn Editor>,
    ) {
        if self.pending.is_some() {
            log::debug!("toolbar click ignored, an action is still pending");
            return;
        }

        self.set_active(Some(index));

        let action = match self.items.get(index) {
            Some(ToolbarItem::Tool(tool)) => tool.action(),
            _ => return,
        };
        if let (Some(editor), Some(action)) = (editor, action) {
            map.disable_viewer();
            log::debug!("dispatching editor action '{}'", action.id());
            let done = editor.action(action);
            self.pending = Some(PendingAction { tool: index, done });
        }
    }

    /// Whether a dispatched action has not resolved yet.
    pub fn action_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Poll the pending action's completion channel. Call once per frame.
    pub fn poll(&mut self, map: &mut dyn MapView) {
        let Some(pending) = &self.pending else {
            return;
        };
        let outcome = match pending.done.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                ActionOutcome::Failed("editor dropped the action".to_string())
            }
        };
        let tool = pending.tool;
        self.pending = None;

        match outcome {
            ActionOutcome::Finished => {
                self.highlight_tool(tool, false);
                map.enable_viewer();
            }
            ActionOutcome::Unfinished => {
                // Tool stays highlighted, viewer stays suspended; the flow
                // is finalized by clicking the tool again.
            }
            ActionOutcome::Cancelled => {
                log::info!("editor action cancelled");
                self.highlight_tool(tool, false);
                map.enable_viewer();
            }
            ActionOutcome::Failed(reason) => {
                log::error!("editor action failed: {}", reason);
                self.highlight_tool(tool, false);
                map.enable_viewer();
            }
        }
    }

    /// Display the toolbar row and dispatch clicks.
    pub fn ui(
        &mut self,
        ui: &mut egui::Ui,
        map: &mut dyn MapView,
        editor: Option<&mut dyn Editor>,
    ) {
        let mut clicked = None;
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 4.0;
            for (i, item) in self.items.iter().enumerate() {
                match item {
                    ToolbarItem::Spacer => {
                        ui.add_space(SPACER_WIDTH);
                    }
                    ToolbarItem::Tool(tool) => {
                        let mut text = egui::RichText::new(tool.style.glyph).size(ICON_SIZE);
                        if tool.style.family == IconFamily::Solid {
                            text = text.strong();
                        }
                        let mut response = ui.selectable_label(tool.is_highlighted(), text);
                        if let Some(tip) = tool.tooltip() {
                            response = response.on_hover_text(tip);
                        }
                        if response.clicked() {
                            clicked = Some(i);
                        }
                    }
                }
            }
        });

        if let Some(index) = clicked {
            self.tool_clicked(index, map, editor);
        }
    }

    fn highlight_tool(&mut self, index: usize, selected: bool) {
        if let Some(ToolbarItem::Tool(tool)) = self.items.get_mut(index) {
            tool.highlight(selected);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::{channel, Sender};

    struct TestMap {
        enabled: bool,
        calls: Vec<&'static str>,
    }

    impl TestMap {
        fn new() -> Self {
            Self {
                enabled: true,
                calls: Vec::new(),
            }
        }
    }

    impl MapView for TestMap {
        fn map_id(&self) -> &str {
            "test-map"
        }

        fn disable_viewer(&mut self) {
            self.enabled = false;
            self.calls.push("disable");
        }

        fn enable_viewer(&mut self) {
            self.enabled = true;
            self.calls.push("enable");
        }

        fn viewer_enabled(&self) -> bool {
            self.enabled
        }
    }

    struct TestEditor {
        started: Vec<&'static str>,
        done: Option<Sender<ActionOutcome>>,
    }

    impl TestEditor {
        fn new() -> Self {
            Self {
                started: Vec::new(),
                done: None,
            }
        }

        fn resolve(&mut self, outcome: ActionOutcome) {
            self.done
                .take()
                .expect("an action must be in flight")
                .send(outcome)
                .unwrap();
        }
    }

    impl Editor for TestEditor {
        fn action(&mut self, action: ToolAction) -> Receiver<ActionOutcome> {
            let (tx, rx) = channel();
            self.started.push(action.id());
            self.done = Some(tx);
            rx
        }
    }

    const MOVE_TOOL: usize = 1;
    const EDIT_TOOL: usize = 2;

    #[test]
    fn test_fixed_tool_sequence() {
        let toolbar = Toolbar::new("test-map");
        let tools: Vec<(Option<&str>, Option<&'static str>)> = toolbar
            .tools()
            .map(|t| (t.tooltip(), t.action().map(ToolAction::id)))
            .collect();

        assert_eq!(
            tools,
            vec![
                (Some("Select"), None),
                (Some("Move"), Some("move-feature")),
                (Some("Edit"), Some("edit-feature")),
                (Some("Delete"), Some("delete-feature")),
                (Some("Add point"), Some("draw-Point")),
                (Some("Add line"), Some("draw-LineString")),
                (Some("Add polygon"), Some("draw-Polygon")),
                (Some("Raise layer"), Some("layer-raise")),
                (Some("Lower layer"), Some("layer-lower")),
                (Some("Save changes"), Some("save-features")),
            ]
        );
    }

    #[test]
    fn test_constructed_hidden_with_no_active_tool() {
        let toolbar = Toolbar::new("test-map");
        assert!(!toolbar.is_visible());
        assert_eq!(toolbar.active_tool(), None);
        assert_eq!(toolbar.default_tool(), 0);
        assert_eq!(toolbar.id(), "test-map-toolbar");
    }

    #[test]
    fn test_set_active_highlights_exactly_one() {
        let mut toolbar = Toolbar::new("test-map");
        let tool_indices: Vec<usize> = toolbar
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| matches!(item, ToolbarItem::Tool(_)))
            .map(|(i, _)| i)
            .collect();

        for &target in &tool_indices {
            toolbar.set_active(Some(target));
            assert_eq!(toolbar.active_tool(), Some(target));
            assert_eq!(toolbar.tools().filter(|t| t.is_highlighted()).count(), 1);
        }
    }

    #[test]
    fn test_set_active_outside_sequence_clears_all() {
        let mut toolbar = Toolbar::new("test-map");
        toolbar.set_active(Some(MOVE_TOOL));

        toolbar.set_active(Some(toolbar.items.len() + 5));
        assert_eq!(toolbar.active_tool(), None);

        toolbar.set_active(Some(MOVE_TOOL));
        toolbar.set_active(None);
        assert_eq!(toolbar.active_tool(), None);

        // A spacer index is not a tool either.
        toolbar.set_active(Some(4));
        assert_eq!(toolbar.active_tool(), None);
    }

    #[test]
    fn test_hide_show_idempotent() {
        let mut toolbar = Toolbar::new("test-map");
        toolbar.show();
        toolbar.show();
        assert!(toolbar.is_visible());
        toolbar.hide();
        toolbar.hide();
        assert!(!toolbar.is_visible());
        toolbar.show();
        assert!(toolbar.is_visible());
    }

    #[test]
    fn test_select_tool_click_changes_highlight_only() {
        let mut toolbar = Toolbar::new("test-map");
        let mut map = TestMap::new();
        let mut editor = TestEditor::new();

        toolbar.tool_clicked(0, &mut map, Some(&mut editor));

        assert_eq!(toolbar.active_tool(), Some(0));
        assert!(map.calls.is_empty());
        assert!(editor.started.is_empty());
        assert!(toolbar.pending.is_none());
    }

    #[test]
    fn test_action_click_without_editor_changes_highlight_only() {
        let mut toolbar = Toolbar::new("test-map");
        let mut map = TestMap::new();

        toolbar.tool_clicked(MOVE_TOOL, &mut map, None);

        assert_eq!(toolbar.active_tool(), Some(MOVE_TOOL));
        assert!(map.calls.is_empty());
    }

    #[test]
    fn test_finished_action_restores_viewer_and_highlight() {
        let mut toolbar = Toolbar::new("test-map");
        let mut map = TestMap::new();
        let mut editor = TestEditor::new();

        toolbar.tool_clicked(MOVE_TOOL, &mut map, Some(&mut editor));

        // Highlight lands before the action resolves.
        assert_eq!(toolbar.active_tool(), Some(MOVE_TOOL));
        assert!(!map.viewer_enabled());
        assert_eq!(editor.started, vec!["move-feature"]);

        toolbar.poll(&mut map);
        assert_eq!(toolbar.active_tool(), Some(MOVE_TOOL));

        editor.resolve(ActionOutcome::Finished);
        toolbar.poll(&mut map);

        assert_eq!(toolbar.active_tool(), None);
        assert!(map.viewer_enabled());
        assert_eq!(map.calls, vec!["disable", "enable"]);
    }

    #[test]
    fn test_unfinished_action_keeps_editing_state() {
        let mut toolbar = Toolbar::new("test-map");
        let mut map = TestMap::new();
        let mut editor = TestEditor::new();

        toolbar.tool_clicked(MOVE_TOOL, &mut map, Some(&mut editor));
        editor.resolve(ActionOutcome::Unfinished);
        toolbar.poll(&mut map);

        assert_eq!(toolbar.active_tool(), Some(MOVE_TOOL));
        assert!(!map.viewer_enabled());
        assert_eq!(map.calls, vec!["disable"]);

        // The flow can be re-entered by clicking again.
        toolbar.tool_clicked(MOVE_TOOL, &mut map, Some(&mut editor));
        assert_eq!(editor.started.len(), 2);
    }

    #[test]
    fn test_clicks_ignored_while_pending() {
        let mut toolbar = Toolbar::new("test-map");
        let mut map = TestMap::new();
        let mut editor = TestEditor::new();

        toolbar.tool_clicked(MOVE_TOOL, &mut map, Some(&mut editor));
        toolbar.tool_clicked(EDIT_TOOL, &mut map, Some(&mut editor));

        assert_eq!(toolbar.active_tool(), Some(MOVE_TOOL));
        assert_eq!(editor.started, vec!["move-feature"]);
    }

    #[test]
    fn test_failed_action_recovers_viewer() {
        let mut toolbar = Toolbar::new("test-map");
        let mut map = TestMap::new();
        let mut editor = TestEditor::new();

        toolbar.tool_clicked(MOVE_TOOL, &mut map, Some(&mut editor));
        editor.resolve(ActionOutcome::Failed("boom".to_string()));
        toolbar.poll(&mut map);

        assert_eq!(toolbar.active_tool(), None);
        assert!(map.viewer_enabled());
    }

    #[test]
    fn test_cancelled_action_recovers_viewer() {
        let mut toolbar = Toolbar::new("test-map");
        let mut map = TestMap::new();
        let mut editor = TestEditor::new();

        toolbar.tool_clicked(MOVE_TOOL, &mut map, Some(&mut editor));
        editor.resolve(ActionOutcome::Cancelled);
        toolbar.poll(&mut map);

        assert_eq!(toolbar.active_tool(), None);
        assert!(map.viewer_enabled());
    }

    #[test]
    fn test_dropped_completion_channel_recovers_viewer() {
        let mut toolbar = Toolbar::new("test-map");
        let mut map = TestMap::new();
        let mut editor = TestEditor::new();

        toolbar.tool_clicked(MOVE_TOOL, &mut map, Some(&mut editor));
        editor.done = None;
        toolbar.poll(&mut map);

        assert_eq!(toolbar.active_tool(), None);
        assert!(map.viewer_enabled());
        assert!(toolbar.pending.is_none());
    }
}
