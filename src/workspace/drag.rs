//! Drag coordinator - the tab drag-and-drop lifecycle
//!
//! A small state machine with two states, idle and dragging. The gesture
//! layer (mouse dispatch in the event loop) resolves raw coordinates into
//! typed payloads and drop targets; the coordinator only decides which
//! panel a drop lands in and invokes the store mutation at most once per
//! drop. Incomplete payloads and missing targets cancel the drag silently.

use tracing::{debug, info};

use super::store::TabStore;

/// Fixed prefix for panel drop-area identifiers (`droppable-<panel-id>`)
pub const DROP_AREA_PREFIX: &str = "droppable-";

/// The tab being dragged, as seen by the gesture layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabHandle {
    pub id: String,
    pub label: String,
}

/// Data attached to a drag start. Fields are optional because the gesture
/// layer may hand over incomplete data; a payload missing either field is
/// ignored.
#[derive(Debug, Clone, Default)]
pub struct DragPayload {
    pub tab: Option<TabHandle>,
    pub panel_id: Option<String>,
}

/// What kind of surface a drop landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropKind {
    /// A panel's tab bar; carries the panel id explicitly
    TabBar,
    /// A panel's body drop area; the panel id is encoded in the target id
    PanelArea,
}

/// A resolved drop target.
#[derive(Debug, Clone)]
pub struct DropTarget {
    /// Stable identifier of the drop surface
    pub id: String,
    pub kind: DropKind,
    /// Explicit target panel id, when the surface carries one
    pub panel_id: Option<String>,
}

impl DropTarget {
    /// Target for a drop on a panel's tab bar (explicit panel id).
    pub fn tab_bar(panel_id: impl Into<String>) -> Self {
        let panel_id = panel_id.into();
        Self {
            id: format!("tabbar-{panel_id}"),
            kind: DropKind::TabBar,
            panel_id: Some(panel_id),
        }
    }

    /// Target for a drop on a panel's body. The panel id is only encoded
    /// in the drop-area identifier, exercising the id-parsing fallback.
    pub fn panel_area(panel_id: &str) -> Self {
        Self {
            id: format!("{DROP_AREA_PREFIX}{panel_id}"),
            kind: DropKind::PanelArea,
            panel_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DragState {
    Idle,
    Dragging {
        tab: TabHandle,
        source_panel: String,
    },
}

/// Owns the drag lifecycle. State is scoped to one gesture and cleared
/// after every drop or cancelled drag.
pub struct DragCoordinator {
    state: DragState,
}

impl Default for DragCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl DragCoordinator {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// The tab currently being dragged, if any (used for the overlay).
    pub fn dragged_tab(&self) -> Option<&TabHandle> {
        match &self.state {
            DragState::Dragging { tab, .. } => Some(tab),
            DragState::Idle => None,
        }
    }

    #[allow(dead_code)]
    pub fn source_panel(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging { source_panel, .. } => Some(source_panel),
            DragState::Idle => None,
        }
    }

    /// Begin a drag. Records nothing unless the payload carries both the
    /// tab and its panel. The host input layer serializes gestures; a
    /// start arriving mid-drag is ignored.
    pub fn on_drag_start(&mut self, payload: DragPayload) {
        if self.is_dragging() {
            debug!("drag start ignored: gesture already in flight");
            return;
        }
        if let (Some(tab), Some(panel_id)) = (payload.tab, payload.panel_id) {
            debug!(tab_id = %tab.id, source = %panel_id, "drag started");
            self.state = DragState::Dragging {
                tab,
                source_panel: panel_id,
            };
        }
    }

    /// Reserved extension point for live feedback while dragging over a
    /// target. Mutates nothing.
    pub fn on_drag_over(&mut self, _target: Option<&DropTarget>) {}

    /// Finish a drag. Resolves the target panel and invokes the store's
    /// `move_tab` exactly when the resolved panel differs from the source.
    /// Transient drag state is cleared on every path. Returns whether a
    /// move occurred.
    pub fn on_drag_end(&mut self, target: Option<&DropTarget>, store: &mut TabStore) -> bool {
        let state = std::mem::replace(&mut self.state, DragState::Idle);
        let DragState::Dragging { tab, source_panel } = state else {
            return false;
        };
        let Some(target) = target else {
            debug!(tab_id = %tab.id, "drag cancelled: no drop target");
            return false;
        };

        let resolved = resolve_target_panel(&source_panel, target);
        if resolved == source_panel {
            debug!(tab_id = %tab.id, "drop on source panel: no-op");
            return false;
        }

        info!(tab_id = %tab.id, from = %source_panel, to = %resolved, "drop");
        store.move_tab(&tab.id, &source_panel, &resolved)
    }
}

/// Resolve which panel a drop lands in. Priority: an explicit panel id in
/// the target's payload, then a `droppable-<panel-id>` drop-area id, then
/// the source panel (no-op move).
fn resolve_target_panel(source_panel: &str, target: &DropTarget) -> String {
    if let Some(panel_id) = &target.panel_id {
        return panel_id.clone();
    }
    if target.kind == DropKind::PanelArea {
        if let Some(panel_id) = target.id.strip_prefix(DROP_AREA_PREFIX) {
            if !panel_id.is_empty() {
                return panel_id.to_string();
            }
        }
    }
    source_panel.to_string()
}
