//! Workspace state - panels, tabs, and the drag lifecycle.
//!
//! This module owns everything the layout renders:
//!
//! - **store**: `TabStore`, the injected state container (panel list,
//!   split-screen count, `move_tab` / `update_split_screen_count`)
//! - **panel**: a region holding an ordered set of tabs and an active tab
//! - **tab**: a named, content-bearing unit that moves between panels
//! - **drag**: the drag-and-drop coordinator (idle/dragging state machine
//!   and drop-target resolution)

pub mod drag;
pub mod panel;
pub mod store;
pub mod tab;

pub use drag::{DragCoordinator, DragPayload, DropTarget, TabHandle};
pub use panel::Panel;
pub use store::TabStore;
pub use tab::Tab;
