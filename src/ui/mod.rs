//! User interface - geometry and rendering.
//!
//! This module provides all UI-related functionality:
//!
//! - **layout**: pure panel geometry, fallback widths, and hit testing
//! - **renderer**: full-frame drawing (panels, tab bars, borders, status
//!   bar, drag overlay)
//!
//! The event loop hit-tests against the same geometry the renderer draws,
//! so input and output can never disagree about where a panel is.

pub mod layout;
pub mod renderer;

pub use layout::{compute_panel_rects, hit_test, HitTarget, PanelGeometry, Rect};
pub use renderer::{DragOverlay, Frame, Renderer};
