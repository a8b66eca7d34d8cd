//! Tab - a named, content-bearing unit that can move between panels

use crate::content::TabContent;

/// A single tab. Owned by exactly one panel at any time; moving a tab
/// between panels transfers ownership, never copies.
pub struct Tab {
    /// Identifier, unique within the owning panel
    pub id: String,
    /// Display label shown in the tab bar
    pub label: String,
    /// Renderable body, if any
    pub content: Option<Box<dyn TabContent>>,
}

impl Tab {
    /// Create a tab with no content (renders as a placeholder)
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            content: None,
        }
    }

    /// Create a tab with renderable content
    pub fn with_content(
        id: impl Into<String>,
        label: impl Into<String>,
        content: Box<dyn TabContent>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            content: Some(content),
        }
    }
}
