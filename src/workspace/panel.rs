//! Panel - a region of the layout holding an ordered set of tabs

use super::tab::Tab;

/// A panel owns an ordered sequence of tabs and tracks which one is
/// active. The tab order determines tab-bar display order.
pub struct Panel {
    /// Identifier, unique within the session
    pub id: String,
    /// Tabs in display order
    pub tabs: Vec<Tab>,
    /// Active tab id. If set, always references a tab in `tabs`.
    pub active_tab_id: Option<String>,
}

impl Panel {
    /// Create an empty panel
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tabs: Vec::new(),
            active_tab_id: None,
        }
    }

    pub fn contains_tab(&self, tab_id: &str) -> bool {
        self.tabs.iter().any(|t| t.id == tab_id)
    }

    pub fn tab(&self, tab_id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == tab_id)
    }

    /// Get the active tab, if one is set
    pub fn active_tab(&self) -> Option<&Tab> {
        let id = self.active_tab_id.as_deref()?;
        self.tab(id)
    }

    /// Append a tab. The first tab added becomes active.
    pub fn push_tab(&mut self, tab: Tab) {
        if self.active_tab_id.is_none() {
            self.active_tab_id = Some(tab.id.clone());
        }
        self.tabs.push(tab);
    }

    /// Remove a tab by id, re-pointing the active id at the last
    /// remaining tab (or clearing it) if it referenced the removed one.
    pub fn remove_tab(&mut self, tab_id: &str) -> Option<Tab> {
        let pos = self.tabs.iter().position(|t| t.id == tab_id)?;
        let tab = self.tabs.remove(pos);

        if self.active_tab_id.as_deref() == Some(tab_id) {
            self.active_tab_id = self.tabs.last().map(|t| t.id.clone());
        }

        Some(tab)
    }

    /// Make a tab active. Returns false if the tab is not in this panel.
    pub fn activate(&mut self, tab_id: &str) -> bool {
        if self.contains_tab(tab_id) {
            self.active_tab_id = Some(tab_id.to_string());
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tab_becomes_active() {
        let mut panel = Panel::new("panel-1");
        panel.push_tab(Tab::new("t1", "One"));
        panel.push_tab(Tab::new("t2", "Two"));
        assert_eq!(panel.active_tab_id.as_deref(), Some("t1"));
    }

    #[test]
    fn removing_active_tab_repoints_active_id() {
        let mut panel = Panel::new("panel-1");
        panel.push_tab(Tab::new("t1", "One"));
        panel.push_tab(Tab::new("t2", "Two"));
        panel.activate("t2");

        panel.remove_tab("t2");
        assert_eq!(panel.active_tab_id.as_deref(), Some("t1"));

        panel.remove_tab("t1");
        assert_eq!(panel.active_tab_id, None);
    }

    #[test]
    fn removing_inactive_tab_keeps_active_id() {
        let mut panel = Panel::new("panel-1");
        panel.push_tab(Tab::new("t1", "One"));
        panel.push_tab(Tab::new("t2", "Two"));

        panel.remove_tab("t2");
        assert_eq!(panel.active_tab_id.as_deref(), Some("t1"));
    }

    #[test]
    fn activate_rejects_unknown_tab() {
        let mut panel = Panel::new("panel-1");
        panel.push_tab(Tab::new("t1", "One"));
        assert!(!panel.activate("missing"));
        assert_eq!(panel.active_tab_id.as_deref(), Some("t1"));
    }
}
