//! TabStore - the injected state container for panels and tabs
//!
//! All layout-visible state lives here: the ordered panel list (order is
//! left-to-right position), the split-screen panel count, and the tab
//! ownership. Mutations are synchronous; callers re-render afterwards.

use tracing::{debug, info, warn};

use super::panel::Panel;
use super::tab::Tab;

/// Lower bound for the split-screen panel count
pub const MIN_SCREEN_COUNT: u8 = 1;
/// Upper bound for the split-screen panel count
pub const MAX_SCREEN_COUNT: u8 = 5;

/// State container holding panels, tabs, and the split-screen count.
pub struct TabStore {
    panels: Vec<Panel>,
    screen_count: u8,
    next_panel_seq: u32,
}

impl Default for TabStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TabStore {
    /// Create an empty store (no panels, count 1). The layout renders a
    /// welcome view until a count update creates panels.
    pub fn new() -> Self {
        Self {
            panels: Vec::new(),
            screen_count: MIN_SCREEN_COUNT,
            next_panel_seq: 1,
        }
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn screen_count(&self) -> u8 {
        self.screen_count
    }

    /// Split-screen mode is active whenever more than one panel is shown.
    pub fn is_split_screen(&self) -> bool {
        self.screen_count > 1
    }

    pub fn panel(&self, panel_id: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == panel_id)
    }

    fn panel_index(&self, panel_id: &str) -> Option<usize> {
        self.panels.iter().position(|p| p.id == panel_id)
    }

    /// Total number of tabs across all panels
    pub fn tab_count(&self) -> usize {
        self.panels.iter().map(|p| p.tabs.len()).sum()
    }

    /// Add a tab to a panel. Refuses duplicate tab ids (a tab id must
    /// identify exactly one tab across the whole store).
    pub fn add_tab(&mut self, panel_id: &str, tab: Tab) -> bool {
        if self.panels.iter().any(|p| p.contains_tab(&tab.id)) {
            warn!(tab_id = %tab.id, "refusing duplicate tab id");
            return false;
        }
        match self.panels.iter_mut().find(|p| p.id == panel_id) {
            Some(panel) => {
                panel.push_tab(tab);
                true
            }
            None => {
                warn!(%panel_id, "add_tab: no such panel");
                false
            }
        }
    }

    /// Make a tab active within its panel.
    pub fn activate_tab(&mut self, panel_id: &str, tab_id: &str) -> bool {
        match self.panels.iter_mut().find(|p| p.id == panel_id) {
            Some(panel) => panel.activate(tab_id),
            None => false,
        }
    }

    /// Move a tab between panels: remove-from-source + insert-into-target,
    /// never a copy. Same-panel moves and moves involving unknown panels
    /// or tabs are no-ops. The tab is only detached once the target is
    /// known to exist, so a move can never lose a tab.
    pub fn move_tab(&mut self, tab_id: &str, from_panel_id: &str, to_panel_id: &str) -> bool {
        if from_panel_id == to_panel_id {
            return false;
        }
        let Some(from_idx) = self.panel_index(from_panel_id) else {
            debug!(%from_panel_id, "move_tab: unknown source panel");
            return false;
        };
        let Some(to_idx) = self.panel_index(to_panel_id) else {
            debug!(%to_panel_id, "move_tab: unknown target panel");
            return false;
        };
        if !self.panels[from_idx].contains_tab(tab_id) {
            debug!(%tab_id, %from_panel_id, "move_tab: tab not in source panel");
            return false;
        }

        let Some(tab) = self.panels[from_idx].remove_tab(tab_id) else {
            return false;
        };

        // The arriving tab becomes visible where it lands.
        let target = &mut self.panels[to_idx];
        target.active_tab_id = Some(tab.id.clone());
        target.tabs.push(tab);

        info!(%tab_id, from = %from_panel_id, to = %to_panel_id, "moved tab");
        true
    }

    /// Set the split-screen panel count, clamped to [1, 5], and reconcile
    /// the panel list to exactly that many panels. Growing appends fresh
    /// empty panels; shrinking folds the tabs of trailing panels into the
    /// last surviving panel so no tab loses its owner.
    pub fn update_split_screen_count(&mut self, n: u8) {
        let n = n.clamp(MIN_SCREEN_COUNT, MAX_SCREEN_COUNT);
        let want = n as usize;
        self.screen_count = n;

        while self.panels.len() < want {
            let id = format!("panel-{}", self.next_panel_seq);
            self.next_panel_seq += 1;
            self.panels.push(Panel::new(id));
        }

        if self.panels.len() > want {
            let folded: Vec<Tab> = self
                .panels
                .drain(want..)
                .flat_map(|p| p.tabs)
                .collect();
            let survivor = &mut self.panels[want - 1];
            for tab in folded {
                if survivor.active_tab_id.is_none() {
                    survivor.active_tab_id = Some(tab.id.clone());
                }
                survivor.tabs.push(tab);
            }
        }

        debug!(count = n, panels = self.panels.len(), "updated split-screen count");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn store_with_tabs() -> TabStore {
        let mut store = TabStore::new();
        store.update_split_screen_count(2);
        store.add_tab("panel-1", Tab::new("t1", "One"));
        store.add_tab("panel-1", Tab::new("t2", "Two"));
        store.add_tab("panel-2", Tab::new("t3", "Three"));
        store
    }

    /// Every tab id stays unique within its panel and owned by exactly
    /// one panel, for any sequence of moves.
    fn assert_single_ownership(store: &TabStore) {
        let mut seen = HashSet::new();
        for panel in store.panels() {
            let mut in_panel = HashSet::new();
            for tab in &panel.tabs {
                assert!(in_panel.insert(tab.id.clone()), "duplicate in panel");
                assert!(seen.insert(tab.id.clone()), "tab owned by two panels");
            }
        }
    }

    #[test]
    fn move_tab_transfers_ownership() {
        let mut store = store_with_tabs();
        assert!(store.move_tab("t1", "panel-1", "panel-2"));

        assert!(!store.panel("panel-1").unwrap().contains_tab("t1"));
        assert!(store.panel("panel-2").unwrap().contains_tab("t1"));
        assert_single_ownership(&store);
    }

    #[test]
    fn move_sequences_preserve_single_ownership() {
        let mut store = store_with_tabs();
        let moves = [
            ("t1", "panel-1", "panel-2"),
            ("t3", "panel-2", "panel-1"),
            ("t1", "panel-2", "panel-1"),
            ("t1", "panel-1", "panel-1"),
            ("t2", "panel-1", "panel-2"),
            ("t2", "panel-2", "panel-1"),
        ];
        for (tab, from, to) in moves {
            store.move_tab(tab, from, to);
            assert_single_ownership(&store);
            assert_eq!(store.tab_count(), 3);
        }
    }

    #[test]
    fn same_panel_move_is_a_noop() {
        let mut store = store_with_tabs();
        assert!(!store.move_tab("t1", "panel-1", "panel-1"));
        assert_eq!(store.panel("panel-1").unwrap().tabs.len(), 2);
    }

    #[test]
    fn move_to_unknown_panel_keeps_the_tab() {
        let mut store = store_with_tabs();
        assert!(!store.move_tab("t1", "panel-1", "panel-9"));
        assert!(store.panel("panel-1").unwrap().contains_tab("t1"));
    }

    #[test]
    fn moved_tab_becomes_active_in_target() {
        let mut store = store_with_tabs();
        store.move_tab("t1", "panel-1", "panel-2");
        let target = store.panel("panel-2").unwrap();
        assert_eq!(target.active_tab_id.as_deref(), Some("t1"));
    }

    #[test]
    fn source_active_id_repointed_after_move() {
        let mut store = store_with_tabs();
        store.activate_tab("panel-1", "t1");
        store.move_tab("t1", "panel-1", "panel-2");
        let source = store.panel("panel-1").unwrap();
        assert_eq!(source.active_tab_id.as_deref(), Some("t2"));
    }

    #[test]
    fn duplicate_tab_ids_are_rejected() {
        let mut store = store_with_tabs();
        assert!(!store.add_tab("panel-2", Tab::new("t1", "Clone")));
        assert_eq!(store.tab_count(), 3);
    }

    #[test]
    fn count_is_clamped_to_valid_range() {
        let mut store = TabStore::new();
        store.update_split_screen_count(9);
        assert_eq!(store.screen_count(), MAX_SCREEN_COUNT);
        assert_eq!(store.panels().len(), 5);

        store.update_split_screen_count(0);
        assert_eq!(store.screen_count(), MIN_SCREEN_COUNT);
        assert_eq!(store.panels().len(), 1);
    }

    #[test]
    fn removing_a_panel_at_count_one_leaves_one() {
        let mut store = TabStore::new();
        store.update_split_screen_count(1);
        let count = store.screen_count();
        store.update_split_screen_count(count.saturating_sub(1).max(1));
        assert_eq!(store.screen_count(), 1);
        assert_eq!(store.panels().len(), 1);
    }

    #[test]
    fn shrinking_folds_tabs_into_survivor() {
        let mut store = TabStore::new();
        store.update_split_screen_count(3);
        store.add_tab("panel-1", Tab::new("t1", "One"));
        store.add_tab("panel-2", Tab::new("t2", "Two"));
        store.add_tab("panel-3", Tab::new("t3", "Three"));

        store.update_split_screen_count(2);

        assert_eq!(store.panels().len(), 2);
        assert_eq!(store.tab_count(), 3);
        let survivor = store.panel("panel-2").unwrap();
        assert!(survivor.contains_tab("t2"));
        assert!(survivor.contains_tab("t3"));
        assert_single_ownership(&store);
    }

    #[test]
    fn growing_appends_fresh_empty_panels() {
        let mut store = TabStore::new();
        store.update_split_screen_count(2);
        store.update_split_screen_count(1);
        store.update_split_screen_count(2);

        let ids: Vec<&str> = store.panels().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), 2);
        // Fresh ids, never a reused one
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(unique.len(), 2);
    }

    #[test]
    fn split_screen_flag_follows_count() {
        let mut store = TabStore::new();
        assert!(!store.is_split_screen());
        store.update_split_screen_count(3);
        assert!(store.is_split_screen());
        store.update_split_screen_count(1);
        assert!(!store.is_split_screen());
    }
}
