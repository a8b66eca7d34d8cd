//! Panel geometry and hit testing.
//!
//! Everything here is pure: panel rectangles are computed from the store,
//! the persisted sizes, and the available area; hit testing maps screen
//! coordinates back onto tabs, drop areas, remove buttons, and resize
//! handles. The renderer and the event loop share these results, so what
//! is drawn and what is hit-tested can never disagree.

use unicode_width::UnicodeWidthStr;

use crate::storage::PanelSizes;
use crate::workspace::{Panel, TabStore};

/// Width of the remove button zone at the right end of a tab bar
const REMOVE_BUTTON_WIDTH: u16 = 3;

/// A rectangle in screen cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.x
            && col < self.x.saturating_add(self.width)
            && row >= self.y
            && row < self.y.saturating_add(self.height)
    }

    /// Column of the right edge (the border column when bordered)
    pub fn right_edge(&self) -> u16 {
        self.x.saturating_add(self.width.saturating_sub(1))
    }
}

/// Computed placement for one panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelGeometry {
    pub panel_id: String,
    pub rect: Rect,
    /// Split mode draws a border box around each panel
    pub bordered: bool,
    /// Every panel except the last exposes a right-edge resize handle
    pub resize_handle: bool,
}

impl PanelGeometry {
    /// The rect inside the border, if any
    pub fn inner(&self) -> Rect {
        if !self.bordered {
            return self.rect;
        }
        Rect {
            x: self.rect.x.saturating_add(1),
            y: self.rect.y.saturating_add(1),
            width: self.rect.width.saturating_sub(2),
            height: self.rect.height.saturating_sub(2),
        }
    }

    /// Row the tab bar occupies
    pub fn tab_bar_row(&self) -> u16 {
        self.inner().y
    }

    /// The content rect below the tab bar
    pub fn content(&self) -> Rect {
        let inner = self.inner();
        Rect {
            x: inner.x,
            y: inner.y.saturating_add(1),
            width: inner.width,
            height: inner.height.saturating_sub(1),
        }
    }
}

/// The even-split fallback width, as a percentage of the available width.
pub fn fallback_width_percent(screen_count: u8) -> f64 {
    100.0 / f64::from(screen_count.max(1))
}

fn percent_of(total: u16, percent: f64) -> u16 {
    (f64::from(total) * percent / 100.0).round() as u16
}

/// Compute panel rectangles for the current store state.
///
/// - no panels: empty (the renderer shows the welcome view)
/// - not split: the first panel fills the area, no border, no handle
/// - split: a horizontal strip; each non-last panel takes its persisted
///   width when resolvable, else `100 / screen_count` percent, clamped to
///   `min_width` and capped so every remaining panel keeps `min_width`;
///   the last panel absorbs the remaining space
///
/// Persisted heights are accepted in the mapping but a strip panel always
/// fills the full height of the area.
pub fn compute_panel_rects(
    store: &TabStore,
    sizes: &PanelSizes,
    area: Rect,
    min_width: u16,
) -> Vec<PanelGeometry> {
    let panels = store.panels();
    if panels.is_empty() {
        return Vec::new();
    }

    if !store.is_split_screen() {
        return vec![PanelGeometry {
            panel_id: panels[0].id.clone(),
            rect: area,
            bordered: false,
            resize_handle: false,
        }];
    }

    let count = panels.len();
    let mut geoms = Vec::with_capacity(count);
    let mut x = area.x;
    let mut remaining = area.width;

    for (i, panel) in panels.iter().enumerate() {
        let last = i + 1 == count;
        let width = if last {
            remaining
        } else {
            let persisted = sizes
                .get(&panel.id)
                .and_then(|record| record.width.as_ref())
                .and_then(|dim| dim.resolve(area.width));
            let fallback = percent_of(area.width, fallback_width_percent(store.screen_count()));

            // Keep room for a minimum-width panel in every slot after this one
            let reserve = min_width.saturating_mul((count - i - 1) as u16);
            persisted
                .unwrap_or(fallback)
                .max(min_width)
                .min(remaining.saturating_sub(reserve))
                .max(1)
        };

        geoms.push(PanelGeometry {
            panel_id: panel.id.clone(),
            rect: Rect::new(x, area.y, width, area.height),
            bordered: true,
            resize_handle: !last,
        });

        x = x.saturating_add(width);
        remaining = remaining.saturating_sub(width);
    }

    geoms
}

/// One tab's extent in its tab bar, relative to the bar's left edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSpan {
    pub tab_id: String,
    pub label: String,
    pub x: u16,
    pub width: u16,
}

/// Lay out a panel's tab labels left to right. Each tab occupies its
/// label width plus one cell of padding on each side; tabs that would
/// not fit in `avail` are dropped from the bar.
pub fn tab_spans(panel: &Panel, avail: u16) -> Vec<TabSpan> {
    let mut spans = Vec::with_capacity(panel.tabs.len());
    let mut x: u16 = 0;

    for tab in &panel.tabs {
        let width = (tab.label.width() as u16).saturating_add(2);
        if x.saturating_add(width) > avail {
            break;
        }
        spans.push(TabSpan {
            tab_id: tab.id.clone(),
            label: tab.label.clone(),
            x,
            width,
        });
        x = x.saturating_add(width);
    }

    spans
}

/// What a screen coordinate resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    /// A tab label in a panel's tab bar
    Tab {
        panel_id: String,
        tab_id: String,
        label: String,
    },
    /// Empty tab bar space (still a drop target for that panel)
    TabBar { panel_id: String },
    /// The remove-panel button (shown only when more than one panel)
    RemoveButton { panel_id: String },
    /// The panel body drop area
    PanelBody { panel_id: String },
    /// The divider handle right of panel `index`
    ResizeHandle { index: usize },
    Outside,
}

/// Resolve a screen coordinate against the computed panel geometry.
pub fn hit_test(geoms: &[PanelGeometry], store: &TabStore, col: u16, row: u16) -> HitTarget {
    // Divider handles win over the panels they border
    for (index, geom) in geoms.iter().enumerate() {
        if geom.resize_handle && col == geom.rect.right_edge() && geom.rect.contains(col, row) {
            return HitTarget::ResizeHandle { index };
        }
    }

    let show_remove = store.screen_count() > 1;

    for geom in geoms {
        if !geom.rect.contains(col, row) {
            continue;
        }

        let inner = geom.inner();
        if row == geom.tab_bar_row() && inner.contains(col, row) {
            if show_remove
                && inner.width >= REMOVE_BUTTON_WIDTH
                && col >= inner.x + inner.width - REMOVE_BUTTON_WIDTH
            {
                return HitTarget::RemoveButton {
                    panel_id: geom.panel_id.clone(),
                };
            }
            if let Some(panel) = store.panel(&geom.panel_id) {
                let bar_avail = tab_bar_avail(inner.width, show_remove);
                let offset = col - inner.x;
                for span in tab_spans(panel, bar_avail) {
                    if offset >= span.x && offset < span.x + span.width {
                        return HitTarget::Tab {
                            panel_id: geom.panel_id.clone(),
                            tab_id: span.tab_id,
                            label: span.label,
                        };
                    }
                }
            }
            return HitTarget::TabBar {
                panel_id: geom.panel_id.clone(),
            };
        }

        // Content and border cells both count as the panel's drop area
        return HitTarget::PanelBody {
            panel_id: geom.panel_id.clone(),
        };
    }

    HitTarget::Outside
}

/// Tab bar width available for tab labels
pub fn tab_bar_avail(inner_width: u16, show_remove: bool) -> u16 {
    if show_remove {
        inner_width.saturating_sub(REMOVE_BUTTON_WIDTH)
    } else {
        inner_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Dimension, SizeRecord};
    use crate::workspace::Tab;

    fn split_store(count: u8) -> TabStore {
        let mut store = TabStore::new();
        store.update_split_screen_count(count);
        store
    }

    #[test]
    fn fallback_is_exactly_one_third_for_three_panels() {
        assert_eq!(fallback_width_percent(3), 100.0 / 3.0);
    }

    #[test]
    fn three_panels_split_evenly_without_persisted_sizes() {
        let store = split_store(3);
        let sizes = PanelSizes::default();
        let area = Rect::new(0, 0, 120, 30);

        let geoms = compute_panel_rects(&store, &sizes, area, 20);
        let widths: Vec<u16> = geoms.iter().map(|g| g.rect.width).collect();
        assert_eq!(widths, vec![40, 40, 40]);
        assert_eq!(geoms[2].rect.x, 80);
    }

    #[test]
    fn persisted_width_overrides_fallback() {
        let store = split_store(3);
        let mut sizes = PanelSizes::default();
        let first_id = store.panels()[0].id.clone();
        sizes.record(&first_id, SizeRecord::cells(30, 30));

        let geoms = compute_panel_rects(&store, &sizes, Rect::new(0, 0, 120, 30), 20);
        let widths: Vec<u16> = geoms.iter().map(|g| g.rect.width).collect();
        assert_eq!(widths, vec![30, 40, 50]);
    }

    #[test]
    fn percent_width_resolves_against_area() {
        let store = split_store(2);
        let mut sizes = PanelSizes::default();
        let first_id = store.panels()[0].id.clone();
        sizes.record(
            &first_id,
            SizeRecord {
                width: Some(Dimension::Text("25%".into())),
                height: None,
            },
        );

        let geoms = compute_panel_rects(&store, &sizes, Rect::new(0, 0, 120, 30), 20);
        assert_eq!(geoms[0].rect.width, 30);
        assert_eq!(geoms[1].rect.width, 90);
    }

    #[test]
    fn widths_clamp_to_minimum_and_reserve_room() {
        let store = split_store(3);
        let mut sizes = PanelSizes::default();
        let ids: Vec<String> = store.panels().iter().map(|p| p.id.clone()).collect();
        sizes.record(&ids[0], SizeRecord::cells(200, 30));
        sizes.record(&ids[1], SizeRecord::cells(5, 30));

        let geoms = compute_panel_rects(&store, &sizes, Rect::new(0, 0, 120, 30), 20);
        let widths: Vec<u16> = geoms.iter().map(|g| g.rect.width).collect();
        // First capped so the rest keep their minimum; second clamped up
        assert_eq!(widths, vec![80, 20, 20]);
    }

    #[test]
    fn unresolvable_persisted_width_falls_back() {
        let store = split_store(2);
        let mut sizes = PanelSizes::default();
        let first_id = store.panels()[0].id.clone();
        sizes.record(
            &first_id,
            SizeRecord {
                width: Some(Dimension::Text("oops".into())),
                height: None,
            },
        );

        let geoms = compute_panel_rects(&store, &sizes, Rect::new(0, 0, 100, 30), 20);
        assert_eq!(geoms[0].rect.width, 50);
    }

    #[test]
    fn single_panel_fills_the_area_without_handles() {
        let store = split_store(1);
        let geoms =
            compute_panel_rects(&store, &PanelSizes::default(), Rect::new(0, 0, 80, 24), 20);

        assert_eq!(geoms.len(), 1);
        assert_eq!(geoms[0].rect, Rect::new(0, 0, 80, 24));
        assert!(!geoms[0].resize_handle);
        assert!(!geoms[0].bordered);
    }

    #[test]
    fn empty_store_yields_no_geometry() {
        let store = TabStore::new();
        let geoms =
            compute_panel_rects(&store, &PanelSizes::default(), Rect::new(0, 0, 80, 24), 20);
        assert!(geoms.is_empty());
    }

    #[test]
    fn only_the_last_panel_lacks_a_handle() {
        let store = split_store(3);
        let geoms =
            compute_panel_rects(&store, &PanelSizes::default(), Rect::new(0, 0, 120, 30), 20);
        assert_eq!(
            geoms.iter().map(|g| g.resize_handle).collect::<Vec<_>>(),
            vec![true, true, false]
        );
    }

    #[test]
    fn tab_spans_pack_left_to_right() {
        let mut panel = Panel::new("panel-1");
        panel.push_tab(Tab::new("t1", "One"));
        panel.push_tab(Tab::new("t2", "Two"));

        let spans = tab_spans(&panel, 40);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].x, 0);
        assert_eq!(spans[0].width, 5);
        assert_eq!(spans[1].x, 5);
    }

    #[test]
    fn tab_spans_drop_tabs_that_do_not_fit() {
        let mut panel = Panel::new("panel-1");
        panel.push_tab(Tab::new("t1", "One"));
        panel.push_tab(Tab::new("t2", "A very long tab label"));

        let spans = tab_spans(&panel, 10);
        assert_eq!(spans.len(), 1);
    }

    fn hit_fixture() -> (TabStore, Vec<PanelGeometry>) {
        let mut store = TabStore::new();
        store.update_split_screen_count(2);
        let ids: Vec<String> = store.panels().iter().map(|p| p.id.clone()).collect();
        store.add_tab(&ids[0], Tab::new("t1", "One"));
        store.add_tab(&ids[1], Tab::new("t2", "Two"));

        let geoms =
            compute_panel_rects(&store, &PanelSizes::default(), Rect::new(0, 0, 80, 24), 20);
        (store, geoms)
    }

    #[test]
    fn hit_tab_label() {
        let (store, geoms) = hit_fixture();
        // First panel: border at col 0, tab bar row 1, " One " spans cols 1..6
        let hit = hit_test(&geoms, &store, 2, 1);
        assert_eq!(
            hit,
            HitTarget::Tab {
                panel_id: geoms[0].panel_id.clone(),
                tab_id: "t1".into(),
                label: "One".into(),
            }
        );
    }

    #[test]
    fn hit_tab_bar_space_and_body() {
        let (store, geoms) = hit_fixture();
        assert_eq!(
            hit_test(&geoms, &store, 10, 1),
            HitTarget::TabBar {
                panel_id: geoms[0].panel_id.clone()
            }
        );
        assert_eq!(
            hit_test(&geoms, &store, 10, 10),
            HitTarget::PanelBody {
                panel_id: geoms[0].panel_id.clone()
            }
        );
    }

    #[test]
    fn hit_resize_handle_on_divider_column() {
        let (store, geoms) = hit_fixture();
        let edge = geoms[0].rect.right_edge();
        assert_eq!(
            hit_test(&geoms, &store, edge, 10),
            HitTarget::ResizeHandle { index: 0 }
        );
    }

    #[test]
    fn hit_remove_button_only_in_split_mode() {
        let (store, geoms) = hit_fixture();
        let inner = geoms[0].inner();
        let col = inner.x + inner.width - 1;
        assert_eq!(
            hit_test(&geoms, &store, col, geoms[0].tab_bar_row()),
            HitTarget::RemoveButton {
                panel_id: geoms[0].panel_id.clone()
            }
        );

        let mut single = TabStore::new();
        single.update_split_screen_count(1);
        let pid = single.panels()[0].id.clone();
        single.add_tab(&pid, Tab::new("t9", "Nine"));
        let single_geoms =
            compute_panel_rects(&single, &PanelSizes::default(), Rect::new(0, 0, 80, 24), 20);
        let hit = hit_test(&single_geoms, &single, 79, 0);
        assert_ne!(
            hit,
            HitTarget::RemoveButton {
                panel_id: single_geoms[0].panel_id.clone()
            }
        );
    }

    #[test]
    fn hit_outside_any_panel() {
        let (store, geoms) = hit_fixture();
        assert_eq!(hit_test(&geoms, &store, 5, 23 + 1), HitTarget::Outside);
    }
}
