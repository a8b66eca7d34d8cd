//! Full-frame renderer for the panel layout.
//!
//! This module handles all visual rendering for tabdeck, including:
//! - The welcome view when no panels exist
//! - Single-panel and split-screen layouts
//! - Tab bars with active highlighting and the remove-panel button
//! - Panel borders whose right edges double as resize handles
//! - The floating drag overlay and the status bar
//!
//! # Rendering Architecture
//!
//! The renderer uses synchronized updates to prevent screen tearing:
//!
//! ```text
//! begin_frame()  → Hide cursor, disable autowrap, start sync
//!     ↓
//! render content → Panels, tab bars, status bar, overlay
//!     ↓
//! end_frame()    → Enable autowrap, end sync, flush
//! ```

use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo},
    execute,
    style::{ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::ColorScheme;
use crate::workspace::TabStore;

use super::layout::{tab_bar_avail, tab_spans, PanelGeometry, Rect};

/// Begin a render frame (synchronized update, hide cursor, disable autowrap)
fn begin_frame<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "\x1b[?2026h")?; // Begin synchronized update
    write!(out, "\x1b[?7l")?; // Disable autowrap
    execute!(out, Hide)?;
    Ok(())
}

/// End a render frame (enable autowrap, end synchronized update, flush)
fn end_frame<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "\x1b[?7h")?; // Enable autowrap
    write!(out, "\x1b[?2026l")?; // End synchronized update
    out.flush()?;
    Ok(())
}

/// Execute a render operation with frame guards, ensuring cleanup on error
fn with_frame<W: Write, F, R>(out: &mut W, f: F) -> io::Result<R>
where
    F: FnOnce(&mut W) -> io::Result<R>,
{
    begin_frame(out)?;
    let result = f(out);
    // Always end frame, even on error
    let _ = end_frame(out);
    result
}

/// Border characters
struct BorderChars {
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    horizontal: char,
    vertical: char,
}

impl BorderChars {
    fn single() -> Self {
        Self {
            top_left: '┌',
            top_right: '┐',
            bottom_left: '└',
            bottom_right: '┘',
            horizontal: '─',
            vertical: '│',
        }
    }
}

/// The floating label that follows the pointer during a tab drag
pub struct DragOverlay<'a> {
    pub label: &'a str,
    pub col: u16,
    pub row: u16,
}

/// Everything one frame needs
pub struct Frame<'a> {
    pub store: &'a TabStore,
    pub geoms: &'a [PanelGeometry],
    /// Full terminal area, including the status bar row
    pub area: Rect,
    pub drag_overlay: Option<DragOverlay<'a>>,
    /// Divider currently hovered or being dragged
    pub active_divider: Option<usize>,
}

/// Panel layout renderer
pub struct Renderer {
    pub color_scheme: ColorScheme,
    show_status_bar: bool,
}

impl Renderer {
    pub fn new(color_scheme: ColorScheme, show_status_bar: bool) -> Self {
        Self {
            color_scheme,
            show_status_bar,
        }
    }

    /// Render a complete frame
    pub fn render<W: Write>(&self, out: &mut W, frame: &Frame) -> io::Result<()> {
        with_frame(out, |out| {
            execute!(out, ResetColor, Clear(ClearType::All))?;

            if frame.geoms.is_empty() {
                self.render_welcome(out, frame.area)?;
            } else {
                for (index, geom) in frame.geoms.iter().enumerate() {
                    self.render_panel(out, frame, index, geom)?;
                }
            }

            if self.show_status_bar {
                self.render_status_bar(out, frame)?;
            }

            if let Some(overlay) = &frame.drag_overlay {
                self.render_drag_overlay(out, frame.area, overlay)?;
            }

            execute!(out, ResetColor)?;
            Ok(())
        })
    }

    /// Terminal state when no panels exist
    fn render_welcome<W: Write>(&self, out: &mut W, area: Rect) -> io::Result<()> {
        let lines = [
            "Welcome to tabdeck",
            "",
            "Open files as tabs:  tabdeck FILE [FILE...]",
            "Press q to quit",
        ];
        let start_row = (area.height / 2).saturating_sub(lines.len() as u16 / 2);

        execute!(
            out,
            SetForegroundColor(self.color_scheme.placeholder_fg.to_crossterm())
        )?;
        for (i, line) in lines.iter().enumerate() {
            let col = (area.width / 2).saturating_sub(line.width() as u16 / 2);
            execute!(out, MoveTo(col, start_row + i as u16))?;
            write!(out, "{line}")?;
        }
        execute!(out, ResetColor)?;
        Ok(())
    }

    fn render_panel<W: Write>(
        &self,
        out: &mut W,
        frame: &Frame,
        index: usize,
        geom: &PanelGeometry,
    ) -> io::Result<()> {
        if geom.bordered {
            self.render_border(out, frame, index, geom)?;
        }
        self.render_tab_bar(out, frame, geom)?;
        self.render_content(out, frame, geom)?;
        Ok(())
    }

    fn render_border<W: Write>(
        &self,
        out: &mut W,
        frame: &Frame,
        index: usize,
        geom: &PanelGeometry,
    ) -> io::Result<()> {
        let rect = geom.rect;
        if rect.width < 2 || rect.height < 2 {
            return Ok(());
        }
        let chars = BorderChars::single();
        let cs = &self.color_scheme;

        execute!(out, SetForegroundColor(cs.panel_border.to_crossterm()))?;

        let mid = chars.horizontal.to_string().repeat(rect.width as usize - 2);
        execute!(out, MoveTo(rect.x, rect.y))?;
        write!(out, "{}{}{}", chars.top_left, mid, chars.top_right)?;
        execute!(out, MoveTo(rect.x, rect.y + rect.height - 1))?;
        write!(out, "{}{}{}", chars.bottom_left, mid, chars.bottom_right)?;

        for row in rect.y + 1..rect.y + rect.height - 1 {
            execute!(out, MoveTo(rect.x, row))?;
            write!(out, "{}", chars.vertical)?;
        }

        // Right edge doubles as the resize handle; highlight while
        // hovered or mid-drag
        let handle_active = geom.resize_handle && frame.active_divider == Some(index);
        if handle_active {
            execute!(
                out,
                SetForegroundColor(cs.panel_border_active.to_crossterm())
            )?;
        }
        for row in rect.y + 1..rect.y + rect.height - 1 {
            execute!(out, MoveTo(rect.right_edge(), row))?;
            write!(out, "{}", chars.vertical)?;
        }

        execute!(out, ResetColor)?;
        Ok(())
    }

    fn render_tab_bar<W: Write>(
        &self,
        out: &mut W,
        frame: &Frame,
        geom: &PanelGeometry,
    ) -> io::Result<()> {
        let cs = &self.color_scheme;
        let inner = geom.inner();
        if inner.width == 0 {
            return Ok(());
        }
        let row = geom.tab_bar_row();

        // Bar background
        execute!(
            out,
            MoveTo(inner.x, row),
            SetBackgroundColor(cs.tab_bar_bg.to_crossterm()),
            SetForegroundColor(cs.tab_bar_fg.to_crossterm())
        )?;
        write!(out, "{:width$}", "", width = inner.width as usize)?;

        let Some(panel) = frame.store.panel(&geom.panel_id) else {
            execute!(out, ResetColor)?;
            return Ok(());
        };

        let show_remove = frame.store.screen_count() > 1;
        let avail = tab_bar_avail(inner.width, show_remove);

        for span in tab_spans(panel, avail) {
            let active = panel.active_tab_id.as_deref() == Some(span.tab_id.as_str());
            if active {
                execute!(
                    out,
                    SetBackgroundColor(cs.tab_active_bg.to_crossterm()),
                    SetForegroundColor(cs.tab_active_fg.to_crossterm())
                )?;
            } else {
                execute!(
                    out,
                    SetBackgroundColor(cs.tab_inactive_bg.to_crossterm()),
                    SetForegroundColor(cs.tab_inactive_fg.to_crossterm())
                )?;
            }
            execute!(out, MoveTo(inner.x + span.x, row))?;
            write!(out, " {} ", span.label)?;
        }

        if show_remove && inner.width >= 3 {
            execute!(
                out,
                MoveTo(inner.x + inner.width - 3, row),
                SetBackgroundColor(cs.tab_bar_bg.to_crossterm()),
                SetForegroundColor(cs.tab_bar_fg.to_crossterm())
            )?;
            write!(out, " ✕ ")?;
        }

        execute!(out, ResetColor)?;
        Ok(())
    }

    fn render_content<W: Write>(
        &self,
        out: &mut W,
        frame: &Frame,
        geom: &PanelGeometry,
    ) -> io::Result<()> {
        let content_rect = geom.content();
        if content_rect.width == 0 || content_rect.height == 0 {
            return Ok(());
        }

        let panel = frame.store.panel(&geom.panel_id);
        let active_content = panel
            .and_then(|p| p.active_tab())
            .and_then(|tab| tab.content.as_ref());

        let Some(content) = active_content else {
            // No active tab with content: neutral placeholder
            let text = "Select content";
            let col =
                content_rect.x + (content_rect.width / 2).saturating_sub(text.width() as u16 / 2);
            let row = content_rect.y + content_rect.height / 2;
            execute!(
                out,
                MoveTo(col, row),
                SetForegroundColor(self.color_scheme.placeholder_fg.to_crossterm())
            )?;
            write!(out, "{text}")?;
            execute!(out, ResetColor)?;
            return Ok(());
        };

        execute!(out, ResetColor)?;
        let lines = content.lines(content_rect.width);
        for (i, line) in lines.iter().take(content_rect.height as usize).enumerate() {
            execute!(out, MoveTo(content_rect.x, content_rect.y + i as u16))?;
            write!(out, "{}", truncate_to_width(line, content_rect.width))?;
        }
        Ok(())
    }

    fn render_status_bar<W: Write>(&self, out: &mut W, frame: &Frame) -> io::Result<()> {
        let cs = &self.color_scheme;
        let area = frame.area;
        if area.height == 0 {
            return Ok(());
        }
        let row = area.y + area.height - 1;

        let text = format!(
            " {} panels · {} tabs │ drag a tab to move it · drag a divider to resize · 1-5 +/- panels · q quit",
            frame.store.panels().len(),
            frame.store.tab_count(),
        );

        execute!(
            out,
            MoveTo(area.x, row),
            SetBackgroundColor(cs.status_bar_bg.to_crossterm()),
            SetForegroundColor(cs.status_bar_fg.to_crossterm())
        )?;
        write!(
            out,
            "{:width$}",
            truncate_to_width(&text, area.width),
            width = area.width as usize
        )?;
        execute!(out, ResetColor)?;
        Ok(())
    }

    fn render_drag_overlay<W: Write>(
        &self,
        out: &mut W,
        area: Rect,
        overlay: &DragOverlay,
    ) -> io::Result<()> {
        let cs = &self.color_scheme;
        let text = format!(" {} ", overlay.label);
        let text = truncate_to_width(&text, area.width);
        let width = text.width() as u16;

        // Keep the overlay on screen
        let col = overlay.col.min(area.width.saturating_sub(width));
        let row = overlay.row.min(area.height.saturating_sub(1));

        execute!(
            out,
            MoveTo(col, row),
            SetBackgroundColor(cs.overlay_bg.to_crossterm()),
            SetForegroundColor(cs.overlay_fg.to_crossterm())
        )?;
        write!(out, "{text}")?;
        execute!(out, ResetColor)?;
        Ok(())
    }
}

/// Clip a string to a display width, never splitting a wide character
fn truncate_to_width(s: &str, max: u16) -> String {
    let max = max as usize;
    let mut width = 0usize;
    let mut out = String::new();
    for ch in s.chars() {
        let cw = ch.width().unwrap_or(0);
        if width + cw > max {
            break;
        }
        out.push(ch);
        width += cw;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_display_width() {
        assert_eq!(truncate_to_width("hello", 3), "hel");
        assert_eq!(truncate_to_width("hello", 10), "hello");
        // Wide characters never get split in half
        assert_eq!(truncate_to_width("日本語", 4), "日本");
        assert_eq!(truncate_to_width("日本語", 5), "日本");
    }
}
