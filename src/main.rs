//! tabdeck - A tabbed, split-screen terminal workspace
//!
//! tabdeck shows up to five side-by-side panels, each with its own tab
//! bar. Tabs hold text content (files opened from the command line, or
//! built-in demo pages) and can be dragged between panels with the mouse.
//! Panel dividers are draggable too, and panel widths persist across runs.
//!
//! # Features
//!
//! - **Split Screen**: 1 to 5 panels side by side
//! - **Drag and Drop**: Move tabs between panels by dragging their labels
//! - **Resizable Panels**: Drag the divider between panels; widths are
//!   remembered in `~/.tabdeck/panel-sizes.json`
//! - **Color Schemes**: Built-in themes selectable via config or `--theme`
//!
//! # Quick Start
//!
//! ```text
//! tabdeck                        # Start with the demo tabs
//! tabdeck notes.txt todo.txt     # Open files as tabs
//! tabdeck -s 3 *.md              # Three panels from the start
//! ```
//!
//! # Keys and Mouse
//!
//! | Input | Action |
//! |-------|--------|
//! | click tab | Select tab |
//! | drag tab | Move tab to another panel |
//! | drag divider | Resize panel |
//! | click ✕ | Remove a panel |
//! | 1-5 | Set panel count |
//! | + / - | Add / remove a panel |
//! | Esc | Cancel an in-flight drag |
//! | q | Quit |

mod config;
mod content;
mod storage;
mod ui;
mod workspace;

use std::env;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use crossterm::cursor::Show;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseButton, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use crate::config::{ColorScheme, Config};
use crate::content::TextContent;
use crate::storage::{FileStore, KvStore, MemStore, PanelSizes, SizeRecord};
use crate::ui::layout::PanelGeometry;
use crate::ui::{compute_panel_rects, hit_test, DragOverlay, Frame, HitTarget, Rect, Renderer};
use crate::workspace::{DragCoordinator, DragPayload, DropTarget, Tab, TabHandle, TabStore};

/// Command line arguments
#[derive(Default)]
struct CliArgs {
    /// Files to open as tabs
    files: Vec<PathBuf>,
    /// Initial panel count
    split: Option<u8>,
    /// Color scheme override
    theme: Option<String>,
}

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_version() {
    eprintln!("tabdeck {}", VERSION);
}

fn print_help() {
    eprintln!("tabdeck {} - A tabbed, split-screen terminal workspace", VERSION);
    eprintln!();
    eprintln!("Usage: tabdeck [OPTIONS] [FILE...]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --split <N>       Start with N panels (1-5)");
    eprintln!("  -t, --theme <NAME>    Color scheme: {}", ColorScheme::list().join(", "));
    eprintln!("  -v, --version         Show version");
    eprintln!("  -h, --help            Show this help");
    eprintln!();
    eprintln!("Mouse:");
    eprintln!("  click tab             Select tab");
    eprintln!("  drag tab              Move tab to another panel");
    eprintln!("  drag divider          Resize panel (width is remembered)");
    eprintln!("  click ✕               Remove a panel");
    eprintln!();
    eprintln!("Keys:");
    eprintln!("  1-5                   Set panel count");
    eprintln!("  + / -                 Add / remove a panel");
    eprintln!("  Esc                   Cancel an in-flight drag");
    eprintln!("  q                     Quit");
    eprintln!();
    eprintln!("Configuration: ~/.tabdeck/config.toml");
}

fn parse_args() -> Result<CliArgs, String> {
    let args: Vec<String> = env::args().collect();
    let mut cli = CliArgs::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                std::process::exit(0);
            }
            "-s" | "--split" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing panel count argument".to_string());
                }
                let n: u8 = args[i]
                    .parse()
                    .map_err(|_| format!("Invalid panel count: {}", args[i]))?;
                if !(1..=5).contains(&n) {
                    return Err(format!("Panel count must be 1-5, got {}", n));
                }
                cli.split = Some(n);
            }
            "-t" | "--theme" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing theme argument".to_string());
                }
                cli.theme = Some(args[i].clone());
            }
            arg if arg.starts_with('-') => {
                return Err(format!("Unknown option: {}", arg));
            }
            arg => {
                cli.files.push(PathBuf::from(arg));
            }
        }
        i += 1;
    }

    Ok(cli)
}

/// Initialize logging to `~/.tabdeck/tabdeck.log`. The terminal itself is
/// the UI, so logs never go to stdout.
fn init_logging() {
    let home = env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .map(PathBuf::from);

    let log_path = home
        .map(|h| h.join(".tabdeck").join("tabdeck.log"))
        .unwrap_or_else(|| PathBuf::from("tabdeck.log"));

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok();

    if let Some(file) = log_file {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::INFO)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

const WELCOME_TEXT: &str = "\
tabdeck is a tabbed, split-screen workspace for the terminal.

Click a tab to select it. Press 2 to split the screen, then drag a \
tab's label into another panel to move it there.

Drag the divider between panels to resize them; panel widths are \
remembered across runs in ~/.tabdeck/panel-sizes.json.
";

const GUIDE_TEXT: &str = "\
Mouse

  click tab      select tab
  drag tab       move tab to another panel
  drag divider   resize panel
  click x        remove a panel (its tabs fold into the neighbor)

Keys

  1-5            set panel count
  + / -          add or remove a panel
  Esc            cancel an in-flight drag
  q              quit

Configuration lives in ~/.tabdeck/config.toml.
";

/// Build the initial store: one tab per file, or the demo tabs, dealt
/// round-robin across the initial panels.
fn seed_store(args: &CliArgs) -> TabStore {
    let mut store = TabStore::new();
    store.update_split_screen_count(args.split.unwrap_or(1));
    let panel_ids: Vec<String> = store.panels().iter().map(|p| p.id.clone()).collect();

    let mut tabs: Vec<Tab> = Vec::new();
    if args.files.is_empty() {
        tabs.push(Tab::with_content(
            "tab-1",
            "Welcome",
            Box::new(TextContent::new(WELCOME_TEXT)),
        ));
        tabs.push(Tab::with_content(
            "tab-2",
            "Guide",
            Box::new(TextContent::new(GUIDE_TEXT)),
        ));
        // A contentless tab renders the "Select content" placeholder
        tabs.push(Tab::new("tab-3", "Scratch"));
    } else {
        for (i, path) in args.files.iter().enumerate() {
            let label = path
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| format!("tab {}", i + 1));
            match std::fs::read_to_string(path) {
                Ok(text) => tabs.push(Tab::with_content(
                    format!("tab-{}", i + 1),
                    label,
                    Box::new(TextContent::new(text)),
                )),
                Err(err) => {
                    warn!(path = %path.display(), %err, "skipping unreadable file");
                }
            }
        }
    }

    for (i, tab) in tabs.into_iter().enumerate() {
        store.add_tab(&panel_ids[i % panel_ids.len()], tab);
    }

    store
}

fn main() -> anyhow::Result<()> {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    init_logging();
    info!("tabdeck {} starting", VERSION);

    let mut cfg = Config::load();
    if let Some(theme) = &args.theme {
        cfg.color_scheme = theme.clone();
    }

    // Sizes fall back to an in-memory store when no home directory
    // exists; they simply won't survive the process.
    let mut kv: Box<dyn KvStore> = match FileStore::open() {
        Ok(store) => Box::new(store),
        Err(err) => {
            warn!(%err, "panel sizes will not persist");
            Box::new(MemStore::new())
        }
    };
    let mut sizes = PanelSizes::load(kv.as_ref());
    let mut store = seed_store(&args);

    let renderer = Renderer::new(cfg.color_scheme(), cfg.status_bar.visible);

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    let mut out = io::stdout();
    execute!(out, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to initialize terminal")?;

    let result = run_main_loop(
        &mut store,
        &mut sizes,
        kv.as_mut(),
        &renderer,
        cfg.panel.min_width,
        cfg.status_bar.visible,
    );

    // Restore the terminal even when the loop failed
    let _ = execute!(out, DisableMouseCapture, LeaveAlternateScreen, Show);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        error!("fatal: {:#}", e);
    }
    info!("tabdeck exiting");
    result
}

/// A tab that was pressed but not yet dragged
struct PressedTab {
    tab: TabHandle,
    panel_id: String,
}

/// Resolve the surface under the pointer into a drop target. Tab bars
/// carry the panel id explicitly; panel bodies only encode it in the
/// `droppable-` area id; dividers and anything outside cancel the drop.
fn drop_target_at(
    geoms: &[PanelGeometry],
    store: &TabStore,
    col: u16,
    row: u16,
) -> Option<DropTarget> {
    match hit_test(geoms, store, col, row) {
        HitTarget::Tab { panel_id, .. }
        | HitTarget::TabBar { panel_id }
        | HitTarget::RemoveButton { panel_id } => Some(DropTarget::tab_bar(panel_id)),
        HitTarget::PanelBody { panel_id } => Some(DropTarget::panel_area(&panel_id)),
        HitTarget::ResizeHandle { .. } | HitTarget::Outside => None,
    }
}

/// Live width update while a divider is dragged. Records in memory only;
/// the commit to the key-value store happens at resize-stop.
fn record_resize(
    sizes: &mut PanelSizes,
    geoms: &[PanelGeometry],
    index: usize,
    col: u16,
    min_width: u16,
) {
    let Some(geom) = geoms.get(index) else {
        return;
    };
    let width = col
        .saturating_sub(geom.rect.x)
        .saturating_add(1)
        .max(min_width);
    sizes.record(&geom.panel_id, SizeRecord::cells(width, geom.rect.height));
}

fn run_main_loop(
    store: &mut TabStore,
    sizes: &mut PanelSizes,
    kv: &mut dyn KvStore,
    renderer: &Renderer,
    min_width: u16,
    status_visible: bool,
) -> anyhow::Result<()> {
    let mut out = io::stdout();
    let (mut cols, mut rows) = terminal::size().context("failed to query terminal size")?;

    // One in-flight gesture at a time: either a tab drag or a divider
    // drag, never both.
    let mut drag = DragCoordinator::new();
    let mut pressed: Option<PressedTab> = None;
    let mut resizing: Option<usize> = None;
    let mut hovered_divider: Option<usize> = None;
    let mut pointer = (0u16, 0u16);
    let mut dirty = true;

    loop {
        let area = Rect::new(0, 0, cols, rows);
        let content_area = if status_visible && rows > 0 {
            Rect::new(0, 0, cols, rows - 1)
        } else {
            area
        };
        let geoms = compute_panel_rects(store, sizes, content_area, min_width);

        if dirty {
            let drag_overlay = drag.dragged_tab().map(|tab| DragOverlay {
                label: &tab.label,
                col: pointer.0,
                row: pointer.1,
            });
            let frame = Frame {
                store: &*store,
                geoms: &geoms,
                area,
                drag_overlay,
                active_divider: resizing.or(hovered_divider),
            };
            renderer.render(&mut out, &frame)?;
            dirty = false;
        }

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') => break,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                KeyCode::Esc => {
                    if drag.is_dragging() {
                        drag.on_drag_end(None, store);
                    }
                    pressed = None;
                    resizing = None;
                    dirty = true;
                }
                KeyCode::Char(c @ '1'..='5') => {
                    store.update_split_screen_count(c as u8 - b'0');
                    dirty = true;
                }
                KeyCode::Char('+') | KeyCode::Char('=') => {
                    store.update_split_screen_count(store.screen_count().saturating_add(1));
                    dirty = true;
                }
                KeyCode::Char('-') => {
                    // The store floors the count at one panel
                    store.update_split_screen_count(store.screen_count().saturating_sub(1));
                    dirty = true;
                }
                _ => {}
            },
            Event::Mouse(mouse) => {
                pointer = (mouse.column, mouse.row);
                match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        match hit_test(&geoms, store, mouse.column, mouse.row) {
                            HitTarget::Tab {
                                panel_id,
                                tab_id,
                                label,
                            } => {
                                store.activate_tab(&panel_id, &tab_id);
                                pressed = Some(PressedTab {
                                    tab: TabHandle { id: tab_id, label },
                                    panel_id,
                                });
                                dirty = true;
                            }
                            HitTarget::RemoveButton { .. } => {
                                store.update_split_screen_count(
                                    store.screen_count().saturating_sub(1),
                                );
                                dirty = true;
                            }
                            HitTarget::ResizeHandle { index } => {
                                resizing = Some(index);
                                dirty = true;
                            }
                            _ => {}
                        }
                    }
                    MouseEventKind::Drag(MouseButton::Left) => {
                        if let Some(index) = resizing {
                            record_resize(sizes, &geoms, index, mouse.column, min_width);
                            dirty = true;
                        } else {
                            if !drag.is_dragging() {
                                if let Some(p) = &pressed {
                                    drag.on_drag_start(DragPayload {
                                        tab: Some(p.tab.clone()),
                                        panel_id: Some(p.panel_id.clone()),
                                    });
                                }
                            }
                            if drag.is_dragging() {
                                let target =
                                    drop_target_at(&geoms, store, mouse.column, mouse.row);
                                drag.on_drag_over(target.as_ref());
                                dirty = true;
                            }
                        }
                    }
                    MouseEventKind::Up(MouseButton::Left) => {
                        if resizing.take().is_some() {
                            // Resize-stop: persist the recorded sizes
                            sizes.commit(kv);
                            dirty = true;
                        } else if drag.is_dragging() {
                            let target = drop_target_at(&geoms, store, mouse.column, mouse.row);
                            drag.on_drag_end(target.as_ref(), store);
                            dirty = true;
                        }
                        pressed = None;
                    }
                    MouseEventKind::Moved => {
                        let hovered = match hit_test(&geoms, store, mouse.column, mouse.row) {
                            HitTarget::ResizeHandle { index } => Some(index),
                            _ => None,
                        };
                        if hovered != hovered_divider {
                            hovered_divider = hovered;
                            dirty = true;
                        }
                    }
                    _ => {}
                }
            }
            Event::Resize(w, h) => {
                cols = w;
                rows = h;
                dirty = true;
            }
            _ => {}
        }
    }

    Ok(())
}
