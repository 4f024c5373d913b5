#![forbid(unsafe_code)]

//! Tiles, their placement and the placeholders that fill the last row.
//!
//! # Placement
//!
//! Each tile carries grid data *hints*. Hints with a negative `grid_x` or
//! `grid_y` ask for automatic placement: such tiles are laid left to right
//! in insertion order, wrapping after `grid_column_count` columns and
//! skipping cells already taken. Hints with a position are placed first,
//! moved and narrowed as needed to stay inside the columns.
//!
//! # Sharing
//!
//! [`TileGrid`] is a cheap handle. The [`TileGridLayout`] installed on the
//! container and the host that adds tiles and scrolls hold clones of the
//! same grid.
//!
//! [`TileGridLayout`]: crate::TileGridLayout

use std::cell::{RefCell, RefMut};
use std::fmt;
use std::ops::Range;
use std::rc::Rc;

use gridkit_core::Result;
use gridkit_layout::GridData;
use gridkit_runtime::{BoxElement, ComponentId, Element, LayoutTree, NullLayout};
use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::animation::TileMove;
use crate::virtual_scrolling::{RowMetrics, VirtualScrolling};

/// Position value requesting automatic placement.
pub const AUTO_POSITION: i32 = -1;

/// Hints for an automatically placed tile spanning `w x h` cells.
#[must_use]
pub fn auto_hints(grid_w: i32, grid_h: i32) -> GridData {
    GridData::new(AUTO_POSITION, AUTO_POSITION).span(grid_w, grid_h)
}

fn is_auto(hints: &GridData) -> bool {
    hints.grid_x < 0 || hints.grid_y < 0
}

/// Columns that fit into `width`, at most `preferred` and at least one.
#[must_use]
pub fn effective_column_count(width: i32, preferred: usize, column_width: i32, hgap: i32) -> usize {
    let preferred = preferred.max(1);
    let step = column_width + hgap;
    if step <= 0 {
        return preferred;
    }
    let fits = ((width + hgap) / step).max(1) as usize;
    fits.min(preferred)
}

/// Placeholders needed to fill the row of the last tile.
///
/// With no tiles a whole row of placeholders is shown.
#[must_use]
pub fn placeholder_count(placed: &[GridData], columns: usize) -> usize {
    let columns = columns.max(1) as i32;
    let last_x = placed.last().map_or(-1, |gd| gd.grid_x + gd.grid_w - 1);
    if last_x >= columns - 1 {
        0
    } else {
        (columns - 1 - last_x) as usize
    }
}

/// Placed grid data of one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arrangement {
    /// One entry per tile, in tile order.
    pub tiles: Vec<GridData>,
    pub placeholders: Vec<GridData>,
}

impl Arrangement {
    /// Rows covered by tiles and placeholders.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.iter()
            .map(|gd| (gd.grid_y + gd.grid_h).max(0) as usize)
            .max()
            .unwrap_or(0)
    }

    /// Tiles, then placeholders.
    pub fn iter(&self) -> impl Iterator<Item = &GridData> {
        self.tiles.iter().chain(&self.placeholders)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len() + self.placeholders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cursor over a grid of fixed width.
struct Placer {
    columns: i32,
    occupied: FxHashSet<(i32, i32)>,
    x: i32,
    y: i32,
}

impl Placer {
    fn new(columns: usize) -> Self {
        Self {
            columns: columns.max(1) as i32,
            occupied: FxHashSet::default(),
            x: 0,
            y: 0,
        }
    }

    fn occupy(&mut self, gd: &GridData) {
        for x in gd.grid_x..gd.grid_x + gd.grid_w {
            for y in gd.grid_y..gd.grid_y + gd.grid_h {
                self.occupied.insert((x, y));
            }
        }
    }

    fn is_free(&self, x: i32, y: i32, w: i32, h: i32) -> bool {
        (x..x + w).all(|cx| (y..y + h).all(|cy| !self.occupied.contains(&(cx, cy))))
    }

    /// Explicit position of `hints`, inside the columns.
    fn fix(&mut self, hints: &GridData) -> GridData {
        let mut gd = hints.normalized();
        gd.grid_x = gd.grid_x.min(self.columns - 1);
        gd.grid_w = gd.grid_w.min(self.columns - gd.grid_x);
        self.occupy(&gd);
        gd
    }

    /// Next free spot for a `w x h` tile at or after the cursor.
    fn place(&mut self, hints: GridData) -> GridData {
        let bounded = hints.normalized();
        let w = bounded.grid_w.min(self.columns);
        let h = bounded.grid_h;
        loop {
            if self.x + w > self.columns {
                self.x = 0;
                self.y += 1;
                continue;
            }
            if self.is_free(self.x, self.y, w, h) {
                break;
            }
            self.x += 1;
        }
        let gd = GridData {
            grid_x: self.x,
            grid_y: self.y,
            grid_w: w,
            grid_h: h,
            ..hints
        };
        self.occupy(&gd);
        self.x += w;
        gd
    }
}

/// Place tiles with `hints` on a grid `columns` wide.
#[must_use]
pub fn arrange(hints: &[GridData], columns: usize, with_placeholders: bool) -> Arrangement {
    let mut placer = Placer::new(columns);
    let mut tiles: Vec<Option<GridData>> = vec![None; hints.len()];
    for (slot, gd) in tiles.iter_mut().zip(hints) {
        if !is_auto(gd) {
            *slot = Some(placer.fix(gd));
        }
    }
    let tiles: Vec<GridData> = tiles
        .into_iter()
        .zip(hints)
        .map(|(fixed, gd)| fixed.unwrap_or_else(|| placer.place(*gd)))
        .collect();

    let placeholders = if with_placeholders {
        (0..placeholder_count(&tiles, columns))
            .map(|_| placer.place(GridData::default()))
            .collect()
    } else {
        Vec::new()
    };
    Arrangement { tiles, placeholders }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Tile {
    pub(crate) id: ComponentId,
    pub(crate) hints: GridData,
}

#[derive(Debug)]
pub(crate) struct TileGridState {
    pub(crate) container: ComponentId,
    pub(crate) tiles: Vec<Tile>,
    pub(crate) placeholders: Vec<ComponentId>,
    pub(crate) grid_column_count: usize,
    pub(crate) with_placeholders: bool,
    pub(crate) placeholder_template: BoxElement,
    pub(crate) virtual_scrolling: VirtualScrolling,
    pub(crate) scroll_top: i32,
    /// `0` uses the container height.
    pub(crate) viewport_height: i32,
    pub(crate) view_range: Range<usize>,
    pub(crate) row_count: usize,
    /// Row height and gap of the last layout.
    pub(crate) rows: RowMetrics,
    pub(crate) moves: Vec<TileMove>,
}

/// Shared handle to the tiles of one container.
pub struct TileGrid {
    state: Rc<RefCell<TileGridState>>,
}

impl Clone for TileGrid {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl fmt::Debug for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("TileGrid")
            .field("container", &state.container)
            .field("tiles", &state.tiles.len())
            .field("placeholders", &state.placeholders.len())
            .field("grid_column_count", &state.grid_column_count)
            .field("view_range", &state.view_range)
            .finish()
    }
}

impl TileGrid {
    /// Grid for the tiles of `container`, four columns wide.
    #[must_use]
    pub fn new(container: ComponentId) -> Self {
        Self {
            state: Rc::new(RefCell::new(TileGridState {
                container,
                tiles: Vec::new(),
                placeholders: Vec::new(),
                grid_column_count: 4,
                with_placeholders: false,
                placeholder_template: BoxElement::new(),
                virtual_scrolling: VirtualScrolling::default(),
                scroll_top: 0,
                viewport_height: 0,
                view_range: 0..0,
                row_count: 0,
                rows: RowMetrics::new(0, 0),
                moves: Vec::new(),
            })),
        }
    }

    #[must_use]
    pub fn with_column_count(self, columns: usize) -> Self {
        self.state.borrow_mut().grid_column_count = columns.max(1);
        self
    }

    #[must_use]
    pub fn with_placeholders(self, with_placeholders: bool) -> Self {
        self.state.borrow_mut().with_placeholders = with_placeholders;
        self
    }

    /// Element cloned for every placeholder.
    #[must_use]
    pub fn with_placeholder_template(self, template: BoxElement) -> Self {
        self.state.borrow_mut().placeholder_template = template;
        self
    }

    #[must_use]
    pub fn with_virtual_scrolling(self, virtual_scrolling: VirtualScrolling) -> Self {
        self.state.borrow_mut().virtual_scrolling = virtual_scrolling;
        self
    }

    pub(crate) fn state(&self) -> RefMut<'_, TileGridState> {
        self.state.borrow_mut()
    }

    #[must_use]
    pub fn container(&self) -> ComponentId {
        self.state.borrow().container
    }

    /// Tile ids in order.
    #[must_use]
    pub fn tiles(&self) -> Vec<ComponentId> {
        self.state.borrow().tiles.iter().map(|t| t.id).collect()
    }

    /// Placeholder ids created by the last layout.
    #[must_use]
    pub fn placeholders(&self) -> Vec<ComponentId> {
        self.state.borrow().placeholders.clone()
    }

    #[must_use]
    pub fn grid_column_count(&self) -> usize {
        self.state.borrow().grid_column_count
    }

    fn invalidate(&self, tree: &mut LayoutTree) -> Result<()> {
        let container = self.container();
        tree.invalidate_layout_tree(container, true)
    }

    /// Add a tile at the end. `hints` of `None` means one auto-placed cell.
    pub fn add_tile(
        &self,
        tree: &mut LayoutTree,
        element: impl Element + 'static,
        hints: Option<GridData>,
    ) -> Result<ComponentId> {
        let container = self.container();
        let id = tree.insert_with_layout(Some(container), element, NullLayout)?;
        self.state().tiles.push(Tile {
            id,
            hints: hints.unwrap_or_else(|| auto_hints(1, 1)),
        });
        trace!(container = container.index(), tile = id.index(), "tile added");
        self.invalidate(tree)?;
        Ok(id)
    }

    /// Remove `tile` from the grid and the tree. Unknown tiles are ignored.
    pub fn remove_tile(&self, tree: &mut LayoutTree, tile: ComponentId) -> Result<bool> {
        let removed = {
            let mut state = self.state();
            let before = state.tiles.len();
            state.tiles.retain(|t| t.id != tile);
            state.tiles.len() != before
        };
        if !removed {
            return Ok(false);
        }
        tree.remove(tile)?;
        self.invalidate(tree)?;
        Ok(true)
    }

    /// Replace the hints of `tile`.
    pub fn set_tile_hints(&self, tree: &mut LayoutTree, tile: ComponentId, hints: GridData) -> Result<bool> {
        let changed = {
            let mut state = self.state();
            match state.tiles.iter_mut().find(|t| t.id == tile) {
                Some(t) if t.hints != hints => {
                    t.hints = hints;
                    true
                }
                _ => false,
            }
        };
        if changed {
            self.invalidate(tree)?;
        }
        Ok(changed)
    }

    pub fn set_grid_column_count(&self, tree: &mut LayoutTree, columns: usize) -> Result<()> {
        let columns = columns.max(1);
        if std::mem::replace(&mut self.state().grid_column_count, columns) != columns {
            self.invalidate(tree)?;
        }
        Ok(())
    }

    pub fn set_with_placeholders(&self, tree: &mut LayoutTree, with_placeholders: bool) -> Result<()> {
        if std::mem::replace(&mut self.state().with_placeholders, with_placeholders) != with_placeholders {
            self.invalidate(tree)?;
        }
        Ok(())
    }

    pub fn set_virtual(&self, tree: &mut LayoutTree, enabled: bool) -> Result<()> {
        let changed = {
            let mut state = self.state();
            let was = state.virtual_scrolling.is_enabled();
            state.virtual_scrolling.set_enabled(enabled);
            was != enabled
        };
        if changed {
            self.invalidate(tree)?;
        }
        Ok(())
    }

    /// Fix the view range size; `0` derives it from the viewport.
    pub fn set_view_range_size(&self, tree: &mut LayoutTree, size: usize) -> Result<()> {
        let changed = {
            let mut state = self.state();
            let was = state.virtual_scrolling.view_range_size();
            state.virtual_scrolling.set_view_range_size(size);
            was != size
        };
        if changed {
            self.invalidate(tree)?;
        }
        Ok(())
    }

    /// Height of the visible part of the grid; `0` uses the container.
    pub fn set_viewport_height(&self, tree: &mut LayoutTree, height: i32) -> Result<()> {
        if std::mem::replace(&mut self.state().viewport_height, height) != height {
            self.invalidate(tree)?;
        }
        Ok(())
    }

    /// Scroll to `scroll_top`. Relayouts only if the view range changes.
    ///
    /// Returns whether it did.
    pub fn set_scroll_top(&self, tree: &mut LayoutTree, scroll_top: i32) -> Result<bool> {
        let changed = {
            let mut state = self.state();
            state.scroll_top = scroll_top;
            if !state.virtual_scrolling.is_enabled() {
                return Ok(false);
            }
            let viewport = if state.viewport_height > 0 {
                state.viewport_height
            } else {
                tree.bounds(state.container)?.height
            };
            let range = state
                .virtual_scrolling
                .current_view_range(scroll_top, viewport, state.row_count, state.rows);
            range != state.view_range
        };
        if changed {
            debug!(container = self.container().index(), scroll_top, "view range changed");
            self.invalidate(tree)?;
        }
        Ok(changed)
    }

    #[must_use]
    pub fn scroll_top(&self) -> i32 {
        self.state.borrow().scroll_top
    }

    /// Rows rendered by the last layout.
    #[must_use]
    pub fn view_range(&self) -> Range<usize> {
        self.state.borrow().view_range.clone()
    }

    /// Rows of the last layout.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.state.borrow().row_count
    }

    /// Tiles the last layout rendered, in order.
    #[must_use]
    pub fn rendered_tiles(&self, tree: &LayoutTree) -> Vec<ComponentId> {
        self.state
            .borrow()
            .tiles
            .iter()
            .map(|t| t.id)
            .filter(|&id| tree.element(id).is_ok_and(|e| e.is_attached() && e.is_visible()))
            .collect()
    }

    /// Drain the moves animated since the last call.
    pub fn take_moves(&self) -> Vec<TileMove> {
        std::mem::take(&mut self.state().moves)
    }

    /// Visible tiles and their hints.
    pub(crate) fn visible_tiles(&self, tree: &LayoutTree) -> Result<Vec<Tile>> {
        let state = self.state.borrow();
        let mut visible = Vec::with_capacity(state.tiles.len());
        for tile in &state.tiles {
            if tree.element(tile.id)?.is_visible() {
                visible.push(*tile);
            }
        }
        Ok(visible)
    }

    /// Create or remove placeholder components until there are `count`.
    pub(crate) fn sync_placeholders(&self, tree: &mut LayoutTree, count: usize) -> Result<Vec<ComponentId>> {
        let mut state = self.state();
        while state.placeholders.len() > count {
            if let Some(id) = state.placeholders.pop() {
                tree.remove(id)?;
            }
        }
        while state.placeholders.len() < count {
            let element = state.placeholder_template.clone();
            let id = tree.insert_with_layout(Some(state.container), element, NullLayout)?;
            state.placeholders.push(id);
        }
        Ok(state.placeholders.clone())
    }
}
