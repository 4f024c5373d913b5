#![forbid(unsafe_code)]

//! [`Layout`] for tile grids.
//!
//! A pass places the visible tiles (see [`arrange`]), keeps the placeholder
//! components in step, solves the grid with [`GridLayoutEngine`] and then
//! applies bounds only to tiles whose rows fall into the view range. Tiles
//! outside the range are detached from the document; the grid owns the
//! attachment of its tiles. Moves are handed to the [`TileAnimator`]
//! before bounds are applied, so animating tiles defer their own layout.

use std::ops::Range;

use gridkit_core::{Dimension, Result, SizeHints};
use gridkit_layout::{GridData, GridLayoutEngine, GridMetrics, SizeFlag};
use gridkit_runtime::{ComponentId, Layout, LayoutTree, TreeMeasure};
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, trace};

use crate::animation::{Placement, TileAnimator};
use crate::tile_grid::{Arrangement, Tile, TileGrid, arrange, effective_column_count};
use crate::virtual_scrolling::RowMetrics;

/// Tile size, gaps and width limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TileGridLayoutConfig {
    pub column_width: i32,
    pub row_height: i32,
    pub hgap: i32,
    pub vgap: i32,
    /// Lower bound for the content width.
    pub min_width: i32,
    /// Upper bound for the content width; not positive means none.
    pub max_width: i32,
}

impl Default for TileGridLayoutConfig {
    fn default() -> Self {
        Self {
            column_width: 200,
            row_height: 150,
            hgap: 15,
            vgap: 20,
            min_width: 0,
            max_width: -1,
        }
    }
}

impl TileGridLayoutConfig {
    #[must_use]
    pub const fn with_units(mut self, column_width: i32, row_height: i32) -> Self {
        self.column_width = column_width;
        self.row_height = row_height;
        self
    }

    #[must_use]
    pub const fn with_gaps(mut self, hgap: i32, vgap: i32) -> Self {
        self.hgap = hgap;
        self.vgap = vgap;
        self
    }

    #[must_use]
    pub const fn with_min_width(mut self, min_width: i32) -> Self {
        self.min_width = min_width;
        self
    }

    #[must_use]
    pub const fn with_max_width(mut self, max_width: i32) -> Self {
        self.max_width = max_width;
        self
    }

    #[must_use]
    pub const fn metrics(&self) -> GridMetrics {
        GridMetrics::new(self.column_width, self.row_height, self.hgap, self.vgap)
    }

    #[must_use]
    pub const fn row_metrics(&self) -> RowMetrics {
        RowMetrics::new(self.row_height, self.vgap)
    }

    /// Width the tiles get out of `available` content width.
    #[must_use]
    pub fn content_width(&self, available: i32) -> i32 {
        let width = available.max(self.min_width);
        if self.max_width > 0 {
            width.min(self.max_width)
        } else {
            width
        }
    }
}

/// Layout of a [`TileGrid`] container.
#[derive(Debug)]
pub struct TileGridLayout {
    grid: TileGrid,
    config: TileGridLayoutConfig,
    engine: GridLayoutEngine,
    animator: TileAnimator,
}

impl TileGridLayout {
    #[must_use]
    pub fn new(grid: TileGrid, config: TileGridLayoutConfig) -> Self {
        Self {
            grid,
            config,
            engine: GridLayoutEngine::new(config.metrics()),
            animator: TileAnimator::new(false),
        }
    }

    /// Animate tile moves.
    #[must_use]
    pub fn with_animation(mut self, enabled: bool) -> Self {
        self.animator.set_enabled(enabled);
        self
    }

    #[must_use]
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    #[must_use]
    pub const fn config(&self) -> TileGridLayoutConfig {
        self.config
    }

    /// Place the visible tiles for a content `width`, or at the full
    /// column count without one.
    fn arrange(&self, tree: &LayoutTree, width: Option<i32>) -> Result<(Vec<Tile>, Arrangement)> {
        let tiles = self.grid.visible_tiles(tree)?;
        let (preferred, with_placeholders) = {
            let state = self.grid.state();
            (state.grid_column_count, state.with_placeholders)
        };
        let columns = width.map_or(preferred, |w| {
            effective_column_count(w, preferred, self.config.column_width, self.config.hgap)
        });
        let hints: Vec<GridData> = tiles.iter().map(|t| t.hints).collect();
        Ok((tiles, arrange(&hints, columns, with_placeholders)))
    }

    fn update_view_range(&self, row_count: usize, container_height: i32) -> Range<usize> {
        let mut state = self.grid.state();
        let rows = self.config.row_metrics();
        let viewport = if state.viewport_height > 0 {
            state.viewport_height
        } else {
            container_height
        };
        let range = state
            .virtual_scrolling
            .current_view_range(state.scroll_top, viewport, row_count, rows);
        state.rows = rows;
        state.row_count = row_count;
        state.view_range = range.clone();
        range
    }
}

fn overlaps(rows: Range<usize>, range: &Range<usize>) -> bool {
    rows.start < range.end && range.start < rows.end
}

impl Layout for TileGridLayout {
    fn layout(&mut self, tree: &mut LayoutTree, container: ComponentId) -> Result<()> {
        let _span = debug_span!("tile_grid_layout", container = container.index()).entered();
        let element = tree.element(container)?;
        let size = element.size();
        let insets = element.insets();
        let width = self.config.content_width(size.width - insets.horizontal());

        let (tiles, arrangement) = self.arrange(tree, Some(width))?;
        let placeholders = self.grid.sync_placeholders(tree, arrangement.placeholders.len())?;
        let children: Vec<ComponentId> = tiles.iter().map(|t| t.id).chain(placeholders).collect();
        let constraints: Vec<GridData> = arrangement.iter().copied().collect();

        let mut measure = TreeMeasure::new(tree, &children);
        let mut info = self.engine.info(&constraints, &mut measure, Some(width));
        measure.finish()?;
        let cells = GridLayoutEngine::apply(
            &mut info,
            Dimension::new(width + insets.horizontal(), size.height),
            insets,
        );

        let range = self.update_view_range(info.rows(), size.height);
        trace!(cols = info.cols(), rows = info.rows(), ?range, "tile grid solved");

        let mut placements = Vec::with_capacity(children.len());
        for (i, (&child, cell)) in children.iter().zip(cells).enumerate() {
            let rendered = overlaps(info.grid_datas()[i].rows(), &range);
            tree.set_attached(child, rendered)?;
            if !rendered {
                continue;
            }
            let margins = tree.element(child)?.margins();
            placements.push(Placement {
                tile: child,
                bounds: cell.subtract_insets(margins),
                placeholder: i >= tiles.len(),
            });
        }

        let moves = self.animator.animate(tree, &placements)?;
        for placement in &placements {
            tree.set_bounds(placement.tile, placement.bounds)?;
        }
        debug!(
            tiles = tiles.len(),
            rendered = placements.len(),
            moves = moves.len(),
            "tile grid laid out"
        );
        self.grid.state().moves.extend(moves);
        Ok(())
    }

    fn preferred_layout_size(
        &mut self,
        tree: &mut LayoutTree,
        container: ComponentId,
        hints: SizeHints,
    ) -> Result<Dimension> {
        let insets = tree.element(container)?.insets();
        let width = hints.width_hint.map(|w| self.config.content_width(w));
        let (tiles, arrangement) = self.arrange(tree, width)?;
        // Placeholders not created yet measure as empty cells.
        let children: Vec<ComponentId> = tiles
            .iter()
            .map(|t| t.id)
            .chain(self.grid.placeholders())
            .collect();
        let constraints: Vec<GridData> = arrangement.iter().copied().collect();

        let mut measure = TreeMeasure::new(tree, &children);
        let info = self.engine.info(&constraints, &mut measure, width);
        measure.finish()?;
        let mut pref = info.extent(SizeFlag::Pref, insets);
        pref.width = pref.width.max(self.config.min_width);
        Ok(pref)
    }
}
