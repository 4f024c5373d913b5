#![forbid(unsafe_code)]

//! Row-range virtualization for the tile grid.
//!
//! Only the rows in the *view range* are laid out and rendered. The range
//! is `view_range_size` rows long and starts a quarter of its size above
//! the row at the scroll position, so a little is kept in reserve on both
//! sides. Near the end it is shifted back to stay full.

use std::ops::Range;

/// Row height and gap of a uniform grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowMetrics {
    pub row_height: i32,
    pub vgap: i32,
}

impl RowMetrics {
    #[must_use]
    pub const fn new(row_height: i32, vgap: i32) -> Self {
        Self { row_height, vgap }
    }

    /// Height of `row` including the gap below it; the last row has none.
    #[must_use]
    pub fn height_of(&self, row: usize, row_count: usize) -> i32 {
        if row + 1 < row_count {
            self.row_height + self.vgap
        } else {
            self.row_height
        }
    }

    /// Average height a row takes, counting half a gap.
    #[must_use]
    pub fn min_row_height(&self) -> f64 {
        f64::from(self.row_height) + f64::from(self.vgap) / 2.0
    }

    /// Row at `scroll_top` pixels from the top of the grid.
    #[must_use]
    pub fn row_at(&self, scroll_top: i32, row_count: usize) -> usize {
        let mut top = 0;
        for row in 0..row_count {
            top += self.height_of(row, row_count);
            if top > scroll_top {
                return row;
            }
        }
        row_count.saturating_sub(1)
    }
}

/// Virtual scrolling strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VirtualScrolling {
    enabled: bool,
    /// Fixed range size; `0` derives it from the viewport.
    view_range_size: usize,
}

impl VirtualScrolling {
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self {
            enabled,
            view_range_size: 0,
        }
    }

    #[must_use]
    pub const fn with_view_range_size(mut self, size: usize) -> Self {
        self.view_range_size = size;
        self
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[must_use]
    pub const fn view_range_size(&self) -> usize {
        self.view_range_size
    }

    pub fn set_view_range_size(&mut self, size: usize) {
        self.view_range_size = size;
    }

    /// Rows to keep rendered for a viewport: twice what fits.
    #[must_use]
    pub fn calculate_view_range_size(&self, viewport_height: i32, rows: RowMetrics) -> usize {
        let min = rows.min_row_height();
        if min <= 0.0 || viewport_height <= 0 {
            return 1;
        }
        ((f64::from(viewport_height) / min).ceil() as usize * 2).max(1)
    }

    /// Range of rows to render around `row`.
    #[must_use]
    pub fn view_range_for_row(&self, row: usize, row_count: usize, range_size: usize) -> Range<usize> {
        if !self.enabled {
            return 0..row_count;
        }
        let quarter = range_size / 4;
        let mut from = row.saturating_sub(quarter);
        let to = (from + range_size).min(row_count);
        if to - from.min(to) < range_size {
            from = to.saturating_sub(range_size);
        }
        from.min(to)..to
    }

    /// Range of rows to render for a viewport scrolled to `scroll_top`.
    #[must_use]
    pub fn current_view_range(
        &self,
        scroll_top: i32,
        viewport_height: i32,
        row_count: usize,
        rows: RowMetrics,
    ) -> Range<usize> {
        if !self.enabled {
            return 0..row_count;
        }
        let size = if self.view_range_size > 0 {
            self.view_range_size
        } else {
            self.calculate_view_range_size(viewport_height, rows)
        };
        self.view_range_for_row(rows.row_at(scroll_top, row_count), row_count, size)
    }
}
