#![forbid(unsafe_code)]

//! Per-component grid placement constraints.
//!
//! [`GridData`] is a plain `Copy` value. The solver never mutates a caller's
//! constraints: every pass normalizes its own working copy, so the same
//! slice can be laid out repeatedly with identical results.
//!
//! # Normalization
//!
//! | Field             | Rule                                     |
//! |-------------------|------------------------------------------|
//! | `grid_x`/`grid_y` | clamped to `0..MAX_GRID_LINES`           |
//! | `grid_w`/`grid_h` | clamped to `1..=MAX_GRID_LINES - origin` |
//! | all               | clamped into the final grid bounds       |
//!
//! Out-of-range data is never rejected.

use serde::{Deserialize, Serialize};

/// Upper bound on grid lines per axis.
///
/// Origins and spans from the model are clamped so that `origin + span`
/// never exceeds it.
pub const MAX_GRID_LINES: i32 = 1 << 10;

/// Alignment of a non-filling component inside its cell span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellAlignment {
    /// Left or top edge.
    #[default]
    Start,
    /// Centered.
    Center,
    /// Right or bottom edge.
    End,
}

impl CellAlignment {
    /// Map the model's `-1 / 0 / 1` encoding.
    #[must_use]
    pub fn from_model(value: i32) -> Self {
        match value.signum() {
            -1 => Self::Start,
            0 => Self::Center,
            _ => Self::End,
        }
    }

    /// Offset of an item of `size` inside `available` pixels.
    #[inline]
    #[must_use]
    pub fn offset(self, available: i32, size: i32) -> i32 {
        let free = (available - size).max(0);
        match self {
            Self::Start => 0,
            Self::Center => free / 2,
            Self::End => free,
        }
    }
}

/// Grid placement of one component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridData {
    /// Origin column.
    #[serde(rename = "x")]
    pub grid_x: i32,
    /// Origin row.
    #[serde(rename = "y")]
    pub grid_y: i32,
    /// Column span.
    #[serde(rename = "w")]
    pub grid_w: i32,
    /// Row span.
    #[serde(rename = "h")]
    pub grid_h: i32,
    /// Horizontal growth weight; `0` makes the spanned columns fixed.
    pub weight_x: f64,
    /// Vertical growth weight; `0` makes the spanned rows fixed.
    pub weight_y: f64,
    /// Explicit pixel width; `<= 0` means unset.
    pub width_hint: i32,
    /// Explicit pixel height; `<= 0` means unset.
    pub height_hint: i32,
    /// Use the measured preferred width instead of logical columns.
    pub use_ui_width: bool,
    /// Use the measured preferred height instead of logical rows.
    pub use_ui_height: bool,
    pub fill_horizontal: bool,
    pub fill_vertical: bool,
    /// `-1` start, `0` center, `1` end.
    pub horizontal_alignment: i32,
    /// `-1` start, `0` center, `1` end.
    pub vertical_alignment: i32,
    /// Pixel cap on the spanned width; `<= 0` means unset.
    pub max_width: i32,
    /// Pixel cap on the spanned height; `<= 0` means unset.
    pub max_height: i32,
}

impl Default for GridData {
    fn default() -> Self {
        Self {
            grid_x: 0,
            grid_y: 0,
            grid_w: 1,
            grid_h: 1,
            weight_x: 0.0,
            weight_y: 0.0,
            width_hint: 0,
            height_hint: 0,
            use_ui_width: false,
            use_ui_height: false,
            fill_horizontal: true,
            fill_vertical: true,
            horizontal_alignment: -1,
            vertical_alignment: -1,
            max_width: 0,
            max_height: 0,
        }
    }
}

impl GridData {
    /// Single cell at `(x, y)`.
    #[must_use]
    pub fn new(grid_x: i32, grid_y: i32) -> Self {
        Self {
            grid_x,
            grid_y,
            ..Self::default()
        }
    }

    /// Set the span.
    #[must_use]
    pub fn span(mut self, grid_w: i32, grid_h: i32) -> Self {
        self.grid_w = grid_w;
        self.grid_h = grid_h;
        self
    }

    /// Set the growth weights.
    #[must_use]
    pub fn weight(mut self, weight_x: f64, weight_y: f64) -> Self {
        self.weight_x = weight_x;
        self.weight_y = weight_y;
        self
    }

    /// Set the pixel hints.
    #[must_use]
    pub fn hints(mut self, width_hint: i32, height_hint: i32) -> Self {
        self.width_hint = width_hint;
        self.height_hint = height_hint;
        self
    }

    /// Measure the component instead of using logical units.
    #[must_use]
    pub fn use_ui(mut self, width: bool, height: bool) -> Self {
        self.use_ui_width = width;
        self.use_ui_height = height;
        self
    }

    /// Set whether the component stretches to its span.
    #[must_use]
    pub fn fill(mut self, horizontal: bool, vertical: bool) -> Self {
        self.fill_horizontal = horizontal;
        self.fill_vertical = vertical;
        self
    }

    /// Set the alignment used when not filling.
    #[must_use]
    pub fn alignment(mut self, horizontal: i32, vertical: i32) -> Self {
        self.horizontal_alignment = horizontal;
        self.vertical_alignment = vertical;
        self
    }

    /// Set the pixel caps.
    #[must_use]
    pub fn max_size(mut self, max_width: i32, max_height: i32) -> Self {
        self.max_width = max_width;
        self.max_height = max_height;
        self
    }

    /// Clamp origin and span into `0..MAX_GRID_LINES`.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.grid_x = self.grid_x.clamp(0, MAX_GRID_LINES - 1);
        self.grid_y = self.grid_y.clamp(0, MAX_GRID_LINES - 1);
        self.grid_w = self.grid_w.clamp(1, MAX_GRID_LINES - self.grid_x);
        self.grid_h = self.grid_h.clamp(1, MAX_GRID_LINES - self.grid_y);
        self
    }

    /// Clamp origin and span into a `cols x rows` grid.
    ///
    /// Expects a grid of at least one column and row.
    #[must_use]
    pub fn clamped(mut self, cols: i32, rows: i32) -> Self {
        self = self.normalized();
        self.grid_x = self.grid_x.min(cols - 1);
        self.grid_y = self.grid_y.min(rows - 1);
        self.grid_w = self.grid_w.min(cols - self.grid_x);
        self.grid_h = self.grid_h.min(rows - self.grid_y);
        self
    }

    /// Columns covered by this constraint.
    #[inline]
    #[must_use]
    pub fn columns(&self) -> std::ops::Range<usize> {
        let start = self.grid_x.max(0) as usize;
        start..start + self.grid_w.max(1) as usize
    }

    /// Rows covered by this constraint.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> std::ops::Range<usize> {
        let start = self.grid_y.max(0) as usize;
        start..start + self.grid_h.max(1) as usize
    }

    #[inline]
    #[must_use]
    pub fn horizontal_align(&self) -> CellAlignment {
        CellAlignment::from_model(self.horizontal_alignment)
    }

    #[inline]
    #[must_use]
    pub fn vertical_align(&self) -> CellAlignment {
        CellAlignment::from_model(self.vertical_alignment)
    }

    /// True if the component's size never depends on its content.
    ///
    /// Such a component stops layout invalidation from travelling further up.
    #[must_use]
    pub fn is_validate_root(&self) -> bool {
        !self.use_ui_width && !self.use_ui_height && self.fill_horizontal && self.fill_vertical
    }
}
