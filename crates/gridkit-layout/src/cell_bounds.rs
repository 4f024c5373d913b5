#![forbid(unsafe_code)]

//! Cell rectangles from resolved track sizes.

use crate::constraint::GridData;
use gridkit_core::{Insets, Rectangle};

/// Row-major cell rectangles, `cells[row][col]`.
pub type CellGrid = Vec<Vec<Rectangle>>;

/// Build the `rows x cols` cell grid.
///
/// The first cell starts at `(insets.left, insets.top)`; `x` advances by the
/// column width plus `hgap`, `y` by the row height plus `vgap`. Gaps are not
/// part of any cell.
#[must_use]
pub fn layout_cell_bounds(
    widths: &[i32],
    heights: &[i32],
    insets: Insets,
    hgap: i32,
    vgap: i32,
) -> CellGrid {
    let mut cells = Vec::with_capacity(heights.len());
    let mut y = insets.top;
    for &h in heights {
        let mut row = Vec::with_capacity(widths.len());
        let mut x = insets.left;
        for &w in widths {
            row.push(Rectangle::new(x, y, w, h));
            x += w + hgap;
        }
        cells.push(row);
        y += h + vgap;
    }
    cells
}

/// Union of the cells covered by `gd`, including the interior gaps.
///
/// `gd` must already be clamped to the grid; out-of-range spans yield an
/// empty rectangle.
#[must_use]
pub fn span_bounds(cells: &[Vec<Rectangle>], gd: &GridData) -> Rectangle {
    let rows = gd.rows();
    let cols = gd.columns();
    let first = cells
        .get(rows.start)
        .and_then(|row| row.get(cols.start))
        .copied();
    let last = cells
        .get(rows.end - 1)
        .and_then(|row| row.get(cols.end - 1))
        .copied();
    match (first, last) {
        (Some(first), Some(last)) => first.union(last),
        _ => Rectangle::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_advance_by_gap() {
        let cells = layout_cell_bounds(&[50, 445], &[30], Insets::ZERO, 5, 5);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0][0], Rectangle::new(0, 0, 50, 30));
        assert_eq!(cells[0][1], Rectangle::new(55, 0, 445, 30));
    }

    #[test]
    fn insets_offset_origin() {
        let cells = layout_cell_bounds(&[10, 10], &[20, 20], Insets::new(3, 0, 0, 7), 2, 4);
        assert_eq!(cells[0][0], Rectangle::new(7, 3, 10, 20));
        assert_eq!(cells[1][1], Rectangle::new(19, 27, 10, 20));
    }

    #[test]
    fn span_includes_interior_gaps() {
        let cells = layout_cell_bounds(&[10, 20, 30], &[5, 5], Insets::ZERO, 4, 2);
        let gd = GridData::new(1, 0).span(2, 2);
        assert_eq!(span_bounds(&cells, &gd), Rectangle::new(14, 0, 54, 12));
    }

    #[test]
    fn span_outside_grid_is_empty() {
        let cells = layout_cell_bounds(&[10], &[10], Insets::ZERO, 0, 0);
        let gd = GridData::new(3, 0);
        assert!(span_bounds(&cells, &gd).is_empty());
    }

    #[test]
    fn empty_axes() {
        assert!(layout_cell_bounds(&[], &[], Insets::ZERO, 1, 1).is_empty());
    }
}
