#![forbid(unsafe_code)]

//! Measurement seam between the solver and the component tree.

use gridkit_core::{Dimension, Environment, SizeHints};

/// Preferred-size queries for the components being laid out.
///
/// `index` is the position of the component in the constraint slice. Calls
/// with equal hints must return equal sizes until something is invalidated.
pub trait Measure {
    fn preferred_size(&mut self, index: usize, hints: SizeHints) -> Dimension;
}

impl<F> Measure for F
where
    F: FnMut(usize, SizeHints) -> Dimension,
{
    #[inline]
    fn preferred_size(&mut self, index: usize, hints: SizeHints) -> Dimension {
        self(index, hints)
    }
}

/// Measures every component as zero-sized.
///
/// Useful for grids driven purely by logical units and hints.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMeasure;

impl Measure for NoMeasure {
    #[inline]
    fn preferred_size(&mut self, _index: usize, _hints: SizeHints) -> Dimension {
        Dimension::ZERO
    }
}

/// Logical units and gaps of one grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridMetrics {
    /// Width of one logical column.
    pub column_width: i32,
    /// Height of one logical row.
    pub row_height: i32,
    /// Gap between columns.
    pub hgap: i32,
    /// Gap between rows.
    pub vgap: i32,
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self::from(Environment::default())
    }
}

impl From<Environment> for GridMetrics {
    fn from(env: Environment) -> Self {
        Self {
            column_width: env.column_width,
            row_height: env.row_height,
            hgap: env.hgap,
            vgap: env.vgap,
        }
    }
}

impl GridMetrics {
    #[must_use]
    pub const fn new(column_width: i32, row_height: i32, hgap: i32, vgap: i32) -> Self {
        Self {
            column_width,
            row_height,
            hgap,
            vgap,
        }
    }

    /// Set both gaps.
    #[must_use]
    pub const fn gaps(mut self, hgap: i32, vgap: i32) -> Self {
        self.hgap = hgap;
        self.vgap = vgap;
        self
    }

    /// Pixel width of `grid_w` logical columns, including inner gaps.
    #[inline]
    #[must_use]
    pub fn logical_width(&self, grid_w: i32) -> i32 {
        self.column_width * grid_w + self.hgap * (grid_w - 1).max(0)
    }

    /// Pixel height of `grid_h` logical rows, including inner gaps.
    #[inline]
    #[must_use]
    pub fn logical_height(&self, grid_h: i32) -> i32 {
        self.row_height * grid_h + self.vgap * (grid_h - 1).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_measure() {
        let mut calls = 0;
        let mut m = |i: usize, _h: SizeHints| {
            calls += 1;
            Dimension::new(i as i32, 1)
        };
        assert_eq!(m.preferred_size(4, SizeHints::NONE), Dimension::new(4, 1));
        drop(m);
        assert_eq!(calls, 1);
    }

    #[test]
    fn metrics_from_environment() {
        let metrics = GridMetrics::from(Environment::default().column_width(80));
        assert_eq!(metrics.column_width, 80);
        assert_eq!(metrics.logical_width(2), 80 * 2 + 12);
        assert_eq!(metrics.logical_height(2), 23 * 2 + 6);
    }
}
