#![forbid(unsafe_code)]

//! Pure grid layout: constraints and measurements in, rectangles out.
//!
//! [`GridLayoutEngine`] holds no state between calls. Drivers that need
//! caching, virtualization or animation wrap it rather than extend it.
//!
//! # Example
//!
//! ```
//! use gridkit_core::{Dimension, Insets, Rectangle};
//! use gridkit_layout::{GridData, GridLayoutEngine, GridMetrics, NoMeasure};
//!
//! let engine = GridLayoutEngine::new(GridMetrics::new(50, 30, 5, 5));
//! let cons = [GridData::new(0, 0), GridData::new(1, 0).weight(1.0, 0.0)];
//! let solution = engine.solve(&cons, &mut NoMeasure, Dimension::new(500, 400), Insets::ZERO);
//! assert_eq!(solution.bounds[1], Rectangle::new(55, 0, 445, 30));
//! ```

use crate::cell_bounds::span_bounds;
use crate::constraint::GridData;
use crate::info::LogicalGridLayoutInfo;
use crate::measure::{GridMetrics, Measure};
use crate::size_table::SizeFlag;
use gridkit_core::{Dimension, Insets, Rectangle};

/// Result of one layout pass.
#[derive(Debug, Clone)]
pub struct GridSolution {
    /// Size tables and cells of the pass.
    pub info: LogicalGridLayoutInfo,
    /// One rectangle per constraint, in input order.
    pub bounds: Vec<Rectangle>,
}

/// Stateless logical grid solver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridLayoutEngine {
    metrics: GridMetrics,
}

impl GridLayoutEngine {
    #[must_use]
    pub const fn new(metrics: GridMetrics) -> Self {
        Self { metrics }
    }

    #[must_use]
    pub const fn metrics(&self) -> GridMetrics {
        self.metrics
    }

    /// Size tables for `constraints`; see [`LogicalGridLayoutInfo::new`].
    pub fn info<M>(
        &self,
        constraints: &[GridData],
        measure: &mut M,
        width_hint: Option<i32>,
    ) -> LogicalGridLayoutInfo
    where
        M: Measure + ?Sized,
    {
        LogicalGridLayoutInfo::new(constraints, self.metrics, width_hint, measure)
    }

    /// Lay out `constraints` in a container of `size` with `insets`.
    pub fn solve<M>(
        &self,
        constraints: &[GridData],
        measure: &mut M,
        size: Dimension,
        insets: Insets,
    ) -> GridSolution
    where
        M: Measure + ?Sized,
    {
        let mut info = self.info(constraints, measure, Some(size.width - insets.horizontal()));
        let bounds = Self::apply(&mut info, size, insets);
        GridSolution { info, bounds }
    }

    /// Place components for an already computed `info`.
    ///
    /// Recomputes the cells of `info` for `size` and returns one rectangle
    /// per constraint. Drivers that cache `info` across passes call this
    /// directly.
    pub fn apply(info: &mut LogicalGridLayoutInfo, size: Dimension, insets: Insets) -> Vec<Rectangle> {
        info.layout_cell_bounds(size, insets);
        info.grid_datas()
            .iter()
            .enumerate()
            .map(|(i, gd)| {
                let span = span_bounds(info.cell_bounds(), gd);
                place(span, gd, info.comp_size(i))
            })
            .collect()
    }

    /// Preferred container size, insets included.
    pub fn preferred_size<M>(
        &self,
        constraints: &[GridData],
        measure: &mut M,
        insets: Insets,
        width_hint: Option<i32>,
    ) -> Dimension
    where
        M: Measure + ?Sized,
    {
        let content_hint = width_hint.map(|w| w - insets.horizontal());
        self.info(constraints, measure, content_hint)
            .extent(SizeFlag::Pref, insets)
    }
}

/// Position a component inside its span.
///
/// Filling axes take the whole span; the others take the preferred size
/// (never more than the span) and are aligned.
#[must_use]
pub fn place(span: Rectangle, gd: &GridData, pref: Dimension) -> Rectangle {
    let mut r = span;
    if !gd.fill_horizontal && pref.width < span.width {
        r.width = pref.width.max(0);
        r.x += gd.horizontal_align().offset(span.width, r.width);
    }
    if !gd.fill_vertical && pref.height < span.height {
        r.height = pref.height.max(0);
        r.y += gd.vertical_align().offset(span.height, r.height);
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::NoMeasure;
    use gridkit_core::SizeHints;

    fn engine() -> GridLayoutEngine {
        GridLayoutEngine::new(GridMetrics::new(50, 30, 5, 5))
    }

    #[test]
    fn one_rectangle_per_component() {
        let cons = [
            GridData::new(0, 0).weight(1.0, 0.0),
            GridData::new(1, 0).weight(1.0, 0.0),
            GridData::new(0, 1).span(2, 1).weight(1.0, 0.0),
        ];
        let sol = engine().solve(&cons, &mut NoMeasure, Dimension::new(205, 100), Insets::ZERO);
        assert_eq!(sol.bounds.len(), 3);
        assert_eq!(sol.bounds[0], Rectangle::new(0, 0, 100, 30));
        assert_eq!(sol.bounds[1], Rectangle::new(105, 0, 100, 30));
        assert_eq!(sol.bounds[2], Rectangle::new(0, 35, 205, 30));
    }

    #[test]
    fn non_filling_components_align() {
        let cons = [
            GridData::new(0, 0)
                .weight(1.0, 1.0)
                .fill(false, false)
                .alignment(0, 1),
        ];
        let mut measure = |_: usize, _: SizeHints| Dimension::new(40, 10);
        let sol = engine().solve(&cons, &mut measure, Dimension::new(100, 50), Insets::ZERO);
        assert_eq!(sol.bounds[0], Rectangle::new(30, 40, 40, 10));
    }

    #[test]
    fn non_filling_never_exceeds_span() {
        let cons = [GridData::new(0, 0).weight(1.0, 1.0).fill(false, true)];
        let mut measure = |_: usize, _: SizeHints| Dimension::new(400, 10);
        let sol = engine().solve(&cons, &mut measure, Dimension::new(100, 50), Insets::ZERO);
        assert_eq!(sol.bounds[0].width, 100);
    }

    #[test]
    fn insets_shift_everything() {
        let cons = [GridData::new(0, 0).weight(1.0, 1.0)];
        let sol = engine().solve(
            &cons,
            &mut NoMeasure,
            Dimension::new(100, 50),
            Insets::new(1, 2, 3, 4),
        );
        assert_eq!(sol.bounds[0], Rectangle::new(4, 1, 94, 46));
    }

    #[test]
    fn preferred_size_sums_tracks() {
        let cons = [GridData::new(0, 0), GridData::new(1, 0), GridData::new(0, 1).span(2, 1)];
        let pref = engine().preferred_size(&cons, &mut NoMeasure, Insets::uniform(1), None);
        assert_eq!(pref, Dimension::new(50 + 5 + 50 + 2, 30 + 5 + 30 + 2));
    }
}
