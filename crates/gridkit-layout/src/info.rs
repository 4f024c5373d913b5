#![forbid(unsafe_code)]

//! Constraint solving for the logical grid.
//!
//! [`LogicalGridLayoutInfo`] turns a list of [`GridData`] constraints into
//! per-axis size tables. It is created per layout pass and is immutable
//! afterwards, except for the cell bounds, which are recomputed for every
//! container size passed to [`LogicalGridLayoutInfo::layout_cell_bounds`].
//!
//! # Pass structure
//!
//! 1. Normalize a working copy of every constraint.
//! 2. Drop columns and rows nobody occupies, shifting later indices down.
//! 3. Clamp origins and spans into the final grid.
//! 4. Measure component widths where a constraint asks for it.
//! 5. Build the column table: single spans, then multi spans, then caps.
//! 6. Resolve column widths (distributed against the width hint if one is
//!    given) and measure heights with those widths as hints.
//! 7. Build the row table the same way.
//!
//! Step 6 is an ordering requirement: row heights may depend on how wide a
//! column actually ends up.
//!
//! # Invariants
//!
//! | Property | Guarantee |
//! |----------|-----------|
//! | Dense grid | every column `0..cols` and row `0..rows` has an occupant |
//! | Clamped | every span fits inside `cols x rows` |
//! | Triples | `min <= pref <= max`; fixed tracks have `min == max` |
//! | Weights | sum to `1.0` or are all zero |

use crate::cell_bounds::{self, CellGrid};
use crate::constraint::GridData;
use crate::distribute::layout_sizes;
use crate::measure::{GridMetrics, Measure};
use crate::size_table::{AxisTable, INFINITE, SizeFlag, SizeTriple};
use gridkit_core::{Dimension, Insets, SizeHints};

/// Computed size tables of one grid.
#[derive(Debug, Clone)]
pub struct LogicalGridLayoutInfo {
    grid_datas: Vec<GridData>,
    cols: usize,
    rows: usize,
    width: AxisTable,
    height: AxisTable,
    comp_sizes: Vec<Dimension>,
    hgap: i32,
    vgap: i32,
    column_widths: Vec<i32>,
    row_heights: Vec<i32>,
    cell_bounds: CellGrid,
    insets: Insets,
}

/// What one component asks of one axis.
#[derive(Debug, Clone, Copy)]
struct TrackDemand {
    start: usize,
    span: usize,
    weight: f64,
    pref: i32,
    max: i32,
}

impl LogicalGridLayoutInfo {
    /// Solve the size tables for `constraints`.
    ///
    /// `width_hint` is the content width (insets already removed) the grid
    /// will be given, if known. Components are measured through `measure`
    /// by their index in `constraints`.
    pub fn new<M>(
        constraints: &[GridData],
        metrics: GridMetrics,
        width_hint: Option<i32>,
        measure: &mut M,
    ) -> Self
    where
        M: Measure + ?Sized,
    {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "grid_info",
            components = constraints.len(),
            width_hint = width_hint.unwrap_or(-1)
        )
        .entered();

        let mut info = Self {
            grid_datas: constraints.iter().map(|gd| gd.normalized()).collect(),
            cols: 0,
            rows: 0,
            width: AxisTable::default(),
            height: AxisTable::default(),
            comp_sizes: vec![Dimension::ZERO; constraints.len()],
            hgap: metrics.hgap,
            vgap: metrics.vgap,
            column_widths: Vec::new(),
            row_heights: Vec::new(),
            cell_bounds: Vec::new(),
            insets: Insets::ZERO,
        };
        if constraints.is_empty() {
            return info;
        }

        info.eliminate_unused_lines();
        let (cols, rows) = (info.cols as i32, info.rows as i32);
        for gd in &mut info.grid_datas {
            *gd = gd.clamped(cols, rows);
        }

        info.measure_widths(&mut *measure);
        info.width = build_axis(&info.column_demands(metrics), info.cols, info.hgap);

        let resolved = match width_hint {
            Some(hint) => layout_sizes(
                hint - ((cols - 1) * info.hgap).max(0),
                &info.width.sizes,
                &info.width.weights,
            ),
            None => info.width.extract(SizeFlag::Pref),
        };
        info.measure_heights(&mut *measure, &resolved);
        info.height = build_axis(&info.row_demands(metrics), info.rows, info.vgap);

        #[cfg(feature = "tracing")]
        tracing::trace!(cols = info.cols, rows = info.rows, "grid info computed");

        info
    }

    fn eliminate_unused_lines(&mut self) {
        let cols = OccupiedLines::new(self.grid_datas.iter().map(|gd| (gd.grid_x, gd.grid_w)));
        let rows = OccupiedLines::new(self.grid_datas.iter().map(|gd| (gd.grid_y, gd.grid_h)));
        for gd in &mut self.grid_datas {
            gd.grid_x = cols.compact(gd.grid_x);
            gd.grid_y = rows.compact(gd.grid_y);
        }
        self.cols = cols.count();
        self.rows = rows.count();
    }

    fn measure_widths<M: Measure + ?Sized>(&mut self, measure: &mut M) {
        for (i, gd) in self.grid_datas.iter().enumerate() {
            self.comp_sizes[i].width = if gd.width_hint > 0 {
                gd.width_hint
            } else if gd.use_ui_width || !gd.fill_horizontal {
                measure
                    .preferred_size(i, SizeHints::NONE.width_only(true))
                    .width
            } else {
                0
            };
        }
    }

    fn measure_heights<M: Measure + ?Sized>(&mut self, measure: &mut M, column_widths: &[i32]) {
        for (i, gd) in self.grid_datas.iter().enumerate() {
            self.comp_sizes[i].height = if gd.height_hint > 0 {
                gd.height_hint
            } else if gd.use_ui_height || !gd.fill_vertical {
                let span_width = column_widths[gd.columns()].iter().sum::<i32>()
                    + (gd.grid_w - 1) * self.hgap;
                let width = if gd.fill_horizontal {
                    span_width
                } else {
                    span_width.min(self.comp_sizes[i].width)
                };
                measure
                    .preferred_size(i, SizeHints::with_width(width.max(0)))
                    .height
            } else {
                0
            };
        }
    }

    fn column_demands(&self, metrics: GridMetrics) -> Vec<TrackDemand> {
        self.grid_datas
            .iter()
            .zip(&self.comp_sizes)
            .map(|(gd, size)| TrackDemand {
                start: gd.grid_x as usize,
                span: gd.grid_w as usize,
                weight: gd.weight_x,
                pref: if gd.width_hint > 0 {
                    gd.width_hint
                } else if gd.use_ui_width {
                    size.width
                } else {
                    metrics.logical_width(gd.grid_w)
                },
                max: gd.max_width,
            })
            .collect()
    }

    fn row_demands(&self, metrics: GridMetrics) -> Vec<TrackDemand> {
        self.grid_datas
            .iter()
            .zip(&self.comp_sizes)
            .map(|(gd, size)| TrackDemand {
                start: gd.grid_y as usize,
                span: gd.grid_h as usize,
                weight: gd.weight_y,
                pref: if gd.height_hint > 0 {
                    gd.height_hint
                } else if gd.use_ui_height {
                    size.height
                } else {
                    metrics.logical_height(gd.grid_h)
                },
                max: gd.max_height,
            })
            .collect()
    }

    /// Lay the grid out in a container of `size` with `insets`.
    ///
    /// Column widths and row heights are distributed over the space left
    /// after insets and gaps; the resulting cells are cached until the next
    /// call.
    pub fn layout_cell_bounds(&mut self, size: Dimension, insets: Insets) -> &CellGrid {
        let cols = self.cols as i32;
        let rows = self.rows as i32;
        self.column_widths = layout_sizes(
            size.width - insets.horizontal() - ((cols - 1) * self.hgap).max(0),
            &self.width.sizes,
            &self.width.weights,
        );
        self.row_heights = layout_sizes(
            size.height - insets.vertical() - ((rows - 1) * self.vgap).max(0),
            &self.height.sizes,
            &self.height.weights,
        );
        self.insets = insets;
        self.cell_bounds = cell_bounds::layout_cell_bounds(
            &self.column_widths,
            &self.row_heights,
            insets,
            self.hgap,
            self.vgap,
        );
        &self.cell_bounds
    }

    /// Extent of the whole grid for the given size flag.
    ///
    /// Preferred and minimum extents use the preferred track sizes, so a
    /// container never shrinks a grid to empty space; the maximum extent uses
    /// the track caps. Includes the insets of the last
    /// [`layout_cell_bounds`](Self::layout_cell_bounds) call.
    #[must_use]
    pub fn grid_dimension(&self, flag: SizeFlag) -> Dimension {
        self.extent(flag, self.insets)
    }

    /// Extent of the whole grid with explicit insets.
    #[must_use]
    pub fn extent(&self, flag: SizeFlag, insets: Insets) -> Dimension {
        let flag = match flag {
            SizeFlag::Min | SizeFlag::Pref => SizeFlag::Pref,
            SizeFlag::Max => SizeFlag::Max,
        };
        Dimension::new(
            axis_extent(&self.width.extract(flag), self.hgap, insets.left + insets.right),
            axis_extent(&self.height.extract(flag), self.vgap, insets.top + insets.bottom),
        )
    }

    /// Number of columns after elimination.
    #[inline]
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows after elimination.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Normalized, clamped working copies of the constraints.
    #[must_use]
    pub fn grid_datas(&self) -> &[GridData] {
        &self.grid_datas
    }

    #[must_use]
    pub fn width_table(&self) -> &AxisTable {
        &self.width
    }

    #[must_use]
    pub fn height_table(&self) -> &AxisTable {
        &self.height
    }

    /// Hinted or measured size of a component; `0` where logical units apply.
    #[must_use]
    pub fn comp_size(&self, index: usize) -> Dimension {
        self.comp_sizes.get(index).copied().unwrap_or_default()
    }

    /// Cells of the last layout, `cells[row][col]`.
    #[must_use]
    pub fn cell_bounds(&self) -> &CellGrid {
        &self.cell_bounds
    }

    /// Column widths of the last layout.
    #[must_use]
    pub fn column_widths(&self) -> &[i32] {
        &self.column_widths
    }

    /// Row heights of the last layout.
    #[must_use]
    pub fn row_heights(&self) -> &[i32] {
        &self.row_heights
    }

    #[must_use]
    pub fn hgap(&self) -> i32 {
        self.hgap
    }

    #[must_use]
    pub fn vgap(&self) -> i32 {
        self.vgap
    }
}

/// Merged `[start, end)` runs of the lines covered on one axis.
struct OccupiedLines {
    runs: Vec<(i64, i64)>,
}

impl OccupiedLines {
    fn new(spans: impl Iterator<Item = (i32, i32)>) -> Self {
        let mut spans: Vec<(i64, i64)> = spans
            .map(|(origin, span)| (i64::from(origin), i64::from(origin) + i64::from(span)))
            .collect();
        spans.sort_unstable();
        let mut runs: Vec<(i64, i64)> = Vec::with_capacity(spans.len());
        for (start, end) in spans {
            match runs.last_mut() {
                Some(last) if start <= last.1 => last.1 = last.1.max(end),
                _ => runs.push((start, end)),
            }
        }
        Self { runs }
    }

    fn count(&self) -> usize {
        self.runs.iter().map(|(start, end)| (end - start) as usize).sum()
    }

    /// Index of `line` once every unoccupied line before it is dropped.
    fn compact(&self, line: i32) -> i32 {
        let line = i64::from(line);
        let mut unused = 0;
        let mut prev_end = 0;
        for &(start, end) in &self.runs {
            if start > line {
                break;
            }
            unused += start - prev_end;
            prev_end = end;
        }
        (line - unused) as i32
    }
}

fn axis_extent(sizes: &[i32], gap: i32, insets: i32) -> i32 {
    if sizes.is_empty() {
        return 0;
    }
    sizes.iter().sum::<i32>() + (sizes.len() as i32 - 1) * gap + insets
}

/// Build the size table of one axis.
fn build_axis(demands: &[TrackDemand], count: usize, gap: i32) -> AxisTable {
    let mut prefs = vec![0i32; count];
    let mut fixed = vec![false; count];

    for d in demands.iter().filter(|d| d.span == 1) {
        prefs[d.start] = prefs[d.start].max(d.pref);
        if d.weight <= 0.0 {
            fixed[d.start] = true;
        }
    }

    // Spans fill what the fixed tracks and gaps leave over; the trailing
    // flexible track absorbs the rounding remainder.
    for d in demands.iter().filter(|d| d.span > 1) {
        let range = d.start..d.start + d.span;
        let fixed_sum: i32 = range.clone().filter(|&j| fixed[j]).map(|j| prefs[j]).sum();
        let remaining = d.pref - (d.span as i32 - 1) * gap - fixed_sum;
        let flexible: Vec<usize> = range.clone().filter(|&j| !fixed[j]).collect();
        if remaining > 0 && !flexible.is_empty() {
            let n = flexible.len() as i32;
            let equal = remaining / n;
            for &j in &flexible {
                prefs[j] = prefs[j].max(equal);
            }
            if let Some(&last) = flexible.last() {
                prefs[last] += remaining % n;
            }
        }
        if d.weight <= 0.0 {
            for j in range {
                fixed[j] = true;
            }
        }
    }

    let caps = track_caps(demands, count, gap);

    let mut table = AxisTable::with_len(count);
    for j in 0..count {
        let pref = prefs[j].min(caps[j]);
        table.sizes[j] = if fixed[j] {
            SizeTriple::fixed(pref)
        } else {
            SizeTriple::flexible(pref, caps[j])
        };
    }

    for j in 0..count {
        if fixed[j] {
            continue;
        }
        let (sum, n) = demands
            .iter()
            .filter(|d| d.weight > 0.0 && d.start <= j && j < d.start + d.span)
            .fold((0.0, 0u32), |(sum, n), d| (sum + d.weight / d.span as f64, n + 1));
        table.weights[j] = if n > 0 { sum / f64::from(n) } else { 0.0 };
    }
    table.normalize_weights();
    table
}

/// Per-track caps from `max` demands, applied in component order.
fn track_caps(demands: &[TrackDemand], count: usize, gap: i32) -> Vec<i32> {
    let mut caps = vec![INFINITE; count];
    for d in demands.iter().filter(|d| d.max > 0) {
        if d.span == 1 {
            caps[d.start] = caps[d.start].min(d.max);
            continue;
        }
        let span = d.span as i32;
        let available = (d.max - (span - 1) * gap).max(0);
        let share = available / span;
        for cap in &mut caps[d.start..d.start + d.span] {
            *cap = (*cap).min(share);
        }
        caps[d.start + d.span - 1] += available % span;
    }
    caps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::MAX_GRID_LINES;
    use crate::measure::NoMeasure;
    use gridkit_core::Rectangle;

    fn metrics() -> GridMetrics {
        GridMetrics::new(50, 30, 5, 5)
    }

    fn layout(cons: &[GridData]) -> LogicalGridLayoutInfo {
        layout_with(cons, metrics(), Dimension::new(500, 400))
    }

    fn layout_with(cons: &[GridData], m: GridMetrics, size: Dimension) -> LogicalGridLayoutInfo {
        let mut info = LogicalGridLayoutInfo::new(cons, m, None, &mut NoMeasure);
        info.layout_cell_bounds(size, Insets::ZERO);
        info
    }

    fn row_widths(info: &LogicalGridLayoutInfo, row: usize) -> Vec<i32> {
        info.cell_bounds()[row].iter().map(|r| r.width).collect()
    }

    fn col_heights(info: &LogicalGridLayoutInfo, col: usize) -> Vec<i32> {
        info.cell_bounds().iter().map(|row| row[col].height).collect()
    }

    #[test]
    fn calculates_bounds() {
        let info = layout(&[
            GridData::new(0, 0),
            GridData::new(1, 0).weight(1.0, 0.0),
        ]);
        assert_eq!(info.cell_bounds().len(), 1);
        assert_eq!(info.cell_bounds()[0][0], Rectangle::new(0, 0, 50, 30));
        assert_eq!(info.cell_bounds()[0][1], Rectangle::new(55, 0, 445, 30));
    }

    #[test]
    fn considers_width_hint() {
        let info = layout(&[
            GridData::new(0, 0).hints(70, 0),
            GridData::new(1, 0).weight(1.0, 0.0),
        ]);
        assert_eq!(info.cell_bounds()[0][0], Rectangle::new(0, 0, 70, 30));
        assert_eq!(info.cell_bounds()[0][1], Rectangle::new(75, 0, 425, 30));
    }

    #[test]
    fn eliminates_unused_lines() {
        let info = layout(&[GridData::new(0, 0), GridData::new(4, 6)]);
        assert_eq!((info.cols(), info.rows()), (2, 2));
        let gd = info.grid_datas()[1];
        assert_eq!((gd.grid_x, gd.grid_y), (1, 1));
    }

    #[test]
    fn eliminates_gaps_between_spans() {
        let info = layout(&[
            GridData::new(1, 0).span(2, 1),
            GridData::new(2, 0).span(3, 1),
            GridData::new(9, 0),
        ]);
        assert_eq!(info.cols(), 5);
        let xs: Vec<_> = info.grid_datas().iter().map(|gd| (gd.grid_x, gd.grid_w)).collect();
        assert_eq!(xs, vec![(0, 2), (1, 3), (4, 1)]);
    }

    #[test]
    fn huge_span_from_model_is_bounded() {
        let gd: GridData = serde_json::from_str(r#"{"x":1,"w":2147483647}"#).unwrap();
        let info = layout(&[gd, GridData::new(i32::MAX, 0)]);
        assert_eq!(info.cols(), MAX_GRID_LINES as usize - 1);
        let gd = info.grid_datas()[0];
        assert_eq!((gd.grid_x, gd.grid_w), (0, MAX_GRID_LINES - 1));
        assert_eq!(info.grid_datas()[1].grid_x, MAX_GRID_LINES - 2);
    }

    #[test]
    fn normalizes_negative_constraints() {
        let info = layout(&[GridData::new(-2, -1).span(0, -5)]);
        assert_eq!((info.cols(), info.rows()), (1, 1));
        let gd = info.grid_datas()[0];
        assert_eq!((gd.grid_x, gd.grid_y, gd.grid_w, gd.grid_h), (0, 0, 1, 1));
    }

    #[test]
    fn empty_grid() {
        let mut info = LogicalGridLayoutInfo::new(&[], metrics(), None, &mut NoMeasure);
        assert!(info.layout_cell_bounds(Dimension::new(100, 100), Insets::uniform(3)).is_empty());
        assert_eq!(info.grid_dimension(SizeFlag::Pref), Dimension::ZERO);
    }

    #[test]
    fn weighted_tracks_share_around_fixed_track() {
        let cons = [
            GridData::new(0, 0).weight(1.0, 0.0),
            GridData::new(1, 0).hints(50, 0),
            GridData::new(2, 0).weight(1.0, 0.0),
        ];
        let info = layout_with(&cons, GridMetrics::new(0, 30, 0, 0), Dimension::new(300, 30));
        assert_eq!(row_widths(&info, 0), vec![125, 50, 125]);
    }

    #[test]
    fn span_hint_subtracts_gaps() {
        let cons = [GridData::new(0, 0).span(2, 1).weight(1.0, 0.0).hints(101, 0)];
        let info = LogicalGridLayoutInfo::new(&cons, GridMetrics::new(0, 30, 1, 0), None, &mut NoMeasure);
        assert_eq!(info.width_table().extract(SizeFlag::Pref), vec![50, 50]);

        let info = LogicalGridLayoutInfo::new(&cons, GridMetrics::new(0, 30, 0, 0), None, &mut NoMeasure);
        assert_eq!(info.width_table().extract(SizeFlag::Pref), vec![50, 51]);
    }

    #[test]
    fn span_skips_fixed_tracks() {
        let cons = [
            GridData::new(0, 0).hints(40, 0),
            GridData::new(0, 1).span(3, 1).weight(1.0, 0.0).hints(200, 0),
            GridData::new(1, 0).weight(1.0, 0.0).hints(10, 0),
            GridData::new(2, 0).weight(1.0, 0.0).hints(10, 0),
        ];
        let info = LogicalGridLayoutInfo::new(&cons, GridMetrics::new(0, 30, 0, 0), None, &mut NoMeasure);
        // 200 - 40 over two flexible columns.
        assert_eq!(info.width_table().extract(SizeFlag::Pref), vec![40, 80, 80]);
        assert_eq!(info.width_table().sizes[0], SizeTriple::fixed(40));
    }

    #[test]
    fn zero_weight_span_fixes_its_tracks() {
        let cons = [GridData::new(0, 0).span(2, 1)];
        let info = LogicalGridLayoutInfo::new(&cons, metrics(), None, &mut NoMeasure);
        assert!(info.width_table().sizes.iter().all(|s| s.is_fixed()));
        assert_eq!(info.width_table().weight_sum(), 0.0);
    }

    #[test]
    fn weights_are_normalized() {
        let cons = [
            GridData::new(0, 0).weight(2.0, 0.0),
            GridData::new(1, 0).weight(6.0, 0.0),
        ];
        let info = LogicalGridLayoutInfo::new(&cons, metrics(), None, &mut NoMeasure);
        let w = &info.width_table().weights;
        assert!((w[0] - 0.25).abs() < 1e-9);
        assert!((w[1] - 0.75).abs() < 1e-9);
    }

    #[test]
    fn max_width_single_cell() {
        let info = layout(&[
            GridData::new(0, 0).weight(1.0, 0.0).max_size(80, 0),
            GridData::new(1, 0).weight(1.0, 0.0),
        ]);
        assert_eq!(info.cell_bounds()[0][0], Rectangle::new(0, 0, 80, 30));
        assert_eq!(info.cell_bounds()[0][1], Rectangle::new(85, 0, 415, 30));
    }

    #[test]
    fn max_width_beats_hint_and_zero_weight() {
        let info = layout(&[GridData::new(0, 0).weight(1.0, 0.0).max_size(80, 0).hints(100, 0)]);
        assert_eq!(row_widths(&info, 0), vec![80]);

        let info = layout_with(
            &[GridData::new(0, 0).max_size(80, 0)],
            GridMetrics::new(100, 30, 5, 5),
            Dimension::new(500, 400),
        );
        assert_eq!(row_widths(&info, 0), vec![80]);
    }

    #[test]
    fn max_width_distributes_over_span() {
        let info = layout(&[GridData::new(0, 0).span(2, 1).weight(1.0, 0.0).max_size(80, 0)]);
        assert_eq!(row_widths(&info, 0), vec![37, 38]);
    }

    #[test]
    fn max_width_caps_follow_component_order() {
        let wide = |x: i32, y: i32, w: i32| {
            GridData::new(x, y).span(w, 1).weight(1.0, 0.0).max_size(80, 0)
        };
        let info = layout(&[wide(0, 0, 4), wide(0, 1, 3)]);
        assert_eq!(row_widths(&info, 0), vec![16, 16, 17, 17]);
        assert_eq!(row_widths(&info, 1), vec![16, 16, 17, 17]);

        let info = layout(&[wide(0, 0, 3), wide(0, 1, 4)]);
        assert_eq!(row_widths(&info, 0), vec![16, 16, 16, 17]);

        let info = layout(&[wide(0, 0, 3), wide(3, 0, 2), wide(0, 1, 5)]);
        assert_eq!(row_widths(&info, 0), vec![12, 12, 12, 12, 12]);

        let info = layout(&[wide(0, 0, 5), wide(0, 1, 3), wide(3, 1, 2)]);
        assert_eq!(row_widths(&info, 1), vec![12, 12, 13, 12, 13]);

        let info = layout(&[wide(0, 0, 1), wide(1, 0, 2), wide(3, 0, 1)]);
        assert_eq!(row_widths(&info, 0), vec![80, 37, 38, 80]);
    }

    #[test]
    fn absolute_max_width() {
        let big = Dimension::new(50000, 400);
        let wide = |x: i32, y: i32, w: i32| {
            GridData::new(x, y).span(w, 1).weight(1.0, 0.0).max_size(40000, 0)
        };
        let info = layout_with(&[wide(0, 0, 1)], metrics(), big);
        assert_eq!(row_widths(&info, 0), vec![INFINITE]);

        let info = layout_with(&[wide(0, 0, 2)], metrics(), big);
        assert_eq!(row_widths(&info, 0), vec![INFINITE, INFINITE + 1]);

        let info = layout_with(&[wide(0, 0, 1), wide(1, 0, 2)], metrics(), big);
        assert_eq!(row_widths(&info, 0), vec![INFINITE, INFINITE, INFINITE + 1]);
    }

    #[test]
    fn max_height_mirrors_columns() {
        let tall = |x: i32, y: i32, h: i32| {
            GridData::new(x, y).span(1, h).weight(0.0, 1.0).max_size(0, 80)
        };
        let info = layout(&[tall(0, 0, 2), tall(0, 2, 1), tall(1, 0, 3)]);
        assert_eq!(col_heights(&info, 0), vec![23, 23, 24]);
        assert_eq!(col_heights(&info, 1), vec![23, 23, 24]);

        let info = layout(&[
            GridData::new(0, 0).weight(0.0, 1.0).max_size(0, 80),
            GridData::new(0, 1).weight(0.0, 1.0),
        ]);
        assert_eq!(info.cell_bounds()[0][0], Rectangle::new(0, 0, 50, 80));
        assert_eq!(info.cell_bounds()[1][0], Rectangle::new(0, 85, 50, 315));
    }

    #[test]
    fn grid_dimensions() {
        let mut info = LogicalGridLayoutInfo::new(
            &[GridData::new(0, 0), GridData::new(1, 0).weight(1.0, 0.0)],
            metrics(),
            None,
            &mut NoMeasure,
        );
        info.layout_cell_bounds(Dimension::new(500, 400), Insets::uniform(2));
        assert_eq!(info.grid_dimension(SizeFlag::Pref), Dimension::new(109, 34));
        assert_eq!(info.grid_dimension(SizeFlag::Min), Dimension::new(109, 34));
        assert_eq!(
            info.grid_dimension(SizeFlag::Max),
            Dimension::new(50 + 5 + INFINITE + 4, 34)
        );
    }

    #[test]
    fn measures_ui_sizes() {
        let cons = [GridData::new(0, 0).use_ui(true, true)];
        let mut measure = |_: usize, hints: SizeHints| {
            if hints.width_only {
                Dimension::new(120, 0)
            } else {
                Dimension::new(120, 44)
            }
        };
        let info = LogicalGridLayoutInfo::new(&cons, metrics(), None, &mut measure);
        assert_eq!(info.comp_size(0), Dimension::new(120, 44));
        assert_eq!(info.width_table().sizes[0], SizeTriple::fixed(120));
        assert_eq!(info.height_table().sizes[0], SizeTriple::fixed(44));
    }

    #[test]
    fn row_heights_measured_with_resolved_column_width() {
        // Text that wraps: height grows as width shrinks.
        let cons = [
            GridData::new(0, 0).weight(1.0, 0.0).use_ui(false, true),
            GridData::new(1, 0).hints(100, 0),
        ];
        let mut seen = Vec::new();
        let mut measure = |_: usize, hints: SizeHints| {
            seen.push(hints.width_hint);
            let w = hints.width_hint.unwrap_or(1000).max(1);
            Dimension::new(w, 2000 / w)
        };
        let info = LogicalGridLayoutInfo::new(
            &cons,
            GridMetrics::new(50, 30, 0, 0),
            Some(300),
            &mut measure,
        );
        assert_eq!(seen, vec![Some(200)]);
        assert_eq!(info.comp_size(0).height, 10);

        let mut measure = |_: usize, hints: SizeHints| {
            let w = hints.width_hint.unwrap_or(1000).max(1);
            Dimension::new(w, 2000 / w)
        };
        let info = LogicalGridLayoutInfo::new(
            &cons,
            GridMetrics::new(50, 30, 0, 0),
            None,
            &mut measure,
        );
        // Without a width hint the preferred column width is used.
        assert_eq!(info.comp_size(0).height, 40);
    }
}
