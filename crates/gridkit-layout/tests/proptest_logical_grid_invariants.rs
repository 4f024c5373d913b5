//! Property-based invariant tests for the gridkit-layout solver.
//!
//! These tests verify structural invariants that must hold for **any**
//! combination of constraints, metrics and container sizes:
//!
//! 1. Normalized constraints are clamped into the final grid.
//! 2. Every remaining column and row has an occupant.
//! 3. Weights sum to one or are all zero.
//! 4. Size triples are ordered (`min <= pref <= max`).
//! 5. layout_sizes never leaves a track's bounds.
//! 6. layout_sizes hits the target exactly when it is reachable.
//! 7. layout_cell_bounds is deterministic.
//! 8. Spanned bounds cover their interior gaps.

use gridkit_core::{Dimension, Insets};
use gridkit_layout::{
    GridData, GridLayoutEngine, GridMetrics, LogicalGridLayoutInfo, MAX_GRID_LINES, NoMeasure,
    SizeTriple, layout_sizes, span_bounds,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn weight_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), Just(1.0), 0.5f64..3.0]
}

fn grid_data_strategy() -> impl Strategy<Value = GridData> {
    (
        (-3i32..8, -3i32..8, -2i32..5, -2i32..5),
        (weight_strategy(), weight_strategy()),
        (0i32..150, 0i32..80),
        (any::<bool>(), any::<bool>()),
        (0i32..200, 0i32..200),
    )
        .prop_map(|((x, y, w, h), (wx, wy), (hw, hh), (fh, fv), (mw, mh))| {
            GridData::new(x, y)
                .span(w, h)
                .weight(wx, wy)
                .hints(hw, hh)
                .fill(fh, fv)
                .max_size(mw, mh)
        })
}

fn constraints(max_len: usize) -> impl Strategy<Value = Vec<GridData>> {
    proptest::collection::vec(grid_data_strategy(), 1..=max_len)
}

fn metrics_strategy() -> impl Strategy<Value = GridMetrics> {
    (0i32..100, 0i32..40, 0i32..10, 0i32..10)
        .prop_map(|(cw, rh, hgap, vgap)| GridMetrics::new(cw, rh, hgap, vgap))
}

/// Triples with `min <= pref <= max` plus integer weights.
fn tracks(max_len: usize) -> impl Strategy<Value = (Vec<SizeTriple>, Vec<f64>)> {
    proptest::collection::vec(
        ((0i32..100, 0i32..100, 0i32..200), 0u8..=4).prop_map(|((a, b, c), w)| {
            let min = a;
            let pref = a + b;
            let max = pref + c;
            (SizeTriple::new(min, pref, max), f64::from(w))
        }),
        1..=max_len,
    )
    .prop_map(|v| v.into_iter().unzip())
}

fn info(cons: &[GridData], metrics: GridMetrics) -> LogicalGridLayoutInfo {
    LogicalGridLayoutInfo::new(cons, metrics, None, &mut NoMeasure)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Clamping: constraints fit the final grid
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn constraints_are_clamped(cons in constraints(10), metrics in metrics_strategy()) {
        let info = info(&cons, metrics);
        for gd in info.grid_datas() {
            prop_assert!(gd.grid_x >= 0 && gd.grid_y >= 0, "negative origin {:?}", gd);
            prop_assert!(gd.grid_w >= 1 && gd.grid_h >= 1, "empty span {:?}", gd);
            prop_assert!(
                (gd.grid_x + gd.grid_w) as usize <= info.cols(),
                "span {:?} exceeds {} cols", gd, info.cols()
            );
            prop_assert!(
                (gd.grid_y + gd.grid_h) as usize <= info.rows(),
                "span {:?} exceeds {} rows", gd, info.rows()
            );
        }
    }
}

proptest! {
    #[test]
    fn extreme_model_values_stay_bounded(
        raw in proptest::collection::vec((any::<i32>(), any::<i32>(), any::<i32>(), any::<i32>()), 1..4),
    ) {
        let cons: Vec<GridData> = raw
            .into_iter()
            .map(|(x, y, w, h)| GridData::new(x, y).span(w, h))
            .collect();
        let info = info(&cons, GridMetrics::new(10, 10, 1, 1));
        prop_assert!(info.cols() <= MAX_GRID_LINES as usize && info.rows() <= MAX_GRID_LINES as usize);
        for gd in info.grid_datas() {
            prop_assert!(gd.grid_x >= 0 && gd.grid_w >= 1, "{:?}", gd);
            prop_assert!((gd.grid_x + gd.grid_w) as usize <= info.cols(), "{:?}", gd);
            prop_assert!((gd.grid_y + gd.grid_h) as usize <= info.rows(), "{:?}", gd);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Line elimination: no empty columns or rows remain
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn every_line_is_occupied(cons in constraints(10), metrics in metrics_strategy()) {
        let info = info(&cons, metrics);
        for col in 0..info.cols() {
            prop_assert!(
                info.grid_datas().iter().any(|gd| gd.columns().contains(&col)),
                "column {} has no occupant", col
            );
        }
        for row in 0..info.rows() {
            prop_assert!(
                info.grid_datas().iter().any(|gd| gd.rows().contains(&row)),
                "row {} has no occupant", row
            );
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Weight normalization
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn weights_sum_to_one_or_zero(cons in constraints(10), metrics in metrics_strategy()) {
        let info = info(&cons, metrics);
        for table in [info.width_table(), info.height_table()] {
            let sum = table.weight_sum();
            prop_assert!(table.weights.iter().all(|w| *w >= 0.0), "negative weight {:?}", table.weights);
            prop_assert!(
                sum == 0.0 || (sum - 1.0).abs() <= 1e-6,
                "weights sum to {} ({:?})", sum, table.weights
            );
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Size triples are ordered
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn triples_are_ordered(cons in constraints(10), metrics in metrics_strategy()) {
        let info = info(&cons, metrics);
        for table in [info.width_table(), info.height_table()] {
            for s in &table.sizes {
                prop_assert!(s.min <= s.pref && s.pref <= s.max, "unordered triple {:?}", s);
                prop_assert!(s.min >= 0, "negative min {:?}", s);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Distribution bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn distribution_respects_bounds((sizes, weights) in tracks(6), target in -50i32..2000) {
        let out = layout_sizes(target, &sizes, &weights);
        prop_assert_eq!(out.len(), sizes.len());
        for (o, s) in out.iter().zip(&sizes) {
            prop_assert!(s.min <= *o && *o <= s.max, "{} outside {:?} (target {})", o, s, target);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Distribution sum
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn distribution_hits_reachable_target((sizes, weights) in tracks(6), t in 0.0f64..=1.0) {
        let lo: i32 = sizes.iter().map(|s| s.min).sum();
        let hi: i32 = sizes.iter().map(|s| s.max).sum();
        let target = lo + ((hi - lo) as f64 * t) as i32;
        prop_assume!(target > 0);
        let out = layout_sizes(target, &sizes, &weights);
        prop_assert_eq!(out.iter().sum::<i32>(), target, "sizes {:?} weights {:?}", sizes, weights);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn cell_bounds_are_deterministic(
        cons in constraints(8),
        metrics in metrics_strategy(),
        width in 0i32..1200,
        height in 0i32..800,
    ) {
        let size = Dimension::new(width, height);
        let mut a = info(&cons, metrics);
        let mut b = info(&cons, metrics);
        let first = a.layout_cell_bounds(size, Insets::uniform(2)).clone();
        let again = a.layout_cell_bounds(size, Insets::uniform(2)).clone();
        let other = b.layout_cell_bounds(size, Insets::uniform(2)).clone();
        prop_assert_eq!(&first, &again);
        prop_assert_eq!(&first, &other);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Spanned bounds include interior gaps
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn span_width_is_tracks_plus_gaps(
        cons in constraints(8),
        metrics in metrics_strategy(),
        width in 100i32..1200,
    ) {
        let engine = GridLayoutEngine::new(metrics);
        let sol = engine.solve(&cons, &mut NoMeasure, Dimension::new(width, 600), Insets::ZERO);
        let widths = sol.info.column_widths();
        for gd in sol.info.grid_datas() {
            let span = span_bounds(sol.info.cell_bounds(), gd);
            let expected: i32 = widths[gd.columns()].iter().sum::<i32>()
                + (gd.grid_w - 1) * metrics.hgap;
            prop_assert_eq!(span.width, expected, "span {:?}", gd);
        }
    }
}
