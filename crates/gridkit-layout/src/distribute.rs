#![forbid(unsafe_code)]

//! Distribution of a target size over weighted tracks.
//!
//! [`layout_sizes`] starts every track at its preferred size and then moves
//! one pixel at a time towards the target. Each round, every track that can
//! still move adds its weight to an accumulator and spends a pixel whenever
//! the accumulator is positive. This yields integer sizes without fractional
//! drift, and results vary smoothly as the target changes.
//!
//! # Invariants
//!
//! | Property | Condition |
//! |----------|-----------|
//! | `min <= out[i] <= max` | every track starts within its bounds |
//! | `sum(out) == target` | `sum(min) <= target <= sum(max)` |
//! | `out[i] == min` | `target <= 0` |
//!
//! # Failure Modes
//!
//! None. Contradictory bounds (`min > max`) are not validated; the result is
//! unspecified but the call still returns.
//!
//! The loop is `O(delta * tracks)`; `delta` is bounded by the track caps
//! ([`INFINITE`](crate::INFINITE) per flexible track).

use crate::size_table::{EPS, SizeTriple};

/// Distribute `target` pixels over `sizes` according to `weights`.
///
/// `weights` must have the same length as `sizes`; missing weights count as
/// zero.
#[must_use]
pub fn layout_sizes(target: i32, sizes: &[SizeTriple], weights: &[f64]) -> Vec<i32> {
    if target <= 0 {
        return sizes.iter().map(|s| s.min).collect();
    }

    let mut out: Vec<i32> = sizes.iter().map(|s| s.pref).collect();
    let mut delta = target - out.iter().sum::<i32>();
    if delta == 0 {
        return out;
    }

    let shares = effective_weights(sizes, weights);
    let mut acc = vec![0.0f64; sizes.len()];

    if delta > 0 {
        let mut has_targets = true;
        while delta > 0 && has_targets {
            has_targets = false;
            for i in 0..out.len() {
                if delta == 0 {
                    break;
                }
                if shares[i] > 0.0 && out[i] < sizes[i].max {
                    has_targets = true;
                    acc[i] += shares[i];
                    if acc[i] > 0.0 {
                        acc[i] -= 1.0;
                        out[i] += 1;
                        delta -= 1;
                    }
                }
            }
        }
    } else {
        let mut has_targets = true;
        while delta < 0 && has_targets {
            has_targets = false;
            for i in 0..out.len() {
                if delta == 0 {
                    break;
                }
                if shares[i] > 0.0 && out[i] > sizes[i].min {
                    has_targets = true;
                    acc[i] += shares[i];
                    if acc[i] > 0.0 {
                        acc[i] -= 1.0;
                        out[i] -= 1;
                        delta += 1;
                    }
                }
            }
        }
    }
    out
}

/// Weights after auto-correction, normalized to sum to one.
///
/// An undeclared weight (below [`EPS`]) becomes `1` for a track that can
/// change size and `0` for a fixed one.
fn effective_weights(sizes: &[SizeTriple], weights: &[f64]) -> Vec<f64> {
    let mut shares: Vec<f64> = sizes
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let w = weights.get(i).copied().unwrap_or(0.0);
            if w < EPS {
                if s.max > s.min { 1.0 } else { 0.0 }
            } else {
                w
            }
        })
        .collect();
    let sum: f64 = shares.iter().sum();
    if sum > 0.0 {
        for share in &mut shares {
            *share /= sum;
        }
    }
    shares
}
