#![forbid(unsafe_code)]

//! Per-axis size tables.
//!
//! Each track (column or row) carries a `{min, pref, max}` triple and a
//! weight. Fixed tracks have `min == pref == max`; flexible tracks start at
//! `min == 0` and are capped at [`INFINITE`].

/// Upper bound standing in for "unbounded".
///
/// Finite so that sums over many tracks cannot overflow `i32`.
pub const INFINITE: i32 = 10240;

/// Weights below this are treated as zero.
pub const EPS: f64 = 1e-6;

/// Selects one component of a [`SizeTriple`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeFlag {
    Min,
    Pref,
    Max,
}

/// Size bounds of one track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SizeTriple {
    pub min: i32,
    pub pref: i32,
    pub max: i32,
}

impl SizeTriple {
    #[inline]
    #[must_use]
    pub const fn new(min: i32, pref: i32, max: i32) -> Self {
        Self { min, pref, max }
    }

    /// `min == pref == max == size`.
    #[inline]
    #[must_use]
    pub const fn fixed(size: i32) -> Self {
        Self::new(size, size, size)
    }

    /// `min == 0`, `max == cap`.
    #[inline]
    #[must_use]
    pub const fn flexible(pref: i32, cap: i32) -> Self {
        Self::new(0, pref, cap)
    }

    #[inline]
    #[must_use]
    pub const fn get(self, flag: SizeFlag) -> i32 {
        match flag {
            SizeFlag::Min => self.min,
            SizeFlag::Pref => self.pref,
            SizeFlag::Max => self.max,
        }
    }

    /// True if the track can neither grow nor shrink.
    #[inline]
    #[must_use]
    pub const fn is_fixed(self) -> bool {
        self.min == self.max
    }
}

/// Sizes and weights of one axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisTable {
    pub sizes: Vec<SizeTriple>,
    pub weights: Vec<f64>,
}

impl AxisTable {
    /// Table with `len` zeroed tracks.
    #[must_use]
    pub fn with_len(len: usize) -> Self {
        Self {
            sizes: vec![SizeTriple::default(); len],
            weights: vec![0.0; len],
        }
    }

    /// Number of tracks.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// One size per track.
    #[must_use]
    pub fn extract(&self, flag: SizeFlag) -> Vec<i32> {
        self.sizes.iter().map(|s| s.get(flag)).collect()
    }

    /// Sum of the selected sizes.
    #[must_use]
    pub fn total(&self, flag: SizeFlag) -> i32 {
        self.sizes.iter().map(|s| s.get(flag)).sum()
    }

    /// Sum of all weights.
    #[must_use]
    pub fn weight_sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Scale weights to sum to `1.0`, unless they are all (nearly) zero.
    pub fn normalize_weights(&mut self) {
        let sum = self.weight_sum();
        if sum >= EPS {
            let f = 1.0 / sum;
            for w in &mut self.weights {
                *w *= f;
            }
        }
    }
}
