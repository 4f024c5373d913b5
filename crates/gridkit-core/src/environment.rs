#![forbid(unsafe_code)]

//! Layout environment: the logical grid units.
//!
//! A logical grid measures components in grid cells rather than pixels. The
//! [`Environment`] says how wide a logical column and how tall a logical row
//! is, and which gaps separate them. It is passed explicitly into layouts
//! instead of living in mutable statics, so two layouts in the same process
//! can use different units.
//!
//! # Resolution order
//!
//! 1. [`Environment::default`] (`360 / 23 / 12 / 6`).
//! 2. JSON via `serde` (missing fields keep their defaults).
//! 3. Environment variable overrides via [`Environment::from_env`].
//!
//! | Variable               | Field          |
//! |------------------------|----------------|
//! | `GRIDKIT_COLUMN_WIDTH` | `column_width` |
//! | `GRIDKIT_ROW_HEIGHT`   | `row_height`   |
//! | `GRIDKIT_HGAP`         | `hgap`         |
//! | `GRIDKIT_VGAP`         | `vgap`         |
//!
//! Unparsable or negative values are ignored.

use serde::{Deserialize, Serialize};

/// Logical grid units shared by the layouts of one UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Environment {
    /// Width of one logical column in pixels.
    pub column_width: i32,
    /// Height of one logical row in pixels.
    pub row_height: i32,
    /// Horizontal gap between logical columns.
    pub hgap: i32,
    /// Vertical gap between logical rows.
    pub vgap: i32,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            column_width: 360,
            row_height: 23,
            hgap: 12,
            vgap: 6,
        }
    }
}

impl Environment {
    pub const COLUMN_WIDTH_VAR: &'static str = "GRIDKIT_COLUMN_WIDTH";
    pub const ROW_HEIGHT_VAR: &'static str = "GRIDKIT_ROW_HEIGHT";
    pub const HGAP_VAR: &'static str = "GRIDKIT_HGAP";
    pub const VGAP_VAR: &'static str = "GRIDKIT_VGAP";

    /// Default environment with process environment overrides applied.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Default environment with overrides from an injected lookup.
    #[must_use]
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self::default().with_overrides(lookup)
    }

    /// Apply overrides from `lookup` on top of `self`.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .and_then(|raw| raw.trim().parse::<i32>().ok())
                .filter(|value| *value >= 0)
        };
        if let Some(v) = read(Self::COLUMN_WIDTH_VAR) {
            self.column_width = v;
        }
        if let Some(v) = read(Self::ROW_HEIGHT_VAR) {
            self.row_height = v;
        }
        if let Some(v) = read(Self::HGAP_VAR) {
            self.hgap = v;
        }
        if let Some(v) = read(Self::VGAP_VAR) {
            self.vgap = v;
        }
        self
    }

    /// Set the column width.
    #[must_use]
    pub fn column_width(mut self, column_width: i32) -> Self {
        self.column_width = column_width;
        self
    }

    /// Set the row height.
    #[must_use]
    pub fn row_height(mut self, row_height: i32) -> Self {
        self.row_height = row_height;
        self
    }

    /// Set both gaps.
    #[must_use]
    pub fn gaps(mut self, hgap: i32, vgap: i32) -> Self {
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
