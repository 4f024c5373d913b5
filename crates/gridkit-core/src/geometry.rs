#![forbid(unsafe_code)]

//! Pixel geometry primitives.
//!
//! All values are signed `i32` pixels. Negative widths never come out of the
//! solver, but intermediate arithmetic (available space minus insets and
//! gaps) is allowed to go below zero and is clamped by its consumers.

use serde::{Deserialize, Serialize};

/// A width/height pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    pub width: i32,
    pub height: i32,
}

impl Dimension {
    /// Zero-sized dimension.
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a new dimension.
    #[inline]
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Grow by the given insets.
    #[inline]
    #[must_use]
    pub const fn add_insets(self, insets: Insets) -> Self {
        Self::new(
            self.width + insets.horizontal(),
            self.height + insets.vertical(),
        )
    }

    /// Shrink by the given insets.
    #[inline]
    #[must_use]
    pub const fn subtract_insets(self, insets: Insets) -> Self {
        Self::new(
            self.width - insets.horizontal(),
            self.height - insets.vertical(),
        )
    }

    /// Componentwise maximum.
    #[inline]
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.width.max(other.width), self.height.max(other.height))
    }

    /// True if either side is zero or negative.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Space around a box, in CSS order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Insets {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Insets {
    /// No insets.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Create insets from top, right, bottom, left.
    #[inline]
    #[must_use]
    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same inset on every side.
    #[inline]
    #[must_use]
    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Sum of left and right.
    #[inline]
    #[must_use]
    pub const fn horizontal(self) -> i32 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    #[inline]
    #[must_use]
    pub const fn vertical(self) -> i32 {
        self.top + self.bottom
    }
}

/// A position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Pixel bounds with a top-left origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rectangle {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at the origin with the given size.
    #[inline]
    #[must_use]
    pub const fn from_dimension(size: Dimension) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Exclusive right edge.
    #[inline]
    #[must_use]
    pub const fn right(self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    #[inline]
    #[must_use]
    pub const fn bottom(self) -> i32 {
        self.y + self.height
    }

    /// Top-left corner.
    #[inline]
    #[must_use]
    pub const fn point(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Width and height.
    #[inline]
    #[must_use]
    pub const fn dimension(self) -> Dimension {
        Dimension::new(self.width, self.height)
    }

    /// Smallest rectangle containing both `self` and `other`.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Self::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }

    /// Shrink by the given insets (e.g. margins).
    #[must_use]
    pub const fn subtract_insets(self, insets: Insets) -> Self {
        Self::new(
            self.x + insets.left,
            self.y + insets.top,
            self.width - insets.horizontal(),
            self.height - insets.vertical(),
        )
    }

    /// True if width or height is zero or negative.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Top-down hints for a preferred-size query.
///
/// Doubles as a cache key: two queries with equal hints must return the same
/// size as long as nothing was invalidated in between.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SizeHints {
    /// Width the caller intends to give the component.
    pub width_hint: Option<i32>,
    /// Height the caller intends to give the component.
    pub height_hint: Option<i32>,
    /// Only the width of the result will be used.
    pub width_only: bool,
}

impl SizeHints {
    /// No hints.
    pub const NONE: Self = Self {
        width_hint: None,
        height_hint: None,
        width_only: false,
    };

    /// Hint only the width.
    #[inline]
    #[must_use]
    pub const fn with_width(width: i32) -> Self {
        Self {
            width_hint: Some(width),
            height_hint: None,
            width_only: false,
        }
    }

    /// Set the height hint.
    #[inline]
    #[must_use]
    pub const fn height(mut self, height: i32) -> Self {
        self.height_hint = Some(height);
        self
    }

    /// Mark the query as width-only.
    #[inline]
    #[must_use]
    pub const fn width_only(mut self, width_only: bool) -> Self {
        self.width_only = width_only;
        self
    }
}
