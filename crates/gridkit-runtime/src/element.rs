#![forbid(unsafe_code)]

//! The rendering surface a component lays out.
//!
//! [`Element`] is the capability contract the driver needs from whatever
//! actually displays a component (a DOM node, a terminal region, a test
//! double). The driver only reads geometry and visibility and writes bounds;
//! applying bounds must never call back into the layout tree.

use gridkit_core::{Dimension, Insets, Rectangle, SizeHints};
use std::fmt;

use crate::scheduler::AnimationId;

/// Geometry and visibility of one rendered component.
pub trait Element: fmt::Debug {
    /// Still part of the rendered document.
    fn is_attached(&self) -> bool {
        true
    }

    fn is_visible(&self) -> bool {
        true
    }

    /// Show or hide. Hosts that own visibility elsewhere may ignore this.
    fn set_visible(&mut self, _visible: bool) {}

    /// Attach to or detach from the document.
    fn set_attached(&mut self, _attached: bool) {}

    /// Animation the host is running on this element, if any.
    fn animation(&self) -> Option<AnimationId> {
        None
    }

    /// Space outside the bounds.
    fn margins(&self) -> Insets {
        Insets::ZERO
    }

    /// Padding and border inside the bounds.
    fn insets(&self) -> Insets {
        Insets::ZERO
    }

    /// Lower clamp for preferred sizes.
    fn min_size(&self) -> Dimension {
        Dimension::ZERO
    }

    /// Upper clamp for preferred sizes.
    fn max_size(&self) -> Dimension {
        Dimension::new(i32::MAX, i32::MAX)
    }

    /// Current bounds, insets included, margins excluded.
    fn bounds(&self) -> Rectangle;

    fn set_bounds(&mut self, bounds: Rectangle);

    fn size(&self) -> Dimension {
        self.bounds().dimension()
    }

    /// Resize in place.
    fn set_size(&mut self, size: Dimension) {
        let b = self.bounds();
        self.set_bounds(Rectangle::new(b.x, b.y, size.width, size.height));
    }

    /// Natural size of the content, insets included.
    fn content_size(&self, _hints: SizeHints) -> Dimension {
        Dimension::ZERO
    }
}

/// In-memory element with fixed content size.
///
/// Stands in for a real rendering surface in headless hosts and tests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoxElement {
    pub attached: bool,
    pub visible: bool,
    pub margins: Insets,
    pub insets: Insets,
    pub min_size: Option<Dimension>,
    pub max_size: Option<Dimension>,
    pub content: Dimension,
    pub bounds: Rectangle,
    /// Number of `set_bounds` calls seen.
    pub bounds_writes: u32,
}

impl BoxElement {
    /// Attached, visible, zero-sized element.
    #[must_use]
    pub fn new() -> Self {
        Self {
            attached: true,
            visible: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_content(mut self, content: Dimension) -> Self {
        self.content = content;
        self
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Insets) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    #[must_use]
    pub fn with_size_limits(mut self, min: Option<Dimension>, max: Option<Dimension>) -> Self {
        self.min_size = min;
        self.max_size = max;
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: Rectangle) -> Self {
        self.bounds = bounds;
        self
    }

    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    #[must_use]
    pub fn with_attached(mut self, attached: bool) -> Self {
        self.attached = attached;
        self
    }
}

impl Element for BoxElement {
    fn is_attached(&self) -> bool {
        self.attached
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_attached(&mut self, attached: bool) {
        self.attached = attached;
    }

    fn margins(&self) -> Insets {
        self.margins
    }

    fn insets(&self) -> Insets {
        self.insets
    }

    fn min_size(&self) -> Dimension {
        self.min_size.unwrap_or(Dimension::ZERO)
    }

    fn max_size(&self) -> Dimension {
        self.max_size.unwrap_or(Dimension::new(i32::MAX, i32::MAX))
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rectangle) {
        self.bounds = bounds;
        self.bounds_writes += 1;
    }

    fn content_size(&self, _hints: SizeHints) -> Dimension {
        self.content.add_insets(self.insets)
    }
}
