#![forbid(unsafe_code)]

//! The layout seam.
//!
//! A [`Layout`] positions the children of one container. The tree lends it
//! `&mut LayoutTree` for the duration of a call; while it runs, the
//! container's own layout slot is marked in use, so a nested validation of
//! the same container is refused instead of recursing.

use gridkit_core::{Dimension, Result, SizeHints};
use std::fmt;

use crate::tree::{ComponentId, LayoutTree};

/// Positions the children of a container.
pub trait Layout: fmt::Debug {
    /// Apply bounds to the children of `container`.
    fn layout(&mut self, tree: &mut LayoutTree, container: ComponentId) -> Result<()>;

    /// Preferred size of `container`, insets included, margins excluded.
    ///
    /// `hints` have already had margins and insets removed.
    fn preferred_layout_size(
        &mut self,
        tree: &mut LayoutTree,
        container: ComponentId,
        hints: SizeHints,
    ) -> Result<Dimension>;

    /// Drop anything cached from previous passes.
    ///
    /// `source` is the component the invalidation started from, if it came
    /// up the tree.
    fn invalidate(&mut self, _source: Option<ComponentId>) {}
}

/// Layout for leaves and CSS-sized containers.
///
/// The preferred size is the element's content size; laying out just
/// revalidates children that have layouts of their own.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLayout;

impl Layout for NullLayout {
    fn layout(&mut self, tree: &mut LayoutTree, container: ComponentId) -> Result<()> {
        for child in tree.children(container)?.to_vec() {
            if tree.has_layout(child)? {
                tree.revalidate_layout(child)?;
            }
        }
        Ok(())
    }

    fn preferred_layout_size(
        &mut self,
        tree: &mut LayoutTree,
        container: ComponentId,
        hints: SizeHints,
    ) -> Result<Dimension> {
        Ok(tree.element(container)?.content_size(hints))
    }
}
