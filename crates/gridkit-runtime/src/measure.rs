#![forbid(unsafe_code)]

//! Measuring children through the tree.

use gridkit_core::{Dimension, LayoutError, Result, SizeHints};
use gridkit_layout::Measure;

use crate::tree::{ComponentId, LayoutTree, PrefSizeOptions};

/// [`Measure`] backed by [`LayoutTree::pref_size`].
///
/// Sizes include the child's margins, matching the cell space the solver
/// hands out. The solver cannot fail, so the first error is parked and
/// every later measurement returns zero; call [`TreeMeasure::finish`] to
/// get it back.
#[derive(Debug)]
pub struct TreeMeasure<'a> {
    tree: &'a mut LayoutTree,
    children: &'a [ComponentId],
    error: Option<LayoutError>,
}

impl<'a> TreeMeasure<'a> {
    /// Measure `children`; constraint `i` belongs to `children[i]`.
    pub fn new(tree: &'a mut LayoutTree, children: &'a [ComponentId]) -> Self {
        Self {
            tree,
            children,
            error: None,
        }
    }

    /// The first error hit while measuring, if any.
    pub fn finish(self) -> Result<()> {
        self.error.map_or(Ok(()), Err)
    }
}

impl Measure for TreeMeasure<'_> {
    fn preferred_size(&mut self, index: usize, hints: SizeHints) -> Dimension {
        if self.error.is_some() {
            return Dimension::ZERO;
        }
        let Some(&child) = self.children.get(index) else {
            return Dimension::ZERO;
        };
        let options = PrefSizeOptions::with_hints(hints).include_margin(true);
        match self.tree.pref_size(child, options) {
            Ok(size) => size,
            Err(err) => {
                self.error = Some(err);
                Dimension::ZERO
            }
        }
    }
}
