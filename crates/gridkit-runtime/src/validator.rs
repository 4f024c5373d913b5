#![forbid(unsafe_code)]

//! Batched validation of invalid layout roots.
//!
//! Invalidations only record a root here; the work happens in one
//! [`LayoutTree::validate`] call, normally fired from the microtask that the
//! first invalidation of a turn schedules.
//!
//! Roots are kept ancestor-first: a new root is inserted before any recorded
//! root that lies inside it, so by the time a descendant's turn comes its
//! ancestor has usually laid it out already.

use gridkit_core::Result;
use std::fmt;
use tracing::{debug_span, trace};

use crate::scheduler::CancelToken;
use crate::tree::{ComponentId, LayoutTree};

type PostValidate = Box<dyn FnOnce(&mut LayoutTree)>;

/// Invalid roots waiting for the next validation pass.
#[derive(Default)]
pub struct LayoutValidator {
    invalid: Vec<ComponentId>,
    post_validate: Vec<PostValidate>,
    /// The scheduled validation microtask, if any.
    pub(crate) pending: Option<CancelToken>,
}

impl fmt::Debug for LayoutValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutValidator")
            .field("invalid", &self.invalid)
            .field("post_validate", &self.post_validate.len())
            .field("pending", &self.pending)
            .finish()
    }
}

impl LayoutValidator {
    /// Recorded roots in validation order.
    #[must_use]
    pub fn invalid_components(&self) -> &[ComponentId] {
        &self.invalid
    }

    /// Record `id`; `contains` tells whether a recorded root lies inside it.
    pub(crate) fn insert(&mut self, id: ComponentId, contains: impl Fn(ComponentId) -> bool) {
        if self.invalid.contains(&id) {
            return;
        }
        let position = self
            .invalid
            .iter()
            .position(|other| contains(*other))
            .unwrap_or(self.invalid.len());
        self.invalid.insert(position, id);
    }

    pub(crate) fn forget(&mut self, id: ComponentId) {
        self.invalid.retain(|c| *c != id);
    }
}

impl LayoutTree {
    /// Validate every recorded root, then run the post-validate callbacks.
    ///
    /// Roots that validate are dropped; roots whose validation is refused
    /// (hidden, detached, animating) stay recorded for the next pass.
    pub fn validate(&mut self) -> Result<()> {
        if let Some(token) = self.validator.pending.take() {
            self.scheduler.cancel(token);
        }
        let roots = self.validator.invalid.clone();
        let _span = debug_span!("validate", roots = roots.len()).entered();
        for id in roots {
            if !self.contains(id) {
                self.validator.forget(id);
                continue;
            }
            if self.validate_layout(id)? {
                self.validator.forget(id);
            } else {
                trace!(component = id.index(), "root stays invalid");
            }
        }

        let callbacks = std::mem::take(&mut self.validator.post_validate);
        for callback in callbacks {
            callback(self);
        }
        Ok(())
    }

    /// Run `callback` once, after the next validation pass.
    pub fn schedule_post_validate(&mut self, callback: impl FnOnce(&mut LayoutTree) + 'static) {
        self.validator.post_validate.push(Box::new(callback));
    }

    /// Roots waiting for validation.
    #[must_use]
    pub fn invalid_roots(&self) -> &[ComponentId] {
        self.validator.invalid_components()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::BoxElement;
    use crate::layout::NullLayout;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;

    #[test]
    fn roots_are_kept_ancestor_first() {
        let mut tree = LayoutTree::new();
        let root = tree.insert_with_layout(None, BoxElement::new(), NullLayout).unwrap();
        let child = tree.insert_with_layout(Some(root), BoxElement::new(), NullLayout).unwrap();
        let other = tree.insert_with_layout(None, BoxElement::new(), NullLayout).unwrap();

        tree.invalidate_layout_tree(child, false).unwrap();
        tree.invalidate_layout_tree(other, false).unwrap();
        tree.invalidate_layout_tree(root, false).unwrap();
        tree.invalidate_layout_tree(child, false).unwrap();
        assert_eq!(tree.invalid_roots(), &[root, child, other]);
    }

    #[test]
    fn refused_roots_stay_recorded() {
        let mut tree = LayoutTree::new();
        let shown = tree.insert_with_layout(None, BoxElement::new(), NullLayout).unwrap();
        let hidden = tree
            .insert_with_layout(None, BoxElement::new().with_visible(false), NullLayout)
            .unwrap();
        tree.invalidate_layout_tree(shown, false).unwrap();
        tree.invalidate_layout_tree(hidden, false).unwrap();
        tree.validate().unwrap();
        assert_eq!(tree.invalid_roots(), &[hidden]);

        tree.set_visible(hidden, true).unwrap();
        assert_eq!(tree.run_due(Duration::ZERO).unwrap(), 1);
        assert!(tree.invalid_roots().is_empty());
    }

    #[test]
    fn explicit_validate_cancels_the_scheduled_pass() {
        let mut tree = LayoutTree::new();
        let id = tree.insert_with_layout(None, BoxElement::new(), NullLayout).unwrap();
        tree.invalidate_layout_tree(id, false).unwrap();
        assert_eq!(tree.pending_tasks(), 1);
        tree.validate().unwrap();
        assert_eq!(tree.pending_tasks(), 0);
        assert_eq!(tree.run_due(Duration::ZERO).unwrap(), 0);
    }

    #[test]
    fn post_validate_callbacks_run_once() {
        let runs = Rc::new(Cell::new(0));
        let mut tree = LayoutTree::new();
        let seen = Rc::clone(&runs);
        tree.schedule_post_validate(move |_| seen.set(seen.get() + 1));
        tree.validate().unwrap();
        tree.validate().unwrap();
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn callbacks_may_touch_the_tree() {
        let mut tree = LayoutTree::new();
        let id = tree.insert_with_layout(None, BoxElement::new(), NullLayout).unwrap();
        tree.schedule_post_validate(move |tree| {
            let _ = tree.invalidate_layout_tree(id, false);
        });
        tree.validate().unwrap();
        assert_eq!(tree.invalid_roots(), &[id]);
        assert_eq!(tree.pending_tasks(), 1);
    }
}
