#![forbid(unsafe_code)]

//! Component arena and the invalidate/validate lifecycle.
//!
//! Every component owns an [`Element`], an optional [`Layout`], optional
//! [`GridData`] describing how its parent should place it, and a handful of
//! lifecycle flags. Components are addressed by [`ComponentId`]; parent and
//! child links are ids, never references, so a layout can borrow the whole
//! tree mutably while it runs.
//!
//! # Lifecycle
//!
//! ```text
//!  invalidate_layout_tree ──► invalid ──(microtask)──► validate ──► valid
//!                               ▲                        │
//!                               └──── set_bounds with ◄──┘
//!                                     a new size
//! ```
//!
//! Validation is refused (and retried later) while a component is detached,
//! hidden, animating, or already inside its own layout pass.

use gridkit_core::{Dimension, LayoutError, Rectangle, Result, SizeHints};
use gridkit_layout::GridData;
use rustc_hash::FxHashMap;
use std::fmt;
use std::time::Duration;
use tracing::{debug, debug_span, trace};

use crate::element::Element;
use crate::layout::Layout;
use crate::scheduler::{AnimationId, CancelToken, DebounceKey, Scheduler, Trigger};
use crate::validator::LayoutValidator;

/// Handle to a component in a [`LayoutTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(usize);

impl ComponentId {
    /// Arena slot of this component.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Work the tree schedules for itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutTask {
    /// Validate every recorded invalid root.
    ValidateTree,
    /// Retry a validation that was deferred.
    ValidateComponent(ComponentId),
    /// Debounced `revalidate_layout_tree(id, true)`.
    RevalidateTree(ComponentId),
}

/// Options for [`LayoutTree::pref_size`].
///
/// By default hints are taken to include the component's margins and
/// insets, and both are removed before the layout sees them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrefSizeOptions {
    pub hints: SizeHints,
    /// Add the margins to the returned size.
    pub include_margin: bool,
    /// Hints already exclude the margins.
    pub keep_margin_in_hints: bool,
    /// Hints already exclude the insets.
    pub keep_insets_in_hints: bool,
}

impl PrefSizeOptions {
    #[must_use]
    pub const fn with_hints(hints: SizeHints) -> Self {
        Self {
            hints,
            include_margin: false,
            keep_margin_in_hints: false,
            keep_insets_in_hints: false,
        }
    }

    #[must_use]
    pub const fn include_margin(mut self, include: bool) -> Self {
        self.include_margin = include;
        self
    }
}

#[derive(Debug)]
enum LayoutSlot {
    Empty,
    Installed(Box<dyn Layout>),
    /// Lent out to a running layout call.
    InUse,
}

#[derive(Debug)]
struct Node {
    parent: Option<ComponentId>,
    children: Vec<ComponentId>,
    element: Box<dyn Element>,
    layout: LayoutSlot,
    layout_data: Option<GridData>,
    valid: bool,
    layouting: bool,
    layouted: bool,
    validate_root: bool,
    suppress_invalidate: bool,
    suppress_validate: bool,
    size_cached: Option<Dimension>,
    pref_size_cache: FxHashMap<SizeHints, Dimension>,
    animation: Option<AnimationId>,
    /// An invalidation arrived while the layout was lent out.
    pending_invalidate: Option<Option<ComponentId>>,
}

impl Node {
    fn new(parent: Option<ComponentId>, element: Box<dyn Element>, layout: LayoutSlot) -> Self {
        Self {
            parent,
            children: Vec::new(),
            element,
            layout,
            layout_data: None,
            valid: false,
            layouting: false,
            layouted: false,
            validate_root: false,
            suppress_invalidate: false,
            suppress_validate: false,
            size_cached: None,
            pref_size_cache: FxHashMap::default(),
            animation: None,
            pending_invalidate: None,
        }
    }

    fn animation(&self) -> Option<AnimationId> {
        self.animation.or_else(|| self.element.animation())
    }

    fn is_attached_and_visible(&self) -> bool {
        self.element.is_attached() && self.element.is_visible()
    }
}

/// The component tree of one UI session.
#[derive(Debug, Default)]
pub struct LayoutTree {
    nodes: Vec<Option<Node>>,
    pub(crate) scheduler: Scheduler<LayoutTask>,
    pub(crate) validator: LayoutValidator,
    next_animation: u64,
}

fn unknown(id: ComponentId) -> LayoutError {
    LayoutError::UnknownComponent { component: id.0 }
}

fn is_descendant(nodes: &[Option<Node>], id: ComponentId, ancestor: ComponentId) -> bool {
    let mut cur = nodes.get(id.0).and_then(Option::as_ref).and_then(|n| n.parent);
    while let Some(p) = cur {
        if p == ancestor {
            return true;
        }
        cur = nodes.get(p.0).and_then(Option::as_ref).and_then(|n| n.parent);
    }
    false
}

impl LayoutTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn node(&self, id: ComponentId) -> Result<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref).ok_or_else(|| unknown(id))
    }

    fn node_mut(&mut self, id: ComponentId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or_else(|| unknown(id))
    }

    // ── Structure ───────────────────────────────────────────────────────

    /// Add a component without a layout.
    pub fn insert(&mut self, parent: Option<ComponentId>, element: impl Element + 'static) -> Result<ComponentId> {
        self.insert_node(parent, Box::new(element), LayoutSlot::Empty)
    }

    /// Add a component with `layout` installed.
    pub fn insert_with_layout(
        &mut self,
        parent: Option<ComponentId>,
        element: impl Element + 'static,
        layout: impl Layout + 'static,
    ) -> Result<ComponentId> {
        self.insert_node(parent, Box::new(element), LayoutSlot::Installed(Box::new(layout)))
    }

    fn insert_node(
        &mut self,
        parent: Option<ComponentId>,
        element: Box<dyn Element>,
        layout: LayoutSlot,
    ) -> Result<ComponentId> {
        if let Some(p) = parent {
            self.node(p)?;
        }
        let id = ComponentId(self.nodes.len());
        self.nodes.push(Some(Node::new(parent, element, layout)));
        if let Some(p) = parent {
            self.node_mut(p)?.children.push(id);
        }
        trace!(component = id.0, parent = ?parent.map(ComponentId::index), "component inserted");
        Ok(id)
    }

    /// Remove `id` and its whole subtree.
    pub fn remove(&mut self, id: ComponentId) -> Result<()> {
        let parent = self.node(id)?.parent;
        if let Some(node) = parent.and_then(|p| self.nodes.get_mut(p.0)).and_then(Option::as_mut) {
            node.children.retain(|c| *c != id);
        }
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(cur.0).and_then(Option::take) {
                stack.extend(node.children);
            }
            self.validator.forget(cur);
        }
        debug!(component = id.0, "component removed");
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, id: ComponentId) -> bool {
        self.node(id).is_ok()
    }

    pub fn parent(&self, id: ComponentId) -> Result<Option<ComponentId>> {
        Ok(self.node(id)?.parent)
    }

    pub fn children(&self, id: ComponentId) -> Result<&[ComponentId]> {
        Ok(&self.node(id)?.children)
    }

    /// True if `ancestor` is a strict ancestor of `id`.
    #[must_use]
    pub fn is_descendant_of(&self, id: ComponentId, ancestor: ComponentId) -> bool {
        is_descendant(&self.nodes, id, ancestor)
    }

    pub fn element(&self, id: ComponentId) -> Result<&dyn Element> {
        Ok(self.node(id)?.element.as_ref())
    }

    /// Direct element access. Changes made here do not invalidate anything.
    pub fn element_mut(&mut self, id: ComponentId) -> Result<&mut dyn Element> {
        let element: &mut dyn Element = self.node_mut(id)?.element.as_mut();
        Ok(element)
    }

    pub fn bounds(&self, id: ComponentId) -> Result<Rectangle> {
        Ok(self.node(id)?.element.bounds())
    }

    // ── Layout and flags ────────────────────────────────────────────────

    /// Install `layout`, replacing any previous one.
    pub fn set_layout(&mut self, id: ComponentId, layout: impl Layout + 'static) -> Result<()> {
        let node = self.node_mut(id)?;
        node.layout = LayoutSlot::Installed(Box::new(layout));
        node.valid = false;
        node.pref_size_cache.clear();
        Ok(())
    }

    pub fn clear_layout(&mut self, id: ComponentId) -> Result<()> {
        let node = self.node_mut(id)?;
        node.layout = LayoutSlot::Empty;
        node.valid = false;
        node.pref_size_cache.clear();
        Ok(())
    }

    pub fn has_layout(&self, id: ComponentId) -> Result<bool> {
        Ok(!matches!(self.node(id)?.layout, LayoutSlot::Empty))
    }

    pub fn layout_data(&self, id: ComponentId) -> Result<Option<GridData>> {
        Ok(self.node(id)?.layout_data)
    }

    /// Replace the placement data the parent's layout reads.
    pub fn set_layout_data(&mut self, id: ComponentId, data: Option<GridData>) -> Result<()> {
        self.node_mut(id)?.layout_data = data;
        Ok(())
    }

    pub fn set_validate_root(&mut self, id: ComponentId, validate_root: bool) -> Result<()> {
        self.node_mut(id)?.validate_root = validate_root;
        Ok(())
    }

    /// Invalidation walking up the tree stops here.
    ///
    /// Set explicitly, or implied by layout data whose size never depends
    /// on content.
    pub fn is_validate_root(&self, id: ComponentId) -> Result<bool> {
        let node = self.node(id)?;
        Ok(node.validate_root || node.layout_data.is_some_and(|gd| gd.is_validate_root()))
    }

    pub fn set_suppress_invalidate(&mut self, id: ComponentId, suppress: bool) -> Result<()> {
        self.node_mut(id)?.suppress_invalidate = suppress;
        Ok(())
    }

    pub fn set_suppress_validate(&mut self, id: ComponentId, suppress: bool) -> Result<()> {
        self.node_mut(id)?.suppress_validate = suppress;
        Ok(())
    }

    pub fn is_valid(&self, id: ComponentId) -> Result<bool> {
        Ok(self.node(id)?.valid)
    }

    /// Inside its own layout pass.
    pub fn is_layouting(&self, id: ComponentId) -> Result<bool> {
        Ok(self.node(id)?.layouting)
    }

    /// Completed at least one layout pass.
    pub fn is_layouted(&self, id: ComponentId) -> Result<bool> {
        Ok(self.node(id)?.layouted)
    }

    pub fn is_attached_and_visible(&self, id: ComponentId) -> Result<bool> {
        Ok(self.node(id)?.is_attached_and_visible())
    }

    /// Show or hide `id` through its element.
    ///
    /// Showing `id` schedules a validation pass if a root refused while it
    /// was hidden lies inside it.
    pub fn set_visible(&mut self, id: ComponentId, visible: bool) -> Result<()> {
        self.node_mut(id)?.element.set_visible(visible);
        if visible {
            self.resume_refused(id);
        }
        Ok(())
    }

    /// Attach or detach `id` through its element, resuming refused roots
    /// inside it like [`set_visible`](Self::set_visible).
    pub fn set_attached(&mut self, id: ComponentId, attached: bool) -> Result<()> {
        self.node_mut(id)?.element.set_attached(attached);
        if attached {
            self.resume_refused(id);
        }
        Ok(())
    }

    fn resume_refused(&mut self, id: ComponentId) {
        let nodes = &self.nodes;
        let waiting = self
            .validator
            .invalid_components()
            .iter()
            .any(|&root| root == id || is_descendant(nodes, root, id));
        if waiting {
            trace!(component = id.0, "refused roots resumed");
            self.schedule_validation();
        }
    }

    // ── Invalidation ────────────────────────────────────────────────────

    /// Mark `id` invalid and drop its cached preferred sizes.
    ///
    /// The installed layout is told; if it is currently running, it is told
    /// once it returns.
    pub fn invalidate_layout(&mut self, id: ComponentId, source: Option<ComponentId>) -> Result<()> {
        let node = self.node_mut(id)?;
        node.valid = false;
        node.pref_size_cache.clear();
        match &mut node.layout {
            LayoutSlot::Installed(layout) => layout.invalidate(source),
            LayoutSlot::InUse => node.pending_invalidate = Some(source),
            LayoutSlot::Empty => {}
        }
        Ok(())
    }

    /// Invalidate `id` and schedule a validation pass.
    ///
    /// With `invalidate_parents`, every ancestor up to the nearest validate
    /// root is invalidated too, and that root is what gets revalidated.
    pub fn invalidate_layout_tree(&mut self, id: ComponentId, invalidate_parents: bool) -> Result<()> {
        if self.node(id)?.suppress_invalidate {
            trace!(component = id.0, "invalidation suppressed");
            return Ok(());
        }
        let root = if invalidate_parents {
            self.invalidate_up_to_root(id)?
        } else {
            self.invalidate_layout(id, None)?;
            id
        };
        trace!(component = id.0, root = root.0, "layout tree invalidated");
        self.register_invalid(root);
        self.schedule_validation();
        Ok(())
    }

    fn invalidate_up_to_root(&mut self, id: ComponentId) -> Result<ComponentId> {
        let mut cur = id;
        let mut source = id;
        loop {
            self.invalidate_layout(cur, Some(source))?;
            if self.is_validate_root(cur)? {
                return Ok(cur);
            }
            match self.node(cur)?.parent {
                Some(parent) => {
                    source = cur;
                    cur = parent;
                }
                None => return Ok(cur),
            }
        }
    }

    fn register_invalid(&mut self, root: ComponentId) {
        let nodes = &self.nodes;
        self.validator
            .insert(root, |candidate| is_descendant(nodes, candidate, root));
    }

    fn schedule_validation(&mut self) {
        let pending = self
            .validator
            .pending
            .is_some_and(|token| self.scheduler.is_pending(token));
        if !pending {
            let token = self.scheduler.schedule(Trigger::Microtask, LayoutTask::ValidateTree);
            self.validator.pending = Some(token);
        }
    }

    // ── Validation ──────────────────────────────────────────────────────

    /// Run the layout of `id` if it is invalid and validation is possible.
    ///
    /// Returns `Ok(true)` once `id` is valid and `Ok(false)` if validation
    /// was refused or deferred.
    pub fn validate_layout(&mut self, id: ComponentId) -> Result<bool> {
        let node = self.node(id)?;
        let in_use = match node.layout {
            LayoutSlot::Empty => return Err(LayoutError::NoLayout { component: id.0 }),
            LayoutSlot::InUse => true,
            LayoutSlot::Installed(_) => false,
        };
        if node.valid {
            return Ok(true);
        }
        if node.suppress_validate || node.layouting || in_use {
            return Ok(false);
        }
        if !self.check_validation_possible(id)? {
            return Ok(false);
        }

        let _span = debug_span!("validate_layout", component = id.0).entered();
        let mut layout = self.take_layout(id)?;
        self.node_mut(id)?.layouting = true;
        let result = layout.layout(self, id);
        self.restore_layout(id, layout);
        result?;

        let node = self.node_mut(id)?;
        node.layouted = true;
        node.size_cached = Some(node.element.size());
        node.valid = true;
        Ok(true)
    }

    fn check_validation_possible(&mut self, id: ComponentId) -> Result<bool> {
        let node = self.node(id)?;
        if !node.is_attached_and_visible() {
            trace!(component = id.0, "validation skipped: not attached or not visible");
            return Ok(false);
        }
        if let Some(animation) = node.animation() {
            self.defer_until(animation, id);
            return Ok(false);
        }
        let parent = node.parent;
        let parent_layouting = match parent {
            Some(p) => self.node(p)?.layouting,
            None => false,
        };
        if parent_layouting {
            // The parent is laying us out right now; ancestors are settled.
            return Ok(true);
        }
        let mut cur = parent;
        while let Some(pid) = cur {
            let ancestor = self.node(pid)?;
            if !ancestor.element.is_visible() {
                trace!(component = id.0, ancestor = pid.0, "validation skipped: hidden ancestor");
                return Ok(false);
            }
            if let Some(animation) = ancestor.animation() {
                self.defer_until(animation, id);
                return Ok(false);
            }
            cur = ancestor.parent;
        }
        Ok(true)
    }

    fn defer_until(&mut self, animation: AnimationId, id: ComponentId) {
        trace!(component = id.0, animation = animation.0, "validation deferred until animation ends");
        self.scheduler
            .schedule_unique(Trigger::AnimationEnd(animation), LayoutTask::ValidateComponent(id));
    }

    fn take_layout(&mut self, id: ComponentId) -> Result<Box<dyn Layout>> {
        let node = self.node_mut(id)?;
        match std::mem::replace(&mut node.layout, LayoutSlot::InUse) {
            LayoutSlot::Installed(layout) => Ok(layout),
            LayoutSlot::InUse => Err(LayoutError::LayoutInProgress { component: id.0 }),
            LayoutSlot::Empty => {
                node.layout = LayoutSlot::Empty;
                Err(LayoutError::NoLayout { component: id.0 })
            }
        }
    }

    /// Put a lent layout back, unless it was replaced or the node removed
    /// in the meantime.
    fn restore_layout(&mut self, id: ComponentId, mut layout: Box<dyn Layout>) {
        let Ok(node) = self.node_mut(id) else {
            return;
        };
        node.layouting = false;
        if !matches!(node.layout, LayoutSlot::InUse) {
            return;
        }
        if let Some(source) = node.pending_invalidate.take() {
            layout.invalidate(source);
        }
        node.layout = LayoutSlot::Installed(layout);
    }

    /// Invalidate `id` alone and validate it again right away.
    pub fn revalidate_layout(&mut self, id: ComponentId) -> Result<bool> {
        self.invalidate_layout(id, None)?;
        self.validate_layout(id)
    }

    /// Validate `id` and then every pending invalid root.
    pub fn validate_layout_tree(&mut self, id: ComponentId) -> Result<()> {
        if self.node(id)?.suppress_validate {
            return Ok(());
        }
        self.validate_layout(id)?;
        self.validate()
    }

    /// Invalidate and immediately validate.
    pub fn revalidate_layout_tree(&mut self, id: ComponentId, invalidate_parents: bool) -> Result<()> {
        if self.node(id)?.suppress_validate {
            return Ok(());
        }
        self.invalidate_layout_tree(id, invalidate_parents)?;
        self.validate_layout_tree(id)
    }

    /// Schedule `revalidate_layout_tree(id, true)` at `deadline`, replacing
    /// an earlier request for the same component.
    pub fn revalidate_layout_tree_debounced(&mut self, id: ComponentId, deadline: Duration) -> Result<CancelToken> {
        self.node(id)?;
        Ok(self.scheduler.schedule_debounced(
            DebounceKey::Component(id, "revalidate"),
            deadline,
            LayoutTask::RevalidateTree(id),
        ))
    }

    // ── Sizing ──────────────────────────────────────────────────────────

    /// Preferred size of `id`, clamped to its element's min and max.
    ///
    /// Hidden components are zero-sized. Results are cached per hints until
    /// the next invalidation.
    pub fn pref_size(&mut self, id: ComponentId, options: PrefSizeOptions) -> Result<Dimension> {
        let node = self.node(id)?;
        if !node.element.is_visible() {
            return Ok(Dimension::ZERO);
        }
        match node.layout {
            LayoutSlot::Empty => return Err(LayoutError::NoLayout { component: id.0 }),
            LayoutSlot::InUse => return Err(LayoutError::LayoutInProgress { component: id.0 }),
            LayoutSlot::Installed(_) => {}
        }
        let margins = node.element.margins();
        let with_margin = |size: Dimension| {
            if options.include_margin {
                size.add_insets(margins)
            } else {
                size
            }
        };
        if let Some(cached) = node.pref_size_cache.get(&options.hints) {
            return Ok(with_margin(*cached));
        }

        let min = node.element.min_size();
        let max = node.element.max_size();
        let insets = node.element.insets();
        let mut hints = options.hints;
        if let Some(w) = hints.width_hint {
            let margin = if options.keep_margin_in_hints { 0 } else { margins.horizontal() };
            let inset = if options.keep_insets_in_hints { 0 } else { insets.horizontal() };
            hints.width_hint = Some((w - margin).max(min.width).min(max.width) - inset);
        }
        if let Some(h) = hints.height_hint {
            let margin = if options.keep_margin_in_hints { 0 } else { margins.vertical() };
            let inset = if options.keep_insets_in_hints { 0 } else { insets.vertical() };
            hints.height_hint = Some((h - margin).max(min.height).min(max.height) - inset);
        }

        let mut layout = self.take_layout(id)?;
        let result = layout.preferred_layout_size(self, id, hints);
        self.restore_layout(id, layout);
        let mut size = result?;
        size.width = size.width.max(min.width).min(max.width);
        size.height = size.height.max(min.height).min(max.height);

        self.node_mut(id)?.pref_size_cache.insert(options.hints, size);
        Ok(with_margin(size))
    }

    /// Resize `id` and validate it. A new size invalidates its layout.
    pub fn set_size(&mut self, id: ComponentId, size: Dimension) -> Result<()> {
        let node = self.node(id)?;
        if !node.is_attached_and_visible() {
            return Ok(());
        }
        if node.size_cached != Some(size) {
            self.invalidate_layout(id, None)?;
        }
        self.node_mut(id)?.element.set_size(size);
        self.validate_layout(id).map(drop)
    }

    /// Move and resize `id` and validate it. A new size invalidates its
    /// layout; a pure move does not.
    pub fn set_bounds(&mut self, id: ComponentId, bounds: Rectangle) -> Result<()> {
        let node = self.node(id)?;
        if !node.is_attached_and_visible() {
            return Ok(());
        }
        if node.size_cached != Some(bounds.dimension()) {
            self.invalidate_layout(id, None)?;
        }
        self.node_mut(id)?.element.set_bounds(bounds);
        self.validate_layout(id).map(drop)
    }

    /// Resize `id` to its preferred size.
    pub fn pack(&mut self, id: ComponentId) -> Result<()> {
        let size = self.pref_size(id, PrefSizeOptions::default())?;
        self.set_size(id, size)
    }

    // ── Animation and scheduling ────────────────────────────────────────

    /// Fresh animation id, for hosts that report animations through
    /// [`Element::animation`].
    pub fn next_animation_id(&mut self) -> AnimationId {
        let id = AnimationId(self.next_animation);
        self.next_animation += 1;
        id
    }

    /// Mark `id` as animating. Its validation, and that of its descendants,
    /// waits for [`LayoutTree::finish_animation`].
    pub fn start_animation(&mut self, id: ComponentId) -> Result<AnimationId> {
        self.node(id)?;
        let animation = self.next_animation_id();
        self.node_mut(id)?.animation = Some(animation);
        debug!(component = id.0, animation = animation.0, "animation started");
        Ok(animation)
    }

    /// Current animation of `id`, tree-tracked or element-reported.
    pub fn animation(&self, id: ComponentId) -> Result<Option<AnimationId>> {
        Ok(self.node(id)?.animation())
    }

    /// End `animation` and run every validation that waited for it.
    pub fn finish_animation(&mut self, animation: AnimationId) -> Result<()> {
        for node in self.nodes.iter_mut().flatten() {
            if node.animation == Some(animation) {
                node.animation = None;
            }
        }
        let tasks = self.scheduler.animation_ended(animation);
        debug!(animation = animation.0, tasks = tasks.len(), "animation finished");
        self.execute_all(tasks)
    }

    /// Run everything due at `now`. Returns the number of tasks run.
    ///
    /// Every due task runs even if an earlier one fails; the first error is
    /// returned.
    pub fn run_due(&mut self, now: Duration) -> Result<usize> {
        let tasks = self.scheduler.run_due(now);
        let count = tasks.len();
        self.execute_all(tasks)?;
        Ok(count)
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    /// Number of scheduled tasks, animation waits included.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    fn execute_all(&mut self, tasks: Vec<LayoutTask>) -> Result<()> {
        let mut first_error = None;
        for task in tasks {
            if let Err(err) = self.execute(task) {
                debug!(?task, %err, "layout task failed");
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn execute(&mut self, task: LayoutTask) -> Result<()> {
        trace!(?task, "run layout task");
        match task {
            LayoutTask::ValidateTree => self.validate(),
            LayoutTask::ValidateComponent(id) if self.contains(id) => self.validate_layout(id).map(drop),
            LayoutTask::RevalidateTree(id) if self.contains(id) => self.revalidate_layout_tree(id, true),
            LayoutTask::ValidateComponent(_) | LayoutTask::RevalidateTree(_) => Ok(()),
        }
    }
}
