#![forbid(unsafe_code)]

//! [`Layout`] that places visible children on a logical grid.
//!
//! Each child's [`GridData`] (or the default one) becomes a constraint; the
//! children themselves are measured through the tree. The solved size
//! tables are cached per width hint until the container is invalidated.

use gridkit_core::{Dimension, Environment, Result, SizeHints};
use gridkit_layout::{GridData, GridLayoutEngine, GridMetrics, LogicalGridLayoutInfo, SizeFlag};
use tracing::{debug_span, trace};

use crate::layout::Layout;
use crate::measure::TreeMeasure;
use crate::tree::{ComponentId, LayoutTree};

/// Units, gaps and minimum width of one logical grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalGridLayoutConfig {
    pub hgap: i32,
    pub vgap: i32,
    pub column_width: i32,
    pub row_height: i32,
    /// Lower bound for the preferred width.
    pub min_width: i32,
}

impl Default for LogicalGridLayoutConfig {
    fn default() -> Self {
        Self::from(Environment::default())
    }
}

impl From<Environment> for LogicalGridLayoutConfig {
    fn from(env: Environment) -> Self {
        Self {
            hgap: env.hgap,
            vgap: env.vgap,
            column_width: env.column_width,
            row_height: env.row_height,
            min_width: 0,
        }
    }
}

impl LogicalGridLayoutConfig {
    #[must_use]
    pub const fn with_gaps(mut self, hgap: i32, vgap: i32) -> Self {
        self.hgap = hgap;
        self.vgap = vgap;
        self
    }

    #[must_use]
    pub const fn with_units(mut self, column_width: i32, row_height: i32) -> Self {
        self.column_width = column_width;
        self.row_height = row_height;
        self
    }

    #[must_use]
    pub const fn with_min_width(mut self, min_width: i32) -> Self {
        self.min_width = min_width;
        self
    }

    #[must_use]
    pub const fn metrics(&self) -> GridMetrics {
        GridMetrics::new(self.column_width, self.row_height, self.hgap, self.vgap)
    }
}

#[derive(Debug, Clone)]
struct CachedInfo {
    width_hint: Option<i32>,
    children: Vec<ComponentId>,
    info: LogicalGridLayoutInfo,
}

/// Logical grid layout for one container.
#[derive(Debug, Clone)]
pub struct LogicalGridLayout {
    config: LogicalGridLayoutConfig,
    engine: GridLayoutEngine,
    cache: Option<CachedInfo>,
}

impl Default for LogicalGridLayout {
    fn default() -> Self {
        Self::new(LogicalGridLayoutConfig::default())
    }
}

impl LogicalGridLayout {
    #[must_use]
    pub fn new(config: LogicalGridLayoutConfig) -> Self {
        Self {
            config,
            engine: GridLayoutEngine::new(config.metrics()),
            cache: None,
        }
    }

    #[must_use]
    pub const fn config(&self) -> LogicalGridLayoutConfig {
        self.config
    }

    /// Size tables of the last pass, until the next invalidation.
    #[must_use]
    pub fn last_info(&self) -> Option<&LogicalGridLayoutInfo> {
        self.cache.as_ref().map(|c| &c.info)
    }

    /// Visible children with their layout data.
    fn constraints(tree: &LayoutTree, container: ComponentId) -> Result<(Vec<ComponentId>, Vec<GridData>)> {
        let mut children = Vec::new();
        let mut constraints = Vec::new();
        for &child in tree.children(container)? {
            if !tree.element(child)?.is_visible() {
                continue;
            }
            children.push(child);
            constraints.push(tree.layout_data(child)?.unwrap_or_default());
        }
        Ok((children, constraints))
    }

    fn resolve(
        &mut self,
        tree: &mut LayoutTree,
        container: ComponentId,
        width_hint: Option<i32>,
    ) -> Result<CachedInfo> {
        let (children, constraints) = Self::constraints(tree, container)?;
        let hit = self
            .cache
            .as_ref()
            .filter(|c| c.width_hint == width_hint && c.children == children);
        if let Some(cached) = hit {
            return Ok(cached.clone());
        }

        let mut measure = TreeMeasure::new(tree, &children);
        let info = self.engine.info(&constraints, &mut measure, width_hint);
        measure.finish()?;
        trace!(
            container = container.index(),
            cols = info.cols(),
            rows = info.rows(),
            "grid info computed"
        );
        let cached = CachedInfo {
            width_hint,
            children,
            info,
        };
        self.cache = Some(cached.clone());
        Ok(cached)
    }
}

impl Layout for LogicalGridLayout {
    fn layout(&mut self, tree: &mut LayoutTree, container: ComponentId) -> Result<()> {
        let _span = debug_span!("logical_grid_layout", container = container.index()).entered();
        let element = tree.element(container)?;
        let size = element.size();
        let insets = element.insets();

        let CachedInfo { children, mut info, .. } =
            self.resolve(tree, container, Some(size.width - insets.horizontal()))?;
        let bounds = GridLayoutEngine::apply(&mut info, size, insets);
        for (&child, cell) in children.iter().zip(bounds) {
            let margins = tree.element(child)?.margins();
            tree.set_bounds(child, cell.subtract_insets(margins))?;
        }
        Ok(())
    }

    fn preferred_layout_size(
        &mut self,
        tree: &mut LayoutTree,
        container: ComponentId,
        hints: SizeHints,
    ) -> Result<Dimension> {
        let insets = tree.element(container)?.insets();
        let cached = self.resolve(tree, container, hints.width_hint)?;
        let mut pref = cached.info.extent(SizeFlag::Pref, insets);
        pref.width = pref.width.max(self.config.min_width);
        Ok(pref)
    }

    fn invalidate(&mut self, _source: Option<ComponentId>) {
        self.cache = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::BoxElement;
    use crate::layout::NullLayout;
    use crate::tree::PrefSizeOptions;
    use gridkit_core::{Insets, Rectangle};
    use std::time::Duration;

    fn config() -> LogicalGridLayoutConfig {
        LogicalGridLayoutConfig::default()
            .with_units(50, 30)
            .with_gaps(5, 5)
    }

    fn leaf(tree: &mut LayoutTree, parent: ComponentId, gd: GridData, content: Dimension) -> ComponentId {
        let id = tree
            .insert_with_layout(Some(parent), BoxElement::new().with_content(content), NullLayout)
            .unwrap();
        tree.set_layout_data(id, Some(gd)).unwrap();
        id
    }

    #[test]
    fn config_follows_environment() {
        let env = Environment::default().column_width(100).gaps(3, 4);
        let cfg = LogicalGridLayoutConfig::from(env).with_min_width(200);
        assert_eq!(cfg.column_width, 100);
        assert_eq!((cfg.hgap, cfg.vgap), (3, 4));
        assert_eq!(cfg.min_width, 200);
        assert_eq!(cfg.metrics().row_height, env.row_height);
    }

    #[test]
    fn children_get_their_cells() {
        let mut tree = LayoutTree::new();
        let root = tree
            .insert_with_layout(None, BoxElement::new(), LogicalGridLayout::new(config()))
            .unwrap();
        let a = leaf(&mut tree, root, GridData::new(0, 0).weight(1.0, 0.0), Dimension::ZERO);
        let b = leaf(&mut tree, root, GridData::new(1, 0).weight(1.0, 0.0), Dimension::ZERO);
        let c = leaf(
            &mut tree,
            root,
            GridData::new(0, 1).span(2, 1).weight(1.0, 0.0),
            Dimension::ZERO,
        );

        tree.set_bounds(root, Rectangle::new(0, 0, 205, 100)).unwrap();
        assert_eq!(tree.bounds(a).unwrap(), Rectangle::new(0, 0, 100, 30));
        assert_eq!(tree.bounds(b).unwrap(), Rectangle::new(105, 0, 100, 30));
        assert_eq!(tree.bounds(c).unwrap(), Rectangle::new(0, 35, 205, 30));
        assert!(tree.is_valid(c).unwrap());
    }

    #[test]
    fn margins_are_taken_from_the_cell() {
        let mut tree = LayoutTree::new();
        let root = tree
            .insert_with_layout(None, BoxElement::new(), LogicalGridLayout::new(config()))
            .unwrap();
        let child = tree
            .insert_with_layout(
                Some(root),
                BoxElement::new().with_margins(Insets::uniform(2)),
                NullLayout,
            )
            .unwrap();
        tree.set_layout_data(child, Some(GridData::new(0, 0).weight(1.0, 1.0)))
            .unwrap();
        tree.set_bounds(root, Rectangle::new(0, 0, 100, 60)).unwrap();
        assert_eq!(tree.bounds(child).unwrap(), Rectangle::new(2, 2, 96, 56));
    }

    #[test]
    fn hidden_children_take_no_space() {
        let mut tree = LayoutTree::new();
        let root = tree
            .insert_with_layout(None, BoxElement::new(), LogicalGridLayout::new(config()))
            .unwrap();
        let hidden = leaf(&mut tree, root, GridData::new(0, 0), Dimension::ZERO);
        let shown = leaf(&mut tree, root, GridData::new(1, 0).weight(1.0, 0.0), Dimension::ZERO);
        tree.set_visible(hidden, false).unwrap();
        tree.set_bounds(root, Rectangle::new(0, 0, 300, 40)).unwrap();
        assert_eq!(tree.bounds(shown).unwrap(), Rectangle::new(0, 0, 300, 30));
    }

    #[test]
    fn ui_width_children_are_measured() {
        let mut tree = LayoutTree::new();
        let root = tree
            .insert_with_layout(
                None,
                BoxElement::new().with_insets(Insets::uniform(1)),
                LogicalGridLayout::new(config().with_min_width(10)),
            )
            .unwrap();
        leaf(
            &mut tree,
            root,
            GridData::new(0, 0).use_ui(true, true),
            Dimension::new(80, 20),
        );
        leaf(&mut tree, root, GridData::new(1, 0), Dimension::ZERO);
        let pref = tree.pref_size(root, PrefSizeOptions::default()).unwrap();
        assert_eq!(pref, Dimension::new(80 + 5 + 50 + 2, 30 + 2));
    }

    #[test]
    fn min_width_bounds_the_preferred_width() {
        let mut tree = LayoutTree::new();
        let root = tree
            .insert_with_layout(
                None,
                BoxElement::new(),
                LogicalGridLayout::new(config().with_min_width(400)),
            )
            .unwrap();
        leaf(&mut tree, root, GridData::new(0, 0), Dimension::ZERO);
        let pref = tree.pref_size(root, PrefSizeOptions::default()).unwrap();
        assert_eq!(pref, Dimension::new(400, 30));
    }

    #[test]
    fn undersized_container_falls_back_to_minimums() {
        let mut tree = LayoutTree::new();
        let root = tree
            .insert_with_layout(None, BoxElement::new(), LogicalGridLayout::new(config()))
            .unwrap();
        let a = leaf(&mut tree, root, GridData::new(0, 0).hints(80, 0), Dimension::ZERO);
        let b = leaf(&mut tree, root, GridData::new(1, 0).hints(80, 0), Dimension::ZERO);
        tree.set_bounds(root, Rectangle::new(0, 0, 20, 10)).unwrap();
        assert_eq!(tree.bounds(a).unwrap().width, 80);
        assert_eq!(tree.bounds(b).unwrap().x, 85);
    }

    #[test]
    fn no_children_is_an_empty_grid() {
        let mut tree = LayoutTree::new();
        let root = tree
            .insert_with_layout(None, BoxElement::new(), LogicalGridLayout::new(config()))
            .unwrap();
        tree.set_bounds(root, Rectangle::new(0, 0, 100, 100)).unwrap();
        assert_eq!(
            tree.pref_size(root, PrefSizeOptions::default()).unwrap(),
            Dimension::ZERO
        );
    }

    #[test]
    fn changed_layout_data_relayouts_after_invalidation() {
        let mut tree = LayoutTree::new();
        let root = tree
            .insert_with_layout(None, BoxElement::new(), LogicalGridLayout::new(config()))
            .unwrap();
        let a = leaf(&mut tree, root, GridData::new(0, 0).weight(1.0, 0.0), Dimension::ZERO);
        let b = leaf(&mut tree, root, GridData::new(1, 0).weight(1.0, 0.0), Dimension::ZERO);
        tree.set_bounds(root, Rectangle::new(0, 0, 205, 100)).unwrap();
        assert_eq!(tree.bounds(b).unwrap().x, 105);

        tree.set_layout_data(b, Some(GridData::new(0, 1).weight(1.0, 0.0)))
            .unwrap();
        // Filling children are validate roots; placement changes go to the parent.
        tree.invalidate_layout_tree(root, true).unwrap();
        tree.run_due(Duration::ZERO).unwrap();
        assert_eq!(tree.bounds(a).unwrap(), Rectangle::new(0, 0, 205, 30));
        assert_eq!(tree.bounds(b).unwrap(), Rectangle::new(0, 35, 205, 30));
    }

    #[test]
    fn child_without_layout_is_reported() {
        let mut tree = LayoutTree::new();
        let root = tree
            .insert_with_layout(None, BoxElement::new(), LogicalGridLayout::new(config()))
            .unwrap();
        let bare = tree.insert(Some(root), BoxElement::new()).unwrap();
        tree.set_layout_data(bare, Some(GridData::new(0, 0).use_ui(true, false)))
            .unwrap();
        let err = tree.pref_size(root, PrefSizeOptions::default()).unwrap_err();
        assert_eq!(
            err,
            gridkit_core::LayoutError::NoLayout {
                component: bare.index()
            }
        );
    }
}
