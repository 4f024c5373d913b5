#![forbid(unsafe_code)]

//! Tile grid for gridkit.
//!
//! # Role in gridkit
//! `gridkit-widgets` builds the tile grid on top of the driver in
//! `gridkit-runtime`. The grid layout itself stays the pure engine from
//! `gridkit-layout`; placement, virtualization and animation are separate
//! strategies composed by [`TileGridLayout`].
//!
//! # Primary responsibilities
//! - **TileGrid**: ordered tiles, automatic placement and placeholders.
//! - **VirtualScrolling**: which rows to render for a scroll position.
//! - **TileAnimator**: move animations between passes.
//! - **TileGridLayout**: the `Layout` tying them together.
//!
//! # Example
//!
//! ```
//! use gridkit_core::Rectangle;
//! use gridkit_runtime::{BoxElement, LayoutTree, NullLayout};
//! use gridkit_widgets::{TileGrid, TileGridLayout, TileGridLayoutConfig};
//!
//! let mut tree = LayoutTree::new();
//! let container = tree.insert_with_layout(None, BoxElement::new(), NullLayout)?;
//! let grid = TileGrid::new(container).with_column_count(2);
//! let config = TileGridLayoutConfig::default().with_units(100, 80).with_gaps(10, 10);
//! tree.set_layout(container, TileGridLayout::new(grid.clone(), config))?;
//!
//! let tiles: Vec<_> = (0..3)
//!     .map(|_| grid.add_tile(&mut tree, BoxElement::new(), None))
//!     .collect::<Result<_, _>>()?;
//! tree.set_bounds(container, Rectangle::new(0, 0, 400, 300))?;
//! assert_eq!(tree.bounds(tiles[2])?, Rectangle::new(0, 90, 100, 80));
//! # Ok::<(), gridkit_core::LayoutError>(())
//! ```

pub mod animation;
pub mod tile_grid;
pub mod tile_grid_layout;
pub mod virtual_scrolling;

pub use animation::{Placement, TileAnimator, TileMove};
pub use tile_grid::{
    AUTO_POSITION, Arrangement, TileGrid, arrange, auto_hints, effective_column_count, placeholder_count,
};
pub use tile_grid_layout::{TileGridLayout, TileGridLayoutConfig};
pub use virtual_scrolling::{RowMetrics, VirtualScrolling};
