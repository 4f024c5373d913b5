#![forbid(unsafe_code)]

//! Layout driver for gridkit.
//!
//! # Role in gridkit
//! `gridkit-runtime` owns the component tree and decides *when* layouts run.
//! The solver in `gridkit-layout` decides *where* things go; this crate feeds
//! it measurements from the tree and applies the rectangles it returns.
//!
//! # Primary responsibilities
//! - **LayoutTree**: arena of components with parent/child links, elements,
//!   layouts and lifecycle flags.
//! - **Invalidate/validate lifecycle**: invalidation walks up to the nearest
//!   validate root; a single coalesced microtask validates all recorded
//!   roots top-down.
//! - **Deferral**: detached, hidden and animating components are not laid
//!   out; validations waiting on an animation run when it finishes.
//! - **Scheduler**: deterministic task queue with microtasks, deadlines,
//!   debouncing and cancellation.
//! - **LogicalGridLayout**: the grid driver for form-like containers.
//! - **Model events**: JSON property changes from the remote model.
//!
//! # Example
//!
//! ```
//! use gridkit_core::Rectangle;
//! use gridkit_layout::GridData;
//! use gridkit_runtime::{BoxElement, LayoutTree, LogicalGridLayout, LogicalGridLayoutConfig, NullLayout};
//!
//! let mut tree = LayoutTree::new();
//! let config = LogicalGridLayoutConfig::default().with_units(50, 30).with_gaps(5, 5);
//! let form = tree.insert_with_layout(None, BoxElement::new(), LogicalGridLayout::new(config))?;
//! let field = tree.insert_with_layout(Some(form), BoxElement::new(), NullLayout)?;
//! tree.set_layout_data(field, Some(GridData::new(0, 0).weight(1.0, 0.0)))?;
//!
//! tree.set_bounds(form, Rectangle::new(0, 0, 300, 100))?;
//! assert_eq!(tree.bounds(field)?, Rectangle::new(0, 0, 300, 30));
//! # Ok::<(), gridkit_core::LayoutError>(())
//! ```

pub mod element;
pub mod layout;
pub mod logical_grid_layout;
pub mod measure;
pub mod model_event;
pub mod scheduler;
pub mod tree;
pub mod validator;

pub use element::{BoxElement, Element};
pub use layout::{Layout, NullLayout};
pub use logical_grid_layout::{LogicalGridLayout, LogicalGridLayoutConfig};
pub use measure::TreeMeasure;
pub use model_event::{AdapterRegistry, EventOutcome, ModelEvent};
pub use scheduler::{AnimationId, CancelToken, DebounceKey, Scheduler, Trigger};
pub use tree::{ComponentId, LayoutTask, LayoutTree, PrefSizeOptions};
pub use validator::LayoutValidator;
