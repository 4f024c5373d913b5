#![forbid(unsafe_code)]

//! Logical grid layout solver.
//!
//! # Role in gridkit
//! `gridkit-layout` is the pure core: it never touches a component tree and
//! never fails. Drivers (`gridkit-runtime`, `gridkit-widgets`) feed it
//! constraints plus a [`Measure`] implementation and apply the rectangles it
//! returns.
//!
//! # Pipeline
//!
//! ```text
//! GridData[] ──► LogicalGridLayoutInfo ──► layout_sizes ──► layout_cell_bounds ──► Rectangle[]
//!               (size tables, weights)   (per axis)       (cells)
//! ```
//!
//! # Example
//!
//! ```
//! use gridkit_core::{Dimension, Insets};
//! use gridkit_layout::{GridData, GridMetrics, LogicalGridLayoutInfo, NoMeasure};
//!
//! let cons = [GridData::new(0, 0), GridData::new(1, 0).weight(1.0, 0.0)];
//! let mut info = LogicalGridLayoutInfo::new(&cons, GridMetrics::new(50, 30, 5, 5), None, &mut NoMeasure);
//! let cells = info.layout_cell_bounds(Dimension::new(500, 400), Insets::ZERO);
//! assert_eq!(cells[0][1].width, 445);
//! ```

pub mod cell_bounds;
pub mod constraint;
pub mod distribute;
pub mod engine;
pub mod info;
pub mod measure;
pub mod size_table;

pub use cell_bounds::{CellGrid, layout_cell_bounds, span_bounds};
pub use constraint::{CellAlignment, GridData, MAX_GRID_LINES};
pub use distribute::layout_sizes;
pub use engine::{GridLayoutEngine, GridSolution, place};
pub use info::LogicalGridLayoutInfo;
pub use measure::{GridMetrics, Measure, NoMeasure};
pub use size_table::{AxisTable, EPS, INFINITE, SizeFlag, SizeTriple};
