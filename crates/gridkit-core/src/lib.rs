#![forbid(unsafe_code)]

//! Core: geometry, layout environment, errors, and logging.
//!
//! # Role in gridkit
//! `gridkit-core` is the shared vocabulary of the workspace. It owns the
//! pixel geometry value types, the [`Environment`] that replaces global
//! form-unit constants, the [`LayoutError`] type, and the logging setup.
//!
//! # Primary responsibilities
//! - **Geometry**: `Dimension`, `Insets`, `Point`, `Rectangle`, `SizeHints`.
//! - **Environment**: logical column/row units and gaps, resolvable from
//!   defaults, JSON or environment variables.
//! - **Errors**: the fatal programming errors the layout driver reports.
//! - **Logging**: `tracing` re-exports and an optional JSON subscriber.
//!
//! # How it fits in the system
//! The pure solver (`gridkit-layout`) consumes geometry and the environment;
//! the driver (`gridkit-runtime`) additionally reports `LayoutError`s.

pub mod environment;
pub mod error;
pub mod geometry;
pub mod logging;

pub use environment::Environment;
pub use error::{LayoutError, Result};
pub use geometry::{Dimension, Insets, Point, Rectangle, SizeHints};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
