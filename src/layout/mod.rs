//! Layout engine: tier classification and grid geometry
//!
//! This module decides which tier each sponsorship belongs to and where each
//! sponsor's cell sits. It produces no markup.

pub mod classify;
pub mod geometry;
pub mod lint;
pub mod types;

pub use classify::{classify, Partition};
pub use geometry::GridGeometry;
pub use lint::{LintCategory, LintWarning};
pub use types::{BoundingBox, Point};
