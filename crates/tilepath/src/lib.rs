//! # tilepath
//!
//! Oriented line-fill generation over a grid of square tiles, plus the
//! deposition-ordering problem those fills induce.
//!
//! Each tile carries one fill orientation and an evenly-spaced family of
//! parallel lines clipped to its border. Orientations propagate across the
//! grid by a bounded random walk seeded at the bottom-left tile. Visiting
//! every generated line while minimizing non-depositing travel, subject to
//! a bottom-up feasibility rule, is exposed as a [`toolpath::Problem`] for
//! an external search procedure to solve.

pub mod geometry;
pub mod grid;
pub mod render;
pub mod rng;
pub mod tile;
pub mod toolpath;

// Re-export common types at crate root for convenience.
pub use geometry::{EPS, GeometryError, Line, Point};
pub use grid::{Grid, GridError, Traversal};
pub use render::{GridSnapshot, SolutionTrace, snapshot_grid, trace_solution};
pub use rng::Rng;
pub use tile::{Border, Tile, TileError, normalize_angle};
pub use toolpath::{Action, LineEnd, Problem, SearchState, ToolpathError, ToolpathProblem};
