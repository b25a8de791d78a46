//! Snapshot types for external visualization consumers.
//!
//! Rendering itself is out of scope for this crate; what lives here is the
//! data shape a plotter or viewer needs: per-tile border polygons, ordered
//! fill lines with their traversed flags, and the deposition/deadhead
//! decomposition of a solved action sequence. Everything is serde-
//! serializable so consumers can take it as JSON.

use serde::Serialize;

use crate::geometry::Line;
use crate::grid::{Grid, Traversal};
use crate::toolpath::Action;

/// One fill line with its traversal flag.
#[derive(Debug, Clone, Serialize)]
pub struct LineSnapshot {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub traversed: bool,
}

impl LineSnapshot {
    fn new(line: &Line, traversed: bool) -> Self {
        Self {
            x1: line.p0().x,
            y1: line.p0().y,
            x2: line.p1().x,
            y2: line.p1().y,
            traversed,
        }
    }
}

/// One tile: closed border polygon, orientation, ordered fill lines.
#[derive(Debug, Clone, Serialize)]
pub struct TileSnapshot {
    /// Five points, first repeated last.
    pub outline: Vec<(f64, f64)>,
    pub angle: Option<f64>,
    /// Bottom-to-top, matching the tile's internal order.
    pub lines: Vec<LineSnapshot>,
}

/// The whole grid at one traversal state.
#[derive(Debug, Clone, Serialize)]
pub struct GridSnapshot {
    pub num_rows: usize,
    pub num_columns: usize,
    pub tile_side: f64,
    /// Row-major, bottom row first.
    pub tiles: Vec<TileSnapshot>,
}

/// Capture the grid's geometry and per-line flags for rendering.
pub fn snapshot_grid(grid: &Grid, traversal: &Traversal) -> GridSnapshot {
    let mut tiles = Vec::with_capacity(grid.tiles().len());
    let mut id = 0;
    for tile in grid.tiles() {
        let lines = tile
            .lines()
            .iter()
            .map(|line| {
                let snap = LineSnapshot::new(line, traversal.is_traversed(id));
                id += 1;
                snap
            })
            .collect();
        tiles.push(TileSnapshot {
            outline: tile.outline().iter().map(|p| (p.x, p.y)).collect(),
            angle: tile.angle(),
            lines,
        });
    }
    GridSnapshot {
        num_rows: grid.num_rows(),
        num_columns: grid.num_columns(),
        tile_side: grid.side(),
        tiles,
    }
}

/// One deposition step of a solution: the line, entered at `entry`, exited
/// at `exit`.
#[derive(Debug, Clone, Serialize)]
pub struct TraceStep {
    pub line: LineSnapshot,
    pub entry: (f64, f64),
    pub exit: (f64, f64),
}

/// A solved toolpath: deposition steps in order plus the implied deadhead
/// segments between consecutive exit/entry points.
#[derive(Debug, Clone, Serialize)]
pub struct SolutionTrace {
    /// Seed line first, then one step per action.
    pub steps: Vec<TraceStep>,
    /// `(from, to)` hops; `steps.len() - 1` of them.
    pub deadheads: Vec<((f64, f64), (f64, f64))>,
    /// Summed deadhead length.
    pub travel: f64,
}

/// Lay out a solution sequence for rendering.
///
/// `seed_line` is the globally-indexed line the search started from; its
/// exit is taken as the higher-y endpoint, matching the problem's initial
/// state.
pub fn trace_solution(grid: &Grid, seed_line: usize, actions: &[Action]) -> SolutionTrace {
    let seed = grid.line(seed_line);
    let (seed_entry, seed_exit) = if seed.p0().y > seed.p1().y {
        (seed.p1(), seed.p0())
    } else {
        (seed.p0(), seed.p1())
    };

    let mut steps = vec![TraceStep {
        line: LineSnapshot::new(seed, true),
        entry: (seed_entry.x, seed_entry.y),
        exit: (seed_exit.x, seed_exit.y),
    }];
    let mut deadheads = Vec::with_capacity(actions.len());
    let mut travel = 0.0;
    let mut position = seed_exit;

    for action in actions {
        let entry = action.entry_point(grid);
        let exit = action.exit_point(grid);
        deadheads.push(((position.x, position.y), (entry.x, entry.y)));
        travel += position.distance(entry);
        steps.push(TraceStep {
            line: LineSnapshot::new(grid.line(action.line), true),
            entry: (entry.x, entry.y),
            exit: (exit.x, exit.y),
        });
        position = exit;
    }

    SolutionTrace {
        steps,
        deadheads,
        travel,
    }
}
