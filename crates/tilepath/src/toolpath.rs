//! The toolpath-ordering problem as a state/action/cost model.
//!
//! An external generic search procedure drives this through the [`Problem`]
//! trait: enumerate actions, expand states, test the goal, account costs.
//! The grid geometry is immutable during search and lives once behind an
//! `Arc` inside the problem; a [`SearchState`] carries only the mutable
//! parts (traversal flags, position, accumulated deadhead travel), so
//! expanding a state never disturbs its siblings and cloning is cheap.
//!
//! Cost semantics: deposition along a line is free, only the deadhead moves
//! between the end of one line and the entry of the next are charged.

use std::fmt;
use std::sync::Arc;

use crate::geometry::Point;
use crate::grid::{Grid, Traversal};

/// The search-problem interface consumed by an external solver.
///
/// `result` must produce an independent successor: implementations never
/// mutate the input state. `value` is optional and only used by
/// maximization-oriented local search.
pub trait Problem {
    type State;
    type Action;

    /// Actions applicable in `state`.
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Successor state from applying `action`; does not mutate `state`.
    fn result(&self, state: &Self::State, action: &Self::Action) -> Self::State;

    /// True when `state` satisfies the goal.
    fn goal_test(&self, state: &Self::State) -> bool;

    /// Accumulated cost of reaching `next` from `state` via `action`,
    /// given cost `cost` so far. Increments are non-negative.
    fn path_cost(
        &self,
        cost: f64,
        state: &Self::State,
        action: &Self::Action,
        next: &Self::State,
    ) -> f64;

    /// State desirability for local-search maximizers.
    fn value(&self, state: &Self::State) -> f64 {
        let _ = state;
        0.0
    }
}

/// Errors from toolpath problem construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolpathError {
    /// The grid has no generated fill lines to traverse.
    NoLines,
}

impl fmt::Display for ToolpathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolpathError::NoLines => write!(f, "grid has no generated lines"),
        }
    }
}

impl std::error::Error for ToolpathError {}

/// Which endpoint of a line an action enters at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnd {
    P0,
    P1,
}

/// Traverse one printable line, entering at the named endpoint.
///
/// Deposition runs from the entry endpoint through the segment to the far
/// end, which becomes the new position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    /// Global line index into the grid.
    pub line: usize,
    /// Endpoint the head approaches and enters at.
    pub entry: LineEnd,
}

impl Action {
    /// Coordinates of the entry endpoint.
    pub fn entry_point(&self, grid: &Grid) -> Point {
        let line = grid.line(self.line);
        match self.entry {
            LineEnd::P0 => line.p0(),
            LineEnd::P1 => line.p1(),
        }
    }

    /// Coordinates of the far endpoint, where the head ends up.
    pub fn exit_point(&self, grid: &Grid) -> Point {
        let line = grid.line(self.line);
        match self.entry {
            LineEnd::P0 => line.p1(),
            LineEnd::P1 => line.p0(),
        }
    }
}

/// Mutable search state: traversal flags plus head position and travel.
///
/// The grid itself is not part of the state; it is shared immutably by the
/// owning [`ToolpathProblem`].
#[derive(Debug, Clone)]
pub struct SearchState {
    /// Per-line traversal flags.
    pub traversal: Traversal,
    /// Global index of the most recently traversed line.
    pub last_line: usize,
    /// Current head position (exit endpoint of the last line).
    pub position: Point,
    /// Accumulated non-depositing travel distance.
    pub travel: f64,
}

/// The deposition-ordering problem over a fixed grid of fill lines.
pub struct ToolpathProblem {
    grid: Arc<Grid>,
}

impl ToolpathProblem {
    /// Build the problem and its initial state from a grid with generated
    /// lines.
    ///
    /// The bottom-most line of tile (0,0) is the seed: it starts traversed,
    /// the head sits at its higher-y endpoint, and travel starts at zero.
    pub fn new(grid: Grid) -> Result<(Self, SearchState), ToolpathError> {
        if grid.line_count() == 0 || grid.tile(0, 0).lines().is_empty() {
            return Err(ToolpathError::NoLines);
        }
        // Tile (0,0) leads the row-major order, so its first line is global
        // index 0.
        let seed = 0;
        let seed_line = grid.line(seed);
        let position = if seed_line.p0().y > seed_line.p1().y {
            seed_line.p0()
        } else {
            seed_line.p1()
        };
        let mut traversal = Traversal::new(grid.line_count());
        traversal.mark(seed);
        let state = SearchState {
            traversal,
            last_line: seed,
            position,
            travel: 0.0,
        };
        Ok((
            Self {
                grid: Arc::new(grid),
            },
            state,
        ))
    }

    /// The shared, immutable grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Post-hoc deadhead cost of a full action sequence: the distance from
    /// each action's exit to the next action's entry, on top of `add_cost`.
    ///
    /// An empty or single-action sequence costs exactly `add_cost`.
    pub fn total_cost(&self, actions: &[Action], add_cost: f64) -> f64 {
        let mut cost = add_cost;
        for pair in actions.windows(2) {
            let exit = pair[0].exit_point(&self.grid);
            let entry = pair[1].entry_point(&self.grid);
            cost += exit.distance(entry);
        }
        cost
    }
}

impl Problem for ToolpathProblem {
    type State = SearchState;
    type Action = Action;

    /// Two actions per printable line: approach from either endpoint.
    fn actions(&self, state: &SearchState) -> Vec<Action> {
        let mut actions = Vec::new();
        for line in self.grid.printable_lines(&state.traversal) {
            actions.push(Action {
                line,
                entry: LineEnd::P0,
            });
            actions.push(Action {
                line,
                entry: LineEnd::P1,
            });
        }
        actions
    }

    fn result(&self, state: &SearchState, action: &Action) -> SearchState {
        let mut traversal = state.traversal.clone();
        traversal.mark(action.line);
        SearchState {
            traversal,
            last_line: action.line,
            position: action.exit_point(&self.grid),
            travel: state.travel + state.position.distance(action.entry_point(&self.grid)),
        }
    }

    fn goal_test(&self, state: &SearchState) -> bool {
        state.traversal.is_complete()
    }

    fn path_cost(
        &self,
        cost: f64,
        state: &SearchState,
        action: &Action,
        _next: &SearchState,
    ) -> f64 {
        cost + state.position.distance(action.entry_point(&self.grid))
    }

    /// Progress dominates: each traversed line is worth more than any single
    /// deadhead move can cost (grid width times sqrt 2), so maximizing value
    /// prefers more lines first and, at equal progress, less travel.
    fn value(&self, state: &SearchState) -> f64 {
        let reward = state.traversal.count() as f64
            * self.grid.num_columns() as f64
            * self.grid.side()
            * std::f64::consts::SQRT_2;
        reward - state.travel
    }
}
