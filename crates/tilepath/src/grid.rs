//! The tile grid: layout, angle propagation, and printable-line selection.
//!
//! Coordinate convention: row 0 sits at the *bottom* of the grid, vertically
//! flipped from usual matrix indexing. Tile (row, col) has its bottom-left
//! corner at `(col * w, row * w)`.
//!
//! Once every tile's lines are generated, each fill line gets a stable
//! global index: tiles in row-major order, lines bottom-to-top within a
//! tile. Traversal bookkeeping lives in [`Traversal`], a flag vector over
//! that index space, so search code can branch states without ever copying
//! the geometry.

use std::fmt;

use crate::geometry::{Line, Point};
use crate::rng::Rng;
use crate::tile::{Tile, TileError};

/// Errors from grid-level operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// An angle seeding array did not match the grid's dimensions.
    ShapeMismatch {
        expected_rows: usize,
        expected_columns: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::ShapeMismatch {
                expected_rows,
                expected_columns,
            } => write!(
                f,
                "angle array shape must be {expected_rows}x{expected_columns}"
            ),
        }
    }
}

impl std::error::Error for GridError {}

/// A 2D arrangement of tiles addressed by (row, column), row 0 at the bottom.
#[derive(Debug, Clone)]
pub struct Grid {
    num_rows: usize,
    num_columns: usize,
    side: f64,
    spacing: f64,
    min_angle: f64,
    max_angle: f64,
    /// Row-major, row 0 first.
    tiles: Vec<Tile>,
}

impl Grid {
    /// Build a grid of unset-angle tiles on a uniform lattice.
    ///
    /// `min_angle`/`max_angle` bound the random angle walk; `side` is the
    /// shared tile edge length and `spacing` the shared maximum fill-line
    /// spacing.
    pub fn new(
        num_rows: usize,
        num_columns: usize,
        min_angle: f64,
        max_angle: f64,
        side: f64,
        spacing: f64,
    ) -> Self {
        let mut tiles = Vec::with_capacity(num_rows * num_columns);
        for row in 0..num_rows {
            for col in 0..num_columns {
                let origin = Point::new(col as f64 * side, row as f64 * side);
                tiles.push(Tile::new(side, None, origin, spacing));
            }
        }
        Self {
            num_rows,
            num_columns,
            side,
            spacing,
            min_angle,
            max_angle,
            tiles,
        }
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    #[inline]
    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    #[inline]
    pub fn side(&self) -> f64 {
        self.side
    }

    #[inline]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.num_rows && col < self.num_columns);
        row * self.num_columns + col
    }

    #[inline]
    pub fn tile(&self, row: usize, col: usize) -> &Tile {
        &self.tiles[self.index(row, col)]
    }

    #[inline]
    pub fn tile_mut(&mut self, row: usize, col: usize) -> &mut Tile {
        let i = self.index(row, col);
        &mut self.tiles[i]
    }

    /// Tiles in row-major order, bottom row first.
    #[inline]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Bulk-assign angles from a same-shaped array, row 0 at the bottom.
    ///
    /// Out-of-range values are normalized into (-90, 90], not rejected.
    pub fn seed_angles(&mut self, angles: &[Vec<f64>]) -> Result<(), GridError> {
        let shape_ok = angles.len() == self.num_rows
            && angles.iter().all(|row| row.len() == self.num_columns);
        if !shape_ok {
            return Err(GridError::ShapeMismatch {
                expected_rows: self.num_rows,
                expected_columns: self.num_columns,
            });
        }
        for (row, row_angles) in angles.iter().enumerate() {
            for (col, &angle) in row_angles.iter().enumerate() {
                self.tile_mut(row, col).set_angle(angle);
            }
        }
        Ok(())
    }

    /// Assign tile angles by a bounded two-dimensional random walk.
    ///
    /// Tile (0,0) gets `start_angle`. Every other tile, scanned rows then
    /// columns, starts from the mean of its below and left neighbours (or
    /// the single one that exists) and adds a uniform perturbation in
    /// [-deviation_range/2, +deviation_range/2]. A result outside
    /// (min_angle, max_angle) is reflected back off the exceeded bound, so
    /// the walk stays inside the range instead of saturating at it.
    ///
    /// The walk reads only the injected `rng`; the same seed replays the
    /// same field of angles.
    pub fn random_walk_angles(&mut self, start_angle: f64, deviation_range: f64, rng: &mut Rng) {
        self.tile_mut(0, 0).set_angle(start_angle);
        for row in 0..self.num_rows {
            for col in 0..self.num_columns {
                if (row, col) == (0, 0) {
                    continue;
                }
                let below = (row >= 1).then(|| self.tile(row - 1, col).angle());
                let left = (col >= 1).then(|| self.tile(row, col - 1).angle());
                let base = match (below.flatten(), left.flatten()) {
                    (Some(b), Some(l)) => (b + l) / 2.0,
                    (Some(b), None) => b,
                    (None, Some(l)) => l,
                    // Unreachable: (0,0) is seeded before the scan reaches
                    // any tile lacking both neighbours.
                    (None, None) => unreachable!("bottom-left tile seeds the walk"),
                };

                let mut angle = base + rng.next_centered(deviation_range);
                if angle >= self.max_angle {
                    angle = 2.0 * self.max_angle - angle;
                } else if angle <= self.min_angle {
                    angle = 2.0 * self.min_angle - angle;
                }
                self.tile_mut(row, col).set_angle(angle);
            }
        }
    }

    /// Generate every tile's fill lines, seeding each from its own center.
    ///
    /// This is the non-continuous scheme: tiles are filled independently,
    /// with no attempt to join lines across borders. A center seed missing
    /// its own tile indicates a malformed tile, so failures propagate.
    pub fn generate_lines(&mut self) -> Result<(), TileError> {
        for tile in &mut self.tiles {
            let center = tile.center();
            tile.generate_from_seed(center, None)?;
        }
        Ok(())
    }

    /// Total number of generated fill lines across all tiles.
    pub fn line_count(&self) -> usize {
        self.tiles.iter().map(|t| t.lines().len()).sum()
    }

    /// All fill lines in global-index order.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.tiles.iter().flat_map(|t| t.lines().iter())
    }

    /// The fill line with the given global index.
    ///
    /// # Panics
    ///
    /// Panics when `id` is out of range.
    pub fn line(&self, id: usize) -> &Line {
        let mut offset = id;
        for tile in &self.tiles {
            if offset < tile.lines().len() {
                return &tile.lines()[offset];
            }
            offset -= tile.lines().len();
        }
        panic!("line index {id} out of range ({} lines)", self.line_count());
    }

    /// Global index of each tile's first line, row-major tile order.
    fn line_offsets(&self) -> Vec<usize> {
        let mut offsets = Vec::with_capacity(self.tiles.len());
        let mut acc = 0;
        for tile in &self.tiles {
            offsets.push(acc);
            acc += tile.lines().len();
        }
        offsets
    }

    /// Global indices of the lines currently eligible for deposition.
    ///
    /// Columns are scanned left to right; within a column, tiles bottom to
    /// top. The first untraversed line of the bottom-most unfinished tile is
    /// always printable. The first untraversed line of the next unfinished
    /// tile above it is printable only when both of its endpoints lie
    /// strictly below the already-selected line's value at their x — a
    /// higher line must be geometrically clear of the unfinished material
    /// under it. At most two lines per column; the scan stops after
    /// inspecting the second candidate. A vertical selection admits nothing
    /// above it.
    pub fn printable_lines(&self, traversal: &Traversal) -> Vec<usize> {
        let offsets = self.line_offsets();
        let mut printable = Vec::new();

        for col in 0..self.num_columns {
            let mut selected: Option<&Line> = None;
            for row in 0..self.num_rows {
                let tile = self.tile(row, col);
                let offset = offsets[self.index(row, col)];
                let Some(k) =
                    (0..tile.lines().len()).find(|&i| !traversal.is_traversed(offset + i))
                else {
                    continue; // tile fully traversed
                };
                let candidate = &tile.lines()[k];

                match selected {
                    None => {
                        printable.push(offset + k);
                        selected = Some(candidate);
                    }
                    Some(below) => {
                        let clear = below
                            .eval(candidate.p0().x)
                            .zip(below.eval(candidate.p1().x))
                            .is_some_and(|(y0, y1)| {
                                candidate.p0().y < y0 && candidate.p1().y < y1
                            });
                        if clear {
                            printable.push(offset + k);
                        }
                        break;
                    }
                }
            }
        }

        printable
    }
}

/// Per-line traversal flags over a grid's global line index space.
///
/// This is the only mutable part of the search state; it clones cheaply so
/// every search branch can own its own copy while the grid geometry stays
/// shared. Marking is terminal: a traversed line never reverts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traversal {
    flags: Vec<bool>,
    traversed: usize,
}

impl Traversal {
    /// All-clear flags for a grid with `line_count` lines.
    pub fn new(line_count: usize) -> Self {
        Self {
            flags: vec![false; line_count],
            traversed: 0,
        }
    }

    /// Mark a line traversed. Idempotent.
    pub fn mark(&mut self, id: usize) {
        if !self.flags[id] {
            self.flags[id] = true;
            self.traversed += 1;
        }
    }

    #[inline]
    pub fn is_traversed(&self, id: usize) -> bool {
        self.flags[id]
    }

    /// Number of traversed lines.
    #[inline]
    pub fn count(&self) -> usize {
        self.traversed
    }

    /// True when every line is traversed.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.traversed == self.flags.len()
    }
}
