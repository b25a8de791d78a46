//! A square grid cell carrying one fill orientation and its clipped fill
//! lines.
//!
//! Line generation marches a seed line outward in both orthogonal
//! directions, clipping every placement to the tile border and keeping the
//! results sorted bottom-to-top by intercept.

use std::fmt;

use crate::geometry::{EPS, Line, Point};

/// Slope magnitude beyond which a fill direction is treated as vertical.
const VERTICAL_SLOPE: f64 = 1e5;

/// Errors from tile line generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileError {
    /// Generation was invoked before the tile's angle was set.
    AngleUnset,
    /// The seed line does not pass through the tile, so no fill family can
    /// be anchored on it. The tile's existing lines are left untouched.
    InfeasibleSeed,
}

impl fmt::Display for TileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileError::AngleUnset => write!(f, "tile angle must be set before generating lines"),
            TileError::InfeasibleSeed => write!(f, "seed line does not intersect the tile"),
        }
    }
}

impl std::error::Error for TileError {}

/// Fold an angle in degrees into the canonical range (-90, 90].
///
/// A fill direction is unoriented, so any input magnitude or winding maps to
/// the same canonical value. Idempotent.
pub fn normalize_angle(angle: f64) -> f64 {
    if angle == 0.0 {
        return 0.0;
    }
    let folded = (angle.abs() % 180.0) * angle.signum();
    if folded > 90.0 {
        folded - 180.0
    } else if folded > -90.0 {
        folded
    } else {
        180.0 - folded.abs()
    }
}

/// One of the four border segments of a tile.
///
/// Indices follow construction order: left runs bottom-left to top-left,
/// then top, right, bottom complete the loop clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Border {
    Left,
    Top,
    Right,
    Bottom,
}

impl Border {
    #[inline]
    fn index(self) -> usize {
        match self {
            Border::Left => 0,
            Border::Top => 1,
            Border::Right => 2,
            Border::Bottom => 3,
        }
    }
}

/// A unit square cell with one fill orientation and an ordered list of
/// clipped parallel fill lines.
#[derive(Debug, Clone)]
pub struct Tile {
    side: f64,
    angle: Option<f64>,
    origin: Point,
    spacing: f64,
    center: Point,
    borders: [Line; 4],
    lines: Vec<Line>,
}

impl Tile {
    /// Create a tile with `origin` at its bottom-left corner.
    ///
    /// `side` is the square's edge length (must be positive), `spacing` the
    /// maximum orthogonal distance between consecutive fill lines. An angle
    /// of `None` defers orientation until [`Tile::set_angle`].
    pub fn new(side: f64, angle: Option<f64>, origin: Point, spacing: f64) -> Self {
        assert!(side > 0.0, "tile side length must be positive");
        let c0 = origin;
        let c1 = Point::new(origin.x, origin.y + side);
        let c2 = Point::new(origin.x + side, origin.y + side);
        let c3 = Point::new(origin.x + side, origin.y);
        let corner_line = |a, b| Line::new(a, b).expect("square corners are distinct");
        Self {
            side,
            angle: angle.map(normalize_angle),
            origin,
            spacing,
            center: Point::new(origin.x + side / 2.0, origin.y + side / 2.0),
            borders: [
                corner_line(c0, c1), // left
                corner_line(c1, c2), // top
                corner_line(c2, c3), // right
                corner_line(c3, c0), // bottom
            ],
            lines: Vec::new(),
        }
    }

    /// Set the fill orientation, normalizing into (-90, 90].
    pub fn set_angle(&mut self, angle: f64) {
        self.angle = Some(normalize_angle(angle));
    }

    #[inline]
    pub fn angle(&self) -> Option<f64> {
        self.angle
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
    pub fn origin(&self) -> Point {
        self.origin
    }

    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Fill lines, sorted bottom-to-top by intercept. Empty until generated.
    #[inline]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Generate the tile's fill lines from a seed point.
    ///
    /// A seed infinite line is placed through `seed` at the tile's angle,
    /// then marched orthogonally in steps of `offset` (defaulting to the
    /// tile's spacing), first toward positive offsets, then negative ones
    /// from the original position. Each placement is clipped to the tile and
    /// inserted in intercept order. Clips shorter than a tenth of the side
    /// length are dropped and end the march in that direction.
    ///
    /// Any previously generated lines are replaced. On
    /// [`TileError::InfeasibleSeed`] the existing lines are left as they
    /// were.
    pub fn generate_from_seed(&mut self, seed: Point, offset: Option<f64>) -> Result<(), TileError> {
        let angle = self.angle.ok_or(TileError::AngleUnset)?;

        let raw_slope = angle.to_radians().tan();
        let second = if raw_slope.abs() > VERTICAL_SLOPE {
            Point::new(seed.x, seed.y + 1.0)
        } else if raw_slope.abs() < EPS {
            Point::new(seed.x + 1.0, seed.y)
        } else {
            Point::new(seed.x + 1.0, seed.y + raw_slope)
        };
        let seed_line = Line::new(seed, second).expect("seed endpoints are distinct");

        if !self.contains_line(&seed_line) {
            return Err(TileError::InfeasibleSeed);
        }

        let offset = offset.unwrap_or(self.spacing);
        self.lines.clear();

        let initial = seed_line.clone();
        let mut probe = seed_line;
        while self.insert_clipped(&probe) {
            probe.translate_orthogonal(offset);
        }

        let mut probe = initial;
        probe.translate_orthogonal(-offset);
        while self.insert_clipped(&probe) {
            probe.translate_orthogonal(-offset);
        }

        Ok(())
    }

    /// Does the infinite line through `line` pass through this tile?
    ///
    /// A line lying exactly on a border counts as inside; a line grazing
    /// exactly one corner does not (that is a touch, not a traversal).
    pub fn contains_line(&self, line: &Line) -> bool {
        // Each border's first endpoint walks the four corners.
        let corners_touched = self
            .borders
            .iter()
            .filter(|border| line.orthogonal_distance(border.p0()) < EPS)
            .count();
        if corners_touched == 1 {
            return false;
        }

        // A non-parallel infinite line through the square crosses at least
        // one border segment; parallel lines on a border are caught too
        // since the adjacent borders pierce them.
        self.borders
            .iter()
            .any(|border| border.intersects_infinite(line))
    }

    /// Clip an infinite line (known to pass through the tile) to the border
    /// square.
    ///
    /// Precondition: `contains_line` holds. The first two distinct border
    /// intersection points bound the clipped segment; corner-to-corner
    /// diagonals produce duplicate intersections, which the distinctness
    /// filter collapses.
    fn clip_to_tile(&self, line: &Line) -> Line {
        let mut first: Option<Point> = None;
        for border in &self.borders {
            if !border.intersects_infinite(line) {
                continue;
            }
            let Some(ip) = Line::intersection_point(border, line) else {
                continue;
            };
            match first {
                None => first = Some(ip),
                Some(p) if p == ip => {}
                Some(p) => {
                    return Line::new(p, ip).expect("border intersections are distinct");
                }
            }
        }
        panic!("clip_to_tile: line does not cross the tile border at two points");
    }

    /// Clip and insert a candidate fill line in sorted position.
    ///
    /// Returns false (and inserts nothing) when the line misses the tile or
    /// the clipped segment is shorter than the minimum visible length.
    fn insert_clipped(&mut self, line: &Line) -> bool {
        if !self.contains_line(line) {
            return false;
        }
        let segment = self.clip_to_tile(line);
        if segment.length() < self.side / 10.0 {
            return false;
        }
        let at = self
            .lines
            .iter()
            .take_while(|existing| segment.is_above(existing))
            .count();
        self.lines.insert(at, segment);
        true
    }

    /// Intersection points of every fill line with the infinite extension of
    /// the named border. Supports cross-tile continuity consumers.
    pub fn border_points(&self, border: Border) -> Vec<Point> {
        let border_line = &self.borders[border.index()];
        self.lines
            .iter()
            .filter(|line| border_line.intersects_infinite(line))
            .filter_map(|line| Line::intersection_point(border_line, line))
            .collect()
    }

    /// Closed border polygon as five points (first repeated last).
    pub fn outline(&self) -> [Point; 5] {
        let Point { x, y } = self.origin;
        let w = self.side;
        [
            Point::new(x, y),
            Point::new(x, y + w),
            Point::new(x + w, y + w),
            Point::new(x + w, y),
            Point::new(x, y),
        ]
    }
}
