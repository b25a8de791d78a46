//! Core geometry types: points and directed line segments.
//!
//! Everything here is tolerance-aware. Fill-line generation applies long
//! chains of trig and offset transforms, so two points that differ by less
//! than [`EPS`] on each axis are treated as the same point, and all the
//! intersection predicates are built on top of that equality.
//!
//! Degenerate configurations (vertical lines, parallel pairs) are expected
//! inputs, not errors: they come back as `None` sentinels that callers check
//! before touching coordinates. The only fallible operation is constructing
//! a [`Line`] from coincident endpoints.

use std::fmt;

/// Absolute tolerance for coordinate comparisons.
pub const EPS: f64 = 1e-5;

/// A 2D point with x,y coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl PartialEq for Point {
    /// Tolerance-based equality: within [`EPS`] on each axis.
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < EPS && (self.y - other.y).abs() < EPS
    }
}

/// Error type for geometry construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// Line endpoints coincide (under tolerance equality).
    DegenerateLine,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::DegenerateLine => {
                write!(f, "line endpoints must be distinct")
            }
        }
    }
}

impl std::error::Error for GeometryError {}

/// A directed segment between two distinct points.
///
/// The slope is cached at construction: `None` marks a vertical line (exact
/// x equality between the endpoints), the usual rise-over-run otherwise.
/// Most operations are phrased against the *infinite* line the segment lies
/// on; the doc comment on each method says which.
#[derive(Debug, Clone)]
pub struct Line {
    p0: Point,
    p1: Point,
    slope: Option<f64>,
}

impl Line {
    /// Build a segment from two distinct points.
    pub fn new(p0: Point, p1: Point) -> Result<Self, GeometryError> {
        if p0 == p1 {
            return Err(GeometryError::DegenerateLine);
        }
        let slope = if p0.x == p1.x {
            None
        } else {
            Some((p0.y - p1.y) / (p0.x - p1.x))
        };
        Ok(Self { p0, p1, slope })
    }

    #[inline]
    pub fn p0(&self) -> Point {
        self.p0
    }

    #[inline]
    pub fn p1(&self) -> Point {
        self.p1
    }

    /// Slope of the line, `None` for vertical.
    #[inline]
    pub fn slope(&self) -> Option<f64> {
        self.slope
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.slope.is_none()
    }

    /// y value of the infinite line at `x`; `None` for vertical lines.
    pub fn eval(&self, x: f64) -> Option<f64> {
        let slope = self.slope?;
        Some(self.p0.y - slope * (self.p0.x - x))
    }

    /// y-intercept (`eval(0)`); the ranking key for parallel lines.
    #[inline]
    pub fn intercept(&self) -> Option<f64> {
        self.eval(0.0)
    }

    /// Length of the segment.
    #[inline]
    pub fn length(&self) -> f64 {
        self.p0.distance(self.p1)
    }

    /// Move both endpoints by `offset` along the line's orthogonal direction.
    ///
    /// Positive offsets move the line toward larger x, or toward larger y for
    /// horizontal lines. Negative offsets move the other way. The slope is
    /// unchanged, so repeated calls walk a family of parallel lines.
    pub fn translate_orthogonal(&mut self, offset: f64) {
        match self.slope {
            Some(s) if s == 0.0 => {
                self.p0.y += offset;
                self.p1.y += offset;
            }
            None => {
                self.p0.x += offset;
                self.p1.x += offset;
            }
            Some(s) => {
                // Fold the line's direction angle into [0, pi) so the sign
                // convention above holds for both slope signs.
                let mut angle = s.atan2(1.0);
                if angle < 0.0 {
                    angle += std::f64::consts::PI;
                }
                let dx = offset * angle.sin();
                let dy = -offset * angle.cos();
                self.p0.x += dx;
                self.p1.x += dx;
                self.p0.y += dy;
                self.p1.y += dy;
            }
        }
    }

    /// Perpendicular distance from `point` to the *infinite* line.
    pub fn orthogonal_distance(&self, point: Point) -> f64 {
        match self.slope {
            None => (point.x - self.p0.x).abs(),
            Some(s) if s.abs() < EPS => (point.y - self.p0.y).abs(),
            Some(s) => {
                let orth_slope = -1.0 / s;
                let through = Point::new(point.x + 1.0, point.y + orth_slope);
                let orth = Line::new(point, through)
                    .expect("perpendicular endpoints are distinct");
                match Line::intersection_point(self, &orth) {
                    Some(foot) => point.distance(foot),
                    None => unreachable!("perpendicular is never parallel to its base line"),
                }
            }
        }
    }

    /// Does this *segment* intersect the *infinite* extension of `other`?
    ///
    /// Inclusive: a crossing exactly at one of this segment's endpoints
    /// counts. Parallel and colinear pairs never count.
    pub fn intersects_infinite(&self, other: &Line) -> bool {
        let Some(ip) = Line::intersection_point(self, other) else {
            return false;
        };
        if self.is_vertical() {
            // Other line is not vertical here, so the crossing has a real y.
            let (lo, hi) = min_max(self.p0.y, self.p1.y);
            lo <= ip.y && ip.y <= hi
        } else {
            let (lo, hi) = min_max(self.p0.x, self.p1.x);
            lo <= ip.x && ip.x <= hi
        }
    }

    /// Do the two *segments* cross at an interior point?
    ///
    /// Strict: a touch at an endpoint of the governing x-range does not
    /// count. Parallel and colinear pairs return false.
    pub fn segments_intersect(l1: &Line, l2: &Line) -> bool {
        let Some(ip) = Line::intersection_point(l1, l2) else {
            return false;
        };
        // Vertical l1 has a degenerate x-range; use l2's instead.
        let range_line = if l1.is_vertical() { l2 } else { l1 };
        let (lo, hi) = min_max(range_line.p0.x, range_line.p1.x);
        lo < ip.x && ip.x < hi
    }

    /// Intersection of the two *infinite* lines; `None` when the slopes are
    /// equal (parallel and colinear alike — colinearity is not distinguished).
    pub fn intersection_point(l1: &Line, l2: &Line) -> Option<Point> {
        if l1.slope == l2.slope {
            return None;
        }
        match (l1.slope, l2.slope) {
            (None, _) => Some(Point::new(l1.p0.x, l2.eval(l1.p0.x)?)),
            (_, None) => Some(Point::new(l2.p0.x, l1.eval(l2.p0.x)?)),
            (Some(s1), Some(s2)) => {
                let x = (l2.p0.y - l1.p0.y + s1 * l1.p0.x - s2 * l2.p0.x) / (s1 - s2);
                let y = l2.eval(x)?;
                Some(Point::new(x, y))
            }
        }
    }

    /// Intercept ordering for parallel lines within one tile's fill set.
    ///
    /// Only meaningful between mutually parallel, non-vertical lines; any
    /// vertical operand compares false.
    pub fn is_above(&self, other: &Line) -> bool {
        match (self.intercept(), other.intercept()) {
            (Some(a), Some(b)) => a > b,
            _ => false,
        }
    }
}

impl PartialEq for Line {
    /// Endpoint pairs equal in order (tolerance equality per point).
    fn eq(&self, other: &Self) -> bool {
        self.p0 == other.p0 && self.p1 == other.p1
    }
}

#[inline]
fn min_max(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Line {
        Line::new(Point::new(x1, y1), Point::new(x2, y2)).unwrap()
    }

    #[test]
    fn point_distance() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(3.0, 4.0);
        assert_eq!(p1.distance(p2), 5.0);
    }

    #[test]
    fn point_equality_is_tolerant() {
        let p1 = Point::new(1.0, 2.0);
        let p2 = Point::new(1.0 + 1e-7, 2.0 - 1e-7);
        let p3 = Point::new(1.0 + 1e-4, 2.0);
        assert_eq!(p1, p2);
        assert_ne!(p1, p3);
    }

    #[test]
    fn degenerate_line_rejected() {
        let p = Point::new(1.0, 1.0);
        let q = Point::new(1.0 + 1e-8, 1.0);
        assert_eq!(Line::new(p, q), Err(GeometryError::DegenerateLine));
    }

    #[test]
    fn slope_and_eval() {
        let l = line(0.0, 0.0, 2.0, 1.0);
        assert_eq!(l.slope(), Some(0.5));
        assert_eq!(l.eval(4.0), Some(2.0));

        let v = line(1.0, 0.0, 1.0, 5.0);
        assert!(v.is_vertical());
        assert_eq!(v.eval(1.0), None);
        assert_eq!(v.intercept(), None);
    }

    #[test]
    fn translate_horizontal_and_vertical() {
        let mut h = line(0.0, 1.0, 4.0, 1.0);
        h.translate_orthogonal(0.5);
        assert_eq!(h.p0(), Point::new(0.0, 1.5));
        assert_eq!(h.p1(), Point::new(4.0, 1.5));

        let mut v = line(2.0, 0.0, 2.0, 3.0);
        v.translate_orthogonal(-1.0);
        assert_eq!(v.p0(), Point::new(1.0, 0.0));
        assert_eq!(v.p1(), Point::new(1.0, 3.0));
    }

    #[test]
    fn translate_round_trips() {
        let original = line(0.3, 0.7, 1.1, -0.2);
        let mut moved = original.clone();
        moved.translate_orthogonal(0.37);
        assert_ne!(moved, original);
        moved.translate_orthogonal(-0.37);
        assert_eq!(moved, original);
    }

    #[test]
    fn translate_positive_moves_toward_larger_x() {
        // Downward-sloping line: positive offset should increase x.
        let mut l = line(0.0, 1.0, 1.0, 0.0);
        let x_before = l.p0().x;
        l.translate_orthogonal(0.1);
        assert!(l.p0().x > x_before);
    }

    #[test]
    fn orthogonal_distance_cases() {
        let v = line(2.0, 0.0, 2.0, 1.0);
        assert!((v.orthogonal_distance(Point::new(5.0, 7.0)) - 3.0).abs() < EPS);

        let h = line(0.0, 1.0, 1.0, 1.0);
        assert!((h.orthogonal_distance(Point::new(9.0, 4.0)) - 3.0).abs() < EPS);

        // 45-degree line y = x; distance from (1, 0) is 1/sqrt(2).
        let d = line(0.0, 0.0, 1.0, 1.0);
        let expected = 1.0 / 2.0_f64.sqrt();
        assert!((d.orthogonal_distance(Point::new(1.0, 0.0)) - expected).abs() < EPS);
    }

    #[test]
    fn intersection_point_satisfies_both_lines() {
        let l1 = line(0.0, 0.0, 2.0, 2.0);
        let l2 = line(0.0, 2.0, 2.0, 0.0);
        let ip = Line::intersection_point(&l1, &l2).unwrap();
        assert_eq!(ip, Point::new(1.0, 1.0));
        assert!((l1.eval(ip.x).unwrap() - ip.y).abs() < EPS);
        assert!((l2.eval(ip.x).unwrap() - ip.y).abs() < EPS);
    }

    #[test]
    fn intersection_point_vertical_cases() {
        let v = line(1.0, 0.0, 1.0, 1.0);
        let l = line(0.0, 0.0, 2.0, 2.0);
        assert_eq!(Line::intersection_point(&v, &l), Some(Point::new(1.0, 1.0)));
        assert_eq!(Line::intersection_point(&l, &v), Some(Point::new(1.0, 1.0)));

        let v2 = line(3.0, 0.0, 3.0, 1.0);
        assert_eq!(Line::intersection_point(&v, &v2), None);
    }

    #[test]
    fn equal_slopes_never_intersect() {
        let l1 = line(0.0, 0.0, 1.0, 1.0);
        let l2 = line(0.0, 1.0, 1.0, 2.0);
        assert_eq!(Line::intersection_point(&l1, &l2), None);
        assert!(!l1.intersects_infinite(&l2));
        assert!(!Line::segments_intersect(&l1, &l2));

        // Colinear is treated the same as parallel.
        let l3 = line(2.0, 2.0, 3.0, 3.0);
        assert_eq!(Line::intersection_point(&l1, &l3), None);
        assert!(!Line::segments_intersect(&l1, &l3));
    }

    #[test]
    fn intersects_infinite_is_endpoint_inclusive() {
        // Segment ends exactly where it pierces the infinite line.
        let seg = line(0.0, 0.0, 1.0, 1.0);
        let other = line(1.0, 5.0, 1.0, 6.0); // infinite vertical x = 1
        assert!(seg.intersects_infinite(&other));

        // Segment stops short of the infinite line.
        let short = line(0.0, 0.0, 0.5, 0.5);
        assert!(!short.intersects_infinite(&other));
    }

    #[test]
    fn segments_intersect_is_endpoint_exclusive() {
        let l1 = line(0.0, 0.0, 2.0, 2.0);
        let l2 = line(0.0, 2.0, 2.0, 0.0);
        assert!(Line::segments_intersect(&l1, &l2));

        // Shared endpoint only.
        let l3 = line(2.0, 2.0, 3.0, 0.0);
        assert!(!Line::segments_intersect(&l1, &l3));
    }

    #[test]
    fn segments_intersect_vertical_uses_other_range() {
        let v = line(1.0, -5.0, 1.0, 5.0);
        let l = line(0.0, 0.0, 2.0, 0.5);
        assert!(Line::segments_intersect(&v, &l));

        let far = line(2.0, 0.0, 4.0, 0.5);
        assert!(!Line::segments_intersect(&v, &far));
    }

    #[test]
    fn intercept_ordering() {
        let low = line(0.0, 0.0, 1.0, -1.0);
        let high = line(0.0, 1.0, 1.0, 0.0);
        assert!(high.is_above(&low));
        assert!(!low.is_above(&high));

        // Vertical operands compare false both ways.
        let v = line(0.5, 0.0, 0.5, 1.0);
        assert!(!v.is_above(&low));
        assert!(!high.is_above(&v));
    }
}
