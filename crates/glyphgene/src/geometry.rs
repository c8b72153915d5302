//! Shared 2D primitives for stroke geometry.
//!
//! - `Vec2`: the point/vector type used throughout (nalgebra).
//! - `Rect`: axis-aligned bounds with a computed center, attached to
//!   strokes, groups, and whole characters.
//! - `Line`: transient segment with derived length and compass
//!   direction.
//! - `PointDistance` + `point_at_fraction`: polyline points tagged with
//!   their fractional distance along the path, and interpolation over
//!   such a table.

use serde::{Deserialize, Serialize};

use crate::codon::Direction;

pub type Vec2 = nalgebra::Vector2<f64>;

/// Axis-aligned bounding rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Rect {
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Rect {
        Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Smallest rectangle containing all points; `None` when empty.
    pub fn around(points: impl IntoIterator<Item = Vec2>) -> Option<Rect> {
        let mut it = points.into_iter();
        let first = it.next()?;
        let mut r = Rect::new(first.x, first.y, first.x, first.y);
        for p in it {
            r.x_min = r.x_min.min(p.x);
            r.y_min = r.y_min.min(p.y);
            r.x_max = r.x_max.max(p.x);
            r.y_max = r.y_max.max(p.y);
        }
        Some(r)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// Transient line segment.
#[derive(Clone, Copy, Debug)]
pub struct Line {
    pub start: Vec2,
    pub end: Vec2,
}

impl Line {
    #[inline]
    pub fn new(start: Vec2, end: Vec2) -> Line {
        Line { start, end }
    }

    #[inline]
    pub fn delta(&self) -> Vec2 {
        self.end - self.start
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.delta().norm()
    }

    /// Nearest compass direction of the segment; `None` if degenerate.
    #[inline]
    pub fn direction(&self) -> Option<Direction> {
        Direction::from_delta(self.delta())
    }
}

/// Distance between two points.
#[inline]
pub fn dist(a: Vec2, b: Vec2) -> f64 {
    (b - a).norm()
}

/// A polyline point carrying its fractional distance along the path.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointDistance {
    pub x: f64,
    pub y: f64,
    /// Cumulative arc length at this point, as a fraction of the total
    /// path length (0 at the first point, 1 at the last).
    pub fractional: f64,
}

impl PointDistance {
    #[inline]
    pub fn new(p: Vec2, fractional: f64) -> PointDistance {
        PointDistance {
            x: p.x,
            y: p.y,
            fractional,
        }
    }

    #[inline]
    pub fn point(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Point at fractional distance `frac` along the table, linearly
/// interpolated between the bracketing entries; clamps outside [0, 1].
///
/// The table must be non-empty with nondecreasing fractions.
pub fn point_at_fraction(table: &[PointDistance], frac: f64) -> Vec2 {
    debug_assert!(!table.is_empty());
    if frac <= table[0].fractional {
        return table[0].point();
    }
    for w in table.windows(2) {
        let (a, b) = (&w[0], &w[1]);
        if frac <= b.fractional {
            let span = b.fractional - a.fractional;
            if span <= 0.0 {
                return b.point();
            }
            let t = (frac - a.fractional) / span;
            return a.point() + (b.point() - a.point()) * t;
        }
    }
    table[table.len() - 1].point()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_center_and_extent() {
        let r = Rect::new(-1.0, 0.0, 3.0, 2.0);
        assert_eq!(r.center(), Vec2::new(1.0, 1.0));
        assert_eq!(r.width(), 4.0);
        assert_eq!(r.height(), 2.0);
    }

    #[test]
    fn rect_around_points() {
        let r = Rect::around([Vec2::new(1.0, 5.0), Vec2::new(-2.0, 3.0)]).unwrap();
        assert_eq!(r, Rect::new(-2.0, 3.0, 1.0, 5.0));
        assert!(Rect::around([]).is_none());
    }

    #[test]
    fn line_length_and_direction() {
        let ln = Line::new(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0));
        assert!((ln.length() - 5.0).abs() < 1e-12);
        assert_eq!(ln.direction(), Some(Direction::Northeast));
        let degenerate = Line::new(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0));
        assert_eq!(degenerate.direction(), None);
    }

    #[test]
    fn interpolation_brackets_and_clamps() {
        let table = [
            PointDistance::new(Vec2::new(0.0, 0.0), 0.0),
            PointDistance::new(Vec2::new(10.0, 0.0), 0.5),
            PointDistance::new(Vec2::new(10.0, 10.0), 1.0),
        ];
        assert_eq!(point_at_fraction(&table, 0.25), Vec2::new(5.0, 0.0));
        assert_eq!(point_at_fraction(&table, 0.75), Vec2::new(10.0, 5.0));
        assert_eq!(point_at_fraction(&table, -0.5), Vec2::new(0.0, 0.0));
        assert_eq!(point_at_fraction(&table, 1.5), Vec2::new(10.0, 10.0));
    }
}
