//! Midpoint quadratic smoothing of sampled stroke points.
//!
//! Raw pointer samples are turned into a quadratic curve that passes through
//! the midpoints between consecutive samples, using each sample as a control
//! point. Work is O(1) per point, so the whole path can be rebuilt on every
//! pointer move.

use crate::precision::{Precise, to_dom_precision};
use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single draw instruction. Coordinates are already rounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(Point),
    /// Quadratic curve with an explicit control point.
    QuadTo(Point, Point),
    /// Quadratic curve whose control point reflects the previous one.
    SmoothQuadTo(Point),
    LineTo(Point),
    ClosePath,
}

/// An ordered sequence of draw instructions describing one path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathCommands(Vec<PathCommand>);

impl PathCommands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: PathCommand) {
        self.0.push(command);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[PathCommand] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathCommand> {
        self.0.iter()
    }

    /// The last coordinate the path draws to, ignoring a trailing close.
    pub fn end_point(&self) -> Option<Point> {
        self.0.iter().rev().find_map(|command| match *command {
            PathCommand::MoveTo(p)
            | PathCommand::QuadTo(_, p)
            | PathCommand::SmoothQuadTo(p)
            | PathCommand::LineTo(p) => Some(p),
            PathCommand::ClosePath => None,
        })
    }

    /// Expand into a [`BezPath`], resolving smooth continuations into
    /// explicit control points.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut current = Point::ZERO;
        let mut last_control: Option<Point> = None;

        for command in &self.0 {
            match *command {
                PathCommand::MoveTo(p) => {
                    path.move_to(p);
                    current = p;
                    last_control = None;
                }
                PathCommand::QuadTo(control, p) => {
                    path.quad_to(control, p);
                    current = p;
                    last_control = Some(control);
                }
                PathCommand::SmoothQuadTo(p) => {
                    let control = match last_control {
                        Some(c) => current + (current - c),
                        None => current,
                    };
                    path.quad_to(control, p);
                    current = p;
                    last_control = Some(control);
                }
                PathCommand::LineTo(p) => {
                    path.line_to(p);
                    current = p;
                    last_control = None;
                }
                PathCommand::ClosePath => {
                    path.close_path();
                    last_control = None;
                }
            }
        }

        path
    }
}

impl<'a> IntoIterator for &'a PathCommands {
    type Item = &'a PathCommand;
    type IntoIter = std::slice::Iter<'a, PathCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

struct Pair(Point);

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {} ", Precise(self.0.x), Precise(self.0.y))
    }
}

/// Path data string, e.g. `M0, 0 Q10, 0 15, 5 T25, 10 L30, 10 `.
///
/// Consecutive smooth continuations share a single `T`.
impl fmt::Display for PathCommands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut previous: Option<&PathCommand> = None;
        for command in &self.0 {
            match command {
                PathCommand::MoveTo(p) => write!(f, "M{}", Pair(*p))?,
                PathCommand::QuadTo(c, p) => write!(f, "Q{}{}", Pair(*c), Pair(*p))?,
                PathCommand::SmoothQuadTo(p) => {
                    if !matches!(previous, Some(PathCommand::SmoothQuadTo(_))) {
                        f.write_str("T")?;
                    }
                    write!(f, "{}", Pair(*p))?;
                }
                PathCommand::LineTo(p) => write!(f, "L{}", Pair(*p))?,
                PathCommand::ClosePath => f.write_str("Z")?,
            }
            previous = Some(command);
        }
        Ok(())
    }
}

fn precise(p: Point) -> Point {
    Point::new(to_dom_precision(p.x), to_dom_precision(p.y))
}

fn average(a: Point, b: Point) -> Point {
    precise(a.midpoint(b))
}

/// Smooth an ordered list of logical points into draw commands.
///
/// Fewer than two points produce nothing; two points produce a straight
/// line. An open path always ends with a line to the last sample. A closed
/// path starts and ends on the midpoint of the first two samples.
pub fn smooth(points: &[Point], closed: bool) -> PathCommands {
    let mut commands = PathCommands::new();
    let len = points.len();

    if len < 2 {
        return commands;
    }

    if len == 2 {
        commands.push(PathCommand::MoveTo(precise(points[0])));
        commands.push(PathCommand::LineTo(precise(points[1])));
        return commands;
    }

    let start = if closed {
        average(points[0], points[1])
    } else {
        precise(points[0])
    };
    commands.push(PathCommand::MoveTo(start));
    commands.push(PathCommand::QuadTo(
        precise(points[1]),
        average(points[1], points[2]),
    ));

    for pair in points[2..].windows(2) {
        commands.push(PathCommand::SmoothQuadTo(average(pair[0], pair[1])));
    }

    if closed {
        commands.push(PathCommand::SmoothQuadTo(average(points[len - 1], points[0])));
        commands.push(PathCommand::SmoothQuadTo(average(points[0], points[1])));
        commands.push(PathCommand::ClosePath);
    } else {
        commands.push(PathCommand::LineTo(precise(points[len - 1])));
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{PathEl, Shape};

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn test_too_few_points() {
        assert!(smooth(&[], false).is_empty());
        assert!(smooth(&pts(&[(4.0, 2.0)]), false).is_empty());
        assert!(smooth(&pts(&[(4.0, 2.0)]), true).is_empty());
        assert_eq!(smooth(&[], false).to_string(), "");
    }

    #[test]
    fn test_two_points_is_a_line() {
        let path = smooth(&pts(&[(0.0, 0.0), (10.0, 0.0)]), false);
        assert_eq!(
            path.as_slice(),
            &[
                PathCommand::MoveTo(Point::new(0.0, 0.0)),
                PathCommand::LineTo(Point::new(10.0, 0.0)),
            ]
        );
        assert_eq!(path.to_string(), "M0, 0 L10, 0 ");
    }

    #[test]
    fn test_two_points_closed_is_still_a_line() {
        let path = smooth(&pts(&[(0.0, 0.0), (10.0, 0.0)]), true);
        assert_eq!(path.to_string(), "M0, 0 L10, 0 ");
    }

    #[test]
    fn test_three_points_open() {
        let path = smooth(&pts(&[(0.0, 0.0), (10.0, 0.0), (20.0, 10.0)]), false);
        assert_eq!(path.to_string(), "M0, 0 Q10, 0 15, 5 L20, 10 ");
    }

    #[test]
    fn test_four_points_open() {
        let path = smooth(
            &pts(&[(0.0, 0.0), (10.0, 0.0), (20.0, 10.0), (30.0, 10.0)]),
            false,
        );
        assert_eq!(path.to_string(), "M0, 0 Q10, 0 15, 5 T25, 10 L30, 10 ");
    }

    #[test]
    fn test_continuations_share_one_letter() {
        let path = smooth(
            &pts(&[(0.0, 0.0), (2.0, 0.0), (4.0, 2.0), (6.0, 2.0), (8.0, 0.0)]),
            false,
        );
        assert_eq!(path.to_string(), "M0, 0 Q2, 0 3, 1 T5, 2 7, 1 L8, 0 ");
    }

    #[test]
    fn test_open_path_reaches_last_point() {
        let samples = pts(&[
            (1.0, 1.0),
            (3.3, 7.1),
            (9.123_456_7, 4.0),
            (12.0, -2.5),
            (15.987_654_3, 0.333_333),
        ]);
        for len in 3..=samples.len() {
            let path = smooth(&samples[..len], false);
            let last = precise(samples[len - 1]);
            assert_eq!(path.end_point(), Some(last));
            assert!(matches!(path.as_slice().last(), Some(PathCommand::LineTo(_))));
        }
    }

    #[test]
    fn test_closed_path_loops() {
        let samples = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        let path = smooth(&samples, true);

        assert_eq!(path.as_slice()[0], PathCommand::MoveTo(Point::new(5.0, 0.0)));
        assert_eq!(path.as_slice().last(), Some(&PathCommand::ClosePath));
        assert_eq!(path.end_point(), Some(Point::new(5.0, 0.0)));
        assert_eq!(path.to_string(), "M5, 0 Q10, 0 10, 5 T5, 10 0, 5 5, 0 Z");
    }

    #[test]
    fn test_closed_triangle() {
        let path = smooth(&pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]), true);
        assert_eq!(path.to_string(), "M5, 0 Q10, 0 10, 5 T5, 5 5, 0 Z");
    }

    #[test]
    fn test_coordinates_are_rounded() {
        let path = smooth(&pts(&[(0.123_456, 1.0 / 3.0), (2.0, 2.0 / 3.0)]), false);
        assert_eq!(path.to_string(), "M0.1235, 0.3333 L2, 0.6667 ");
        assert_eq!(
            path.as_slice()[0],
            PathCommand::MoveTo(Point::new(0.1235, 0.3333))
        );
    }

    #[test]
    fn test_bez_path_reflects_controls() {
        let path = smooth(
            &pts(&[(0.0, 0.0), (10.0, 0.0), (20.0, 10.0), (30.0, 10.0)]),
            false,
        );
        let bez = path.to_bez_path();
        let elements: Vec<PathEl> = bez.elements().to_vec();

        assert_eq!(elements.len(), 4);
        // The continuation through (25, 10) mirrors (10, 0) about (15, 5).
        assert_eq!(
            elements[2],
            PathEl::QuadTo(Point::new(20.0, 10.0), Point::new(25.0, 10.0))
        );
        assert_eq!(elements[3], PathEl::LineTo(Point::new(30.0, 10.0)));
    }

    #[test]
    fn test_bez_path_bounds_cover_samples() {
        let samples = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        let bounds = smooth(&samples, false).to_bez_path().bounding_box();
        assert!(bounds.x0 <= 0.0 && bounds.y0 <= 0.0);
        assert!(bounds.y1 >= 10.0 - f64::EPSILON);
    }
}
