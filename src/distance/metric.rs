//! Euclidean distance and closed-tour length.

use crate::models::{Point, Tour};

/// Euclidean distance between two points.
///
/// Uses `hypot`, so coordinates near the limits of `f64` do not overflow
/// when squared.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::Point;
/// use fleet_routing::distance::euclidean;
///
/// let d = euclidean(&Point::new(0.0, 0.0), &Point::new(3.0, 4.0));
/// assert!((d - 5.0).abs() < 1e-10);
/// ```
pub fn euclidean(a: &Point, b: &Point) -> f64 {
    (b.x() - a.x()).hypot(b.y() - a.y())
}

/// Total length of a closed tour over `points`, including the closing edge
/// from the last index back to the first.
///
/// Empty and single-location tours have length zero.
///
/// # Panics
///
/// Panics if a tour index is out of bounds for `points`.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::{Point, Tour};
/// use fleet_routing::distance::tour_length;
///
/// let square = vec![
///     Point::new(0.0, 0.0),
///     Point::new(0.0, 10.0),
///     Point::new(10.0, 10.0),
///     Point::new(10.0, 0.0),
/// ];
/// let len = tour_length(&square, &Tour::new(vec![0, 1, 2, 3]));
/// assert!((len - 40.0).abs() < 1e-10);
/// ```
pub fn tour_length(points: &[Point], tour: &Tour) -> f64 {
    let idx = tour.indices();
    if idx.len() < 2 {
        return 0.0;
    }
    let mut total = 0.0;
    for i in 0..idx.len() {
        let from = &points[idx[i]];
        let to = &points[idx[(i + 1) % idx.len()]];
        total += euclidean(from, to);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean_identical_points() {
        let p = Point::new(7.0, -3.0);
        assert_eq!(euclidean(&p, &p), 0.0);
    }

    #[test]
    fn test_euclidean_large_magnitude() {
        let a = Point::new(-1e300, 0.0);
        let b = Point::new(1e300, 0.0);
        let d = euclidean(&a, &b);
        assert!(d.is_finite());
        assert!((d - 2e300).abs() / 2e300 < 1e-12);
    }

    #[test]
    fn test_tour_length_includes_closing_edge() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(3.0, 0.0),
        ];
        // 1 + 1 + 1 + 3 back to start
        let len = tour_length(&points, &Tour::new(vec![0, 1, 2, 3]));
        assert!((len - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_tour_length_degenerate() {
        let points = vec![Point::new(5.0, 5.0)];
        assert_eq!(tour_length(&points, &Tour::new(vec![0])), 0.0);
        assert_eq!(tour_length(&points, &Tour::empty()), 0.0);
    }

    #[test]
    fn test_tour_length_two_points() {
        let points = vec![Point::new(0.0, 0.0), Point::new(0.0, 1.0)];
        let len = tour_length(&points, &Tour::new(vec![0, 1]));
        assert!((len - 2.0).abs() < 1e-10);
    }
}
