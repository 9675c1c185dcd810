//! Start-location selection at the centroid of a location set.

use crate::clustering::centroid;
use crate::distance::euclidean;
use crate::models::Point;

/// Index of the location nearest to the centroid of `points` (first one on
/// ties), or `None` if `points` is empty.
///
/// Used as the depot ("landing pad") a vehicle's tour starts from.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::Point;
/// use fleet_routing::constructive::landing_pad;
///
/// let points = vec![
///     Point::new(0.0, 0.0),
///     Point::new(5.0, 5.0),
///     Point::new(7.0, 7.0),
///     Point::new(10.0, 10.0),
/// ];
/// assert_eq!(landing_pad(&points), Some(1));
/// ```
pub fn landing_pad(points: &[Point]) -> Option<usize> {
    let center = centroid(points)?;
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, p) in points.iter().enumerate() {
        let d = euclidean(p, &center);
        if d < best_dist {
            best = i;
            best_dist = d;
        }
    }
    Some(best)
}
