//! Cluster of locations served by one vehicle.

use serde::{Deserialize, Serialize};

use super::Point;

/// A group of locations assigned to one vehicle.
///
/// The centroid is the mean of the member points, or the previous centroid
/// when the cluster is empty. Members are original location indices, in the
/// order they were assigned.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::{Cluster, Point};
///
/// let c = Cluster::new(Point::new(1.0, 1.0), vec![3, 7]);
/// assert_eq!(c.len(), 2);
/// assert_eq!(c.members(), &[3, 7]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    centroid: Point,
    members: Vec<usize>,
}

impl Cluster {
    /// Creates a cluster with the given centroid and members.
    pub fn new(centroid: Point, members: Vec<usize>) -> Self {
        Self { centroid, members }
    }

    /// Centroid of this cluster.
    pub fn centroid(&self) -> Point {
        self.centroid
    }

    /// Original indices of the member locations.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if no location is assigned to this cluster.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Copies the member points out of the full location set.
    ///
    /// Position `i` of the result corresponds to `members()[i]`.
    ///
    /// # Panics
    ///
    /// Panics if a member index is out of bounds for `points`.
    pub fn member_points(&self, points: &[Point]) -> Vec<Point> {
        self.members.iter().map(|&i| points[i]).collect()
    }
}
