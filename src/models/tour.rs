//! Closed tour type.

use serde::{Deserialize, Serialize};

/// An ordered sequence of location indices forming a closed cycle.
///
/// The closing edge from the last index back to the first is implicit and
/// is not stored.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::Tour;
///
/// let tour = Tour::new(vec![0, 2, 1]);
/// assert_eq!(tour.len(), 3);
/// assert!(tour.is_permutation_of(3));
/// assert_eq!(tour.translate(&[10, 20, 30]).indices(), &[10, 30, 20]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tour {
    indices: Vec<usize>,
}

impl Tour {
    /// Creates a tour from an ordered list of indices.
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    /// Creates the empty tour (used for clusters without members).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Indices in visit order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Consumes the tour and returns its indices.
    pub fn into_indices(self) -> Vec<usize> {
        self.indices
    }

    /// Number of locations visited.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if the tour visits no location.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// First index of the tour, where the closing edge returns to.
    pub fn start(&self) -> Option<usize> {
        self.indices.first().copied()
    }

    /// Rotates the cycle so it begins at `index`, keeping visit order and
    /// therefore length. Returns the tour unchanged if `index` is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use fleet_routing::models::Tour;
    ///
    /// let tour = Tour::new(vec![0, 1, 2, 3]).rotated_to(2);
    /// assert_eq!(tour.into_indices(), vec![2, 3, 0, 1]);
    /// ```
    pub fn rotated_to(self, index: usize) -> Tour {
        match self.indices.iter().position(|&i| i == index) {
            Some(pos) => {
                let mut indices = self.into_indices();
                indices.rotate_left(pos);
                Tour::new(indices)
            }
            None => self,
        }
    }

    /// Returns `true` if every index in `0..n` appears exactly once.
    pub fn is_permutation_of(&self, n: usize) -> bool {
        if self.indices.len() != n {
            return false;
        }
        let mut seen = vec![false; n];
        for &i in &self.indices {
            if i >= n || seen[i] {
                return false;
            }
            seen[i] = true;
        }
        true
    }

    /// Maps local indices through `mapping` (e.g. cluster members to
    /// original location indices).
    ///
    /// # Panics
    ///
    /// Panics if an index is out of bounds for `mapping`.
    pub fn translate(&self, mapping: &[usize]) -> Tour {
        Tour::new(self.indices.iter().map(|&i| mapping[i]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tour_empty() {
        let t = Tour::empty();
        assert!(t.is_empty());
        assert_eq!(t.start(), None);
        assert!(t.is_permutation_of(0));
    }

    #[test]
    fn test_is_permutation_of() {
        assert!(Tour::new(vec![2, 0, 1]).is_permutation_of(3));
        assert!(!Tour::new(vec![0, 0, 1]).is_permutation_of(3));
        assert!(!Tour::new(vec![0, 1]).is_permutation_of(3));
        assert!(!Tour::new(vec![0, 1, 3]).is_permutation_of(3));
    }

    #[test]
    fn test_translate() {
        let t = Tour::new(vec![1, 0]);
        assert_eq!(t.translate(&[5, 9]), Tour::new(vec![9, 5]));
    }

    #[test]
    fn test_rotated_to() {
        let t = Tour::new(vec![3, 1, 0, 2]);
        assert_eq!(t.clone().rotated_to(0).indices(), &[0, 2, 3, 1]);
        assert_eq!(t.clone().rotated_to(3), t);
        assert_eq!(t.clone().rotated_to(9), t);
        assert!(Tour::empty().rotated_to(0).is_empty());
    }

    #[test]
    fn test_start() {
        assert_eq!(Tour::new(vec![4, 1]).start(), Some(4));
    }
}
