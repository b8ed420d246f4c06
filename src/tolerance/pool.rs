//! Vertex welding through a uniform hash grid.

use crate::primitives::Point2;
use std::collections::HashMap;

/// Deduplicating store of points.
///
/// A point within `epsilon` of one already stored maps to the stored one's
/// id; the first point of a cluster keeps its exact coordinates. Lookups
/// only scan the 3x3 block of grid cells around the query, so the cell size
/// is `epsilon` itself.
#[derive(Debug, Clone)]
pub struct VertexPool {
    points: Vec<Point2<f64>>,
    cells: HashMap<(i64, i64), Vec<usize>>,
    epsilon: f64,
    cell_size: f64,
}

impl VertexPool {
    pub fn new(epsilon: f64) -> Self {
        let epsilon = if epsilon.is_finite() { epsilon.max(0.0) } else { 0.0 };
        Self {
            points: Vec::new(),
            cells: HashMap::new(),
            epsilon,
            cell_size: if epsilon > 0.0 { epsilon } else { 1.0 },
        }
    }

    /// Returns the id of the stored point matching `p`, inserting it first if
    /// there is none.
    pub fn insert(&mut self, p: Point2<f64>) -> usize {
        if let Some(id) = self.find(p) {
            return id;
        }

        let id = self.points.len();
        self.points.push(p);
        self.cells.entry(self.cell_of(p)).or_default().push(id);
        id
    }

    /// Id of a stored point within `epsilon` of `p`.
    pub fn find(&self, p: Point2<f64>) -> Option<usize> {
        let (cx, cy) = self.cell_of(p);
        let eps_sq = self.epsilon * self.epsilon;

        for dx in -1..=1 {
            for dy in -1..=1 {
                let key = (cx.saturating_add(dx), cy.saturating_add(dy));
                if let Some(ids) = self.cells.get(&key) {
                    if let Some(&id) = ids
                        .iter()
                        .find(|&&id| self.points[id].distance_squared(p) <= eps_sq)
                    {
                        return Some(id);
                    }
                }
            }
        }

        None
    }

    #[inline]
    pub fn get(&self, id: usize) -> Point2<f64> {
        self.points[id]
    }

    #[inline]
    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn cell_of(&self, p: Point2<f64>) -> (i64, i64) {
        // float to int casts saturate
        (
            (p.x / self.cell_size).floor() as i64,
            (p.y / self.cell_size).floor() as i64,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welds_within_epsilon() {
        let mut pool = VertexPool::new(0.1);
        let a = pool.insert(Point2::new(1.0, 1.0));
        let b = pool.insert(Point2::new(1.05, 0.98));
        let c = pool.insert(Point2::new(1.2, 1.0));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(pool.len(), 2);
        // first point of the cluster wins
        assert_eq!(pool.get(a), Point2::new(1.0, 1.0));
    }

    #[test]
    fn test_neighbouring_cells() {
        let mut pool = VertexPool::new(0.1);
        let a = pool.insert(Point2::new(0.099, 0.0));
        let b = pool.insert(Point2::new(0.101, 0.0));
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_epsilon_is_exact() {
        let mut pool = VertexPool::new(0.0);
        let a = pool.insert(Point2::new(3.0, 4.0));
        assert_eq!(pool.insert(Point2::new(3.0, 4.0)), a);
        assert_ne!(pool.insert(Point2::new(3.0, 4.000001)), a);
        assert_eq!(pool.find(Point2::new(9.0, 9.0)), None);
    }

    #[test]
    fn test_huge_coordinates() {
        let mut pool = VertexPool::new(1e-9);
        let a = pool.insert(Point2::new(1e300, -1e300));
        assert_eq!(pool.insert(Point2::new(1e300, -1e300)), a);
        assert!(!pool.is_empty());
    }
}
