//! Planar overlay of one or two polygons.
//!
//! Edges are split against each other over a y-sorted edge list, welded
//! into a vertex pool and merged, so that no two remaining edges cross or
//! overlap. Each merged edge then learns the winding numbers on both of its
//! sides from a ray cast, and the edges separating inside from outside are
//! chained back into rings.

use crate::polygon::core::edge_crossing;
use crate::polygon::{polygon_signed_area, Contour, Direction, Polygon};
use crate::primitives::{Point2, Segment2};
use crate::tolerance::{segments_intersect, SegmentIntersection, VertexPool};
use std::collections::HashMap;

/// Per-operand winding numbers.
pub(crate) type Winding = [i32; 2];

#[derive(Debug, Clone, Copy)]
struct InputEdge {
    segment: Segment2<f64>,
    weight: Winding,
}

/// Edge between two pool vertices, stored with `from < to`.
#[derive(Debug, Clone, Copy)]
struct MergedEdge {
    from: usize,
    to: usize,
    weight: Winding,
}

/// Non-crossing edge graph over up to two operands.
pub(crate) struct Overlay {
    pool: VertexPool,
    edges: Vec<MergedEdge>,
    epsilon: f64,
}

impl Overlay {
    /// Builds the overlay. Operand `k` contributes its edges with weight
    /// slot `k`.
    pub(crate) fn new(operands: &[&Polygon], epsilon: f64) -> Self {
        assert!(operands.len() <= 2, "overlay takes at most two operands");

        let input = collect_edges(operands, epsilon);
        let cuts = split_points(&input, epsilon);

        let mut pool = VertexPool::new(epsilon);
        let mut merged: HashMap<(usize, usize), Winding> = HashMap::new();
        let mut sub_edges = 0usize;

        for (edge, points) in input.iter().zip(cuts) {
            let ids = cut_ids(edge.segment, points, &mut pool);
            for pair in ids.windows(2) {
                let (u, v) = (pair[0], pair[1]);
                sub_edges += 1;
                let (key, sign) = if u < v { ((u, v), 1) } else { ((v, u), -1) };
                let slot = merged.entry(key).or_insert([0, 0]);
                slot[0] += sign * edge.weight[0];
                slot[1] += sign * edge.weight[1];
            }
        }

        let mut edges: Vec<MergedEdge> = merged
            .into_iter()
            .filter(|(_, weight)| *weight != [0, 0])
            .map(|((from, to), weight)| MergedEdge { from, to, weight })
            .collect();
        edges.sort_unstable_by_key(|e| (e.from, e.to));

        log::trace!(
            target: "pathpoly::kernel",
            "overlay: {} input edges, {} sub-edges, {} merged edges, {} vertices",
            input.len(),
            sub_edges,
            edges.len(),
            pool.len()
        );

        Self {
            pool,
            edges,
            epsilon,
        }
    }

    #[cfg(test)]
    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Boundary of the region where `inside` holds, as rings that keep the
    /// filled side on their math-right, flagged `Ascending`.
    pub(crate) fn extract<P>(&self, inside: P) -> Polygon
    where
        P: Fn(Winding) -> bool,
    {
        let mut directed = Vec::new();
        for (i, edge) in self.edges.iter().enumerate() {
            let (left, right) = self.side_windings(i);
            match (inside(left), inside(right)) {
                (false, true) => directed.push((edge.from, edge.to)),
                (true, false) => directed.push((edge.to, edge.from)),
                _ => {}
            }
        }

        let mut contours: Vec<Contour> = self
            .trace_rings(&directed)
            .into_iter()
            .filter_map(|ring| self.finish_ring(ring))
            .collect();
        contours.sort_by(compare_contours);

        log::trace!(
            target: "pathpoly::kernel",
            "extract: {} boundary edges, {} contours",
            directed.len(),
            contours.len()
        );

        Polygon::from_contours(contours)
    }

    /// Winding numbers to the left and right of edge `index` as traversed
    /// from its `from` vertex to its `to` vertex. Left is the side where
    /// `(to - from) x (p - from) > 0`.
    fn side_windings(&self, index: usize) -> (Winding, Winding) {
        let edge = self.edges[index];
        let a = self.pool.get(edge.from);
        let b = self.pool.get(edge.to);
        let mid = a.midpoint(b);
        let w = edge.weight;

        let left_of = |right: Winding| [right[0] + w[0], right[1] + w[1]];
        let right_of = |left: Winding| [left[0] - w[0], left[1] - w[1]];

        if a.y != b.y {
            let beyond = self.winding_beside(mid, index, false);
            if b.y > a.y {
                (left_of(beyond), beyond)
            } else {
                (beyond, right_of(beyond))
            }
        } else {
            // horizontal: cast toward +y instead, by casting toward +x in
            // transposed space, where the reflection negates the count
            let t = self.winding_beside(mid.transposed(), index, true);
            let above = [-t[0], -t[1]];
            if b.x > a.x {
                (above, right_of(above))
            } else {
                (left_of(above), above)
            }
        }
    }

    /// Weighted crossings of a ray from `p` toward +x, skipping one edge.
    fn winding_beside(&self, p: Point2<f64>, skip: usize, transposed: bool) -> Winding {
        let mut winding = [0, 0];
        for (i, edge) in self.edges.iter().enumerate() {
            if i == skip {
                continue;
            }
            let mut segment = Segment2::new(self.pool.get(edge.from), self.pool.get(edge.to));
            if transposed {
                segment = segment.transposed();
            }
            let crossing = edge_crossing(segment.start, segment.end, p);
            if crossing != 0 {
                winding[0] += crossing * edge.weight[0];
                winding[1] += crossing * edge.weight[1];
            }
        }
        winding
    }

    /// Chains directed edges into closed vertex-id rings, taking the
    /// sharpest right turn wherever a vertex has several unused exits.
    fn trace_rings(&self, directed: &[(usize, usize)]) -> Vec<Vec<usize>> {
        let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); self.pool.len()];
        for (i, &(from, _)) in directed.iter().enumerate() {
            outgoing[from].push(i);
        }

        let mut used = vec![false; directed.len()];
        let mut rings = Vec::new();

        for start in 0..directed.len() {
            if used[start] {
                continue;
            }
            used[start] = true;

            let (origin, mut current) = directed[start];
            let mut previous = origin;
            let mut ring = vec![origin];
            let mut closed = false;

            for _ in 0..directed.len() {
                if current == origin {
                    closed = true;
                    break;
                }
                ring.push(current);

                let incoming = self.pool.get(current) - self.pool.get(previous);
                let here = self.pool.get(current);
                let turn = |e: usize| {
                    let out = self.pool.get(directed[e].1) - here;
                    incoming.cross(out).atan2(incoming.dot(out))
                };
                let next = outgoing[current]
                    .iter()
                    .copied()
                    .filter(|&e| !used[e])
                    .min_by(|&x, &y| turn(x).total_cmp(&turn(y)));

                match next {
                    Some(e) => {
                        used[e] = true;
                        previous = current;
                        current = directed[e].1;
                    }
                    None => break,
                }
            }

            if closed {
                rings.push(ring);
            } else {
                log::trace!(
                    target: "pathpoly::kernel",
                    "abandoned open chain of {} vertices",
                    ring.len()
                );
            }
        }

        rings
    }

    /// Drops collinear points and empty rings, starts the ring at its
    /// lowest (y, then x) point and closes it.
    fn finish_ring(&self, ids: Vec<usize>) -> Option<Contour> {
        let points: Vec<Point2<f64>> = ids.into_iter().map(|id| self.pool.get(id)).collect();
        let mut ring = remove_collinear(points, self.epsilon);
        if ring.len() < 3 || polygon_signed_area(&ring).abs() <= self.epsilon {
            return None;
        }

        let lowest = ring
            .iter()
            .enumerate()
            .min_by(|(_, p), (_, q)| p.y.total_cmp(&q.y).then(p.x.total_cmp(&q.x)))
            .map(|(i, _)| i)
            .unwrap_or(0);
        ring.rotate_left(lowest);

        Some(Contour::new(ring, Direction::Ascending))
    }
}

fn collect_edges(operands: &[&Polygon], epsilon: f64) -> Vec<InputEdge> {
    let eps_sq = epsilon * epsilon;
    let mut edges = Vec::new();

    for (slot, polygon) in operands.iter().enumerate() {
        for contour in polygon.contours() {
            let w = -contour.direction().sign();
            for (a, b) in contour.edges() {
                if !a.is_finite() || !b.is_finite() || a.distance_squared(b) <= eps_sq {
                    continue;
                }
                let mut weight = [0, 0];
                weight[slot] = w;
                edges.push(InputEdge {
                    segment: Segment2::new(a, b),
                    weight,
                });
            }
        }
    }

    edges
}

/// Every point at which each edge must be cut, endpoints included.
fn split_points(edges: &[InputEdge], epsilon: f64) -> Vec<Vec<Point2<f64>>> {
    let mut cuts: Vec<Vec<Point2<f64>>> = edges
        .iter()
        .map(|e| vec![e.segment.start, e.segment.end])
        .collect();

    let mut order: Vec<usize> = (0..edges.len()).collect();
    order.sort_by(|&i, &j| edges[i].segment.y_range().0.total_cmp(&edges[j].segment.y_range().0));

    for (k, &i) in order.iter().enumerate() {
        let (_, max_y) = edges[i].segment.y_range();
        let (min_x, max_x) = edges[i].segment.x_range();

        for &j in &order[k + 1..] {
            if edges[j].segment.y_range().0 > max_y + epsilon {
                break;
            }
            let (other_min_x, other_max_x) = edges[j].segment.x_range();
            if other_min_x > max_x + epsilon || other_max_x < min_x - epsilon {
                continue;
            }

            match segments_intersect(edges[i].segment, edges[j].segment, epsilon) {
                SegmentIntersection::None => {}
                SegmentIntersection::Point { point, .. } => {
                    let point = snap_to_endpoint(point, edges[i].segment, edges[j].segment, epsilon);
                    cuts[i].push(point);
                    cuts[j].push(point);
                }
                SegmentIntersection::Overlapping { start, end } => {
                    for point in [start, end] {
                        let point = snap_to_endpoint(point, edges[i].segment, edges[j].segment, epsilon);
                        cuts[i].push(point);
                        cuts[j].push(point);
                    }
                }
            }
        }
    }

    cuts
}

fn snap_to_endpoint(
    p: Point2<f64>,
    first: Segment2<f64>,
    second: Segment2<f64>,
    epsilon: f64,
) -> Point2<f64> {
    let eps_sq = epsilon * epsilon;
    [first.start, first.end, second.start, second.end]
        .into_iter()
        .find(|q| q.distance_squared(p) <= eps_sq)
        .unwrap_or(p)
}

/// Pool ids of a segment's cut points in order from start to end, without
/// repeats.
fn cut_ids(
    segment: Segment2<f64>,
    mut points: Vec<Point2<f64>>,
    pool: &mut VertexPool,
) -> Vec<usize> {
    let (origin, d) = (segment.start, segment.direction());
    points.sort_by(|p, q| (*p - origin).dot(d).total_cmp(&(*q - origin).dot(d)));

    let mut ids: Vec<usize> = Vec::with_capacity(points.len());
    for p in points {
        let id = pool.insert(p);
        if ids.last() != Some(&id) {
            ids.push(id);
        }
    }
    ids
}

fn remove_collinear(mut ring: Vec<Point2<f64>>, epsilon: f64) -> Vec<Point2<f64>> {
    let eps_sq = epsilon * epsilon;
    let mut changed = true;

    while changed && ring.len() >= 3 {
        changed = false;
        let n = ring.len();
        for i in 0..n {
            let prev = ring[(i + n - 1) % n];
            let next = ring[(i + 1) % n];
            let e0 = ring[i] - prev;
            let e1 = next - ring[i];
            let cross = e0.cross(e1);
            if cross * cross <= eps_sq * e0.magnitude_squared() * e1.magnitude_squared() {
                ring.remove(i);
                changed = true;
                break;
            }
        }
    }

    ring
}

fn compare_contours(a: &Contour, b: &Contour) -> std::cmp::Ordering {
    let pa = a.points()[0];
    let pb = b.points()[0];
    pa.y.total_cmp(&pb.y)
        .then(pa.x.total_cmp(&pb.x))
        .then(a.len().cmp(&b.len()))
        .then(a.signed_area().total_cmp(&b.signed_area()))
}
