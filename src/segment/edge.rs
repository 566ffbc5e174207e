//! Candidate-edge registry: the upper triangle of the pair score matrix.
//!
//! Only pairs `(u, v)` with `u < v` are materialized; the diagonal and lower
//! triangle are never candidates and are distinguishable from edges that were
//! candidates and have since been processed. Minimum-score selection uses a
//! min-heap keyed by `(score, index)`, built once from all candidates, with
//! lazy deletion: popped entries whose edge was already processed are skipped.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use super::pairwise::PairwiseScores;
use crate::star::Star;

// ── Edge score ordering ─────────────────────────────────────────────────────

/// Current selection score of an edge. `None` means the edge has been
/// processed and is permanently out of consideration.
///
/// The ordering is total: an absent score is greater than every real score
/// (so processed edges never win a minimum selection) and two absent scores
/// compare equal. Real scores use IEEE total ordering.
#[derive(Debug, Clone, Copy)]
pub struct EdgeScore(pub Option<f32>);

impl EdgeScore {
    pub const ABSENT: EdgeScore = EdgeScore(None);

    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }
}

impl Ord for EdgeScore {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0, other.0) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.total_cmp(&b),
        }
    }
}

impl PartialOrd for EdgeScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for EdgeScore {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EdgeScore {}

// ── Edge records ────────────────────────────────────────────────────────────

/// One unordered candidate pairing between two distinct stars.
#[derive(Debug, Clone)]
pub struct Edge {
    /// Positions `(u, v)` in the filtered/sorted star list, `u < v`.
    pub index: (usize, usize),
    /// Catalog numbers of the two endpoints.
    pub stars: (u32, u32),
    /// Static combined salience score, computed once and never mutated.
    pub brightness: f32,
    /// Selection score; starts equal to `brightness`, absent once processed.
    pub score: EdgeScore,
    /// Group the edge was accepted into, if any.
    pub group: Option<usize>,
}

/// Registry over all candidate edges of a star list.
///
/// Shrink-only after construction: the only mutations are marking edges
/// processed (via [`EdgeRegistry::pop_min`]) and recording a group
/// assignment.
#[derive(Debug)]
pub struct EdgeRegistry {
    n: usize,
    edges: Vec<Edge>,
    queue: BinaryHeap<Reverse<(EdgeScore, (usize, usize))>>,
}

impl EdgeRegistry {
    /// Materialize the upper triangle of the score matrix into edge records
    /// and seed the selection queue.
    ///
    /// The score matrices must be N×N for the N stars given; a mismatch is a
    /// caller contract violation and panics.
    pub fn new(stars: &[Star], scores: &PairwiseScores) -> Self {
        let n = stars.len();
        assert_eq!(
            (scores.brightness.nrows(), scores.brightness.ncols()),
            (n, n),
            "score matrix dimensions must match the star count"
        );
        let capacity = n * n.saturating_sub(1) / 2;
        let mut edges = Vec::with_capacity(capacity);
        let mut queue = BinaryHeap::with_capacity(capacity);

        for u in 0..n {
            for v in (u + 1)..n {
                let brightness = scores.brightness[(u, v)];
                edges.push(Edge {
                    index: (u, v),
                    stars: (stars[u].number, stars[v].number),
                    brightness,
                    score: EdgeScore(Some(brightness)),
                    group: None,
                });
                queue.push(Reverse((EdgeScore(Some(brightness)), (u, v))));
            }
        }

        Self { n, edges, queue }
    }

    /// Number of candidate edges materialized at construction.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Look up an edge by its index pair. Returns `None` for the diagonal,
    /// the lower triangle, and out-of-range indices: those were never
    /// candidates.
    pub fn get(&self, u: usize, v: usize) -> Option<&Edge> {
        if u < v && v < self.n {
            Some(&self.edges[self.slot(u, v)])
        } else {
            None
        }
    }

    /// All edge records, in `(u, v)` order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Remove and return the index of the minimum-score candidate edge,
    /// marking it processed. Exact score ties resolve to the lowest `(u, v)`
    /// lexicographically. Returns `None` once no candidates remain.
    pub fn pop_min(&mut self) -> Option<(usize, usize)> {
        while let Some(Reverse((_, (u, v)))) = self.queue.pop() {
            let slot = self.slot(u, v);
            if self.edges[slot].score.is_absent() {
                continue; // lazily deleted
            }
            self.edges[slot].score = EdgeScore::ABSENT;
            return Some((u, v));
        }
        None
    }

    /// Record the group an accepted edge was added to.
    pub fn assign_group(&mut self, u: usize, v: usize, group: usize) {
        let slot = self.slot(u, v);
        self.edges[slot].group = Some(group);
    }

    /// Flat position of `(u, v)`, `u < v`, in the row-major upper triangle.
    fn slot(&self, u: usize, v: usize) -> usize {
        debug_assert!(u < v && v < self.n);
        u * (self.n - 1) - u * (u + 1) / 2 + v - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::pairwise::build_pairwise;
    use crate::segment::SegmentConfig;

    fn registry_for(stars: &[Star]) -> EdgeRegistry {
        let scores = build_pairwise(stars, &SegmentConfig::default()).unwrap();
        EdgeRegistry::new(stars, &scores)
    }

    fn star(number: u32, zenith_rad: f32) -> Star {
        Star {
            number,
            azimuth_rad: 0.0,
            zenith_rad,
            mag: 0.0,
        }
    }

    #[test]
    fn absent_scores_sort_after_real_scores() {
        let absent = EdgeScore::ABSENT;
        let low = EdgeScore(Some(-3.0));
        let high = EdgeScore(Some(1e20));

        assert!(low < high);
        assert!(high < absent);
        assert!(absent > low);
        assert_eq!(absent, EdgeScore(None));
        assert_ne!(absent, low);
    }

    #[test]
    fn only_the_upper_triangle_is_materialized() {
        // Zenith gaps along one meridian make distances easy to reason about.
        let stars = vec![star(1, 0.1), star(2, 0.2), star(3, 0.4)];
        let registry = registry_for(&stars);

        assert_eq!(registry.len(), 3);
        assert!(registry.get(0, 1).is_some());
        assert!(registry.get(1, 2).is_some());
        assert!(registry.get(1, 1).is_none(), "no self-loops");
        assert!(registry.get(2, 1).is_none(), "no lower triangle");
        assert!(registry.get(0, 3).is_none(), "out of range");

        let edge = registry.get(0, 2).unwrap();
        assert_eq!(edge.stars, (1, 3));
        assert_eq!(EdgeScore(Some(edge.brightness)), edge.score);
        assert!(edge.group.is_none());
    }

    #[test]
    fn pop_min_yields_ascending_scores_then_none() {
        let stars = vec![star(1, 0.1), star(2, 0.2), star(3, 0.5), star(4, 1.4)];
        let mut registry = registry_for(&stars);

        let mut last = f32::MIN;
        let mut popped = 0;
        while let Some((u, v)) = registry.pop_min() {
            let edge = registry.get(u, v).unwrap();
            assert!(edge.score.is_absent(), "popped edge must be processed");
            assert!(edge.brightness >= last);
            last = edge.brightness;
            popped += 1;
        }
        assert_eq!(popped, 6);
        assert!(registry.pop_min().is_none());
    }

    #[test]
    fn exact_ties_resolve_lexicographically() {
        // Equally spaced along a meridian: (0,1) and (1,2) tie exactly only
        // if the floating-point distances agree, so give them identical
        // coordinates pairwise: stars 0 and 2 coincide.
        let stars = vec![star(1, 0.3), star(2, 0.5), star(3, 0.3)];
        let mut registry = registry_for(&stars);

        // (0,1) and (1,2) have identical geometry and magnitudes; (0,2) is
        // the degenerate zero-distance pair and wins outright.
        assert_eq!(registry.pop_min(), Some((0, 2)));
        assert_eq!(registry.pop_min(), Some((0, 1)));
        assert_eq!(registry.pop_min(), Some((1, 2)));
    }

    #[test]
    #[should_panic(expected = "score matrix dimensions must match")]
    fn mismatched_score_matrix_is_rejected_at_construction() {
        let five = vec![
            star(1, 0.1),
            star(2, 0.2),
            star(3, 0.4),
            star(4, 0.8),
            star(5, 1.6),
        ];
        let scores = build_pairwise(&five, &SegmentConfig::default()).unwrap();
        // An oversized matrix would otherwise be silently accepted, and an
        // undersized one would fail with a bare index panic mid-loop.
        EdgeRegistry::new(&five[..3], &scores);
    }

    #[test]
    fn empty_star_list_has_no_candidates() {
        let mut registry = registry_for(&[]);
        assert!(registry.is_empty());
        assert!(registry.pop_min().is_none());
    }
}
