//! Greedy group-formation loop over the edge registry.
//!
//! Each iteration takes the globally best-scoring unprocessed edge and
//! decides its fate from its endpoints' current memberships:
//!
//! - both unassigned → seed a new group with the edge
//! - one assigned → grow that group, assigning the other endpoint
//! - both in the same group → accept the edge as internal connectivity
//! - in different groups → reject; groups are never merged
//!
//! Every popped edge is permanently processed regardless of the decision, so
//! the loop takes at most one step per edge. It stops early once every star
//! is assigned.

use tracing::{debug, info};

use super::edge::EdgeRegistry;
use super::pairwise::build_pairwise;
use super::{Group, SegmentConfig, Segmentation};
use crate::star::Star;

impl Segmentation {
    /// Segment a star list into constellation groups.
    ///
    /// The input is re-filtered to `config.max_magnitude` and re-sorted by
    /// ascending magnitude (catalog number breaks ties) before edges are
    /// indexed, so callers must not assume input order survives into edge
    /// indices. Fails only on input-contract violations; zero or one
    /// qualifying star yields an empty group list.
    pub fn compute(stars: &[Star], config: &SegmentConfig) -> anyhow::Result<Segmentation> {
        let mut kept: Vec<Star> = stars
            .iter()
            .filter(|s| s.mag <= config.max_magnitude)
            .cloned()
            .collect();
        kept.sort_by(|a, b| {
            a.mag
                .total_cmp(&b.mag)
                .then_with(|| a.number.cmp(&b.number))
        });
        info!(
            "Kept {} of {} stars at magnitude ceiling {:.1}",
            kept.len(),
            stars.len(),
            config.max_magnitude
        );

        let scores = build_pairwise(&kept, config)?;
        let mut registry = EdgeRegistry::new(&kept, &scores);

        let n = kept.len();
        let mut groups: Vec<Group> = Vec::new();
        let mut membership: Vec<Option<usize>> = vec![None; n];
        let mut assigned = 0usize;
        let mut steps = 0usize;

        while assigned < n {
            // No surviving candidate edge: remaining stars end ungrouped.
            let Some((u, v)) = registry.pop_min() else {
                break;
            };
            steps += 1;

            match (membership[u], membership[v]) {
                (None, None) => {
                    let id = groups.len();
                    groups.push(Group {
                        id,
                        edges: vec![(u, v)],
                    });
                    membership[u] = Some(id);
                    membership[v] = Some(id);
                    assigned += 2;
                    registry.assign_group(u, v, id);
                    debug!("edge ({u}, {v}) seeds group {id}");
                }
                (Some(id), None) => {
                    groups[id].edges.push((u, v));
                    membership[v] = Some(id);
                    assigned += 1;
                    registry.assign_group(u, v, id);
                    debug!("edge ({u}, {v}) grows group {id}");
                }
                (None, Some(id)) => {
                    groups[id].edges.push((u, v));
                    membership[u] = Some(id);
                    assigned += 1;
                    registry.assign_group(u, v, id);
                    debug!("edge ({u}, {v}) grows group {id}");
                }
                (Some(a), Some(b)) if a == b => {
                    groups[a].edges.push((u, v));
                    registry.assign_group(u, v, a);
                    debug!("edge ({u}, {v}) strengthens group {a}");
                }
                (Some(a), Some(b)) => {
                    // The no-merge invariant: an edge bridging two formed
                    // groups is discarded, not retried.
                    debug!("edge ({u}, {v}) bridges groups {a} and {b}, rejected");
                }
            }
        }

        info!(
            "Formed {} groups covering {} of {} stars in {} steps",
            groups.len(),
            assigned,
            n,
            steps
        );

        Ok(Segmentation {
            stars: kept,
            groups,
            membership,
        })
    }
}
