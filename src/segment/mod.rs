//! Constellation segmentation of a star field.
//!
//! This module partitions the bright stars of a catalog into disjoint
//! "constellation" groups by greedily linking the most salient star pairs.
//! The algorithm:
//!
//! 1. **Scoring**: Filter stars to a magnitude ceiling, sort brightest-first,
//!    and batch-compute the N×N pairwise angular distances and a combined
//!    brightness score per pair (lower = closer together and/or brighter).
//! 2. **Selection**: Repeatedly take the globally best-scoring unprocessed
//!    edge and either seed a new group with it, grow an existing group, or
//!    reject it when it would bridge two already-formed groups.
//!
//! Groups only ever grow from a single seed edge; two groups are never merged,
//! however strong the edge between them. Every edge is processed at most once.

pub mod edge;
pub mod engine;
pub mod pairwise;

use crate::star::Star;

// ── Configuration ───────────────────────────────────────────────────────────

/// Parameters controlling segmentation.
///
/// The pair score is
/// `(mag_u + offset + mag_v + offset)^magnitude_power
///  + distance^distance_power * distance_coefficient`,
/// so `magnitude_power` and `distance_power`/`distance_coefficient` weigh
/// combined dimness against angular separation.
#[derive(Debug, Clone)]
pub struct SegmentConfig {
    /// Faintest visual magnitude to include (inclusive). Default 2.0.
    pub max_magnitude: f32,
    /// Offset added to each magnitude before scoring, shifting bright
    /// (negative-magnitude) stars positive-ward so the power term stays
    /// monotonic. Default 1.5.
    pub magnitude_offset: f32,
    /// Exponent applied to the summed shifted magnitudes. Default 2.0.
    pub magnitude_power: f32,
    /// Exponent applied to the pair's angular distance. Default 2.0.
    pub distance_power: f32,
    /// Weight of the distance term relative to the magnitude term.
    /// Default 16.0.
    pub distance_coefficient: f32,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            max_magnitude: 2.0,
            magnitude_offset: 1.5,
            magnitude_power: 2.0,
            distance_power: 2.0,
            distance_coefficient: 16.0,
        }
    }
}

// ── Results ─────────────────────────────────────────────────────────────────

/// One emergent constellation: a connected set of accepted edges.
///
/// Edge endpoints are positions into [`Segmentation::stars`]. Edges appear in
/// acceptance order; every edge after the first touches at least one star
/// that was already in the group when it was accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Small integer id, assigned in creation order.
    pub id: usize,
    /// Accepted `(u, v)` edge index pairs, `u < v`.
    pub edges: Vec<(usize, usize)>,
}

impl Group {
    /// Positions of all stars in this group, sorted and deduplicated.
    pub fn star_positions(&self) -> Vec<usize> {
        let mut positions: Vec<usize> = self
            .edges
            .iter()
            .flat_map(|&(u, v)| [u, v])
            .collect();
        positions.sort_unstable();
        positions.dedup();
        positions
    }
}

/// Result of one segmentation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Segmentation {
    /// The filtered star set, sorted by ascending magnitude (brightest
    /// first). Edge and membership indices refer to positions in this list,
    /// not to catalog order.
    pub stars: Vec<Star>,
    /// Groups in creation order; `groups[i].id == i`.
    pub groups: Vec<Group>,
    /// Group id for each star position, `None` for ungrouped stars.
    pub membership: Vec<Option<usize>>,
}

impl Segmentation {
    /// Group id containing the star with the given catalog number, if any.
    pub fn group_of(&self, number: u32) -> Option<usize> {
        let position = self.stars.iter().position(|s| s.number == number)?;
        self.membership[position]
    }

    /// Stars that ended the run without a group.
    pub fn ungrouped(&self) -> impl Iterator<Item = &Star> {
        self.stars
            .iter()
            .zip(&self.membership)
            .filter(|(_, m)| m.is_none())
            .map(|(s, _)| s)
    }

    /// A group's accepted edges as catalog-number pairs, for callers that
    /// don't track positional indices. Returns `None` for an unknown group
    /// id.
    pub fn star_pairs(&self, group_id: usize) -> Option<Vec<(u32, u32)>> {
        let group = self.groups.get(group_id)?;
        Some(
            group
                .edges
                .iter()
                .map(|&(u, v)| (self.stars[u].number, self.stars[v].number))
                .collect(),
        )
    }
}
