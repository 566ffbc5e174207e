//! Batch computation of pairwise angular distances and brightness scores.
//!
//! The segmentation engine repeatedly needs random access to the full score
//! matrix, so both matrices are precomputed for all N² pairs up front from
//! per-star sine/cosine and shifted-magnitude vectors, rather than rescored
//! pair by pair during selection.

use std::collections::HashSet;

use anyhow::bail;
use nalgebra::DMatrix;

use super::SegmentConfig;
use crate::star::Star;

/// Pairwise score matrices over a filtered, magnitude-sorted star list.
///
/// Both matrices are N×N and symmetric; only the upper triangle is
/// meaningful to the edge registry. `distances[(u, u)]` is 0 by
/// construction and the brightness diagonal is never read.
#[derive(Debug, Clone)]
pub struct PairwiseScores {
    /// Great-circle angular distance between each star pair, radians.
    pub distances: DMatrix<f32>,
    /// Combined brightness score per pair; lower = more salient.
    pub brightness: DMatrix<f32>,
}

/// Angular distance between two stars on the unit sphere, via the spherical
/// law of cosines:
///
/// `arccos(sin(z1)sin(z2) + cos(z1)cos(z2)cos(az2 − az1))`
///
/// The argument is clamped to `[-1, 1]` before the inverse cosine so that
/// floating-point overshoot on near-coincident stars cannot leave the
/// `acos` domain.
pub fn angular_distance(a: &Star, b: &Star) -> f32 {
    let (a_sin, a_cos) = a.zenith_rad.sin_cos();
    let (b_sin, b_cos) = b.zenith_rad.sin_cos();
    let arg = a_sin * b_sin + a_cos * b_cos * (b.azimuth_rad - a.azimuth_rad).cos();
    arg.clamp(-1.0, 1.0).acos()
}

/// Build the pairwise matrices for an ordered star list.
///
/// Fails fast on input-contract violations (duplicate catalog numbers,
/// non-finite coordinates or magnitudes) rather than producing a partially
/// valid matrix. An empty or single-star list yields degenerate (0×0 or
/// 1×1) matrices and no error.
pub fn build_pairwise(stars: &[Star], config: &SegmentConfig) -> anyhow::Result<PairwiseScores> {
    validate_stars(stars)?;
    let n = stars.len();

    // Per-star terms, computed once.
    let zn_sin: Vec<f32> = stars.iter().map(|s| s.zenith_rad.sin()).collect();
    let zn_cos: Vec<f32> = stars.iter().map(|s| s.zenith_rad.cos()).collect();
    let azimuths: Vec<f32> = stars.iter().map(|s| s.azimuth_rad).collect();
    let shifted_mags: Vec<f32> = stars
        .iter()
        .map(|s| s.mag + config.magnitude_offset)
        .collect();

    let distances = DMatrix::from_fn(n, n, |u, v| {
        if u == v {
            return 0.0;
        }
        let arg = zn_sin[u] * zn_sin[v] + zn_cos[u] * zn_cos[v] * (azimuths[v] - azimuths[u]).cos();
        arg.clamp(-1.0, 1.0).acos()
    });

    let brightness = DMatrix::from_fn(n, n, |u, v| {
        if u == v {
            return 0.0;
        }
        (shifted_mags[u] + shifted_mags[v]).powf(config.magnitude_power)
            + distances[(u, v)].powf(config.distance_power) * config.distance_coefficient
    });

    Ok(PairwiseScores {
        distances,
        brightness,
    })
}

fn validate_stars(stars: &[Star]) -> anyhow::Result<()> {
    let mut seen = HashSet::with_capacity(stars.len());
    for star in stars {
        if !seen.insert(star.number) {
            bail!("duplicate star number {} in segmentation input", star.number);
        }
        if !star.azimuth_rad.is_finite() || !star.zenith_rad.is_finite() {
            bail!(
                "star {} has non-finite coordinates ({}, {})",
                star.number,
                star.azimuth_rad,
                star.zenith_rad
            );
        }
        if !star.mag.is_finite() {
            bail!("star {} has non-finite magnitude {}", star.number, star.mag);
        }
    }
    Ok(())
}
