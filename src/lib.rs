//! # astromap
//!
//! Greedy **constellation segmentation** of a bright-star catalog.
//!
//! Given the Yale Bright Star Catalog (or any list of stars with a position
//! on the celestial sphere and a visual magnitude), `astromap` partitions the
//! bright stars into disjoint constellation-like groups by repeatedly linking
//! the most visually salient star pair — closest together and/or brightest —
//! while never fusing two already-formed groups.
//!
//! ## Features
//!
//! - **Batch pair scoring** — all N² angular distances and combined
//!   brightness scores are precomputed from per-star trigonometric vectors
//! - **Greedy group formation** — a min-heap over candidate edges drives a
//!   seed/grow/strengthen/reject decision per edge, with a strict no-merge
//!   rule between formed groups
//! - **Deterministic** — identical input and parameters always produce
//!   identical groups
//! - **Catalog caching** — parsed catalogs serialize with
//!   [rkyv](https://docs.rs/rkyv) for instant reloading
//! - **Rendering** — optional `image` feature draws the segmented sky as an
//!   equirectangular PNG
//!
//! ## Example
//!
//! ```no_run
//! use astromap::{BrightStarCatalog, SegmentConfig};
//!
//! // Parse the fixed-width Yale Bright Star Catalog file
//! let catalog = BrightStarCatalog::from_yale_file("data/ybsc5.dat").unwrap();
//!
//! // Segment stars brighter than magnitude 2.5 into groups
//! let config = SegmentConfig {
//!     max_magnitude: 2.5,
//!     ..Default::default()
//! };
//! let segmentation = catalog.segment(&config).unwrap();
//!
//! for group in &segmentation.groups {
//!     let pairs = segmentation.star_pairs(group.id).unwrap();
//!     println!("group {}: {:?}", group.id, pairs);
//! }
//! println!("{} stars ungrouped", segmentation.ungrouped().count());
//! ```
//!
//! ## Algorithm overview
//!
//! 1. **Filter & sort** — drop stars fainter than the magnitude ceiling and
//!    sort ascending by magnitude (brightest first)
//! 2. **Score** — compute the pairwise angular-distance matrix via the
//!    spherical law of cosines and a combined brightness score per pair;
//!    lower scores mark more salient pairings
//! 3. **Select** — pop candidate edges in ascending score order: both
//!    endpoints free seeds a new group, one endpoint free grows its group,
//!    both in one group strengthens it, and an edge between two different
//!    groups is rejected outright
//! 4. **Terminate** — once every star is grouped or no candidates remain;
//!    leftover stars are reported as ungrouped

/// Raw star catalog formats; currently the Yale Bright Star Catalog.
pub mod catalogs;

mod catalog;
pub mod segment;
pub mod star;
#[cfg(feature = "image")]
pub mod starmap;

pub use catalog::BrightStarCatalog;
pub use segment::{Group, SegmentConfig, Segmentation};
pub use star::*;
#[cfg(feature = "image")]
pub use starmap::{StarMap, StarMapConfig};

// Commonly used types
// Note: 32-bit floats are sufficient for the segmentation math; catalog
// parsing keeps 64-bit precision until coordinates are converted.
pub type Vector3 = nalgebra::Vector3<f32>;
