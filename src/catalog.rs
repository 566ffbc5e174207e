//! Brightness-ordered star catalog container.
//!
//! `BrightStarCatalog` owns the parsed, converted stars sorted brightest-first
//! so that index order equals brightness order. Parsing the fixed-width Yale
//! file dominates startup time, so the converted catalog can be serialized
//! with rkyv and reloaded directly on later runs.

use anyhow::Context;
use rkyv::{Archive, Deserialize, Serialize};
use tracing::info;

use crate::catalogs::yale::load_yale_catalog_from_file;
use crate::segment::{SegmentConfig, Segmentation};
use crate::star::{star_from_yale, Star};

/// Catalog of bright stars, sorted by ascending magnitude (brightest first).
#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
pub struct BrightStarCatalog {
    stars: Vec<Star>,
}

impl BrightStarCatalog {
    /// Build a catalog from owned stars, sorting them brightest-first.
    ///
    /// Ties in magnitude are broken by catalog number so the ordering is
    /// reproducible across runs.
    pub fn new(mut stars: Vec<Star>) -> Self {
        stars.sort_by(|a, b| {
            a.mag
                .total_cmp(&b.mag)
                .then_with(|| a.number.cmp(&b.number))
        });
        Self { stars }
    }

    /// Load and convert the Yale Bright Star Catalog from its fixed-width file.
    pub fn from_yale_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let raw = load_yale_catalog_from_file(&path)
            .with_context(|| format!("reading catalog file {:?}", path.as_ref()))?;
        info!("Loaded {} raw Yale catalog entries", raw.len());
        Ok(Self::new(raw.iter().map(star_from_yale).collect()))
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// All stars, brightest first.
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Look up a star by its catalog number.
    pub fn get(&self, number: u32) -> Option<&Star> {
        self.stars.iter().find(|s| s.number == number)
    }

    /// The `n` brightest stars (fewer if the catalog is smaller).
    pub fn brightest(&self, n: usize) -> &[Star] {
        &self.stars[..n.min(self.stars.len())]
    }

    /// Segment the catalog into constellation groups.
    pub fn segment(&self, config: &SegmentConfig) -> anyhow::Result<Segmentation> {
        Segmentation::compute(&self.stars, config)
    }

    // ── Serialization ───────────────────────────────────────────────────────

    /// Serialize the catalog to bytes using rkyv.
    pub fn to_rkyv_bytes(&self) -> anyhow::Result<Vec<u8>> {
        let bytes = rkyv::to_bytes::<rkyv::rancor::Error>(self)
            .map_err(|e| anyhow::anyhow!("rkyv serialization failed: {}", e))?;
        Ok(bytes.to_vec())
    }

    /// Save the converted catalog to a file using rkyv.
    pub fn save_to_file(&self, path: &str) -> anyhow::Result<()> {
        let bytes = self.to_rkyv_bytes()?;
        std::fs::write(path, &bytes)?;
        info!("Saved catalog to {} ({} bytes)", path, bytes.len());
        Ok(())
    }

    /// Load a converted catalog from an rkyv file.
    pub fn load_from_file(path: &str) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path)?;
        let catalog = rkyv::from_bytes::<Self, rkyv::rancor::Error>(&bytes)
            .map_err(|e| anyhow::anyhow!("rkyv deserialization failed: {}", e))?;
        info!("Loaded catalog: {} stars", catalog.len());
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star(number: u32, mag: f32) -> Star {
        Star {
            number,
            azimuth_rad: number as f32 * 0.1,
            zenith_rad: 1.0,
            mag,
        }
    }

    #[test]
    fn catalog_sorts_brightest_first() {
        let catalog = BrightStarCatalog::new(vec![star(1, 3.5), star(2, -1.4), star(3, 0.9)]);
        let numbers: Vec<u32> = catalog.stars().iter().map(|s| s.number).collect();
        assert_eq!(numbers, vec![2, 3, 1]);

        assert_eq!(catalog.brightest(2).len(), 2);
        assert_eq!(catalog.brightest(2)[0].number, 2);
        assert_eq!(catalog.brightest(10).len(), 3);
        assert_eq!(catalog.get(3).map(|s| s.mag), Some(0.9));
        assert!(catalog.get(99).is_none());
    }

    #[test]
    fn magnitude_ties_break_by_number() {
        let catalog = BrightStarCatalog::new(vec![star(7, 2.0), star(4, 2.0), star(5, 2.0)]);
        let numbers: Vec<u32> = catalog.stars().iter().map(|s| s.number).collect();
        assert_eq!(numbers, vec![4, 5, 7]);
    }

    #[test]
    fn rkyv_round_trip_preserves_stars() {
        let catalog = BrightStarCatalog::new(vec![star(10, 1.5), star(11, -0.5)]);
        let bytes = catalog.to_rkyv_bytes().unwrap();
        let restored =
            rkyv::from_bytes::<BrightStarCatalog, rkyv::rancor::Error>(&bytes).unwrap();
        assert_eq!(restored.stars(), catalog.stars());
    }
}
