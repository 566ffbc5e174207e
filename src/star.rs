use rkyv::{Archive, Deserialize, Serialize};

/// A "generic" star type consumed by the segmentation engine.
///
/// Position is stored as spherical (azimuth, zenith) coordinates on the unit
/// sphere: azimuth in `[0, 2π)` and zenith in `[0, π]`, where zenith is the
/// angular offset from the north celestial pole. The magnitude is the visual
/// magnitude from the source catalog (lower = brighter, can be negative).
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
pub struct Star {
    /// Catalog number (HR number for the Yale Bright Star Catalog).
    pub number: u32,
    /// Azimuthal angle in radians, `[0, 2π)`.
    pub azimuth_rad: f32,
    /// Zenith angle (offset from the pole) in radians, `[0, π]`.
    pub zenith_rad: f32,
    /// Apparent visual magnitude.
    pub mag: f32,
}

impl Star {
    /// Unit vector pointing to the star's position on the celestial sphere.
    pub fn uvec(&self) -> nalgebra::Vector3<f32> {
        // fast cosine, sine at once:
        let (azsin, azcos) = self.azimuth_rad.sin_cos();
        let (znsin, zncos) = self.zenith_rad.sin_cos();
        nalgebra::Vector3::new(znsin * azcos, znsin * azsin, zncos)
    }
}

/// Convert a raw Yale Bright Star Catalog record to a generic `Star`.
///
/// The J2000 equatorial position becomes (azimuth, zenith):
/// `azimuth = RA` and `zenith = π/2 − Dec`, so zenith is 0 at the north
/// celestial pole and π at the south pole.
pub fn star_from_yale(star: &crate::catalogs::yale::YaleStar) -> Star {
    Star {
        number: star.number,
        azimuth_rad: star.ra_rad.rem_euclid(std::f64::consts::TAU) as f32,
        zenith_rad: (std::f64::consts::FRAC_PI_2 - star.dec_rad) as f32,
        mag: star.mag,
    }
}
