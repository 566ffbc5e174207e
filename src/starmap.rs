//! Render a segmented star field to a raster image.
//!
//! Produces an equirectangular 2:1 map of the full sky: azimuth along x
//! (mirrored, so the map reads like looking up at the sky), zenith along y.
//! Stars are drawn as filled discs sized by magnitude, and the accepted
//! constellation edges as line segments.
//!
//! Requires the `image` feature to be enabled.

use anyhow::Context;
use image::{Rgba, RgbaImage};
use tracing::info;

use crate::segment::Segmentation;
use crate::star::Star;

/// Configuration for star map rendering.
#[derive(Debug, Clone)]
pub struct StarMapConfig {
    /// Map height is `2^size_exp` pixels (width is twice that, plus
    /// padding). Supported range is 1..=14; larger exponents would overflow
    /// the pixel arithmetic and are rejected at render time.
    /// Default: 9 (512 px tall).
    pub size_exp: u32,
    /// Padding around the field is `height / pad_divisor` pixels.
    /// Default: 16.
    pub pad_divisor: u32,
    /// Base magnitude for star disc sizing: radius grows as
    /// `(star_base − mag)^1.3`. Default: 6.0.
    pub star_base: f32,
    /// Disc radius scale factor, in map units (radians). Default: 0.005.
    pub star_scale: f32,
    /// Background color of the star field. Default: dark violet.
    pub field_color: [u8; 4],
    /// Star disc color. Default: warm white.
    pub star_color: [u8; 4],
    /// Constellation edge color. Default: pale blue.
    pub edge_color: [u8; 4],
}

impl Default for StarMapConfig {
    fn default() -> Self {
        Self {
            size_exp: 9,
            pad_divisor: 16,
            star_base: 6.0,
            star_scale: 0.005,
            field_color: [26, 0, 51, 255],
            star_color: [255, 255, 204, 255],
            edge_color: [140, 160, 255, 255],
        }
    }
}

/// Renderer for one segmentation result.
pub struct StarMap<'a> {
    segmentation: &'a Segmentation,
    config: StarMapConfig,
}

impl<'a> StarMap<'a> {
    pub fn new(segmentation: &'a Segmentation) -> Self {
        Self::with_config(segmentation, StarMapConfig::default())
    }

    pub fn with_config(segmentation: &'a Segmentation, config: StarMapConfig) -> Self {
        Self {
            segmentation,
            config,
        }
    }

    /// Render the star field and constellation edges.
    ///
    /// Panics if `size_exp` is outside its supported range.
    pub fn render(&self) -> RgbaImage {
        assert!(
            (1..=14).contains(&self.config.size_exp),
            "size_exp must be in 1..=14"
        );
        let field_px = 1u32 << self.config.size_exp;
        let pad_px = field_px / self.config.pad_divisor;
        let width = field_px * 2 + pad_px * 2;
        let height = field_px + pad_px * 2;

        // Map units (radians) to pixels: the field is 2π × π.
        let scale = field_px as f32 / std::f32::consts::PI;

        let mut image = RgbaImage::new(width, height);

        // Field background over the full 2π × π extent, padding left dark.
        for y in 0..height {
            for x in 0..width {
                let inside = x >= pad_px
                    && x < pad_px + field_px * 2
                    && y >= pad_px
                    && y < pad_px + field_px;
                let color = if inside {
                    self.config.field_color
                } else {
                    [0, 0, 0, 255]
                };
                image.put_pixel(x, y, Rgba(color));
            }
        }

        let project = |star: &Star| -> (f32, f32) {
            // Mirror azimuth so the map matches an observer looking up.
            let x = pad_px as f32 + (std::f32::consts::TAU - star.azimuth_rad) * scale;
            let y = pad_px as f32 + star.zenith_rad * scale;
            (x, y)
        };

        // Edges under stars.
        for group in &self.segmentation.groups {
            for &(u, v) in &group.edges {
                let (x0, y0) = project(&self.segmentation.stars[u]);
                let (x1, y1) = project(&self.segmentation.stars[v]);
                draw_line(&mut image, x0, y0, x1, y1, self.config.edge_color);
            }
        }

        for star in &self.segmentation.stars {
            let (x, y) = project(star);
            let radius_map = (self.config.star_base - star.mag).powf(1.3).max(1.0)
                * self.config.star_scale;
            draw_disc(&mut image, x, y, radius_map * scale, self.config.star_color);
        }

        image
    }

    /// Render and write the map to a PNG file.
    pub fn save_png<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let image = self.render();
        image
            .save(path.as_ref())
            .with_context(|| format!("writing image to {:?}", path.as_ref()))?;
        info!(
            "Wrote {}x{} star map to {:?}",
            image.width(),
            image.height(),
            path.as_ref()
        );
        Ok(())
    }
}

fn draw_disc(image: &mut RgbaImage, cx: f32, cy: f32, radius: f32, color: [u8; 4]) {
    let r = radius.max(1.0);
    let x_min = (cx - r).floor().max(0.0) as u32;
    let x_max = ((cx + r).ceil() as u32).min(image.width().saturating_sub(1));
    let y_min = (cy - r).floor().max(0.0) as u32;
    let y_max = ((cy + r).ceil() as u32).min(image.height().saturating_sub(1));

    for y in y_min..=y_max {
        for x in x_min..=x_max {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            if dx * dx + dy * dy <= r * r {
                image.put_pixel(x, y, Rgba(color));
            }
        }
    }
}

fn draw_line(image: &mut RgbaImage, x0: f32, y0: f32, x1: f32, y1: f32, color: [u8; 4]) {
    let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as u32;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let x = x0 + (x1 - x0) * t;
        let y = y0 + (y1 - y0) * t;
        if x >= 0.0 && y >= 0.0 && (x as u32) < image.width() && (y as u32) < image.height() {
            image.put_pixel(x as u32, y as u32, Rgba(color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::SegmentConfig;

    fn tiny_sky() -> Segmentation {
        let stars = vec![
            Star {
                number: 1,
                azimuth_rad: 1.0,
                zenith_rad: 1.4,
                mag: 1.5,
            },
            Star {
                number: 2,
                azimuth_rad: 1.1,
                zenith_rad: 1.45,
                mag: 1.8,
            },
        ];
        Segmentation::compute(&stars, &SegmentConfig::default()).unwrap()
    }

    #[test]
    fn renders_expected_dimensions() {
        let seg = tiny_sky();
        let config = StarMapConfig {
            size_exp: 6,
            ..Default::default()
        };
        let image = StarMap::with_config(&seg, config).render();
        // 64 px field, 4 px padding.
        assert_eq!(image.width(), 64 * 2 + 8);
        assert_eq!(image.height(), 64 + 8);
    }

    #[test]
    #[should_panic(expected = "size_exp must be in 1..=14")]
    fn oversized_exponent_is_rejected() {
        let seg = tiny_sky();
        let config = StarMapConfig {
            size_exp: 31,
            ..Default::default()
        };
        StarMap::with_config(&seg, config).render();
    }

    #[test]
    fn stars_and_edges_appear_on_the_field() {
        let seg = tiny_sky();
        assert_eq!(seg.groups.len(), 1);
        let map = StarMap::new(&seg);
        let image = map.render();

        let config = StarMapConfig::default();
        let star_pixels = image
            .pixels()
            .filter(|p| p.0 == config.star_color)
            .count();
        let edge_pixels = image
            .pixels()
            .filter(|p| p.0 == config.edge_color)
            .count();
        assert!(star_pixels > 0, "star discs should be drawn");
        assert!(edge_pixels > 0, "the accepted edge should be drawn");
    }
}
