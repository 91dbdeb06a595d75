//! Texture lookup: constant, checker, noise, and image-backed.

use crate::{material::Color, Perlin};
use ember_math::Vec3;
use image::RgbImage;
use rand::RngCore;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// Trait for color lookup by surface coordinate.
pub trait Texture: Send + Sync {
    /// Color at UV coordinates (u, v) and 3D point p.
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color;
}

/// A single flat color everywhere.
pub struct SolidColor {
    color_value: Color,
}

impl SolidColor {
    pub fn new(color_value: Color) -> Self {
        Self { color_value }
    }

    pub fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(Color::new(r, g, b))
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
        self.color_value
    }
}

/// A 3D checkerboard alternating two textures.
///
/// The pattern is solid: it follows the sign of the product of sines of the
/// scaled world coordinates, so it does not depend on UV parameterization.
pub struct CheckerTexture {
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl CheckerTexture {
    pub fn new(even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self { even, odd }
    }

    pub fn from_colors(even: Color, odd: Color) -> Self {
        Self::new(Arc::new(SolidColor::new(even)), Arc::new(SolidColor::new(odd)))
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color {
        let sines = (10.0 * p.x).sin() * (10.0 * p.y).sin() * (10.0 * p.z).sin();
        if sines < 0.0 {
            self.odd.value(u, v, p)
        } else {
            self.even.value(u, v, p)
        }
    }
}

/// Marble-like texture driven by Perlin turbulence.
pub struct NoiseTexture {
    noise: Perlin,
    scale: f32,
}

impl NoiseTexture {
    pub fn new(scale: f32, rng: &mut dyn RngCore) -> Self {
        Self {
            noise: Perlin::new(rng),
            scale,
        }
    }
}

impl Texture for NoiseTexture {
    fn value(&self, _u: f32, _v: f32, p: Vec3) -> Color {
        Color::ONE * 0.5 * (1.0 + (self.scale * p.z + 10.0 * self.noise.turb(p, 7)).sin())
    }
}

/// Debug color returned when an image texture has no backing data.
const MISSING_IMAGE_COLOR: Color = Color::new(0.0, 1.0, 1.0);

/// An image-sampled texture with nearest-pixel lookup.
pub struct ImageTexture {
    image: Option<RgbImage>,
}

impl ImageTexture {
    /// Load an image from disk.
    ///
    /// Decode failure is non-fatal: the texture falls back to solid cyan and
    /// a warning is logged, so a missing asset never stops a render.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::open(path) {
            Ok(texture) => texture,
            Err(err) => {
                log::warn!(
                    "failed to load texture {}: {err}; using debug color",
                    path.display()
                );
                Self { image: None }
            }
        }
    }

    /// Load an image from disk, surfacing decode errors to the caller.
    pub fn open(path: impl AsRef<Path>) -> TextureResult<Self> {
        let image = image::open(path.as_ref())?.to_rgb8();
        log::debug!(
            "loaded texture {} ({}x{})",
            path.as_ref().display(),
            image.width(),
            image.height()
        );
        Ok(Self { image: Some(image) })
    }

    /// Wrap an already-decoded image.
    pub fn from_image(image: RgbImage) -> Self {
        Self { image: Some(image) }
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f32, v: f32, _p: Vec3) -> Color {
        let Some(image) = &self.image else {
            return MISSING_IMAGE_COLOR;
        };

        // Clamp input coordinates to [0,1], flip V to image row order
        let u = u.clamp(0.0, 1.0);
        let v = 1.0 - v.clamp(0.0, 1.0);

        let mut i = (u * image.width() as f32) as u32;
        let mut j = (v * image.height() as f32) as u32;

        // Clamp the integer mapping, since u == 1.0 would index one past
        if i >= image.width() {
            i = image.width() - 1;
        }
        if j >= image.height() {
            j = image.height() - 1;
        }

        let color_scale = 1.0 / 255.0;
        let pixel = image.get_pixel(i, j);

        Color::new(
            color_scale * pixel[0] as f32,
            color_scale * pixel[1] as f32,
            color_scale * pixel[2] as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_solid_color() {
        let tex = SolidColor::from_rgb(0.2, 0.4, 0.6);
        assert_eq!(tex.value(0.0, 0.0, Vec3::ZERO), Color::new(0.2, 0.4, 0.6));
        assert_eq!(tex.value(0.9, 0.1, Vec3::splat(100.0)), Color::new(0.2, 0.4, 0.6));
    }

    #[test]
    fn test_checker_alternates() {
        let tex = CheckerTexture::from_colors(Color::ONE, Color::ZERO);

        // sin(10 * 0.157) > 0 on all axes: even cell
        let even = tex.value(0.0, 0.0, Vec3::splat(0.157));
        // Flipping one axis sign flips the product's sign
        let odd = tex.value(0.0, 0.0, Vec3::new(-0.157, 0.157, 0.157));

        assert_eq!(even, Color::ONE);
        assert_eq!(odd, Color::ZERO);
    }

    #[test]
    fn test_noise_texture_bounded() {
        let mut rng = StdRng::seed_from_u64(42);
        let tex = NoiseTexture::new(4.0, &mut rng);

        for i in 0..100 {
            let p = Vec3::splat(i as f32 * 0.37);
            let c = tex.value(0.0, 0.0, p);
            assert!(c.x >= 0.0 && c.x <= 1.0);
            assert_eq!(c.x, c.y);
            assert_eq!(c.y, c.z);
        }
    }

    #[test]
    fn test_image_texture_missing_is_cyan() {
        let tex = ImageTexture::load("/definitely/not/a/real/file.png");
        assert_eq!(tex.value(0.5, 0.5, Vec3::ZERO), MISSING_IMAGE_COLOR);
    }

    #[test]
    fn test_image_texture_nearest_lookup_and_v_flip() {
        // 2x2 image: top-left red, top-right green, bottom-left blue, bottom-right white
        let mut image = RgbImage::new(2, 2);
        image.put_pixel(0, 0, image::Rgb([255, 0, 0]));
        image.put_pixel(1, 0, image::Rgb([0, 255, 0]));
        image.put_pixel(0, 1, image::Rgb([0, 0, 255]));
        image.put_pixel(1, 1, image::Rgb([255, 255, 255]));
        let tex = ImageTexture::from_image(image);

        // v=1 maps to the top image row
        let c = tex.value(0.0, 1.0, Vec3::ZERO);
        assert!((c - Color::new(1.0, 0.0, 0.0)).length() < 1e-4);

        // v=0 maps to the bottom image row
        let c = tex.value(0.0, 0.0, Vec3::ZERO);
        assert!((c - Color::new(0.0, 0.0, 1.0)).length() < 1e-4);

        // Out-of-range coordinates clamp instead of wrapping
        let c = tex.value(2.0, -1.0, Vec3::ZERO);
        assert!((c - Color::new(1.0, 1.0, 1.0)).length() < 1e-4);
    }
}
