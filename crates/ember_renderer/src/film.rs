//! Accumulation buffer for progressive rendering.

use crate::material::Color;

/// Running per-pixel radiance sums plus the number of completed passes.
///
/// Storage is column-major: column `x` occupies `pixels[x * height ..
/// (x + 1) * height]`, so `chunks_mut(height)` hands each worker thread a
/// disjoint mutable column slice.
pub struct Film {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    passes: u32,
}

impl Film {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
            passes: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of samples accumulated into every pixel so far.
    pub fn passes(&self) -> u32 {
        self.passes
    }

    /// Mutable per-column slices, left to right. Each slice holds the column
    /// bottom-up: index `y` is `y` pixels above the frame's bottom edge.
    pub fn columns_mut(&mut self) -> impl Iterator<Item = (usize, &mut [Color])> {
        self.pixels.chunks_mut(self.height as usize).enumerate()
    }

    /// Record that one full sample pass has been accumulated.
    pub fn complete_pass(&mut self) {
        self.passes += 1;
    }

    /// Mean radiance of pixel (x, y), with y measured from the bottom.
    pub fn mean(&self, x: u32, y: u32) -> Color {
        let sum = self.pixels[(x * self.height + y) as usize];
        if self.passes == 0 {
            Color::ZERO
        } else {
            sum / self.passes as f32
        }
    }

    /// Resolve the accumulator to 8-bit RGBA rows, top row first.
    ///
    /// Applies gamma correction (`value^(1/gamma)`) after averaging.
    /// Non-finite components, which a degenerate sample can produce,
    /// resolve to zero instead of poisoning the output.
    pub fn to_rgba(&self, gamma: f32) -> Vec<u8> {
        let mut out = Vec::with_capacity((self.width * self.height * 4) as usize);
        let inv_gamma = 1.0 / gamma;

        for y in (0..self.height).rev() {
            for x in 0..self.width {
                let mean = self.mean(x, y);
                for channel in [mean.x, mean.y, mean.z] {
                    let value = if channel.is_finite() { channel } else { 0.0 };
                    let corrected = value.powf(inv_gamma).clamp(0.0, 1.0);
                    out.push((corrected * 255.0) as u8);
                }
                out.push(255);
            }
        }
        out
    }
}
