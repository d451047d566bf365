//! Pointer-painted reveal mask for the portrait.
//!
//! Pointer moves stamp fully opaque discs into a per-pixel alpha mask; every
//! frame the whole mask loses a fixed fraction of its alpha. The browser side
//! composites the portrait image through this mask.

use crate::config::RevealConfig;

/// Alpha below one 8-bit step is treated as fully faded.
const MIN_ALPHA: f32 = 1.0 / 255.0;

#[derive(Clone, Debug)]
pub struct RevealMask {
    width: usize,
    height: usize,
    brush_radius: f64,
    fade_rate: f32,
    alpha: Vec<f32>,
}

impl RevealMask {
    pub fn new(width: usize, height: usize, config: &RevealConfig) -> Self {
        Self {
            width,
            height,
            brush_radius: config.brush_radius,
            fade_rate: config.fade_rate.clamp(0.0, 1.0) as f32,
            alpha: vec![0.0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Paints an opaque disc centered on `(x, y)`, clipped to the mask.
    /// Pixels count as covered when their center lies inside the disc.
    pub fn stamp(&mut self, x: f64, y: f64) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        let r = self.brush_radius;
        let (x0, x1) = pixel_span(x, r, self.width);
        let (y0, y1) = pixel_span(y, r, self.height);
        for py in y0..y1 {
            let dy = py as f64 + 0.5 - y;
            for px in x0..x1 {
                let dx = px as f64 + 0.5 - x;
                if dx * dx + dy * dy <= r * r {
                    self.alpha[py * self.width + px] = 1.0;
                }
            }
        }
    }

    /// One frame of decay.
    pub fn fade(&mut self) {
        let keep = 1.0 - self.fade_rate;
        for a in &mut self.alpha {
            *a *= keep;
            if *a < MIN_ALPHA {
                *a = 0.0;
            }
        }
    }

    /// Zero outside the mask.
    pub fn alpha_at(&self, x: usize, y: usize) -> f32 {
        if x >= self.width || y >= self.height {
            return 0.0;
        }
        self.alpha[y * self.width + x]
    }

    pub fn is_clear(&self) -> bool {
        self.alpha.iter().all(|&a| a == 0.0)
    }

    /// Writes the mask as white RGBA pixels. `out` must hold
    /// `width * height * 4` bytes; extra bytes are left untouched.
    pub fn write_rgba(&self, out: &mut [u8]) {
        for (px, &a) in out.chunks_exact_mut(4).zip(&self.alpha) {
            px[0] = 255;
            px[1] = 255;
            px[2] = 255;
            px[3] = (a * 255.0).round() as u8;
        }
    }

    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = vec![0; self.alpha.len() * 4];
        self.write_rgba(&mut out);
        out
    }
}

/// Half-open pixel range touched by `[c - r, c + r]`, clipped to `[0, len)`.
fn pixel_span(c: f64, r: f64, len: usize) -> (usize, usize) {
    let lo = (c - r).floor().clamp(0.0, len as f64) as usize;
    let hi = (c + r).ceil().clamp(0.0, len as f64) as usize;
    (lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask() -> RevealMask {
        RevealMask::new(240, 240, &RevealConfig::default())
    }

    #[test]
    fn stamp_covers_a_disc() {
        let mut m = mask();
        assert!(m.is_clear());
        m.stamp(100.0, 100.0);
        assert_eq!(m.alpha_at(100, 100), 1.0);
        assert_eq!(m.alpha_at(118, 100), 1.0);
        assert_eq!(m.alpha_at(121, 100), 0.0);
        // corner of the bounding box is outside the disc
        assert_eq!(m.alpha_at(118, 118), 0.0);
    }

    #[test]
    fn stamp_clips_at_edges_and_ignores_far_points() {
        let mut m = mask();
        m.stamp(0.0, 0.0);
        assert_eq!(m.alpha_at(0, 0), 1.0);
        assert_eq!(m.alpha_at(239, 239), 0.0);

        let mut m = mask();
        m.stamp(-500.0, 900.0);
        m.stamp(f64::NAN, 10.0);
        assert!(m.is_clear());
    }

    #[test]
    fn fade_decays_geometrically_then_clears() {
        let mut m = mask();
        m.stamp(50.0, 50.0);
        m.fade();
        assert!((m.alpha_at(50, 50) - 0.98).abs() < 1e-6);
        for _ in 0..199 {
            m.fade();
        }
        assert!(!m.is_clear());
        // 0.98^n drops under 1/255 after about 275 frames
        for _ in 0..100 {
            m.fade();
        }
        assert!(m.is_clear());
    }

    #[test]
    fn full_fade_rate_clears_in_one_frame() {
        let cfg = RevealConfig {
            fade_rate: 1.0,
            ..RevealConfig::default()
        };
        let mut m = RevealMask::new(40, 40, &cfg);
        m.stamp(20.0, 20.0);
        m.fade();
        assert!(m.is_clear());
    }

    #[test]
    fn rgba_is_white_with_mask_alpha() {
        let mut m = RevealMask::new(4, 4, &RevealConfig {
            brush_radius: 1.0,
            ..RevealConfig::default()
        });
        m.stamp(1.5, 1.5);
        let rgba = m.to_rgba();
        assert_eq!(rgba.len(), 64);
        let at = |x: usize, y: usize| &rgba[(y * 4 + x) * 4..(y * 4 + x) * 4 + 4];
        assert_eq!(at(1, 1), &[255, 255, 255, 255]);
        assert_eq!(at(3, 3), &[255, 255, 255, 0]);
    }
}
