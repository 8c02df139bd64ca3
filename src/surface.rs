// surface.rs - Viewport and backing-surface scaling
//
// Drawing math is done in logical (CSS) pixels. The backing surface stores
// `logical * ratio` pixels, with the ratio capped to keep fill cost bounded.

use crate::constants::MAX_PIXEL_RATIO;

/// Logical viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }
}

/// Result of a resize: the viewport plus the backing-surface pixel size
/// and the transform scale to install on the drawing context.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceScale {
    pub viewport: Viewport,
    pub ratio: f64,
    pub pixel_width: u32,
    pub pixel_height: u32,
}

impl SurfaceScale {
    pub fn compute(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        let ratio = clamp_ratio(device_pixel_ratio);
        let (width, height) = (width.max(0.0), height.max(0.0));

        Self {
            viewport: Viewport::new(width as f32, height as f32),
            ratio,
            pixel_width: (width * ratio).floor() as u32,
            pixel_height: (height * ratio).floor() as u32,
        }
    }

    /// Canvas `setTransform` arguments: scale on both axes, no skew or offset.
    pub fn transform(&self) -> [f64; 6] {
        [self.ratio, 0.0, 0.0, self.ratio, 0.0, 0.0]
    }
}

// Missing or nonsense ratios fall back to 1, like `devicePixelRatio || 1`.
#[inline]
fn clamp_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio.min(MAX_PIXEL_RATIO)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_density_ratio_is_capped() {
        let s = SurfaceScale::compute(800.0, 600.0, 3.0);
        assert_eq!(s.ratio, 1.5);
        assert_eq!((s.pixel_width, s.pixel_height), (1200, 900));
        assert_eq!(s.viewport, Viewport::new(800.0, 600.0));
    }

    #[test]
    fn low_density_ratio_passes_through() {
        let s = SurfaceScale::compute(1024.0, 768.0, 1.25);
        assert_eq!(s.ratio, 1.25);
        assert_eq!((s.pixel_width, s.pixel_height), (1280, 960));
    }

    #[test]
    fn pixel_size_is_floored() {
        let s = SurfaceScale::compute(333.0, 101.0, 1.5);
        assert_eq!((s.pixel_width, s.pixel_height), (499, 151));
    }

    #[test]
    fn invalid_ratio_falls_back_to_one() {
        assert_eq!(SurfaceScale::compute(10.0, 10.0, 0.0).ratio, 1.0);
        assert_eq!(SurfaceScale::compute(10.0, 10.0, f64::NAN).ratio, 1.0);
    }

    #[test]
    fn resize_is_idempotent() {
        let a = SurfaceScale::compute(640.0, 480.0, 2.0);
        let b = SurfaceScale::compute(640.0, 480.0, 2.0);
        assert_eq!(a, b);
        assert_eq!(a.transform(), [1.5, 0.0, 0.0, 1.5, 0.0, 0.0]);
    }
}
