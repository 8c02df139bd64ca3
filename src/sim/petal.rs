// petal.rs - A single falling petal
//
// Petals are never destroyed. Falling out the bottom re-randomizes one in
// place; leaving through a side wraps it to the other side unchanged.

use rand::Rng;

use crate::config::{PetalConfig, Span};
use crate::constants::{MS_PER_SECOND, SWAY_FREQUENCY};
use crate::surface::Viewport;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Petal {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed_x: f32, // px/s
    pub speed_y: f32, // px/s, downward
    pub rotation: f32,
    pub spin: f32, // rad/ms
    pub sway: f32,
}

/// What the boundary check did to a petal this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary {
    Inside,
    Recycled,
    WrappedToRight,
    WrappedToLeft,
}

impl Petal {
    /// New petal somewhere in the band just above the viewport, so a fresh
    /// pool drifts in staggered instead of all at once.
    pub fn spawn<R: Rng + ?Sized>(config: &PetalConfig, view: Viewport, rng: &mut R) -> Self {
        let x = Span::new(0.0, view.width).sample(rng);
        let y = Span::new(-view.height, 0.0).sample(rng);
        let mut petal = Self {
            x,
            y,
            size: 0.0,
            speed_x: 0.0,
            speed_y: 0.0,
            rotation: 0.0,
            spin: 0.0,
            sway: 0.0,
        };
        petal.randomize(config, rng);
        petal
    }

    /// Re-randomize and park just above the top edge.
    pub fn recycle<R: Rng + ?Sized>(&mut self, config: &PetalConfig, view: Viewport, rng: &mut R) {
        self.x = Span::new(0.0, view.width).sample(rng);
        self.randomize(config, rng);
        self.y = -self.size;
    }

    fn randomize<R: Rng + ?Sized>(&mut self, config: &PetalConfig, rng: &mut R) {
        self.size = config.size.sample(rng);
        self.speed_y = config.speed_y.sample(rng);
        self.speed_x = config.speed_x.sample(rng);
        self.rotation = config.rotation.sample(rng);
        self.spin = config.spin.sample(rng);
        self.sway = config.sway.sample(rng);
    }

    /// Integrate `delta_ms` of motion. The sway term follows fall progress
    /// (`y`), not time.
    #[inline]
    pub fn advance(&mut self, delta_ms: f32) {
        self.y += self.speed_y * delta_ms / MS_PER_SECOND;
        self.x += self.speed_x * delta_ms / MS_PER_SECOND;
        self.x += (self.y * SWAY_FREQUENCY).sin() * self.sway;
        self.rotation += self.spin * delta_ms;
    }

    /// Bottom exit wins over side exits. Only the bottom exit re-randomizes.
    pub fn apply_bounds<R: Rng + ?Sized>(
        &mut self,
        config: &PetalConfig,
        view: Viewport,
        rng: &mut R,
    ) -> Boundary {
        if self.y - self.size > view.height {
            self.recycle(config, view, rng);
            Boundary::Recycled
        } else if self.x < -self.size {
            self.x = view.width + self.size;
            Boundary::WrappedToRight
        } else if self.x > view.width + self.size {
            self.x = -self.size;
            Boundary::WrappedToLeft
        } else {
            Boundary::Inside
        }
    }
}
