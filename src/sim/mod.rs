// sim/ - Petal field simulation
//
// A fixed pool of petals, integrated on real elapsed time. The pool is
// filled once and then only mutated in place.

mod petal;

pub use petal::{Boundary, Petal};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::PetalConfig;
use crate::error::Result;
use crate::render::{self, Canvas};
use crate::surface::Viewport;

/// Boundary events from one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    pub recycled: usize,
    pub wrapped: usize,
}

/// Petal field simulator
pub struct PetalField<R = SmallRng> {
    config: PetalConfig,
    view: Viewport,
    petals: Vec<Petal>,
    rng: R,
}

impl PetalField<SmallRng> {
    pub fn with_seed(config: PetalConfig, view: Viewport, seed: u64) -> Result<Self> {
        Self::new(config, view, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> PetalField<R> {
    /// Fills the whole pool up front, staggered above the viewport.
    pub fn new(config: PetalConfig, view: Viewport, mut rng: R) -> Result<Self> {
        config.validate()?;

        let petals = (0..config.count)
            .map(|_| Petal::spawn(&config, view, &mut rng))
            .collect();

        Ok(Self {
            config,
            view,
            petals,
            rng,
        })
    }

    /// Petals keep their state; anything now off-screen is brought back by
    /// the boundary rules on the next step.
    pub fn resize(&mut self, view: Viewport) {
        self.view = view;
    }

    /// Advance every petal by `delta_ms` and apply the boundary policy.
    pub fn step(&mut self, delta_ms: f32) -> StepStats {
        let delta_ms = if delta_ms.is_finite() { delta_ms.max(0.0) } else { 0.0 };
        let mut stats = StepStats::default();

        for petal in &mut self.petals {
            petal.advance(delta_ms);
            match petal.apply_bounds(&self.config, self.view, &mut self.rng) {
                Boundary::Inside => {}
                Boundary::Recycled => stats.recycled += 1,
                Boundary::WrappedToRight | Boundary::WrappedToLeft => stats.wrapped += 1,
            }
        }
        stats
    }

    /// One full frame: clear, step, then draw every petal.
    pub fn frame<C: Canvas + ?Sized>(&mut self, delta_ms: f32, canvas: &mut C) -> Result<StepStats> {
        canvas.clear(self.view.width, self.view.height)?;
        let stats = self.step(delta_ms);
        for petal in &self.petals {
            render::draw_petal(canvas, petal)?;
        }
        Ok(stats)
    }

    pub fn petals(&self) -> &[Petal] {
        &self.petals
    }

    pub fn len(&self) -> usize {
        self.petals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.petals.is_empty()
    }

    pub fn viewport(&self) -> Viewport {
        self.view
    }

    pub fn config(&self) -> &PetalConfig {
        &self.config
    }
}
