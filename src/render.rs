// render.rs - Petal silhouette and drawing
//
// Drawing goes through the `Canvas` trait so the frame sequence can be
// checked without a browser. Coordinates are logical (CSS) pixels.

use crate::constants::{PETAL_ALPHA, PETAL_COLOR_INNER, PETAL_COLOR_OUTER, PETAL_TIP};
use crate::error::Result;
use crate::sim::Petal;

/// The subset of a 2d drawing context the petal field needs.
pub trait Canvas {
    fn clear(&mut self, width: f32, height: f32) -> Result<()>;
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f32, y: f32) -> Result<()>;
    fn rotate(&mut self, angle: f32) -> Result<()>;
    fn set_alpha(&mut self, alpha: f64);
    fn fill_petal(&mut self, path: &PetalPath, gradient: &RadialGradient) -> Result<()>;
}

/// Cubic bezier segment: two control points and an end point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bezier {
    pub c1: [f32; 2],
    pub c2: [f32; 2],
    pub to: [f32; 2],
}

/// Closed petal outline in the petal's local frame: from the notch at the
/// top, bulging right down to the tip, then mirrored back up the left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PetalPath {
    pub start: [f32; 2],
    pub right: Bezier,
    pub left: Bezier,
}

impl PetalPath {
    pub fn for_size(s: f32) -> Self {
        let notch = [0.0, -s * PETAL_TIP];
        Self {
            start: notch,
            right: Bezier {
                c1: [s, -s],
                c2: [s, s],
                to: [0.0, s],
            },
            left: Bezier {
                c1: [-s, s],
                c2: [-s, -s],
                to: notch,
            },
        }
    }
}

/// Radial fill from `inner` at the centre to `outer` at `radius`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialGradient {
    pub radius: f32,
    pub inner: &'static str,
    pub outer: &'static str,
}

impl RadialGradient {
    pub fn petal(size: f32) -> Self {
        Self {
            radius: size,
            inner: PETAL_COLOR_INNER,
            outer: PETAL_COLOR_OUTER,
        }
    }
}

/// Draws one petal in its own frame. The transform and alpha are restored
/// afterwards, so petals never leak state into each other.
pub fn draw_petal<C: Canvas + ?Sized>(canvas: &mut C, petal: &Petal) -> Result<()> {
    canvas.save();
    let drawn = fill_in_frame(canvas, petal);
    canvas.restore();
    drawn
}

fn fill_in_frame<C: Canvas + ?Sized>(canvas: &mut C, petal: &Petal) -> Result<()> {
    canvas.translate(petal.x, petal.y)?;
    canvas.rotate(petal.rotation)?;
    canvas.set_alpha(PETAL_ALPHA);
    canvas.fill_petal(
        &PetalPath::for_size(petal.size),
        &RadialGradient::petal(petal.size),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PetalConfig;
    use crate::sim::PetalField;
    use crate::surface::Viewport;
    use std::f32::consts::TAU;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear(f32, f32),
        Save,
        Restore,
        Translate(f32, f32),
        Rotate(f32),
        Alpha(f64),
        Fill(PetalPath, RadialGradient),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Canvas for Recorder {
        fn clear(&mut self, width: f32, height: f32) -> Result<()> {
            self.ops.push(Op::Clear(width, height));
            Ok(())
        }
        fn save(&mut self) {
            self.ops.push(Op::Save);
        }
        fn restore(&mut self) {
            self.ops.push(Op::Restore);
        }
        fn translate(&mut self, x: f32, y: f32) -> Result<()> {
            self.ops.push(Op::Translate(x, y));
            Ok(())
        }
        fn rotate(&mut self, angle: f32) -> Result<()> {
            self.ops.push(Op::Rotate(angle));
            Ok(())
        }
        fn set_alpha(&mut self, alpha: f64) {
            self.ops.push(Op::Alpha(alpha));
        }
        fn fill_petal(&mut self, path: &PetalPath, gradient: &RadialGradient) -> Result<()> {
            self.ops.push(Op::Fill(*path, *gradient));
            Ok(())
        }
    }

    fn sample_petal() -> Petal {
        Petal {
            x: 12.0,
            y: 34.0,
            size: 5.0,
            speed_x: 1.0,
            speed_y: 25.0,
            rotation: 0.7,
            spin: 0.001,
            sway: 0.1,
        }
    }

    #[test]
    fn outline_is_mirrored_and_closed() {
        let path = PetalPath::for_size(5.0);
        assert_eq!(path.start, [0.0, -5.0 * PETAL_TIP]);
        assert_eq!(path.left.to, path.start);
        assert_eq!(path.right.to, [0.0, 5.0]);
        assert_eq!(path.left.c1, [-path.right.c2[0], path.right.c2[1]]);
        assert_eq!(path.left.c2, [-path.right.c1[0], path.right.c1[1]]);
    }

    // Outline points in world space after rotating by `angle` and moving
    // to `(x, y)`.
    fn world_points(path: &PetalPath, x: f32, y: f32, angle: f32) -> Vec<[f32; 2]> {
        let (sin, cos) = angle.sin_cos();
        [
            path.start,
            path.right.c1,
            path.right.c2,
            path.right.to,
            path.left.c1,
            path.left.c2,
            path.left.to,
        ]
        .iter()
        .map(|&[px, py]| [x + px * cos - py * sin, y + px * sin + py * cos])
        .collect()
    }

    #[test]
    fn drawing_is_invariant_under_full_turns() {
        let path = PetalPath::for_size(6.0);
        let base = world_points(&path, 40.0, 80.0, 1.1);
        for turns in [1.0, 3.0, 25.0] {
            let spun = world_points(&path, 40.0, 80.0, 1.1 + TAU * turns);
            for (a, b) in base.iter().zip(spun.iter()) {
                assert!((a[0] - b[0]).abs() < 1e-2 && (a[1] - b[1]).abs() < 1e-2);
            }
        }
    }

    #[test]
    fn petal_is_drawn_in_its_own_frame() {
        let mut canvas = Recorder::default();
        let petal = sample_petal();
        draw_petal(&mut canvas, &petal).unwrap();
        assert_eq!(
            canvas.ops,
            vec![
                Op::Save,
                Op::Translate(12.0, 34.0),
                Op::Rotate(0.7),
                Op::Alpha(0.45),
                Op::Fill(PetalPath::for_size(5.0), RadialGradient::petal(5.0)),
                Op::Restore,
            ]
        );
    }

    #[test]
    fn frame_clears_then_draws_every_petal() {
        let config = PetalConfig {
            count: 6,
            ..PetalConfig::month()
        };
        let mut field = PetalField::with_seed(config, Viewport::new(300.0, 200.0), 9).unwrap();
        let mut canvas = Recorder::default();
        field.frame(16.0, &mut canvas).unwrap();

        assert_eq!(canvas.ops[0], Op::Clear(300.0, 200.0));
        let fills = canvas.ops.iter().filter(|op| matches!(op, Op::Fill(..))).count();
        assert_eq!(fills, 6);
        let saves = canvas.ops.iter().filter(|op| **op == Op::Save).count();
        let restores = canvas.ops.iter().filter(|op| **op == Op::Restore).count();
        assert_eq!(saves, restores);

        // Drawn at the post-step state
        let translates: Vec<_> = canvas
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Translate(x, y) => Some((*x, *y)),
                _ => None,
            })
            .collect();
        let positions: Vec<_> = field.petals().iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(translates, positions);
    }
}
