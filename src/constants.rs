//! Petal field constants
//!
//! Two presets are shipped: the home view and the month view. They differ
//! only in pool size and random ranges.

use std::f32::consts::PI;

// Home view
pub const HOME_PETAL_COUNT: usize = 40;
pub const HOME_SIZE: (f32, f32) = (3.0, 7.0);
pub const HOME_SPEED_Y: (f32, f32) = (22.0, 44.0);
pub const HOME_SPEED_X: (f32, f32) = (-6.0, 6.0);
pub const HOME_SWAY: (f32, f32) = (-0.15, 0.15);

// Month view
pub const MONTH_PETAL_COUNT: usize = 35;
pub const MONTH_SIZE: (f32, f32) = (3.0, 6.5);
pub const MONTH_SPEED_Y: (f32, f32) = (20.0, 40.0);
pub const MONTH_SPEED_X: (f32, f32) = (-5.0, 5.0);
pub const MONTH_SWAY: (f32, f32) = (-0.125, 0.125);

// Shared by both views
pub const MAX_PETAL_COUNT: usize = 1000;
pub const ROTATION: (f32, f32) = (0.0, PI);
pub const SPIN: (f32, f32) = (-0.01, 0.01); // rad/ms

// Motion
pub const SWAY_FREQUENCY: f32 = 0.01;
pub const MS_PER_SECOND: f32 = 1000.0;

// Surface
pub const MAX_PIXEL_RATIO: f64 = 1.5;

// Look
pub const PETAL_ALPHA: f64 = 0.45;
pub const PETAL_COLOR_INNER: &str = "#ffe6ef";
pub const PETAL_COLOR_OUTER: &str = "#f6c4d4";
pub const PETAL_TIP: f32 = 0.6;
