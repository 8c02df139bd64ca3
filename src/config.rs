//! Petal field configuration

use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::constants::*;
use crate::error::{PetalError, Result};

/// Half-open uniform range `[min, max)`. A degenerate span always yields `min`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    const fn from_pair(pair: (f32, f32)) -> Self {
        Self::new(pair.0, pair.1)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.max <= self.min {
            return self.min;
        }
        rng.gen_range(self.min..self.max)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && (value < self.max || value == self.min)
    }

    fn check(&self, field: &'static str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(PetalError::invalid(field, "must have finite bounds"));
        }
        if self.min > self.max {
            return Err(PetalError::invalid(
                field,
                format!("is inverted ({} > {})", self.min, self.max),
            ));
        }
        if !(self.max - self.min).is_finite() {
            return Err(PetalError::invalid(
                field,
                format!("is too wide ({} to {})", self.min, self.max),
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    Home,
    Month,
}

impl Preset {
    pub fn config(self) -> PetalConfig {
        match self {
            Preset::Home => PetalConfig::home(),
            Preset::Month => PetalConfig::month(),
        }
    }
}

impl FromStr for Preset {
    type Err = PetalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "home" | "main" => Ok(Preset::Home),
            "month" => Ok(Preset::Month),
            _ => Err(PetalError::UnknownPreset(s.to_string())),
        }
    }
}

/// Tunables for one petal field. Every petal attribute is drawn from its
/// span at creation and again at each recycle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PetalConfig {
    pub count: usize,
    /// Radius in CSS pixels.
    pub size: Span,
    /// Downward speed, px/s. Must stay positive.
    pub speed_y: Span,
    /// Lateral drift, px/s.
    pub speed_x: Span,
    pub rotation: Span,
    /// Angular velocity, rad/ms.
    pub spin: Span,
    pub sway: Span,
    pub seed: Option<u64>,
}

impl Default for PetalConfig {
    fn default() -> Self {
        Self::home()
    }
}

impl PetalConfig {
    pub fn home() -> Self {
        Self {
            count: HOME_PETAL_COUNT,
            size: Span::from_pair(HOME_SIZE),
            speed_y: Span::from_pair(HOME_SPEED_Y),
            speed_x: Span::from_pair(HOME_SPEED_X),
            rotation: Span::from_pair(ROTATION),
            spin: Span::from_pair(SPIN),
            sway: Span::from_pair(HOME_SWAY),
            seed: None,
        }
    }

    pub fn month() -> Self {
        Self {
            count: MONTH_PETAL_COUNT,
            size: Span::from_pair(MONTH_SIZE),
            speed_y: Span::from_pair(MONTH_SPEED_Y),
            speed_x: Span::from_pair(MONTH_SPEED_X),
            rotation: Span::from_pair(ROTATION),
            spin: Span::from_pair(SPIN),
            sway: Span::from_pair(MONTH_SWAY),
            seed: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(PetalError::invalid("count", "must be at least 1"));
        }
        if self.count > MAX_PETAL_COUNT {
            return Err(PetalError::invalid(
                "count",
                format!("must be at most {MAX_PETAL_COUNT}, got {}", self.count),
            ));
        }

        self.size.check("size")?;
        self.speed_y.check("speedY")?;
        self.speed_x.check("speedX")?;
        self.rotation.check("rotation")?;
        self.spin.check("spin")?;
        self.sway.check("sway")?;

        if self.size.min <= 0.0 {
            return Err(PetalError::invalid("size", "must be positive"));
        }
        if self.speed_y.min <= 0.0 {
            return Err(PetalError::invalid("speedY", "must be positive"));
        }
        Ok(())
    }

    /// Reads a config handed over from JS: `undefined`/`null` for the home
    /// preset, a bare number for the pool size, a preset name, or a plain
    /// object such as `{ preset: "month", count: 20 }`.
    pub fn from_js(value: &JsValue) -> Result<Self> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        if let Some(count) = value.as_f64() {
            return Self::with_count(count);
        }
        if let Some(name) = value.as_string() {
            return Ok(name.parse::<Preset>()?.config());
        }
        if !value.is_object() {
            return Err(PetalError::invalid(
                "config",
                "must be an object, a number or a preset name",
            ));
        }

        let get = |key: &str| js_sys::Reflect::get(value, &JsValue::from_str(key)).ok();
        Self::from_fields(
            |key| get(key).and_then(|v| v.as_f64()),
            |key| get(key).and_then(|v| v.as_string()),
        )
    }

    /// Home preset with a different pool size.
    pub fn with_count(count: f64) -> Result<Self> {
        let config = Self {
            count: whole_number("count", count)? as usize,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Builds a config from camelCase keys. `number` and `text` look a key
    /// up and return `None` when it is absent or of another type.
    pub fn from_fields(
        number: impl Fn(&str) -> Option<f64>,
        text: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut config = match text("preset") {
            Some(name) => name.parse::<Preset>()?.config(),
            None => Self::default(),
        };

        macro_rules! extract {
            ($($target:expr => $key:expr),* $(,)?) => {
                $(
                    if let Some(num) = number($key) {
                        $target = num as f32;
                    }
                )*
            };
        }

        extract!(
            config.size.min => "sizeMin",
            config.size.max => "sizeMax",
            config.speed_y.min => "speedYMin",
            config.speed_y.max => "speedYMax",
            config.speed_x.min => "speedXMin",
            config.speed_x.max => "speedXMax",
            config.spin.min => "spinMin",
            config.spin.max => "spinMax",
            config.sway.min => "swayMin",
            config.sway.max => "swayMax",
        );

        if let Some(count) = number("count") {
            config.count = whole_number("count", count)? as usize;
        }
        if let Some(seed) = number("seed") {
            config.seed = Some(whole_number("seed", seed)? as u64);
        }

        config.validate()?;
        Ok(config)
    }
}

// JS numbers are doubles; counts and seeds must be exact non-negative
// integers. The range check keeps the later integer cast lossless.
fn whole_number(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value < u64::MAX as f64 {
        Ok(value)
    } else {
        Err(PetalError::invalid(
            field,
            format!("must be a non-negative whole number, got {value}"),
        ))
    }
}
