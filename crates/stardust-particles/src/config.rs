//! Field configuration (parsed from TOML)
//!
//! Every default reproduces the tuned constants of the field. A config file
//! only needs the keys it changes:
//!
//! ```toml
//! seed = 7
//!
//! [starfield]
//! count = 3000
//!
//! [[glow.layers]]
//! count = 500
//! scale = 2.0
//! ```

use serde::Serialize;
use stardust_core::{Result, StardustError};
use std::path::Path;

/// Upper bound on any single layer's particle count
pub const MAX_LAYER_PARTICLES: usize = 100_000;

#[derive(Debug, Clone, Serialize)]
pub struct FieldConfig {
    pub seed: u32,
    pub layers: LayerToggles,
    pub starfield: StarfieldConfig,
    pub ripples: RippleConfig,
    pub drag: DragConfig,
    pub bursts: BurstConfig,
    pub trail: TrailConfig,
    pub drag_particles: DragParticlesConfig,
    pub glow: GlowConfig,
    pub magnetic: MagneticConfig,
    pub audio: AudioConfig,
}

/// Optional layers; the main field and the ripple/drag state always run
#[derive(Debug, Clone, Serialize)]
pub struct LayerToggles {
    pub glow: bool,
    pub magnetic: bool,
    pub trail: bool,
    pub bursts: bool,
    pub drag_particles: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StarfieldConfig {
    pub count: usize,
    /// Pointer smoothing factor per frame
    pub pointer_smoothing: f32,
    /// Pointer velocity smoothing factor per frame
    pub velocity_smoothing: f32,
    pub spotlight_radius: f32,
    pub follow_radius: f32,
    pub follow_force: f32,
    pub follow_damping: f32,
    /// Residual velocity decay outside the follow radius
    pub coast_damping: f32,
    pub orbit_force: f32,
    pub wake_force: f32,
    pub repel_radius: f32,
    pub repel_force: f32,
    /// Half-width of a ripple's wave-front band
    pub ripple_band: f32,
    pub drag_radius: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct RippleConfig {
    pub click_max_radius: f32,
    pub click_speed: f32,
    /// Smoothed pointer speed (units/frame) above which movement spawns ripples
    pub move_threshold: f32,
    pub move_chance: f32,
    pub move_speed: f32,
    pub speed_smoothing: f32,
    pub min_intensity: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct DragConfig {
    pub velocity_smoothing: f32,
    pub intensity_scale: f32,
    /// Intensity lost per second after release
    pub fade_rate: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct BurstConfig {
    pub min_particles: usize,
    /// Exclusive upper bound
    pub max_particles: usize,
    pub gravity: f32,
    pub decay: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrailConfig {
    pub capacity: usize,
    /// Minimum seconds between emissions
    pub interval: f32,
    /// Minimum pointer displacement between emissions
    pub min_distance: f32,
    pub decay: f32,
    pub shrink: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct DragParticlesConfig {
    pub capacity: usize,
    pub interval: f32,
    pub damping: f32,
    pub decay: f32,
    pub shrink: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GlowLayerConfig {
    pub count: usize,
    pub scale: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GlowConfig {
    pub radius_min: f32,
    pub radius_max: f32,
    pub spotlight_radius: f32,
    pub pointer_smoothing: f32,
    // Kept last: TOML emits arrays of tables after plain keys
    pub layers: Vec<GlowLayerConfig>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MagneticConfig {
    pub count: usize,
    pub strength: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct AudioConfig {
    pub sensitivity: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED_F1E1,
            layers: LayerToggles::default(),
            starfield: StarfieldConfig::default(),
            ripples: RippleConfig::default(),
            drag: DragConfig::default(),
            bursts: BurstConfig::default(),
            trail: TrailConfig::default(),
            drag_particles: DragParticlesConfig::default(),
            glow: GlowConfig::default(),
            magnetic: MagneticConfig::default(),
            audio: AudioConfig::default(),
        }
    }
}

impl Default for LayerToggles {
    fn default() -> Self {
        Self {
            glow: true,
            magnetic: true,
            trail: true,
            bursts: true,
            drag_particles: true,
        }
    }
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 5000,
            pointer_smoothing: 0.2,
            velocity_smoothing: 0.3,
            spotlight_radius: 35.0,
            follow_radius: 50.0,
            follow_force: 0.08,
            follow_damping: 0.95,
            coast_damping: 0.98,
            orbit_force: 0.03,
            wake_force: 0.3,
            repel_radius: 8.0,
            repel_force: 0.1,
            ripple_band: 5.0,
            drag_radius: 40.0,
        }
    }
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            click_max_radius: 80.0,
            click_speed: 1.5,
            move_threshold: 0.5,
            move_chance: 0.3,
            move_speed: 0.8,
            speed_smoothing: 0.1,
            min_intensity: 0.01,
        }
    }
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            velocity_smoothing: 0.3,
            intensity_scale: 0.05,
            fade_rate: 2.0,
        }
    }
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            min_particles: 30,
            max_particles: 50,
            gravity: 0.5,
            decay: 0.5,
        }
    }
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            capacity: 50,
            interval: 0.02,
            min_distance: 0.1,
            decay: 2.0,
            shrink: 0.5,
        }
    }
}

impl Default for DragParticlesConfig {
    fn default() -> Self {
        Self {
            capacity: 500,
            interval: 0.01,
            damping: 0.98,
            decay: 0.8,
            shrink: 0.3,
        }
    }
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            radius_min: 80.0,
            radius_max: 120.0,
            spotlight_radius: 40.0,
            pointer_smoothing: 0.1,
            layers: vec![
                GlowLayerConfig {
                    count: 1000,
                    scale: 3.0,
                },
                GlowLayerConfig {
                    count: 2000,
                    scale: 1.5,
                },
            ],
        }
    }
}

impl Default for MagneticConfig {
    fn default() -> Self {
        Self {
            count: 200,
            strength: 1.0,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self { sensitivity: 1.0 }
    }
}

impl FieldConfig {
    /// Parse from a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let table: toml::value::Table = toml::from_str(source)?;
        let config = Self::from_toml(&table);
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Build a config from a parsed TOML table
    pub fn from_toml(table: &toml::value::Table) -> Self {
        let mut config = Self::default();

        if let Some(v) = table.get("seed") {
            config.seed = v.as_integer().map(|i| i as u32).unwrap_or(config.seed);
        }

        if let Some(t) = sub_table(table, "layers") {
            let l = &mut config.layers;
            read_bool(t, "glow", &mut l.glow);
            read_bool(t, "magnetic", &mut l.magnetic);
            read_bool(t, "trail", &mut l.trail);
            read_bool(t, "bursts", &mut l.bursts);
            read_bool(t, "drag_particles", &mut l.drag_particles);
        }

        if let Some(t) = sub_table(table, "starfield") {
            let s = &mut config.starfield;
            read_count(t, "count", &mut s.count);
            read_f32(t, "pointer_smoothing", &mut s.pointer_smoothing);
            read_f32(t, "velocity_smoothing", &mut s.velocity_smoothing);
            read_f32(t, "spotlight_radius", &mut s.spotlight_radius);
            read_f32(t, "follow_radius", &mut s.follow_radius);
            read_f32(t, "follow_force", &mut s.follow_force);
            read_f32(t, "follow_damping", &mut s.follow_damping);
            read_f32(t, "coast_damping", &mut s.coast_damping);
            read_f32(t, "orbit_force", &mut s.orbit_force);
            read_f32(t, "wake_force", &mut s.wake_force);
            read_f32(t, "repel_radius", &mut s.repel_radius);
            read_f32(t, "repel_force", &mut s.repel_force);
            read_f32(t, "ripple_band", &mut s.ripple_band);
            read_f32(t, "drag_radius", &mut s.drag_radius);
        }

        if let Some(t) = sub_table(table, "ripples") {
            let r = &mut config.ripples;
            read_f32(t, "click_max_radius", &mut r.click_max_radius);
            read_f32(t, "click_speed", &mut r.click_speed);
            read_f32(t, "move_threshold", &mut r.move_threshold);
            read_f32(t, "move_chance", &mut r.move_chance);
            read_f32(t, "move_speed", &mut r.move_speed);
            read_f32(t, "speed_smoothing", &mut r.speed_smoothing);
            read_f32(t, "min_intensity", &mut r.min_intensity);
        }

        if let Some(t) = sub_table(table, "drag") {
            let d = &mut config.drag;
            read_f32(t, "velocity_smoothing", &mut d.velocity_smoothing);
            read_f32(t, "intensity_scale", &mut d.intensity_scale);
            read_f32(t, "fade_rate", &mut d.fade_rate);
        }

        if let Some(t) = sub_table(table, "bursts") {
            let b = &mut config.bursts;
            read_count(t, "min_particles", &mut b.min_particles);
            read_count(t, "max_particles", &mut b.max_particles);
            read_f32(t, "gravity", &mut b.gravity);
            read_f32(t, "decay", &mut b.decay);
        }

        if let Some(t) = sub_table(table, "trail") {
            let tr = &mut config.trail;
            read_count(t, "capacity", &mut tr.capacity);
            read_f32(t, "interval", &mut tr.interval);
            read_f32(t, "min_distance", &mut tr.min_distance);
            read_f32(t, "decay", &mut tr.decay);
            read_f32(t, "shrink", &mut tr.shrink);
        }

        if let Some(t) = sub_table(table, "drag_particles") {
            let d = &mut config.drag_particles;
            read_count(t, "capacity", &mut d.capacity);
            read_f32(t, "interval", &mut d.interval);
            read_f32(t, "damping", &mut d.damping);
            read_f32(t, "decay", &mut d.decay);
            read_f32(t, "shrink", &mut d.shrink);
        }

        if let Some(t) = sub_table(table, "glow") {
            let g = &mut config.glow;
            read_f32(t, "radius_min", &mut g.radius_min);
            read_f32(t, "radius_max", &mut g.radius_max);
            read_f32(t, "spotlight_radius", &mut g.spotlight_radius);
            read_f32(t, "pointer_smoothing", &mut g.pointer_smoothing);
            if let Some(layers) = t.get("layers").and_then(|v| v.as_array()) {
                g.layers = layers
                    .iter()
                    .filter_map(|v| v.as_table())
                    .map(|lt| {
                        let mut layer = GlowLayerConfig {
                            count: 1000,
                            scale: 1.0,
                        };
                        read_count(lt, "count", &mut layer.count);
                        read_f32(lt, "scale", &mut layer.scale);
                        layer
                    })
                    .collect();
            }
        }

        if let Some(t) = sub_table(table, "magnetic") {
            read_count(t, "count", &mut config.magnetic.count);
            read_f32(t, "strength", &mut config.magnetic.strength);
        }

        if let Some(t) = sub_table(table, "audio") {
            read_f32(t, "sensitivity", &mut config.audio.sensitivity);
        }

        config
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let s = &self.starfield;
        positive("starfield.spotlight_radius", s.spotlight_radius)?;
        positive("starfield.follow_radius", s.follow_radius)?;
        positive("starfield.repel_radius", s.repel_radius)?;
        positive("starfield.ripple_band", s.ripple_band)?;
        positive("starfield.drag_radius", s.drag_radius)?;
        unit("starfield.pointer_smoothing", s.pointer_smoothing)?;
        unit("starfield.velocity_smoothing", s.velocity_smoothing)?;
        unit("starfield.follow_damping", s.follow_damping)?;
        unit("starfield.coast_damping", s.coast_damping)?;

        let r = &self.ripples;
        positive("ripples.click_max_radius", r.click_max_radius)?;
        positive("ripples.click_speed", r.click_speed)?;
        positive("ripples.move_speed", r.move_speed)?;
        unit("ripples.move_chance", r.move_chance)?;
        unit("ripples.speed_smoothing", r.speed_smoothing)?;
        unit("ripples.min_intensity", r.min_intensity)?;

        unit("drag.velocity_smoothing", self.drag.velocity_smoothing)?;
        positive("drag.fade_rate", self.drag.fade_rate)?;

        let b = &self.bursts;
        if b.min_particles == 0 || b.min_particles >= b.max_particles {
            return Err(StardustError::ValueOutOfRange {
                field: "bursts.min_particles".into(),
                min: 1.0,
                max: b.max_particles.saturating_sub(1) as f64,
                value: b.min_particles as f64,
            });
        }
        positive("bursts.decay", b.decay)?;

        if self.trail.capacity == 0 {
            return Err(StardustError::Config("trail.capacity must be non-zero".into()));
        }
        positive("trail.decay", self.trail.decay)?;
        unit("trail.shrink", self.trail.shrink)?;

        positive("drag_particles.decay", self.drag_particles.decay)?;
        unit("drag_particles.damping", self.drag_particles.damping)?;
        unit("drag_particles.shrink", self.drag_particles.shrink)?;

        let g = &self.glow;
        positive("glow.spotlight_radius", g.spotlight_radius)?;
        unit("glow.pointer_smoothing", g.pointer_smoothing)?;
        if g.radius_min < 0.0 || g.radius_min > g.radius_max {
            return Err(StardustError::ValueOutOfRange {
                field: "glow.radius_min".into(),
                min: 0.0,
                max: g.radius_max as f64,
                value: g.radius_min as f64,
            });
        }

        if self.audio.sensitivity < 0.0 || !self.audio.sensitivity.is_finite() {
            return Err(StardustError::ValueOutOfRange {
                field: "audio.sensitivity".into(),
                min: 0.0,
                max: f64::MAX,
                value: self.audio.sensitivity as f64,
            });
        }

        Ok(())
    }
}

fn positive(field: &str, value: f32) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(StardustError::ValueOutOfRange {
            field: field.into(),
            min: f64::MIN_POSITIVE,
            max: f64::MAX,
            value: value as f64,
        })
    }
}

fn unit(field: &str, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(StardustError::ValueOutOfRange {
            field: field.into(),
            min: 0.0,
            max: 1.0,
            value: value as f64,
        })
    }
}

// ── TOML helpers (handle integer/float coercion) ──

fn sub_table<'a>(table: &'a toml::value::Table, key: &str) -> Option<&'a toml::value::Table> {
    table.get(key).and_then(|v| v.as_table())
}

fn toml_f32(v: &toml::Value, default: f32) -> f32 {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
        .unwrap_or(default)
}

fn read_f32(table: &toml::value::Table, key: &str, field: &mut f32) {
    if let Some(v) = table.get(key) {
        *field = toml_f32(v, *field);
    }
}

fn read_bool(table: &toml::value::Table, key: &str, field: &mut bool) {
    if let Some(v) = table.get(key) {
        *field = v.as_bool().unwrap_or(*field);
    }
}

fn read_count(table: &toml::value::Table, key: &str, field: &mut usize) {
    if let Some(v) = table.get(key) {
        let n = v.as_integer().unwrap_or(*field as i64).max(0) as usize;
        if n > MAX_LAYER_PARTICLES {
            log::warn!("{key} = {n} exceeds {MAX_LAYER_PARTICLES}, clamping");
        }
        *field = n.min(MAX_LAYER_PARTICLES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let config = FieldConfig::default();
        config.validate().unwrap();
        assert_eq!(config.starfield.count, 5000);
        assert_eq!(config.trail.capacity, 50);
        assert_eq!(config.glow.layers.len(), 2);
        assert_eq!(config.magnetic.count, 200);
    }

    #[test]
    fn parse_from_toml() {
        let toml_str = r#"
seed = 7

[starfield]
count = 1200
spotlight_radius = 20.5

[ripples]
click_speed = 3

[layers]
magnetic = false

[[glow.layers]]
count = 300
scale = 2.5
"#;
        let config = FieldConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.starfield.count, 1200);
        assert!((config.starfield.spotlight_radius - 20.5).abs() < 1e-6);
        assert!((config.ripples.click_speed - 3.0).abs() < 1e-6);
        assert!(!config.layers.magnetic);
        assert!(config.layers.glow);
        assert_eq!(config.glow.layers.len(), 1);
        assert_eq!(config.glow.layers[0].count, 300);
        // untouched sections keep defaults
        assert!((config.drag.fade_rate - 2.0).abs() < 1e-6);
    }

    #[test]
    fn toml_integer_float_coercion() {
        let config = FieldConfig::from_toml_str("[starfield]\nfollow_radius = 60").unwrap();
        assert!((config.starfield.follow_radius - 60.0).abs() < 1e-6);
    }

    #[test]
    fn counts_are_clamped() {
        let config = FieldConfig::from_toml_str("[starfield]\ncount = 99999999").unwrap();
        assert_eq!(config.starfield.count, MAX_LAYER_PARTICLES);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = FieldConfig::from_toml_str("[ripples]\nclick_speed = 0").unwrap_err();
        assert!(matches!(err, StardustError::ValueOutOfRange { ref field, .. } if field == "ripples.click_speed"));

        let err = FieldConfig::from_toml_str("[bursts]\nmin_particles = 60").unwrap_err();
        assert!(matches!(err, StardustError::ValueOutOfRange { .. }));

        let err = FieldConfig::from_toml_str("[starfield]\nfollow_damping = 1.5").unwrap_err();
        assert!(matches!(err, StardustError::ValueOutOfRange { .. }));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = FieldConfig::from_toml_str("[starfield\ncount = 1").unwrap_err();
        assert!(matches!(err, StardustError::TomlParse(_)));
    }

    #[test]
    fn defaults_round_trip_through_toml() {
        let text = FieldConfig::default().to_toml_string().unwrap();
        let parsed = FieldConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed.starfield.count, 5000);
        assert_eq!(parsed.glow.layers.len(), 2);
        assert!((parsed.glow.layers[1].scale - 1.5).abs() < 1e-6);
    }
}
