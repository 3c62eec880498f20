//! The main star field.
//!
//! A fixed pool of stars created once and never destroyed. Every frame each
//! star runs through six stages that compound on the same size, color and
//! position values:
//!
//! 1. drift around the vertical axis plus a small vertical float
//! 2. pointer spotlight with twinkle
//! 3. ripple wave fronts
//! 4. pointer-follow flow field (or coasting when out of range)
//! 5. drag vortex
//! 6. audio spectrum
//!
//! Size and brightness compound multiplicatively; colors are blended and then
//! clamped to [0, 1] per channel.

use crate::buffers::AttributeBuffers;
use crate::config::StarfieldConfig;
use crate::drag::DragState;
use crate::rand::ParticleRng;
use crate::ripple::Ripple;
use stardust_core::force::{falloff, safe_distance, smooth_vec3, wave_front};
use stardust_core::{Color, Vec3};

/// Everything the field reads in one frame
#[derive(Clone, Copy, Debug)]
pub struct StarfieldFrame<'a> {
    pub time: f32,
    pub delta: f32,
    pub pointer: Option<Vec3>,
    pub ripples: &'a [Ripple],
    pub drag: &'a DragState,
    pub audio: Option<&'a [f32]>,
    pub sensitivity: f32,
}

/// Per-star size and color while the stages run
#[derive(Clone, Copy, Debug, PartialEq)]
struct Shade {
    size: f32,
    color: Color,
}

pub struct Starfield {
    config: StarfieldConfig,
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    base_sizes: Vec<f32>,
    base_colors: Vec<Color>,
    smoothed_pointer: Vec3,
    pointer_velocity: Vec3,
    buffers: AttributeBuffers,
}

impl Starfield {
    pub fn new(config: StarfieldConfig, mut rng: ParticleRng) -> Self {
        let count = config.count;
        let mut positions = Vec::with_capacity(count);
        let mut base_sizes = Vec::with_capacity(count);
        let mut base_colors = Vec::with_capacity(count);

        for _ in 0..count {
            let position = if rng.chance(0.3) {
                rng.shell_point(20.0, 50.0)
            } else {
                rng.shell_point(50.0, 120.0)
            };
            positions.push(position);
            base_colors.push(star_color(&mut rng));
            base_sizes.push(rng.next_f32() * rng.next_f32() * 0.8 + 0.1);
        }

        let mut buffers = AttributeBuffers::with_len(count);
        for i in 0..count {
            buffers.write(i, positions[i], base_colors[i], base_sizes[i]);
        }

        log::debug!("starfield: {count} stars");
        Self {
            config,
            positions,
            velocities: vec![Vec3::ZERO; count],
            base_sizes,
            base_colors,
            smoothed_pointer: Vec3::ZERO,
            pointer_velocity: Vec3::ZERO,
            buffers,
        }
    }

    pub fn update(&mut self, frame: &StarfieldFrame<'_>) {
        self.track_pointer(frame.pointer);

        let count = self.positions.len();
        let audio = frame.audio.filter(|a| !a.is_empty());
        // Follow and spotlight only apply while the pointer resolves
        let pointer = frame.pointer.map(|_| self.smoothed_pointer);
        let drag_active = frame.drag.dragging || frame.drag.intensity > 0.0;

        for i in 0..count {
            let mut position = drift(self.positions[i], i, frame.time, frame.delta);

            let distance = pointer.map(|p| safe_distance(position, p));
            let intensity = distance
                .map(|d| falloff(d, self.config.spotlight_radius))
                .unwrap_or(0.0);
            let mut shade = spotlight(
                self.base_sizes[i],
                self.base_colors[i],
                intensity,
                frame.time,
                i,
            );

            apply_ripples(&mut shade, position, frame.ripples, self.config.ripple_band);

            let velocity = &mut self.velocities[i];
            match (pointer, distance) {
                (Some(target), Some(d)) if falloff(d, self.config.follow_radius) > 0.0 => {
                    let ctx = FollowContext {
                        target,
                        distance: d,
                        influence: falloff(d, self.config.follow_radius),
                        pointer_velocity: self.pointer_velocity,
                        time: frame.time,
                        index: i,
                    };
                    position = follow(position, velocity, &ctx, &self.config);
                }
                _ => {
                    *velocity *= self.config.coast_damping;
                    position += *velocity;
                }
            }

            if drag_active {
                position = drag_vortex(
                    position,
                    &mut shade,
                    frame.drag,
                    self.config.drag_radius,
                    frame.time,
                );
            }

            if let Some(bins) = audio {
                let value = audio_bin(bins, i, count);
                apply_audio(&mut shade, value * frame.sensitivity);
            }

            self.positions[i] = position;
            self.buffers.write(i, position, shade.color, shade.size);
        }
    }

    fn track_pointer(&mut self, pointer: Option<Vec3>) {
        match pointer {
            Some(p) => {
                let offset = p - self.smoothed_pointer;
                self.pointer_velocity =
                    smooth_vec3(self.pointer_velocity, offset, self.config.velocity_smoothing);
                self.smoothed_pointer =
                    smooth_vec3(self.smoothed_pointer, p, self.config.pointer_smoothing);
            }
            None => {
                self.pointer_velocity = smooth_vec3(
                    self.pointer_velocity,
                    Vec3::ZERO,
                    self.config.velocity_smoothing,
                );
            }
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn position(&self, index: usize) -> Vec3 {
        self.positions[index]
    }

    pub fn velocity(&self, index: usize) -> Vec3 {
        self.velocities[index]
    }

    pub fn base_size(&self, index: usize) -> f32 {
        self.base_sizes[index]
    }

    pub fn base_color(&self, index: usize) -> Color {
        self.base_colors[index]
    }

    pub fn smoothed_pointer(&self) -> Vec3 {
        self.smoothed_pointer
    }

    pub fn pointer_velocity(&self) -> Vec3 {
        self.pointer_velocity
    }

    pub fn buffers(&self) -> &AttributeBuffers {
        &self.buffers
    }

    /// Zero every star's flow velocity and forget the pointer
    pub fn reset_motion(&mut self) {
        self.velocities.fill(Vec3::ZERO);
        self.smoothed_pointer = Vec3::ZERO;
        self.pointer_velocity = Vec3::ZERO;
    }
}

/// Blue, yellow, red and purple star classes in a 3:3:2:2 ratio
fn star_color(rng: &mut ParticleRng) -> Color {
    let class = rng.next_f32();
    let hue = if class < 0.3 {
        rng.range(0.58, 0.68)
    } else if class < 0.6 {
        rng.range(0.15, 0.20)
    } else if class < 0.8 {
        0.0
    } else {
        rng.range(0.75, 0.85)
    };
    let saturation = rng.range(0.0, 0.4);
    let lightness = rng.range(0.6, 1.0);
    Color::from_hsl(hue, saturation, lightness)
}

fn drift_speed(index: usize) -> f32 {
    0.02 + (index % 20) as f32 * 0.001
}

/// Rotate about the vertical axis by the star's angular speed, then float
fn drift(position: Vec3, index: usize, time: f32, delta: f32) -> Vec3 {
    let radius = (position.x * position.x + position.z * position.z).sqrt();
    let angle = position.z.atan2(position.x) + drift_speed(index) * delta;
    Vec3::new(
        angle.cos() * radius,
        position.y + (time * 0.5 + index as f32 * 0.1).sin() * 0.02,
        angle.sin() * radius,
    )
}

fn twinkle(time: f32, index: usize, intensity: f32) -> f32 {
    let i = index as f32;
    let base = (time * 3.0 + i * 0.5).sin() * 0.3 + 0.7;
    let flicker = (time * 10.0 + i).sin() * intensity;
    base + flicker * 0.5
}

/// Multipliers applied at full spotlight intensity are 5x size and 4x brightness
fn spotlight_multipliers(intensity: f32) -> (f32, f32) {
    (1.0 + intensity * 4.0, 1.0 + intensity * 3.0)
}

fn spotlight(base_size: f32, base_color: Color, intensity: f32, time: f32, index: usize) -> Shade {
    let (size_mult, brightness) = spotlight_multipliers(intensity);
    Shade {
        size: base_size * twinkle(time, index, intensity) * size_mult,
        color: base_color.scaled(brightness).min_one(),
    }
}

/// Strongest wave front wins for size; colors of every front mix in
fn apply_ripples(shade: &mut Shade, position: Vec3, ripples: &[Ripple], band: f32) {
    let mut effect = 0.0f32;
    let mut mix = Color::BLACK;
    for ripple in ripples {
        let distance = position.distance(ripple.origin);
        let strength = wave_front(distance, ripple.radius, band) * ripple.intensity;
        if strength > 0.0 {
            effect = effect.max(strength);
            mix += ripple.color.scaled(strength);
        }
    }
    if effect > 0.0 {
        shade.size *= 1.0 + effect * 3.0;
        shade.color =
            (shade.color.scaled(1.0 - effect * 0.5) + mix.scaled(effect)).min_one();
    }
}

struct FollowContext {
    target: Vec3,
    distance: f32,
    influence: f32,
    pointer_velocity: Vec3,
    time: f32,
    index: usize,
}

/// Flow-field step toward the pointer: damped attraction, an orbital term,
/// the pointer's wake and short-range repulsion
fn follow(
    mut position: Vec3,
    velocity: &mut Vec3,
    ctx: &FollowContext,
    config: &StarfieldConfig,
) -> Vec3 {
    let offset = position - ctx.target;
    let direction = offset * (-1.0 / ctx.distance);

    *velocity = *velocity * config.follow_damping + direction * (ctx.influence * config.follow_force);
    position += *velocity;

    let orbit_angle = ctx.time * 2.0 + ctx.index as f32 * 0.1;
    let orbit = ctx.influence * config.orbit_force;
    position.x += orbit_angle.cos() * offset.y * orbit;
    position.y += orbit_angle.sin() * offset.x * orbit;

    position += ctx.pointer_velocity * (ctx.influence * config.wake_force);

    if ctx.distance < config.repel_radius {
        let repel = (1.0 - ctx.distance / config.repel_radius) * config.repel_force;
        position += offset * repel;
    }
    position
}

/// Inward pull plus a swirl in the XY plane around the drag point
fn drag_vortex(
    mut position: Vec3,
    shade: &mut Shade,
    drag: &DragState,
    radius: f32,
    time: f32,
) -> Vec3 {
    let distance = position.distance(drag.current);
    let influence = falloff(distance, radius) * drag.intensity.clamp(0.0, 1.0);
    if influence <= 0.0 {
        return position;
    }

    let to_center = (drag.current - position).normalized();
    let swirl = Vec3::new(-to_center.y, to_center.x, 0.0);
    position += to_center * (influence * 0.1) + swirl * (influence * 0.15);
    position += drag.velocity * (influence * 0.02);

    shade.size *= 1.0 + influence * 2.0;
    let hue = (time * 2.0 + distance * 0.1).rem_euclid(1.0);
    let rainbow = Color::from_hsl(hue, 0.8, 0.6);
    shade.color =
        (shade.color.scaled(1.0 - influence * 0.7) + rainbow.scaled(influence)).min_one();
    position
}

/// Magnitude of the bin assigned to star `index`; bad values read as 0
fn audio_bin(bins: &[f32], index: usize, count: usize) -> f32 {
    let bin = ((index as f32 / count.max(1) as f32) * bins.len() as f32) as usize;
    let value = bins[bin.min(bins.len() - 1)];
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

fn apply_audio(shade: &mut Shade, influence: f32) {
    shade.size *= 1.0 + influence;
    shade.color = shade.color.scaled(1.0 + influence * 0.5).min_one();
}
