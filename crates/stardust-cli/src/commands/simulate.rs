//! Headless simulation: drives the field with a scripted pointer

use anyhow::{bail, Context, Result};
use stardust_core::Vec3;
use stardust_particles::{FieldConfig, ParticleField};
use stardust_runtime::{
    Camera, FrameClock, FrameInput, FrameSystem, InputState, NoAudio, PointResolver,
    PointerEvent, SpectrumAnalyzer, SpectrumSource, DEFAULT_BIN_COUNT,
};

pub struct SimulateArgs {
    pub config: Option<String>,
    pub frames: u32,
    pub fps: f32,
    pub seed: Option<u32>,
    pub audio: bool,
}

/// Sweeping decibel spectrum standing in for a microphone
struct SyntheticAudio {
    analyzer: SpectrumAnalyzer,
    decibels: Vec<f32>,
    time: f32,
}

impl SyntheticAudio {
    fn new(sensitivity: f32) -> Self {
        Self {
            analyzer: SpectrumAnalyzer::new(DEFAULT_BIN_COUNT, sensitivity),
            decibels: vec![-100.0; DEFAULT_BIN_COUNT],
            time: 0.0,
        }
    }

    fn advance(&mut self, delta: f32) {
        self.time += delta;
        let beat = (self.time * std::f32::consts::TAU * 2.0).sin().max(0.0);
        let n = self.decibels.len() as f32;
        for (k, db) in self.decibels.iter_mut().enumerate() {
            let falloff = 1.0 - k as f32 / n;
            let sweep = (self.time * 3.0 + k as f32 * 0.2).sin() * 0.5 + 0.5;
            *db = -100.0 + 70.0 * falloff * (0.4 * sweep + 0.6 * beat);
        }
        self.analyzer.ingest_decibels(&self.decibels);
    }
}

impl SpectrumSource for SyntheticAudio {
    fn is_available(&self) -> bool {
        true
    }

    fn poll(&mut self) -> Option<&[f32]> {
        self.analyzer.spectrum()
    }
}

/// Pointer path in NDC: a slow Lissajous orbit around the screen center
fn pointer_ndc(t: f32) -> [f32; 2] {
    [(t * 0.7).cos() * 0.5, (t * 1.1).sin() * 0.4]
}

pub fn run(args: SimulateArgs) -> Result<()> {
    if !(args.fps > 0.0 && args.fps.is_finite()) {
        bail!("--fps must be positive, got {}", args.fps);
    }

    let mut config = match &args.config {
        Some(path) => FieldConfig::load(path).with_context(|| format!("Failed to load {path}"))?,
        None => FieldConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let seed = config.seed;
    let mut field = ParticleField::new(config);
    field.initialize()?;

    let resolver = PointResolver::new(Camera::default());
    let mut input = InputState::new();
    let mut clock = FrameClock::new();
    let mut synthetic = args.audio.then(|| SyntheticAudio::new(1.0));
    let mut silence = NoAudio;

    let dt = 1.0 / args.fps;
    let frames_per_second = args.fps.round().max(1.0) as u32;
    let drag_start = args.frames / 3;
    let drag_end = args.frames * 2 / 3;

    println!(
        "Simulating {} frame(s) at {} fps (seed {:#x}, audio {})",
        args.frames,
        args.fps,
        seed,
        if synthetic.as_ref().is_some_and(|a| a.is_available()) { "on" } else { "off" }
    );

    for frame in 0..args.frames {
        clock.advance(dt as f64);
        let t = clock.time();
        let ndc = pointer_ndc(t);

        input.handle(PointerEvent::Moved { ndc }, &resolver);
        if frame > 0 && frame % frames_per_second == 0 {
            input.handle(PointerEvent::Clicked { ndc }, &resolver);
        }
        if frame == drag_start {
            input.handle(PointerEvent::Pressed { ndc }, &resolver);
        } else if frame == drag_end {
            input.handle(PointerEvent::Released, &resolver);
        }

        let source: &mut dyn SpectrumSource = match synthetic.as_mut() {
            Some(audio) => {
                audio.advance(clock.delta());
                audio
            }
            None => &mut silence,
        };
        let spectrum = source.poll();
        let frame_input = FrameInput {
            time: t,
            delta: clock.delta(),
            pointer: input.pointer(),
            events: input.events(),
            audio: spectrum,
        };
        field.update(&frame_input)?;
        input.end_frame();

        if (frame + 1) % frames_per_second == 0 {
            let s = field.stats();
            println!(
                "t={:6.2}s ripples={:3} bursts={:2} ({:4} sparks) trail={:2} drag={:4} intensity={:.2}",
                t,
                s.ripples,
                s.bursts,
                s.burst_particles,
                s.trail_points,
                s.drag_particles,
                s.drag_intensity
            );
        }
    }

    let report = InvariantReport::collect(&field);
    field.shutdown()?;
    report.print();
    if !report.ok() {
        bail!("{} invariant violation(s)", report.violations());
    }
    Ok(())
}

/// Range checks over every output buffer after the last frame
struct InvariantReport {
    particles: usize,
    negative_sizes: usize,
    colors_out_of_range: usize,
    non_finite_positions: usize,
    pointer: Vec3,
}

impl InvariantReport {
    fn collect(field: &ParticleField) -> Self {
        let mut report = Self {
            particles: 0,
            negative_sizes: 0,
            colors_out_of_range: 0,
            non_finite_positions: 0,
            pointer: field.starfield().smoothed_pointer(),
        };
        for layer in field.draw_data() {
            let b = layer.buffers;
            report.particles += b.len();
            report.negative_sizes += b.sizes().iter().filter(|s| s.is_nan() || **s < 0.0).count();
            report.colors_out_of_range += b
                .colors()
                .iter()
                .filter(|c| !(0.0..=1.0).contains(*c))
                .count();
            report.non_finite_positions +=
                b.positions().iter().filter(|p| !p.is_finite()).count();
        }
        report
    }

    fn violations(&self) -> usize {
        self.negative_sizes + self.colors_out_of_range + self.non_finite_positions
    }

    fn ok(&self) -> bool {
        self.violations() == 0
    }

    fn print(&self) {
        println!();
        println!("Invariant report ({} particle(s)):", self.particles);
        println!("  sizes >= 0:          {}", status(self.negative_sizes));
        println!("  colors in [0, 1]:    {}", status(self.colors_out_of_range));
        println!("  finite positions:    {}", status(self.non_finite_positions));
        let p = self.pointer;
        println!("  final pointer:       ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z);
    }
}

fn status(failures: usize) -> String {
    if failures == 0 {
        "ok".to_string()
    } else {
        format!("{failures} FAILED")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_audio_is_normalized() {
        let mut audio = SyntheticAudio::new(1.0);
        assert!(audio.poll().is_none());
        for _ in 0..30 {
            audio.advance(1.0 / 60.0);
        }
        let bins = audio.poll().unwrap();
        assert_eq!(bins.len(), DEFAULT_BIN_COUNT);
        assert!(bins.iter().all(|b| (0.0..=0.7 + 1e-4).contains(b)));
        assert!(bins.iter().any(|b| *b > 0.0));
    }

    #[test]
    fn scripted_pointer_stays_on_screen() {
        for i in 0..1000 {
            let [x, y] = pointer_ndc(i as f32 * 0.05);
            assert!(x.abs() <= 0.5 && y.abs() <= 0.4);
        }
    }
}
