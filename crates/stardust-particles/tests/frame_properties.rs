//! Whole-field behaviour checked through the public API

use stardust_core::Vec3;
use stardust_particles::config::{DragConfig, RippleConfig};
use stardust_particles::rand::ParticleRng;
use stardust_particles::{DragTracker, FieldConfig, ParticleField, RippleGenerator};
use stardust_runtime::{
    Camera, FrameClock, FrameInput, FrameSystem, InputState, InteractionEvent, PointResolver,
    PointerEvent,
};

const DT: f32 = 1.0 / 60.0;

fn assert_field_in_range(field: &ParticleField) {
    for layer in field.draw_data() {
        for &s in layer.buffers.sizes() {
            assert!(s >= 0.0 && s.is_finite(), "{:?} size {s}", layer.kind);
        }
        for &c in layer.buffers.colors() {
            assert!((0.0..=1.0).contains(&c), "{:?} color {c}", layer.kind);
        }
    }
}

#[test]
fn full_field_stays_in_range_through_interaction() {
    let mut field = ParticleField::new(FieldConfig::default());
    field.initialize().unwrap();
    assert_eq!(field.starfield().len(), 5000);

    let mut clock = FrameClock::new();
    let bins: Vec<f32> = (0..128).map(|i| (i as f32 / 127.0).powi(2)).collect();

    for frame in 0..240u32 {
        clock.advance(DT as f64);
        let t = clock.time();
        let pointer = Vec3::new((t * 1.7).cos() * 30.0, (t * 1.3).sin() * 20.0, 0.0);

        let mut events = Vec::new();
        match frame {
            30 => events.push(InteractionEvent::Click(pointer)),
            60 => events.push(InteractionEvent::Press(pointer)),
            150 => events.push(InteractionEvent::Release),
            200 => events.push(InteractionEvent::Click(Vec3::ZERO)),
            _ => {}
        }

        let input = FrameInput::idle(t, clock.delta())
            .with_pointer(pointer)
            .with_events(&events)
            .with_audio(&bins);
        field.update(&input).unwrap();
        assert_field_in_range(&field);
        assert!(field.trail().len() <= 50);
        assert!(field.drag_particles().particles().len() <= 500);
    }

    field.shutdown().unwrap();
}

#[test]
fn ripple_retires_within_frame_budget() {
    let mut gen = RippleGenerator::new(RippleConfig::default(), ParticleRng::new(1));
    gen.spawn_click(Vec3::ZERO);
    let budget = (80.0f32 / 1.5).ceil() as usize;
    let mut last = 1.0f32;
    for _ in 0..budget {
        gen.update(DT, None);
        if let Some(r) = gen.ripples().first() {
            assert!(r.intensity <= last);
            last = r.intensity;
        }
    }
    assert!(gen.ripples().is_empty());
}

#[test]
fn bursts_drain_after_five_seconds() {
    let mut field = ParticleField::new(FieldConfig::default());
    let click = [InteractionEvent::Click(Vec3::new(0.0, 5.0, 0.0))];
    field.step(&FrameInput::idle(0.0, DT).with_events(&click));
    let spawned = field.bursts().particle_count();
    assert!((30..50).contains(&spawned));

    for i in 1..=300 {
        field.step(&FrameInput::idle(i as f32 * DT, DT));
    }
    assert_eq!(field.stats().bursts, 0);
}

#[test]
fn drag_release_fades_over_four_tenths_of_a_second() {
    let mut tracker = DragTracker::new(DragConfig::default());
    tracker.press(Vec3::ZERO);
    // 16 units/s drag gives intensity 0.8
    let mut p = Vec3::ZERO;
    for _ in 0..200 {
        p.x += 16.0 * DT;
        tracker.update(DT, Some(p));
    }
    assert!((tracker.state().intensity - 0.8).abs() < 1e-2);

    tracker.release();
    let start = tracker.state().intensity;
    for _ in 0..12 {
        tracker.update(DT, None);
    }
    assert!((tracker.state().intensity - (start - 0.4)).abs() < 1e-2);
    for _ in 0..13 {
        tracker.update(DT, None);
    }
    assert_eq!(tracker.state().intensity, 0.0);
}

#[test]
fn click_without_scene_hit_lands_on_ground_plane() {
    let resolver = PointResolver::new(Camera::default());
    let camera = Camera::default();
    let point = resolver.resolve_click([0.0, 0.0]);

    assert!(point.z.abs() < 1e-3);
    assert!(point.distance(camera.position) > 1.0);
    // Camera at (0, 20, 50) looking at the origin: the center ray hits it
    assert!(point.length() < 1e-1, "{point:?}");
}

#[test]
fn pointer_events_drive_the_field_end_to_end() {
    let resolver = PointResolver::new(Camera::default());
    let mut input = InputState::default();
    let mut field = ParticleField::new(FieldConfig::default());

    input.handle(PointerEvent::Moved { ndc: [0.1, -0.1] }, &resolver);
    input.handle(PointerEvent::Clicked { ndc: [0.1, -0.1] }, &resolver);
    let frame = FrameInput {
        time: 0.0,
        delta: DT,
        pointer: input.pointer(),
        events: input.events(),
        audio: None,
    };
    field.step(&frame);
    input.end_frame();

    assert_eq!(field.ripples().len(), 1);
    assert!(field.ripples()[0].origin.z.abs() < 1e-3);
    assert!(input.events().is_empty());
}
