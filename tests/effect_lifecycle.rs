//! Integration tests for effect lifecycles.
//!
//! These tests drive the built-in effects frame by frame through the public
//! API and check that particles decay away and that finished effects are
//! reported dead and dropped.

use rand::rngs::StdRng;
use rand::SeedableRng;
use sparkfx::prelude::*;

// ============================================================================
// Decay
// ============================================================================

#[test]
fn test_particles_shrink_until_removed() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut sparks = presets::sparks();
    sparks.set_lifespan(Lifespan::Frames(5));

    for _ in 0..5 {
        sparks.generate(Vec2::new(100.0, 100.0), &mut rng);
    }
    assert_eq!(sparks.len(), 5);

    let mut previous: Vec<(f32, f32)> = sparks.particles().iter().map(|p| (p.size, p.alpha)).collect();
    let mut frames = 0;
    while !sparks.is_empty() {
        sparks.update();
        frames += 1;
        assert!(frames < 500, "sparks should burn out");

        for p in sparks.particles() {
            assert!(p.size > 0.0 && p.alpha > 0.0, "dead particles must be removed");
        }
        // Survivors keep their order, so each one must match a later entry of
        // the previous frame that was strictly larger and more opaque
        let current: Vec<(f32, f32)> = sparks.particles().iter().map(|p| (p.size, p.alpha)).collect();
        let mut older = previous.iter();
        for (size, alpha) in &current {
            assert!(
                older.any(|(old_size, old_alpha)| size < old_size && alpha < old_alpha),
                "particle grew or brightened"
            );
        }
        previous = current;
    }
    assert!(sparks.is_dead());
}

// ============================================================================
// Systems
// ============================================================================

#[test]
fn test_burst_of_every_preset_finishes() {
    for (name, effect) in presets::library() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut scene = ParticleSystem::new();
        assert!(scene.add("burst", &effect, Placement::at(Vec2::new(400.0, 300.0)).lasting(15)));

        let mut peak = 0;
        for _ in 0..15 {
            scene.generate(Vec2::ZERO, &mut rng);
            scene.update();
            peak = peak.max(scene.particle_count());
        }
        assert!(peak > 0, "{name} never produced particles");

        let mut frames = 0;
        while !scene.is_empty() {
            scene.generate(Vec2::ZERO, &mut rng);
            scene.update();
            frames += 1;
            assert!(frames < 2000, "{name} never finished");
        }
        assert!(scene.is_dead());
        assert_eq!(scene.particle_count(), 0);
    }
}

#[test]
fn test_nested_offsets_accumulate() {
    let mut rng = StdRng::seed_from_u64(1);
    let dot = ParticleGroup::new(GroupParams {
        position: Span2::new(Span::fixed(0.0), Span::fixed(0.0)),
        size: Span::fixed(2.0),
        velocity: Span2::new(Span::fixed(0.0), Span::fixed(0.0)),
        colors: vec![Color::WHITE],
        alpha: Span::fixed(100.0),
        size_decay: FalloffSpan::default(),
        alpha_decay: FalloffSpan::default(),
        density: 1.0,
        shape: ParticleShape::Square,
    });

    let inner = ParticleSystem::new().with("dot", dot, Vec2::new(1.0, 2.0));
    let mut outer = ParticleSystem::new();
    outer.add("inner", &inner.into(), Placement::at(Vec2::new(10.0, 20.0)));
    outer.generate(Vec2::new(100.0, 200.0), &mut rng);

    let Some(Effect::System(inner)) = outer.get("inner") else {
        panic!("expected nested system");
    };
    let Some(Effect::Group(dot)) = inner.get("dot") else {
        panic!("expected group");
    };
    assert_eq!(dot.particles()[0].position, Vec2::new(111.0, 222.0));
}

#[test]
fn test_deactivated_effect_stops_spawning_but_still_ages() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut scene = ParticleSystem::new().with("fire", presets::fire(), Vec2::new(200.0, 200.0));

    for _ in 0..5 {
        scene.generate(Vec2::ZERO, &mut rng);
        scene.update();
    }
    let before = scene.particle_count();
    assert!(before > 0);

    assert!(scene.deactivate_child("fire"));
    scene.generate(Vec2::ZERO, &mut rng);
    scene.update();
    assert!(scene.particle_count() <= before);

    // Nothing is drawn while inactive
    let mut frame = Framebuffer::new(400, 400);
    frame.fill(Color::BLACK);
    scene.draw(&mut frame);
    assert!(frame.as_bytes().chunks(4).all(|px| px == [0, 0, 0, 255]));

    assert!(scene.activate_child("fire"));
    scene.draw(&mut frame);
    assert!(frame.as_bytes().chunks(4).any(|px| px != [0, 0, 0, 255]));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_custom_effect_from_json_runs() {
    let json = r##"{
        "effects": [
            {
                "name": "snow",
                "effect": {
                    "kind": "group",
                    "scale": 50,
                    "params": {
                        "position": { "x": [-100, 100], "y": [0, 0] },
                        "size": [4, 8],
                        "velocity": { "x": [-0.5, 0.5], "y": [1, 2] },
                        "colors": ["rgb(255, 255, 255)", "#ddeeff"],
                        "alpha": [60, 90],
                        "size_decay": { "rate": [0, 0], "linear": [0.02, 0.05] },
                        "alpha_decay": { "rate": [0.01, 0.01], "linear": [0, 0] },
                        "density": 0.25,
                        "shape": "square"
                    }
                }
            }
        ]
    }"##;

    let library = LibraryConfig::from_json(json).unwrap().build().unwrap();
    assert_eq!(library.len(), 1);
    let (name, effect) = &library[0];
    assert_eq!(name, "snow");

    let Effect::Group(snow) = effect else {
        panic!("expected a group");
    };
    assert_eq!(snow.params().size, Span::new(2.0, 4.0));
    assert_eq!(snow.cycle(), 4);

    let mut rng = StdRng::seed_from_u64(9);
    let mut scene = ParticleSystem::new();
    scene.add("snow", effect, Placement::default());
    for _ in 0..8 {
        scene.generate(Vec2::new(200.0, 0.0), &mut rng);
    }
    assert_eq!(scene.particle_count(), 2);
}
