use bubble_wasm::sim::collision::{reflect, text_clearance};
use bubble_wasm::{FieldConfig, Particle, ParticleField, RandomSource, Rect, Vec2};
use rand::{rngs::StdRng, SeedableRng};

fn hero_text() -> Vec<Rect> {
    vec![
        Rect::new(250.0, 100.0, 300.0, 60.0),
        Rect::new(280.0, 250.0, 240.0, 240.0),
    ]
}

fn no_text() -> Vec<Rect> {
    Vec::new()
}

const LABELS: [&str; 8] = ["About", "Projects", "Resume", "GitHub", "Blog", "Talks", "Music", "Contact"];

#[test]
fn initial_positions_keep_clear_of_text() {
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let field = ParticleField::new(FieldConfig::default(), 800.0, 600.0, LABELS, &hero_text, &mut rng);
        assert_eq!(field.placement_fallbacks(), 0, "seed {seed}");
        for p in field.particles() {
            for rect in hero_text() {
                let d = text_clearance(p.position, &rect);
                assert!(d >= 80.0, "seed {seed}: {} is {d} from {rect:?}", p.label);
            }
        }
    }
}

#[test]
fn covered_canvas_falls_back_after_capped_attempts() {
    let cover = || vec![Rect::new(0.0, 0.0, 800.0, 600.0)];
    let config = FieldConfig {
        max_placement_attempts: 25,
        ..FieldConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(3);
    let field = ParticleField::new(config, 800.0, 600.0, LABELS, &cover, &mut rng);
    assert_eq!(field.len(), LABELS.len());
    assert_eq!(field.placement_fallbacks(), LABELS.len());
    for p in field.particles() {
        assert!((100.0..=700.0).contains(&p.position.x));
        assert!((50.0..=550.0).contains(&p.position.y));
    }
}

#[test]
fn degenerate_text_rects_do_not_block_placement() {
    let hidden = || vec![Rect::new(0.0, 0.0, 800.0, 0.0)];
    let mut rng = StdRng::seed_from_u64(8);
    let field = ParticleField::new(FieldConfig::default(), 800.0, 600.0, LABELS, &hidden, &mut rng);
    assert_eq!(field.placement_fallbacks(), 0);
}

#[test]
fn wall_clamp_holds_every_frame() {
    let mut rng = StdRng::seed_from_u64(21);
    let mut field = ParticleField::from_particles(
        FieldConfig::default(),
        500.0,
        300.0,
        vec![Particle::new("solo", Vec2::new(250.0, 150.0), Vec2::new(7.3, -4.1)).with_size(90.0, 30.0)],
    );
    for _ in 0..2_000 {
        field.tick(&no_text, &mut rng);
        let p = &field.particles()[0];
        assert!(p.position.x >= 45.0 && p.position.x <= 455.0, "x = {}", p.position.x);
        assert!(p.position.y >= 15.0 && p.position.y <= 285.0, "y = {}", p.position.y);
    }
}

#[test]
fn hover_freezes_until_leave() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut field = ParticleField::new(FieldConfig::default(), 600.0, 400.0, LABELS, &no_text, &mut rng);
    for i in 0..field.len() {
        assert!(field.measure(i, 70.0, 28.0));
    }
    for _ in 0..30 {
        field.tick(&no_text, &mut rng);
    }

    let before = field.particles()[2].clone();
    field.set_hovered(2, true);
    for _ in 0..300 {
        field.tick(&hero_text, &mut rng);
        let p = &field.particles()[2];
        assert_eq!(p.velocity, Vec2::ZERO);
        assert_eq!(p.position, before.position);
    }
    field.set_hovered(2, false);
    assert_eq!(field.particles()[2].velocity, before.velocity);
}

#[test]
fn colliding_pair_swaps_velocities() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut field = ParticleField::from_particles(
        FieldConfig::default(),
        800.0,
        600.0,
        vec![
            Particle::new("a", Vec2::new(100.0, 300.0), Vec2::new(2.0, 0.0)).with_size(40.0, 40.0),
            Particle::new("b", Vec2::new(130.0, 300.0), Vec2::new(-2.0, 0.0)).with_size(40.0, 40.0),
        ],
    );
    field.tick(&no_text, &mut rng);
    let (a, b) = (&field.particles()[0], &field.particles()[1]);
    assert_eq!(a.velocity, Vec2::new(-2.0, 0.0));
    assert_eq!(b.velocity, Vec2::new(2.0, 0.0));
    assert!(b.position.x - a.position.x >= 40.0);
    assert_eq!(a.position.y, 300.0);
}

#[test]
fn text_rect_turns_particle_around() {
    let mut rng = StdRng::seed_from_u64(0);
    let wall = || vec![Rect::new(300.0, 0.0, 50.0, 600.0)];
    let mut field = ParticleField::from_particles(
        FieldConfig::default(),
        800.0,
        600.0,
        vec![Particle::new("a", Vec2::new(200.0, 300.0), Vec2::new(3.0, 0.5)).with_size(40.0, 40.0)],
    );
    for _ in 0..200 {
        field.tick(&wall, &mut rng);
        assert!(field.particles()[0].position.x < 300.0);
    }
}

#[test]
fn reflection_matches_formula_for_random_normals() {
    let mut rng = StdRng::seed_from_u64(77);
    for _ in 0..500 {
        let angle = rng.next_f64() * std::f64::consts::TAU;
        let n = Vec2::new(angle.cos(), angle.sin());
        let v = Vec2::new(rng.symmetric(5.0), rng.symmetric(5.0));
        let r = reflect(v, n);
        let d = v.dot(n);
        assert!((r.x - (v.x - 2.0 * d * n.x)).abs() < 1e-12);
        assert!((r.y - (v.y - 2.0 * d * n.y)).abs() < 1e-12);
        assert!((r.dot(n) + d).abs() < 1e-9);
    }
}

#[test]
fn empty_field_tick_is_a_no_op() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut field = ParticleField::new(FieldConfig::default(), 800.0, 600.0, Vec::<String>::new(), &hero_text, &mut rng);
    field.tick(&hero_text, &mut rng);
    assert!(field.is_empty());
    assert_eq!(field.render_origins().count(), 0);
}
