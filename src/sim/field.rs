use super::collision::{resolve_pair, resolve_rect, text_clearance};
use super::geometry::{Rect, Size, Vec2};
use super::particle::Particle;
use super::random::RandomSource;
use crate::config::FieldConfig;

/// Produces the current text rects in canvas-local coordinates.
pub trait BoundsSource {
    fn text_bounds(&self) -> Vec<Rect>;
}

impl<F> BoundsSource for F
where
    F: Fn() -> Vec<Rect>,
{
    fn text_bounds(&self) -> Vec<Rect> {
        self()
    }
}

/// The bubble simulation: an index-addressed set of particles inside a
/// canvas-sized box.
#[derive(Clone, Debug)]
pub struct ParticleField {
    config: FieldConfig,
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    placement_fallbacks: usize,
}

impl ParticleField {
    /// Creates one particle per label. Every particle starts unmeasured.
    pub fn new<L, B>(
        config: FieldConfig,
        width: f64,
        height: f64,
        labels: impl IntoIterator<Item = L>,
        bounds: &B,
        rng: &mut dyn RandomSource,
    ) -> Self
    where
        L: Into<String>,
        B: BoundsSource + ?Sized,
    {
        let mut placement_fallbacks = 0;
        let particles = labels
            .into_iter()
            .map(|label| {
                let (position, fell_back) = place(&config, width, height, bounds, rng);
                if fell_back {
                    placement_fallbacks += 1;
                }
                let velocity = Vec2::new(
                    rng.symmetric(config.max_speed),
                    rng.symmetric(config.max_speed),
                );
                Particle::new(label, position, velocity)
            })
            .collect();

        Self {
            config,
            width,
            height,
            particles,
            placement_fallbacks,
        }
    }

    /// Builds a field from prepared particles, skipping placement.
    pub fn from_particles(config: FieldConfig, width: f64, height: f64, particles: Vec<Particle>) -> Self {
        Self {
            config,
            width,
            height,
            particles,
            placement_fallbacks: 0,
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    /// How many particles were placed without meeting the text clearance.
    pub fn placement_fallbacks(&self) -> usize {
        self.placement_fallbacks
    }

    /// Records the laid-out size of a particle's element. Returns whether the
    /// particle is measured afterwards; an unusable size leaves it as it was.
    pub fn measure(&mut self, index: usize, width: f64, height: f64) -> bool {
        let Some(p) = self.particles.get_mut(index) else {
            return false;
        };
        if let Some(size) = Size::measured(width, height) {
            p.size = Some(size);
        }
        p.is_measured()
    }

    pub fn pending_measurements(&self) -> Vec<usize> {
        self.particles
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_measured())
            .map(|(i, _)| i)
            .collect()
    }

    /// Returns false for an unknown index.
    pub fn set_hovered(&mut self, index: usize, hovered: bool) -> bool {
        let Some(p) = self.particles.get_mut(index) else {
            return false;
        };
        if hovered {
            p.hover_enter();
        } else {
            p.hover_leave();
        }
        true
    }

    /// New wall bounds. Positions are left alone; anything now outside gets
    /// pulled back on its next wall hit.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Top-left element offsets for every measured particle.
    pub fn render_origins(&self) -> impl Iterator<Item = (usize, Vec2)> + '_ {
        self.particles
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.render_origin().map(|o| (i, o)))
    }

    /// Advances one frame.
    pub fn tick<B>(&mut self, bounds: &B, rng: &mut dyn RandomSource)
    where
        B: BoundsSource + ?Sized,
    {
        if self.particles.is_empty() {
            return;
        }
        let rects: Vec<Rect> = bounds
            .text_bounds()
            .into_iter()
            .filter(|r| !r.is_degenerate())
            .collect();

        for i in 0..self.particles.len() {
            if !self.particles[i].is_active() {
                continue;
            }
            integrate(&mut self.particles[i], self.width, self.height);

            for j in 0..self.particles.len() {
                if j == i || !self.particles[j].is_measured() {
                    continue;
                }
                let (a, b) = pair_mut(&mut self.particles, i, j);
                resolve_pair(a, b);
            }

            let p = &mut self.particles[i];
            for rect in &rects {
                resolve_rect(p, rect, self.config.jitter, rng);
            }
        }
    }
}

/// Moves a particle by its velocity and bounces it off the canvas walls.
fn integrate(p: &mut Particle, width: f64, height: f64) {
    let Some(size) = p.size else {
        return;
    };
    p.position += p.velocity;

    let half = size.half();
    if p.position.x + half.x > width || p.position.x - half.x < 0.0 {
        p.velocity.x = -p.velocity.x;
        p.saved_velocity.x = p.velocity.x;
        p.position.x = p.position.x.min(width - half.x).max(half.x);
    }
    if p.position.y + half.y > height || p.position.y - half.y < 0.0 {
        p.velocity.y = -p.velocity.y;
        p.saved_velocity.y = p.velocity.y;
        p.position.y = p.position.y.min(height - half.y).max(half.y);
    }
}

fn pair_mut(items: &mut [Particle], i: usize, j: usize) -> (&mut Particle, &mut Particle) {
    debug_assert_ne!(i, j);
    if i < j {
        let (lo, hi) = items.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = items.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}

/// Rejection-samples a start position clear of the text rects. After
/// `max_placement_attempts` misses, returns the clearest candidate seen and
/// `true`.
fn place<B>(
    config: &FieldConfig,
    width: f64,
    height: f64,
    bounds: &B,
    rng: &mut dyn RandomSource,
) -> (Vec2, bool)
where
    B: BoundsSource + ?Sized,
{
    let mut best = (Vec2::new(width / 2.0, height / 2.0), f64::NEG_INFINITY);
    for _ in 0..config.max_placement_attempts.max(1) {
        let candidate = Vec2::new(
            sample_axis(rng, width, config.margin_x),
            sample_axis(rng, height, config.margin_y),
        );
        let clearance = bounds
            .text_bounds()
            .iter()
            .filter(|r| !r.is_degenerate())
            .map(|r| text_clearance(candidate, r))
            .fold(f64::INFINITY, f64::min);
        if clearance >= config.min_text_clearance {
            return (candidate, false);
        }
        if clearance > best.1 {
            best = (candidate, clearance);
        }
    }
    (best.0, true)
}

fn sample_axis(rng: &mut dyn RandomSource, extent: f64, margin: f64) -> f64 {
    let span = extent - 2.0 * margin;
    if span > 0.0 {
        rng.next_f64() * span + margin
    } else {
        extent / 2.0
    }
}
