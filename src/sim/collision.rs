//! Collision tests and responses.
//!
//! Particles collide as circles of radius `height / 2` around their centers.
//! Text regions collide as rects grown by that radius. Both responses write
//! the new velocity through [`Particle::set_velocity`] so the hover snapshot
//! never goes stale.

use super::geometry::{Rect, Vec2};
use super::particle::Particle;
use super::random::RandomSource;

/// Overlap between two particles, measured from `a` towards `b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PairContact {
    pub distance: f64,
    pub min_distance: f64,
    pub delta: Vec2,
}

impl PairContact {
    pub fn overlap(&self) -> f64 {
        self.min_distance - self.distance
    }
}

/// Contact between a particle center and a grown text rect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectContact {
    pub distance: f64,
    /// Center minus closest point on the grown rect.
    pub delta: Vec2,
    pub radius: f64,
}

/// `v' = v - 2(v·n)n` for a unit normal `n`.
pub fn reflect(v: Vec2, n: Vec2) -> Vec2 {
    v - n * (2.0 * v.dot(n))
}

/// Distance from a point to the raw (un-grown) text rect.
pub fn text_clearance(point: Vec2, rect: &Rect) -> f64 {
    rect.distance_to(point)
}

pub fn pair_contact(a: &Particle, b: &Particle) -> Option<PairContact> {
    let (ra, rb) = (a.radius()?, b.radius()?);
    let delta = b.position - a.position;
    let distance = delta.length();
    let min_distance = ra + rb;
    (distance < min_distance).then_some(PairContact {
        distance,
        min_distance,
        delta,
    })
}

pub fn rect_contact(center: Vec2, radius: f64, rect: &Rect) -> Option<RectContact> {
    let grown = rect.expanded(radius);
    let delta = center - grown.closest_point(center);
    let distance = delta.length();
    (distance < radius).then_some(RectContact {
        distance,
        delta,
        radius,
    })
}

/// Separates an overlapping pair and exchanges velocities.
///
/// Each non-hovered side moves half the overlap along the line between the
/// centers. Two free particles swap velocities; a free particle hitting a
/// hovered one reverses. Returns whether the pair was touching.
pub fn resolve_pair(a: &mut Particle, b: &mut Particle) -> bool {
    let Some(contact) = pair_contact(a, b) else {
        return false;
    };

    let angle = contact.delta.y.atan2(contact.delta.x);
    let push = Vec2::new(angle.cos(), angle.sin()) * (contact.overlap() / 2.0);
    if !a.hovered {
        a.position -= push;
    }
    if !b.hovered {
        b.position += push;
    }

    match (a.hovered, b.hovered) {
        (false, false) => {
            let va = a.velocity;
            a.set_velocity(b.velocity);
            b.set_velocity(va);
        }
        (false, true) => a.set_velocity(-a.velocity),
        (true, false) => b.set_velocity(-b.velocity),
        (true, true) => {}
    }
    true
}

/// Bounces a particle off a text rect. Degenerate rects, hovered and
/// unmeasured particles are left alone.
pub fn resolve_rect(p: &mut Particle, rect: &Rect, jitter: f64, rng: &mut dyn RandomSource) -> bool {
    if p.hovered || rect.is_degenerate() {
        return false;
    }
    let Some(radius) = p.radius() else {
        return false;
    };
    let Some(contact) = rect_contact(p.position, radius, rect) else {
        return false;
    };

    if contact.distance == 0.0 {
        // center is inside the grown rect: no usable normal
        p.set_velocity(-p.velocity);
        p.position += Vec2::new(rng.symmetric(jitter), rng.symmetric(jitter));
    } else {
        let n = contact.delta * (1.0 / contact.distance);
        p.position += n * (contact.radius - contact.distance);
        p.set_velocity(reflect(p.velocity, n));
    }
    true
}
