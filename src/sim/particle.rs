use super::geometry::{Size, Vec2};

/// Id of the DOM element bound to the particle at `index`.
pub fn element_id(index: usize) -> String {
    format!("particle-{index}")
}

/// One bubble. Plain data; the field mutates it through free functions.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub label: String,
    pub position: Vec2,
    pub velocity: Vec2,
    /// `None` until the bound element has been measured.
    pub size: Option<Size>,
    pub hovered: bool,
    pub saved_velocity: Vec2,
}

impl Particle {
    pub fn new(label: impl Into<String>, position: Vec2, velocity: Vec2) -> Self {
        Self {
            label: label.into(),
            position,
            velocity,
            size: None,
            hovered: false,
            saved_velocity: Vec2::ZERO,
        }
    }

    /// Sets a measured size; unusable dimensions leave it pending.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size = Size::measured(width, height);
        self
    }

    pub fn is_measured(&self) -> bool {
        self.size.is_some()
    }

    /// Only measured particles that are not frozen under the pointer move.
    pub fn is_active(&self) -> bool {
        self.is_measured() && !self.hovered
    }

    pub fn radius(&self) -> Option<f64> {
        self.size.map(Size::radius)
    }

    /// Top-left corner for the bound element.
    pub fn render_origin(&self) -> Option<Vec2> {
        self.size.map(|s| self.position - s.half())
    }

    /// Sets velocity and mirrors it into the hover snapshot.
    pub fn set_velocity(&mut self, v: Vec2) {
        self.velocity = v;
        self.saved_velocity = v;
    }

    pub fn hover_enter(&mut self) {
        if self.hovered {
            return;
        }
        self.hovered = true;
        self.saved_velocity = self.velocity;
        self.velocity = Vec2::ZERO;
    }

    pub fn hover_leave(&mut self) {
        if !self.hovered {
            return;
        }
        self.hovered = false;
        self.velocity = self.saved_velocity;
    }
}
