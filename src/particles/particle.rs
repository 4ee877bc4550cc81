use bevy::color::Srgba;
use bevy::math::Vec2;

use crate::render::canvas::Surface;

/// A single dot chasing its target with exponential easing
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub target: Vec2,
    /// Fraction of the remaining distance covered per update
    pub approach_rate: f32,
    pub radius: f32,
    pub opacity: f32,
}

impl Particle {
    pub const COLOR: Srgba = Srgba::WHITE;

    pub fn new(
        position: Vec2,
        target: Vec2,
        approach_rate: f32,
        radius: f32,
        opacity: f32,
    ) -> Self {
        Self {
            position,
            target,
            approach_rate,
            radius,
            opacity,
        }
    }

    /// Retarget without touching the in-flight position
    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    /// Move `approach_rate` of the way toward the target.
    ///
    /// First-order smoothing: never overshoots, never lands exactly.
    pub fn update(&mut self) {
        let delta = self.target - self.position;
        self.position += delta * self.approach_rate;
    }

    pub fn distance_to_target(&self) -> f32 {
        self.position.distance(self.target)
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        surface.fill_circle(self.position, self.radius, Self::COLOR, self.opacity);
    }
}
