//! One digit position of the clock and its particle pool.
//!
//! A slot changes digits in two steps: the current particles first scatter
//! away from where they are, then after a short delay the pool is resized and
//! every particle is sent to a lattice point of the new glyph.
//!
//! ```text
//!   Blank ──set_digit──▶ Idle(d)
//!   Idle(a) ──set_digit(b)──▶ Scattering{a→b}
//!   Scattering{a→b} ──alarm──▶ Gathering(b) ──settled──▶ Idle(b)
//!   any ──set_digit(d, immediate)──▶ Idle(d)
//! ```

use std::time::Duration;

use bevy::math::Vec2;
use rand::Rng;

use super::alarm::Alarm;
use super::glyph::points_for;
use super::particle::Particle;
use super::tuning::Tuning;
use crate::render::canvas::Surface;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotState {
    /// No digit assigned yet
    Blank,
    Idle(u8),
    /// Particles are flying apart; the gather alarm is armed
    Scattering { from: u8, to: u8 },
    /// Particles have new targets but haven't arrived yet
    Gathering(u8),
}

#[derive(Debug, Clone)]
pub struct DigitSlot {
    /// Surface position of lattice point (0, 0)
    anchor: Vec2,
    /// Area new particles spawn in
    bounds: Vec2,
    /// Seconds slots use the shorter scatter delay
    fast_timing: bool,
    tuning: Tuning,
    current_digit: Option<u8>,
    /// Last requested digit; the pending gather reads this when it fires
    target_digit: Option<u8>,
    state: SlotState,
    particles: Vec<Particle>,
    gather_alarm: Alarm,
    /// Generation of the gather this slot is waiting on
    pending_gather: Option<u64>,
}

impl DigitSlot {
    pub fn new(anchor: Vec2, bounds: Vec2, fast_timing: bool, tuning: Tuning) -> Self {
        Self {
            anchor,
            bounds,
            fast_timing,
            tuning,
            current_digit: None,
            target_digit: None,
            state: SlotState::Blank,
            particles: Vec::new(),
            gather_alarm: Alarm::default(),
            pending_gather: None,
        }
    }

    #[cfg(test)]
    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    #[cfg(test)]
    pub fn state(&self) -> SlotState {
        self.state
    }

    #[cfg(test)]
    pub fn current_digit(&self) -> Option<u8> {
        self.current_digit
    }

    pub fn target_digit(&self) -> Option<u8> {
        self.target_digit
    }

    #[cfg(test)]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_scattered(&self) -> bool {
        matches!(self.state, SlotState::Scattering { .. })
    }

    #[cfg(test)]
    pub fn fast_timing(&self) -> bool {
        self.fast_timing
    }

    pub fn scatter_delay(&self) -> Duration {
        if self.fast_timing {
            Duration::from_millis(self.tuning.fast_scatter_delay_ms)
        } else {
            Duration::from_millis(self.tuning.scatter_delay_ms)
        }
    }

    /// When the pending gather is due, if one is armed
    #[cfg(test)]
    pub fn gather_due(&self) -> Option<Duration> {
        self.gather_alarm.deadline()
    }

    /// Pool size needed to draw `digit`
    pub fn pool_len_for(&self, digit: u8) -> usize {
        points_for(digit).len() * self.tuning.particles_per_point
    }

    /// Un-jittered surface position particle `index` is heading for
    #[cfg(test)]
    pub fn ideal_target(&self, index: usize) -> Option<Vec2> {
        let digit = self.current_digit?;
        let point = points_for(digit).get(index / self.tuning.particles_per_point)?;
        Some(self.anchor + *point * self.tuning.glyph_scale)
    }

    /// Request `digit`. Returns `false` when the call was a no-op.
    ///
    /// Calls that arrive mid-scatter only move the target; the gather that is
    /// already scheduled keeps its original deadline.
    pub fn set_digit(
        &mut self,
        digit: u8,
        immediate: bool,
        now: Duration,
        rng: &mut impl Rng,
    ) -> bool {
        if self.current_digit == Some(digit) && !self.is_scattered() {
            return false;
        }

        self.target_digit = Some(digit);

        if immediate || self.current_digit.is_none() {
            self.gather_alarm.invalidate();
            self.pending_gather = None;
            self.resize_pool(digit, rng);
            self.current_digit = Some(digit);
            self.retarget(rng);
            self.state = SlotState::Idle(digit);
            return true;
        }

        if let SlotState::Scattering { to, .. } = &mut self.state {
            *to = digit;
            return true;
        }

        let from = self.current_digit.unwrap_or(digit);
        self.scatter(rng);
        self.pending_gather = Some(self.gather_alarm.arm(now, self.scatter_delay()));
        self.state = SlotState::Scattering { from, to: digit };
        true
    }

    /// Fire the pending gather if it is due. Returns `true` if one fired.
    pub fn poll(&mut self, now: Duration, rng: &mut impl Rng) -> bool {
        let Some(generation) = self.pending_gather else {
            return false;
        };
        if !self.gather_alarm.poll(now, generation) {
            return false;
        }
        self.pending_gather = None;
        let Some(digit) = self.target_digit else {
            return false;
        };
        if !self.is_scattered() {
            return false;
        }
        self.gather(digit, rng);
        true
    }

    fn scatter(&mut self, rng: &mut impl Rng) {
        let amount = self.tuning.scatter_amount;
        for particle in &mut self.particles {
            let offset = Vec2::new(
                (rng.random::<f32>() - 0.5) * amount,
                (rng.random::<f32>() - 0.5) * amount,
            );
            particle.set_target(particle.position + offset);
        }
    }

    fn gather(&mut self, digit: u8, rng: &mut impl Rng) {
        self.resize_pool(digit, rng);
        self.current_digit = Some(digit);
        self.retarget(rng);
        self.state = SlotState::Gathering(digit);
        log::debug!(
            "slot at ({:.0}, {:.0}) gathered into {} with {} particles",
            self.anchor.x,
            self.anchor.y,
            digit,
            self.particles.len()
        );
    }

    /// Grow or shrink the pool; survivors keep their position and motion
    fn resize_pool(&mut self, digit: u8, rng: &mut impl Rng) {
        let needed = self.pool_len_for(digit);
        self.particles.truncate(needed);
        while self.particles.len() < needed {
            let spawn = Vec2::new(
                rng.random::<f32>() * self.bounds.x,
                rng.random::<f32>() * self.bounds.y,
            );
            self.particles.push(Particle::new(
                spawn,
                spawn,
                self.tuning.approach_rate,
                self.tuning.particle_radius,
                self.tuning.particle_opacity,
            ));
        }
    }

    /// Point every particle at its lattice position, with a little jitter
    fn retarget(&mut self, rng: &mut impl Rng) {
        let Some(digit) = self.current_digit else {
            return;
        };
        let points = points_for(digit);
        let per_point = self.tuning.particles_per_point;
        let jitter = self.tuning.jitter;

        for (i, particle) in self.particles.iter_mut().enumerate() {
            let Some(point) = points.get(i / per_point) else {
                break;
            };
            let offset = Vec2::new(
                (rng.random::<f32>() - 0.5) * jitter,
                (rng.random::<f32>() - 0.5) * jitter,
            );
            particle.set_target(self.anchor + *point * self.tuning.glyph_scale + offset);
        }
    }

    /// Every particle is within the settle radius of its target
    pub fn is_settled(&self) -> bool {
        self.particles
            .iter()
            .all(|p| p.distance_to_target() <= self.tuning.settle_radius)
    }

    pub fn update(&mut self) {
        for particle in &mut self.particles {
            particle.update();
        }

        if let SlotState::Gathering(digit) = self.state {
            if self.is_settled() {
                self.state = SlotState::Idle(digit);
            }
        }
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        for particle in &self.particles {
            particle.draw(surface);
        }
    }
}
