//! One-shot deferred wake-up polled from the frame loop.
//!
//! Stands in for a `setTimeout`-style callback: the owner arms it with a
//! deadline, keeps the generation `arm` hands back, and polls with that
//! generation every frame. Every arming (and every explicit
//! [`Alarm::invalidate`]) bumps the generation, so a holder of a superseded
//! generation can never see its wake-up fire.

use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alarm {
    deadline: Option<Duration>,
    generation: u64,
}

impl Alarm {
    /// Schedule a wake-up `delay` after `now`. Returns the new generation.
    pub fn arm(&mut self, now: Duration, delay: Duration) -> u64 {
        self.generation += 1;
        self.deadline = Some(now + delay);
        self.generation
    }

    /// Drop any pending wake-up
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.deadline = None;
    }

    #[cfg(test)]
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Disarm and return `true` once `now` has reached the deadline, but only
    /// for the caller holding the current `generation`
    pub fn poll(&mut self, now: Duration, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
