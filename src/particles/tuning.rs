use serde::{Deserialize, Serialize};

// ============================================================================
// ANIMATION TUNING CONSTANTS
// ============================================================================

/// Preset animation configurations
pub mod presets {
    use super::Tuning;

    /// The hand-tuned look the clock shipped with
    pub const ORIGINAL: Tuning = Tuning {
        approach_rate: 0.12,    // Fraction of remaining distance covered per frame
        particle_radius: 1.8,
        particle_opacity: 1.0,
        particles_per_point: 3, // Denser dots without growing the glyph
        jitter: 0.3,            // Full width, so +-0.15 per axis
        scatter_amount: 30.0,   // Full width, so +-15 per axis
        scatter_delay_ms: 300,
        fast_scatter_delay_ms: 150,
        settle_radius: 0.5,
        glyph_scale: 28.0,
        spacing: 100.0,
        group_gap_ratio: 0.35,
        trail_alpha: 0.3,
    };

    /// Quick, crisp transitions with short trails
    pub const SNAPPY: Tuning = Tuning {
        approach_rate: 0.25,
        scatter_delay_ms: 160,
        fast_scatter_delay_ms: 80,
        trail_alpha: 0.5,
        ..ORIGINAL
    };

    /// Slow drifting particles with long smears
    pub const DREAMY: Tuning = Tuning {
        approach_rate: 0.06,
        scatter_amount: 60.0,
        scatter_delay_ms: 450,
        fast_scatter_delay_ms: 250,
        trail_alpha: 0.12,
        ..ORIGINAL
    };

    pub const NAMED: [(&str, Tuning); 3] = [
        ("original", ORIGINAL),
        ("snappy", SNAPPY),
        ("dreamy", DREAMY),
    ];
}

/// Every knob of the particle animation and row layout.
///
/// Distances are in surface units (pixels), delays in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Per-frame easing factor in `(0, 1]`
    pub approach_rate: f32,
    pub particle_radius: f32,
    pub particle_opacity: f32,
    /// How many particles stack on each lattice point
    pub particles_per_point: usize,
    /// Full width of the random offset added to gathered targets
    pub jitter: f32,
    /// Full width of the random offset applied when scattering
    pub scatter_amount: f32,
    pub scatter_delay_ms: u64,
    /// Delay used by the fast-changing seconds slots
    pub fast_scatter_delay_ms: u64,
    /// Distance under which a gathering particle counts as arrived
    pub settle_radius: f32,
    /// Surface units per lattice unit
    pub glyph_scale: f32,
    /// Horizontal distance between neighbouring slots
    pub spacing: f32,
    /// Extra gap between HH | MM | SS groups, as a fraction of `spacing`
    pub group_gap_ratio: f32,
    /// Opacity of the black overlay painted over the previous frame
    pub trail_alpha: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        presets::ORIGINAL
    }
}

impl Tuning {
    /// Look up a preset by name (case-insensitive)
    pub fn preset(name: &str) -> Option<Self> {
        presets::NAMED
            .iter()
            .find(|(preset_name, _)| preset_name.eq_ignore_ascii_case(name.trim()))
            .map(|(_, tuning)| *tuning)
    }

    /// Parse a tuning from JSON. Missing fields keep their original values.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| format!("Invalid tuning JSON: {}", e))?;
        tuning.validate()?;
        Ok(tuning)
    }

    fn validate(&self) -> Result<(), String> {
        if !(self.approach_rate > 0.0 && self.approach_rate <= 1.0) {
            return Err(format!(
                "approach_rate must be in (0, 1], got {}",
                self.approach_rate
            ));
        }
        if self.particles_per_point == 0 {
            return Err("particles_per_point must be at least 1".to_string());
        }
        if self.glyph_scale <= 0.0 || self.spacing <= 0.0 {
            return Err(format!(
                "glyph_scale and spacing must be positive, got {} and {}",
                self.glyph_scale, self.spacing
            ));
        }
        if !(0.0..=1.0).contains(&self.trail_alpha) {
            return Err(format!("trail_alpha must be in [0, 1], got {}", self.trail_alpha));
        }
        Ok(())
    }
}
