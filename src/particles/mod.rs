//! Particle digit engine.
//!
//! Independent of Bevy's ECS so it can be driven (and tested) headless:
//!
//! - **Glyphs** (`glyph.rs`): dot-matrix lattice for the digits 0-9
//! - **Particles** (`particle.rs`): exponential easing toward a target
//! - **Slots** (`slot.rs`): scatter → gather state machine per digit position
//! - **Row** (`row.rs`): six slots laid out as HH MM SS
//! - **Tuning** (`tuning.rs`): named presets for every animation constant

pub mod alarm;
pub mod glyph;
pub mod particle;
pub mod row;
pub mod slot;
pub mod tuning;

pub use row::DigitRow;
pub use tuning::Tuning;
