//! Dot-matrix glyph table for the digits 0-9.
//!
//! Each glyph is an ordered list of lattice points in glyph-local units:
//! x in `0..=2`, y in `0..=4` (y grows downward), half steps allowed.
//! The order is part of the contract: particle `i` of a slot is always
//! mapped to point `i / particles_per_point`.

use bevy::math::Vec2;

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Digit {
    Zero = 0,
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
}

impl Digit {
    pub const ALL: [Digit; 10] = [
        Digit::Zero,
        Digit::One,
        Digit::Two,
        Digit::Three,
        Digit::Four,
        Digit::Five,
        Digit::Six,
        Digit::Seven,
        Digit::Eight,
        Digit::Nine,
    ];

    pub fn from_u8(n: u8) -> Option<Self> {
        Self::ALL.get(n as usize).copied()
    }

    /// Parse an ASCII digit character
    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).and_then(|d| Self::from_u8(d as u8))
    }

    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

const fn p(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

// Outline columns are doubled up with half-step points on the top, middle and
// bottom bars so the strokes read as solid at small scales.

#[rustfmt::skip]
static ZERO: [Vec2; 24] = [
    p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0),
    p(0.0, 0.5), p(2.0, 0.5),
    p(0.0, 1.0), p(2.0, 1.0),
    p(0.0, 1.5), p(2.0, 1.5),
    p(0.0, 2.0), p(2.0, 2.0),
    p(0.0, 2.5), p(2.0, 2.5),
    p(0.0, 3.0), p(2.0, 3.0),
    p(0.0, 3.5), p(2.0, 3.5),
    p(0.0, 4.0), p(1.0, 4.0), p(2.0, 4.0),
    p(0.5, 0.0), p(1.5, 0.0),
    p(0.5, 4.0), p(1.5, 4.0),
];

#[rustfmt::skip]
static ONE: [Vec2; 9] = [
    p(1.0, 0.0),
    p(1.0, 0.5),
    p(1.0, 1.0),
    p(1.0, 1.5),
    p(1.0, 2.0),
    p(1.0, 2.5),
    p(1.0, 3.0),
    p(1.0, 3.5),
    p(1.0, 4.0),
];

#[rustfmt::skip]
static TWO: [Vec2; 20] = [
    p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0),
    p(2.0, 0.5),
    p(2.0, 1.0),
    p(0.0, 2.0), p(1.0, 2.0), p(2.0, 2.0),
    p(0.0, 2.5),
    p(0.0, 3.0),
    p(0.0, 3.5),
    p(0.0, 4.0), p(1.0, 4.0), p(2.0, 4.0),
    p(0.5, 0.0), p(1.5, 0.0),
    p(0.5, 2.0), p(1.5, 2.0),
    p(0.5, 4.0), p(1.5, 4.0),
];

#[rustfmt::skip]
static THREE: [Vec2; 20] = [
    p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0),
    p(2.0, 0.5),
    p(2.0, 1.0),
    p(0.0, 2.0), p(1.0, 2.0), p(2.0, 2.0),
    p(2.0, 2.5),
    p(2.0, 3.0),
    p(2.0, 3.5),
    p(0.0, 4.0), p(1.0, 4.0), p(2.0, 4.0),
    p(0.5, 0.0), p(1.5, 0.0),
    p(0.5, 2.0), p(1.5, 2.0),
    p(0.5, 4.0), p(1.5, 4.0),
];

#[rustfmt::skip]
static FOUR: [Vec2; 17] = [
    p(0.0, 0.0), p(2.0, 0.0),
    p(0.0, 0.5), p(2.0, 0.5),
    p(0.0, 1.0), p(2.0, 1.0),
    p(0.0, 1.5), p(2.0, 1.5),
    p(0.0, 2.0), p(1.0, 2.0), p(2.0, 2.0),
    p(2.0, 2.5),
    p(2.0, 3.0),
    p(2.0, 3.5),
    p(2.0, 4.0),
    p(0.5, 2.0), p(1.5, 2.0),
];

#[rustfmt::skip]
static FIVE: [Vec2; 20] = [
    p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0),
    p(0.0, 0.5),
    p(0.0, 1.0),
    p(0.0, 2.0), p(1.0, 2.0), p(2.0, 2.0),
    p(2.0, 2.5),
    p(2.0, 3.0),
    p(2.0, 3.5),
    p(0.0, 4.0), p(1.0, 4.0), p(2.0, 4.0),
    p(0.5, 0.0), p(1.5, 0.0),
    p(0.5, 2.0), p(1.5, 2.0),
    p(0.5, 4.0), p(1.5, 4.0),
];

#[rustfmt::skip]
static SIX: [Vec2; 24] = [
    p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0),
    p(0.0, 0.5),
    p(0.0, 1.0),
    p(0.0, 1.5),
    p(0.0, 2.0), p(1.0, 2.0), p(2.0, 2.0),
    p(0.0, 2.5), p(2.0, 2.5),
    p(0.0, 3.0), p(2.0, 3.0),
    p(0.0, 3.5), p(2.0, 3.5),
    p(0.0, 4.0), p(1.0, 4.0), p(2.0, 4.0),
    p(0.5, 0.0), p(1.5, 0.0),
    p(0.5, 2.0), p(1.5, 2.0),
    p(0.5, 4.0), p(1.5, 4.0),
];

#[rustfmt::skip]
static SEVEN: [Vec2; 13] = [
    p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0),
    p(2.0, 0.5),
    p(2.0, 1.0),
    p(1.0, 1.5),
    p(1.0, 2.0),
    p(1.0, 2.5),
    p(1.0, 3.0),
    p(1.0, 3.5),
    p(1.0, 4.0),
    p(0.5, 0.0), p(1.5, 0.0),
];

#[rustfmt::skip]
static EIGHT: [Vec2; 27] = [
    p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0),
    p(0.0, 0.5), p(2.0, 0.5),
    p(0.0, 1.0), p(2.0, 1.0),
    p(0.0, 1.5), p(2.0, 1.5),
    p(0.0, 2.0), p(1.0, 2.0), p(2.0, 2.0),
    p(0.0, 2.5), p(2.0, 2.5),
    p(0.0, 3.0), p(2.0, 3.0),
    p(0.0, 3.5), p(2.0, 3.5),
    p(0.0, 4.0), p(1.0, 4.0), p(2.0, 4.0),
    p(0.5, 0.0), p(1.5, 0.0),
    p(0.5, 2.0), p(1.5, 2.0),
    p(0.5, 4.0), p(1.5, 4.0),
];

#[rustfmt::skip]
static NINE: [Vec2; 24] = [
    p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0),
    p(0.0, 0.5), p(2.0, 0.5),
    p(0.0, 1.0), p(2.0, 1.0),
    p(0.0, 1.5), p(2.0, 1.5),
    p(0.0, 2.0), p(1.0, 2.0), p(2.0, 2.0),
    p(2.0, 2.5),
    p(2.0, 3.0),
    p(2.0, 3.5),
    p(0.0, 4.0), p(1.0, 4.0), p(2.0, 4.0),
    p(0.5, 0.0), p(1.5, 0.0),
    p(0.5, 2.0), p(1.5, 2.0),
    p(0.5, 4.0), p(1.5, 4.0),
];

/// Lattice points for `digit`, or an empty slice for anything outside 0-9.
pub fn points_for(digit: u8) -> &'static [Vec2] {
    match digit {
        0 => &ZERO,
        1 => &ONE,
        2 => &TWO,
        3 => &THREE,
        4 => &FOUR,
        5 => &FIVE,
        6 => &SIX,
        7 => &SEVEN,
        8 => &EIGHT,
        9 => &NINE,
        _ => &[],
    }
}
