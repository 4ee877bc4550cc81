//! The six-slot HHMMSS row and its layout.

use std::time::Duration;

use bevy::math::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::glyph::Digit;
use super::slot::DigitSlot;
use super::tuning::Tuning;
use crate::render::canvas::Surface;

pub const SLOT_COUNT: usize = 6;

/// Slot anchors for a given surface size
#[derive(Debug, Clone, PartialEq)]
pub struct RowLayout {
    pub anchors: [Vec2; SLOT_COUNT],
}

impl RowLayout {
    /// Centre the row on the surface, with wider gaps between HH | MM | SS
    pub fn for_surface(size: Vec2, tuning: &Tuning) -> Self {
        let spacing = tuning.spacing;
        let group_gap = spacing * tuning.group_gap_ratio;
        let start_x = size.x / 2.0 - spacing * SLOT_COUNT as f32 / 2.0;
        let start_y = size.y / 2.0 - tuning.glyph_scale * 2.0;

        let anchors = std::array::from_fn(|i| {
            let mut x = start_x + i as f32 * spacing;
            if i >= 2 {
                x += group_gap;
            }
            if i >= 4 {
                x += group_gap;
            }
            Vec2::new(x, start_y)
        });

        Self { anchors }
    }

    /// The seconds pair changes fastest and uses the short scatter delay
    pub fn is_fast_slot(index: usize) -> bool {
        index >= 4
    }
}

/// Six digit slots fed from a `HHMMSS` string
#[derive(Debug)]
pub struct DigitRow {
    slots: Vec<DigitSlot>,
    tuning: Tuning,
    /// Last string passed to `set_time`; identical strings are skipped
    last_time: Option<String>,
    rng: StdRng,
}

impl DigitRow {
    /// Build a row showing `000000` on a surface of `size`
    pub fn new(size: Vec2, tuning: Tuning, now: Duration) -> Self {
        Self::with_rng(size, tuning, now, StdRng::from_rng(&mut rand::rng()))
    }

    pub fn with_rng(size: Vec2, tuning: Tuning, now: Duration, rng: StdRng) -> Self {
        let mut row = Self {
            slots: Vec::with_capacity(SLOT_COUNT),
            tuning,
            last_time: None,
            rng,
        };
        row.build_slots(size, [0; SLOT_COUNT], now);
        row
    }

    pub fn slots(&self) -> &[DigitSlot] {
        &self.slots
    }

    #[cfg(test)]
    pub fn last_time(&self) -> Option<&str> {
        self.last_time.as_deref()
    }

    /// Forget the last rendered string so the next `set_time` always applies
    pub fn invalidate(&mut self) {
        self.last_time = None;
    }

    /// Show `time`, which must be exactly six ASCII digits.
    ///
    /// Only slots whose digit differs start a transition. Returns how many did.
    pub fn set_time(&mut self, time: &str, now: Duration) -> usize {
        if self.last_time.as_deref() == Some(time) {
            return 0;
        }

        let digits = match parse_time(time) {
            Some(digits) => digits,
            None => {
                debug_assert!(false, "time string must be six ASCII digits, got {:?}", time);
                log::warn!("Ignoring malformed time string {:?}", time);
                return 0;
            }
        };

        let mut changed = 0;
        for (slot, digit) in self.slots.iter_mut().zip(digits) {
            if slot.set_digit(digit, false, now, &mut self.rng) {
                changed += 1;
            }
        }
        self.last_time = Some(time.to_string());
        changed
    }

    /// Tear the row down and rebuild it for a new surface size.
    ///
    /// Every slot comes back showing its last digit, without a scatter.
    pub fn resize(&mut self, size: Vec2, now: Duration) {
        let digits: [u8; SLOT_COUNT] = std::array::from_fn(|i| {
            self.slots
                .get(i)
                .and_then(|slot| slot.target_digit())
                .unwrap_or(0)
        });
        self.build_slots(size, digits, now);
    }

    fn build_slots(&mut self, size: Vec2, digits: [u8; SLOT_COUNT], now: Duration) {
        let layout = RowLayout::for_surface(size, &self.tuning);
        self.slots.clear();
        for (i, (anchor, digit)) in layout.anchors.into_iter().zip(digits).enumerate() {
            let mut slot = DigitSlot::new(anchor, size, RowLayout::is_fast_slot(i), self.tuning);
            slot.set_digit(digit, true, now, &mut self.rng);
            self.slots.push(slot);
        }
        log::debug!(
            "Row laid out for {}x{}: first anchor {:?}",
            size.x,
            size.y,
            layout.anchors[0]
        );
    }

    /// Fire due gathers, then advance every particle one frame
    pub fn update(&mut self, now: Duration) {
        for slot in &mut self.slots {
            slot.poll(now, &mut self.rng);
            slot.update();
        }
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        for slot in &self.slots {
            slot.draw(surface);
        }
    }
}

fn parse_time(time: &str) -> Option<[u8; SLOT_COUNT]> {
    let mut digits = [0; SLOT_COUNT];
    let mut chars = time.chars();
    for slot in &mut digits {
        *slot = Digit::from_char(chars.next()?)?.to_u8();
    }
    if chars.next().is_some() {
        return None;
    }
    Some(digits)
}

#[cfg(test)]
mod tests {
    use bevy::color::Srgba;
    use bevy::math::UVec2;

    use super::*;
    use crate::particles::glyph::points_for;
    use crate::particles::slot::SlotState;

    const SIZE: Vec2 = Vec2::new(1920.0, 1080.0);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn row() -> DigitRow {
        DigitRow::with_rng(SIZE, Tuning::default(), ms(0), StdRng::seed_from_u64(42))
    }

    fn digits(row: &DigitRow) -> Vec<Option<u8>> {
        row.slots().iter().map(|s| s.current_digit()).collect()
    }

    #[test]
    fn test_layout_groups_pairs() {
        let layout = RowLayout::for_surface(SIZE, &Tuning::default());
        let a = layout.anchors;

        // 960 - 300 = 660, y = 540 - 56
        assert_eq!(a[0], Vec2::new(660.0, 484.0));
        assert_eq!(a[1].x - a[0].x, 100.0);
        assert_eq!(a[2].x - a[1].x, 135.0);
        assert_eq!(a[3].x - a[2].x, 100.0);
        assert_eq!(a[4].x - a[3].x, 135.0);
        assert_eq!(a[5].x - a[4].x, 100.0);
        assert!(a.iter().all(|p| p.y == a[0].y));
    }

    #[test]
    fn test_new_row_shows_zeros() {
        let row = row();
        assert_eq!(row.slots().len(), SLOT_COUNT);
        for slot in row.slots() {
            assert_eq!(slot.state(), SlotState::Idle(0));
            assert_eq!(slot.particles().len(), points_for(0).len() * 3);
        }
        let fast: Vec<bool> = row.slots().iter().map(|s| s.fast_timing()).collect();
        assert_eq!(fast, vec![false, false, false, false, true, true]);
    }

    #[test]
    fn test_same_time_twice_is_noop() {
        let mut row = row();
        assert_eq!(row.set_time("123456", ms(0)), 6);
        assert_eq!(row.set_time("123456", ms(16)), 0);
        assert_eq!(row.last_time(), Some("123456"));
    }

    #[test]
    fn test_only_changed_slots_transition() {
        let mut row = row();
        row.set_time("120000", ms(0));
        for _ in 0..120 {
            row.update(ms(1000));
        }

        assert_eq!(row.set_time("120059", ms(2000)), 2);
        let states: Vec<SlotState> = row.slots().iter().map(|s| s.state()).collect();
        assert_eq!(states[0], SlotState::Idle(1));
        assert_eq!(states[1], SlotState::Idle(2));
        assert_eq!(states[2], SlotState::Idle(0));
        assert_eq!(states[3], SlotState::Idle(0));
        assert_eq!(states[4], SlotState::Scattering { from: 0, to: 5 });
        assert_eq!(states[5], SlotState::Scattering { from: 0, to: 9 });
    }

    #[test]
    fn test_one_second_tick_end_to_end() {
        let mut row = row();
        assert_eq!(row.set_time("000000", ms(0)), 0);
        let untouched: Vec<_> = row.slots()[..5].iter().map(|s| s.particles().to_vec()).collect();

        assert_eq!(row.set_time("000001", ms(1000)), 1);
        assert_eq!(row.slots()[5].state(), SlotState::Scattering { from: 0, to: 1 });
        for (slot, before) in row.slots()[..5].iter().zip(&untouched) {
            assert_eq!(slot.state(), SlotState::Idle(0));
            assert_eq!(slot.particles(), before.as_slice());
        }

        // Seconds slot gathers after the short delay
        row.update(ms(1149));
        assert!(row.slots()[5].is_scattered());
        row.update(ms(1150));

        let slot = &row.slots()[5];
        assert_eq!(slot.current_digit(), Some(1));
        assert_eq!(slot.particles().len(), points_for(1).len() * 3);
        for (i, particle) in slot.particles().iter().enumerate() {
            let ideal = slot.ideal_target(i).unwrap();
            let off = particle.target - ideal;
            assert!(off.x.abs() <= 0.15 + 1e-4 && off.y.abs() <= 0.15 + 1e-4);
        }
        assert!(row.slots()[..5].iter().all(|s| s.current_digit() == Some(0)));
    }

    #[test]
    fn test_resize_rebuilds_immediately() {
        let mut row = row();
        row.set_time("123456", ms(0));
        row.update(ms(500));

        let new_size = Vec2::new(1280.0, 720.0);
        row.resize(new_size, ms(600));

        let layout = RowLayout::for_surface(new_size, &Tuning::default());
        assert_eq!(digits(&row), (1..=6).map(Some).collect::<Vec<_>>());
        for (i, slot) in row.slots().iter().enumerate() {
            assert_eq!(slot.anchor(), layout.anchors[i]);
            assert_eq!(slot.state(), SlotState::Idle(i as u8 + 1));
            assert!(slot.gather_due().is_none());
        }
        // Same string after a resize is still a no-op
        assert_eq!(row.set_time("123456", ms(700)), 0);
    }

    #[test]
    fn test_resize_mid_scatter_lands_on_requested_digit() {
        let mut row = row();
        row.set_time("000007", ms(0));
        assert!(row.slots()[5].is_scattered());

        row.resize(Vec2::new(800.0, 600.0), ms(10));
        assert_eq!(row.slots()[5].state(), SlotState::Idle(7));
    }

    #[test]
    fn test_invalidate_forces_reapply() {
        let mut row = row();
        row.set_time("000000", ms(0));
        row.invalidate();
        assert_eq!(row.last_time(), None);
        // Nothing differs, so no slot transitions even though the string is re-applied
        assert_eq!(row.set_time("000000", ms(10)), 0);
        assert_eq!(row.last_time(), Some("000000"));
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("093015"), Some([0, 9, 3, 0, 1, 5]));
        assert_eq!(parse_time("12345"), None);
        assert_eq!(parse_time("1234567"), None);
        assert_eq!(parse_time("12a456"), None);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "six ASCII digits")]
    fn test_malformed_time_asserts_in_debug() {
        row().set_time("12:34", ms(0));
    }

    /// Remembers every circle in the order it was drawn
    #[derive(Default)]
    struct Recorder {
        centers: Vec<Vec2>,
        fades: usize,
    }

    impl Surface for Recorder {
        fn size(&self) -> UVec2 {
            SIZE.as_uvec2()
        }

        fn fade(&mut self, _color: Srgba, _alpha: f32) {
            self.fades += 1;
        }

        fn fill_circle(&mut self, center: Vec2, _radius: f32, _color: Srgba, _alpha: f32) {
            self.centers.push(center);
        }
    }

    #[test]
    fn test_draw_walks_slots_then_pool() {
        let mut row = row();
        row.set_time("180000", ms(0));
        // Past the slow gather, so slots 0 and 1 have regrown their pools
        for frame in 0..30 {
            row.update(ms(frame * 16));
        }
        assert_eq!(row.slots()[1].particles().len(), points_for(8).len() * 3);

        let mut surface = Recorder::default();
        row.draw(&mut surface);

        let expected: Vec<Vec2> = row
            .slots()
            .iter()
            .flat_map(|slot| slot.particles().iter().map(|p| p.position))
            .collect();
        assert_eq!(surface.centers, expected);
        assert_eq!(surface.fades, 0, "fading belongs to the frame loop");
    }
}
