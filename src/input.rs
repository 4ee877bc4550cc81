use std::time::Duration;

use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;

/// Two presses closer than this count as a double click
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(350);

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ClickTracker>()
            .add_message::<ClockGesture>()
            .add_systems(Update, collect_gestures);
    }
}

/// User intent, already decoded from raw mouse/touch/keyboard input
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockGesture {
    Click,
    DoubleClick,
    ToggleMode,
}

/// Remembers the last press so a second one can be upgraded to a double click
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct ClickTracker {
    last_press: Option<Duration>,
}

impl ClickTracker {
    /// Register a press at `now`; returns the gestures it produces.
    ///
    /// A double click still reports both clicks first, like a browser does.
    pub fn press(&mut self, now: Duration) -> &'static [ClockGesture] {
        let is_double = self
            .last_press
            .is_some_and(|last| now.saturating_sub(last) <= DOUBLE_CLICK_WINDOW);

        if is_double {
            // Third press starts a fresh pair
            self.last_press = None;
            &[ClockGesture::Click, ClockGesture::DoubleClick]
        } else {
            self.last_press = Some(now);
            &[ClockGesture::Click]
        }
    }
}

fn collect_gestures(
    time: Res<Time>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    mut touch_events: MessageReader<TouchInput>,
    mut tracker: ResMut<ClickTracker>,
    mut out: MessageWriter<ClockGesture>,
) {
    let now = time.elapsed();

    let touches = touch_events
        .read()
        .filter(|ev| ev.phase == TouchPhase::Started)
        .count();
    let presses = usize::from(mouse_buttons.just_pressed(MouseButton::Left)) + touches;

    for _ in 0..presses {
        for &gesture in tracker.press(now) {
            out.write(gesture);
        }
    }

    if keys.just_pressed(KeyCode::KeyT) || mouse_buttons.just_pressed(MouseButton::Right) {
        out.write(ClockGesture::ToggleMode);
    }
}
