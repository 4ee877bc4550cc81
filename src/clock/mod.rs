//! Bevy glue: feeds the time string into the particle row every frame and
//! drives the animation loop.

pub mod controls;

use bevy::color::Srgba;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use chrono::Timelike;

use crate::camera::{SurfaceSize, track_surface_size};
use crate::input::ClockGesture;
use crate::particles::{DigitRow, Tuning};
use crate::render::{ClockCanvas, Surface, resize_display, setup_display, upload_canvas};
use controls::{Controls, DisplayMode};

/// Environment variable holding a preset name or an inline JSON tuning
pub const PRESET_ENV: &str = "PARTICLE_CLOCK_PRESET";

const WINDOW_TITLE: &str = "Particle Clock";

pub struct ClockPlugin {
    pub tuning: Tuning,
}

impl ClockPlugin {
    /// Read `PARTICLE_CLOCK_PRESET`, falling back to the `original` preset
    pub fn from_env() -> Self {
        let tuning = match std::env::var(PRESET_ENV) {
            Ok(value) => Self::parse_tuning(&value),
            Err(_) => Tuning::default(),
        };
        Self { tuning }
    }

    /// A preset name like `snappy`, or a JSON object such as `{"approach_rate": 0.2}`
    fn parse_tuning(value: &str) -> Tuning {
        if value.trim_start().starts_with('{') {
            return Tuning::from_json(value).unwrap_or_else(|e| {
                warn!("{}, using the `original` preset", e);
                Tuning::default()
            });
        }
        Tuning::preset(value).unwrap_or_else(|| {
            warn!("Unknown tuning preset {:?}, using `original`", value);
            Tuning::default()
        })
    }
}

impl Plugin for ClockPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ActiveTuning(self.tuning))
            .init_resource::<ClockControls>()
            .add_systems(
                Startup,
                (setup_row, setup_display).chain().after(track_surface_size),
            )
            .add_systems(
                Update,
                (
                    // Resize first so this frame draws into the new surface
                    relayout_row,
                    resize_display,
                    // Input → time string → slots
                    apply_gestures,
                    feed_time_string,
                    // Frame: fade, step, draw, upload
                    animate_row,
                    upload_canvas,
                    update_status_line,
                )
                    .chain()
                    .after(track_surface_size)
                    .run_if(resource_exists::<ClockCanvas>),
            );
    }
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct ActiveTuning(pub Tuning);

#[derive(Resource, Debug)]
pub struct ClockRow(pub DigitRow);

#[derive(Resource, Debug, Default)]
pub struct ClockControls(pub Controls);

/// Local wall-clock time as (hours, minutes, seconds)
fn local_hms() -> (u32, u32, u32) {
    let now = chrono::Local::now();
    (now.hour(), now.minute(), now.second())
}

fn setup_row(
    mut commands: Commands,
    time: Res<Time>,
    surface: Res<SurfaceSize>,
    tuning: Res<ActiveTuning>,
) {
    let row = DigitRow::new(surface.0, tuning.0, time.elapsed());
    info!(
        "Particle row built for {}x{} with {} slots",
        surface.0.x,
        surface.0.y,
        row.slots().len()
    );
    commands.insert_resource(ClockRow(row));
}

/// Rebuild the row at new anchors after a resize (no scatter)
fn relayout_row(time: Res<Time>, surface: Res<SurfaceSize>, mut row: ResMut<ClockRow>) {
    if !surface.is_changed() || surface.is_added() {
        return;
    }
    row.0.resize(surface.0, time.elapsed());
    info!("Particle row re-laid out for {}x{}", surface.0.x, surface.0.y);
}

/// Controls run on real time: `Time<Virtual>` clamps long frames, which would
/// make the stopwatch lose whatever passed while the window was hidden.
fn apply_gestures(
    real_time: Res<Time<Real>>,
    mut gestures: MessageReader<ClockGesture>,
    mut controls: ResMut<ClockControls>,
) {
    let now = real_time.elapsed();
    for gesture in gestures.read() {
        let was_running = controls.0.stopwatch().is_running();
        match gesture {
            ClockGesture::Click => controls.0.click(now),
            ClockGesture::DoubleClick => controls.0.double_click(now),
            ClockGesture::ToggleMode => {
                let mode = controls.0.toggle(now);
                info!("Display mode switched to {:?}", mode);
            }
        }

        let running = controls.0.stopwatch().is_running();
        if running != was_running {
            let elapsed = controls.0.stopwatch().elapsed(now);
            if running {
                info!("Stopwatch started at {:.1}s", elapsed.as_secs_f32());
            } else {
                info!("Stopwatch paused at {:.1}s", elapsed.as_secs_f32());
            }
        }
    }
}

/// Format the active mode's time and hand it to the row.
///
/// Runs every frame; the row itself skips strings it has already shown.
fn feed_time_string(
    time: Res<Time>,
    real_time: Res<Time<Real>>,
    mut controls: ResMut<ClockControls>,
    mut row: ResMut<ClockRow>,
) {
    if controls.0.take_redraw_request() {
        row.0.invalidate();
    }
    let time_string = controls.0.time_string(real_time.elapsed(), local_hms());
    row.0.set_time(&time_string, time.elapsed());
}

/// The animation loop proper: trail fade, particle step, draw
fn animate_row(
    time: Res<Time>,
    tuning: Res<ActiveTuning>,
    mut row: ResMut<ClockRow>,
    mut canvas: ResMut<ClockCanvas>,
) {
    canvas.0.fade(Srgba::BLACK, tuning.0.trail_alpha);
    row.0.update(time.elapsed());
    row.0.draw(&mut canvas.0);
}

/// Mirror the status text into the window title while the UI is revealed
fn update_status_line(
    real_time: Res<Time<Real>>,
    controls: Res<ClockControls>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    let Ok(mut window) = windows.single_mut() else {
        return;
    };

    let controls = &controls.0;
    let title = if controls.ui_visible(real_time.elapsed()) {
        let mode = match controls.mode() {
            DisplayMode::Clock => "Clock",
            DisplayMode::Stopwatch => "Stopwatch",
        };
        format!("{} | {} | {}", WINDOW_TITLE, mode, controls.status(local_hms()))
    } else {
        WINDOW_TITLE.to_string()
    };

    if window.title != title {
        window.title = title;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::ecs::system::RunSystemOnce;
    use bevy::platform::time::Instant;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::particles::tuning::presets;

    #[test]
    fn test_parse_tuning() {
        assert_eq!(ClockPlugin::parse_tuning("dreamy"), presets::DREAMY);
        assert_eq!(ClockPlugin::parse_tuning("bogus"), presets::ORIGINAL);
        assert_eq!(
            ClockPlugin::parse_tuning(r#"{ "trail_alpha": 0.5 }"#).trail_alpha,
            0.5
        );
        assert_eq!(ClockPlugin::parse_tuning("{ broken"), presets::ORIGINAL);
    }

    #[test]
    fn test_stopwatch_follows_real_time_through_a_stall() {
        let start = Instant::now();
        let mut real_time = Time::<Real>::new(start);
        real_time.update_with_instant(start);

        let mut controls = Controls::default();
        controls.toggle(Duration::ZERO);
        controls.double_click(Duration::ZERO);

        let mut world = World::new();
        world.insert_resource(real_time);
        world.insert_resource(Time::<()>::default());
        world.insert_resource(ClockControls(controls));
        world.insert_resource(ClockRow(DigitRow::with_rng(
            Vec2::new(800.0, 600.0),
            Tuning::default(),
            Duration::ZERO,
            StdRng::seed_from_u64(3),
        )));

        // One frame that took ten seconds, far past the virtual clock's clamp
        world
            .resource_mut::<Time<Real>>()
            .update_with_instant(start + Duration::from_secs(10));
        world
            .run_system_once(feed_time_string)
            .expect("feed_time_string should run");

        assert_eq!(world.resource::<ClockRow>().0.last_time(), Some("000010"));
    }
}
