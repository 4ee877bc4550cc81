use bevy::camera::ScalingMode;
use bevy::prelude::*;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SurfaceSize>()
            .insert_resource(ClearColor(Color::BLACK))
            .add_systems(Startup, (track_surface_size, setup_camera).chain())
            .add_systems(Update, track_surface_size);
    }
}

/// Logical size of the primary window, which is also the canvas size in pixels
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize(pub Vec2);

impl Default for SurfaceSize {
    fn default() -> Self {
        Self(Vec2::new(1280.0, 720.0))
    }
}

impl SurfaceSize {
    /// Whole-pixel size, never smaller than 1x1
    pub fn pixels(&self) -> UVec2 {
        self.0.round().as_uvec2().max(UVec2::ONE)
    }
}

#[derive(Component)]
pub struct MainCamera;

/// Setup a top-down orthographic camera looking at the XZ plane
///
/// Coordinate System (right-handed, Y-up):
/// ```text
///        Y (height)
///        ↑
///        |
///   ----+---→ X (right on screen)
///       /
///      ↙ Z (down on screen when viewed from above)
/// ```
///
/// Camera looks down from +Y with -Z pointing up on screen, so the canvas
/// plane's first pixel row (at -Z) ends up at the top of the window.
/// `WindowSize` scaling keeps one world unit equal to one logical pixel.
fn setup_camera(mut commands: Commands) {
    let projection = Projection::Orthographic(OrthographicProjection {
        scaling_mode: ScalingMode::WindowSize,
        near: 0.0,
        far: 1000.0,
        ..OrthographicProjection::default_3d()
    });
    commands.spawn((
        Camera3d::default(),
        projection,
        Transform::from_xyz(0.0, 10.0, 0.0).looking_at(Vec3::ZERO, Vec3::NEG_Z),
        MainCamera,
    ));
}

/// Update the surface size resource when the window is resized
pub fn track_surface_size(mut surface: ResMut<SurfaceSize>, windows: Query<&Window>) {
    if let Ok(window) = windows.single() {
        let new_size = Vec2::new(window.width(), window.height());

        // Only touch the resource on a real change so `is_changed` means "resized"
        let moved = (new_size - surface.0).abs().max_element();
        if new_size.x >= 1.0 && new_size.y >= 1.0 && moved >= 1.0 {
            surface.0 = new_size;
            info!("Surface resized to {}x{}", new_size.x, new_size.y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_pixels() {
        assert_eq!(SurfaceSize(Vec2::new(1919.6, 1080.2)).pixels(), UVec2::new(1920, 1080));
        assert_eq!(SurfaceSize(Vec2::ZERO).pixels(), UVec2::ONE);
    }
}
