//! Puts the CPU [`Canvas`] on screen.
//!
//! One unlit plane covers the whole window; its texture is the canvas, copied
//! over every frame. On resize both the plane and the texture are rebuilt.

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use super::canvas::{Canvas, Surface};
use crate::camera::SurfaceSize;

/// The frame buffer particles are drawn into
#[derive(Resource)]
pub struct ClockCanvas(pub Canvas);

/// Handles for the on-screen plane
#[derive(Resource)]
pub struct DisplayHandles {
    pub image: Handle<Image>,
    pub material: Handle<StandardMaterial>,
}

#[derive(Component)]
pub struct DisplayPlane;

fn canvas_image(canvas: &Canvas) -> Image {
    let size = canvas.size();
    let mut image = Image::new_fill(
        Extent3d {
            width: size.x,
            height: size.y,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        &[0, 0, 0, 255],
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    );
    image.data = Some(canvas.bytes().to_vec());
    image
}

fn plane_mesh(size: Vec2) -> Mesh {
    Plane3d::default().mesh().size(size.x, size.y).into()
}

pub fn setup_display(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
    surface: Res<SurfaceSize>,
) {
    let canvas = match Canvas::new(surface.pixels()) {
        Ok(canvas) => canvas,
        Err(e) => {
            error!("{}, the clock will not be drawn", e);
            return;
        }
    };
    let image = images.add(canvas_image(&canvas));
    let material = materials.add(StandardMaterial {
        base_color_texture: Some(image.clone()),
        unlit: true,
        ..default()
    });

    commands.spawn((
        Mesh3d(meshes.add(plane_mesh(surface.0))),
        MeshMaterial3d(material.clone()),
        Transform::IDENTITY,
        DisplayPlane,
        Name::new("Clock Display"),
    ));

    info!(
        "Display plane spawned at {}x{}",
        canvas.size().x,
        canvas.size().y
    );

    commands.insert_resource(ClockCanvas(canvas));
    commands.insert_resource(DisplayHandles { image, material });
}

/// Rebuild canvas, texture and plane after the window changed size
pub fn resize_display(
    surface: Res<SurfaceSize>,
    mut canvas: ResMut<ClockCanvas>,
    mut handles: ResMut<DisplayHandles>,
    mut images: ResMut<Assets<Image>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut planes: Query<&mut Mesh3d, With<DisplayPlane>>,
) {
    if !surface.is_changed() || surface.is_added() {
        return;
    }

    if let Err(e) = canvas.0.resize(surface.pixels()) {
        warn!("{}, keeping the previous canvas", e);
        return;
    }

    // A new texture (rather than resizing in place) forces the material to rebind
    let old_image = std::mem::replace(&mut handles.image, images.add(canvas_image(&canvas.0)));
    images.remove(&old_image);

    if let Some(material) = materials.get_mut(&handles.material) {
        material.base_color_texture = Some(handles.image.clone());
    }

    for mut mesh in &mut planes {
        mesh.0 = meshes.add(plane_mesh(surface.0));
    }
}

/// Copy this frame's pixels into the GPU texture
pub fn upload_canvas(
    canvas: Res<ClockCanvas>,
    handles: Res<DisplayHandles>,
    mut images: ResMut<Assets<Image>>,
) {
    let Some(image) = images.get_mut(&handles.image) else {
        return;
    };

    let bytes = canvas.0.bytes();
    if let Some(data) = image.data.as_mut().filter(|data| data.len() == bytes.len()) {
        data.copy_from_slice(bytes);
    } else {
        image.data = Some(bytes.to_vec());
    }
}
