//! Scene setup - lights and environment

use bevy::prelude::*;

/// Marker component for the main directional light
#[derive(Component)]
pub struct MainDirectionalLight;

/// Plugin for scene setup
pub struct SceneSetupPlugin;

impl Plugin for SceneSetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_lights);
    }
}

fn setup_lights(mut commands: Commands) {
    // Flat ambient fill so unlit sides of the model stay readable
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
        ..default()
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 5000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(8.0, 16.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
        MainDirectionalLight,
    ));

    commands.spawn((
        PointLight {
            intensity: 100000.0,
            shadows_enabled: false,
            color: Color::srgb(1.0, 0.95, 0.9), // Warm fill light
            ..default()
        },
        Transform::from_xyz(-6.0, 8.0, -6.0),
    ));
}
