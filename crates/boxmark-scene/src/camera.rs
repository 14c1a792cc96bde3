//! Camera controls and orbit navigation

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::types::{BoxmarkSet, EditorSettings, EditorState};

/// Camera controller settings
#[derive(Debug, Clone, Resource)]
pub struct CameraSettings {
    pub distance: f32,
    pub target_distance: f32, // For smooth zoom
    pub azimuth: f32,
    pub elevation: f32,
    pub target: Vec3,
    pub target_focus: Vec3, // For smooth re-centering
    pub sensitivity: f32,
    pub zoom_speed: f32,
    pub smooth_factor: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self::looking_from(Vec3::splat(12.0), 0.005, 0.1)
    }
}

impl CameraSettings {
    /// Orbit parameters for a camera at `eye` looking at the origin
    pub fn looking_from(eye: Vec3, sensitivity: f32, zoom_speed: f32) -> Self {
        let distance = eye.length().max(0.1);
        Self {
            distance,
            target_distance: distance,
            azimuth: eye.z.atan2(eye.x),
            elevation: (eye.y / distance).clamp(-1.0, 1.0).asin(),
            target: Vec3::ZERO,
            target_focus: Vec3::ZERO,
            sensitivity,
            zoom_speed,
            smooth_factor: 0.15,
        }
    }

    /// Camera position relative to the target (Y up)
    pub fn eye_offset(&self) -> Vec3 {
        Vec3::new(
            self.distance * self.elevation.cos() * self.azimuth.cos(),
            self.distance * self.elevation.sin(),
            self.distance * self.elevation.cos() * self.azimuth.sin(),
        )
    }
}

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Plugin for camera controls
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraSettings>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, update_camera.in_set(BoxmarkSet::Camera));
    }
}

fn setup_camera(mut commands: Commands, editor_settings: Res<EditorSettings>) {
    let camera = &editor_settings.camera;
    let eye = Vec3::from_array(camera.position);
    commands.insert_resource(CameraSettings::looking_from(eye, camera.sensitivity, camera.zoom_speed));

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            near: 0.05,
            far: 1000.0,
            ..default()
        }),
        Transform::from_translation(eye).looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
    ));
}

fn update_camera(
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
    mut settings: ResMut<CameraSettings>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    editor: Res<EditorState>,
    time: Res<Time>,
    mut contexts: EguiContexts,
) {
    // Check if egui wants the mouse - if so, don't process camera controls
    let egui_wants_pointer = contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_pointer_input() || ctx.is_pointer_over_area())
        .unwrap_or(false);

    // Orbit is suspended while a gizmo handle is grabbed
    let can_navigate = editor.orbit_enabled() && !egui_wants_pointer;
    let motion = mouse_motion.delta;

    // Orbit with left mouse drag
    if can_navigate && mouse_button.pressed(MouseButton::Left) {
        settings.azimuth += motion.x * settings.sensitivity;
        settings.elevation = (settings.elevation + motion.y * settings.sensitivity)
            .clamp(-1.5, 1.5);
    }

    // Pan with right mouse drag in the camera's vertical plane
    if can_navigate && mouse_button.pressed(MouseButton::Right) {
        let right = Vec3::new(settings.azimuth.sin(), 0.0, -settings.azimuth.cos());
        let pan_speed = settings.distance * 0.002;
        settings.target_focus -= right * motion.x * pan_speed;
        settings.target_focus += Vec3::Y * motion.y * pan_speed;
    }

    if can_navigate && mouse_scroll.delta.y != 0.0 {
        let zoom_factor = 1.0 - mouse_scroll.delta.y * settings.zoom_speed;
        settings.target_distance = (settings.target_distance * zoom_factor).clamp(1.0, 100.0);
    }

    // Smooth interpolation for zoom and target
    let dt = time.delta_secs();
    let lerp_factor = 1.0 - (-settings.smooth_factor * 60.0 * dt).exp();
    settings.distance = settings.distance + (settings.target_distance - settings.distance) * lerp_factor;
    settings.target = settings.target + (settings.target_focus - settings.target) * lerp_factor;

    if let Ok(mut transform) = camera_query.single_mut() {
        transform.translation = settings.target + settings.eye_offset();
        transform.look_at(settings.target, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looking_from_round_trips_eye() {
        let eye = Vec3::new(12.0, 12.0, 12.0);
        let settings = CameraSettings::looking_from(eye, 0.005, 0.1);
        assert!(settings.eye_offset().distance(eye) < 1e-3);
    }

    #[test]
    fn test_looking_from_below_horizon() {
        let eye = Vec3::new(-3.0, -4.0, 0.0);
        let settings = CameraSettings::looking_from(eye, 0.005, 0.1);
        assert!(settings.elevation < 0.0);
        assert!(settings.eye_offset().distance(eye) < 1e-3);
    }
}
