//! Translate gizmo with one draggable handle per world axis
//!
//! The gizmo reports back through [`GizmoNotifications`], which the input
//! router drains each frame. It never touches the editor directly.

use bevy::prelude::*;
use bevy_egui::EguiContexts;
use boxmark_core::EditorEvent;

use crate::camera::MainCamera;
use crate::picking::{closest_to_axis, cursor_ray};
use crate::types::{to_position, BoxmarkSet};

const HANDLE_LENGTH: f32 = 1.2;
const HANDLE_RADIUS: f32 = 0.03;
const CONE_HEIGHT: f32 = 0.2;
const CONE_RADIUS: f32 = 0.08;
/// Max distance between cursor ray and axis that still grabs the handle
const GRAB_RADIUS: f32 = 0.12;

/// World axis a handle moves along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GizmoAxis {
    X,
    Y,
    Z,
}

impl GizmoAxis {
    pub const ALL: [GizmoAxis; 3] = [GizmoAxis::X, GizmoAxis::Y, GizmoAxis::Z];

    pub fn direction(self) -> Vec3 {
        match self {
            Self::X => Vec3::X,
            Self::Y => Vec3::Y,
            Self::Z => Vec3::Z,
        }
    }

    fn color(self) -> Color {
        match self {
            Self::X => Color::srgb(0.9, 0.2, 0.2),
            Self::Y => Color::srgb(0.2, 0.9, 0.2),
            Self::Z => Color::srgb(0.2, 0.2, 0.9),
        }
    }

    /// Rotation turning a Y-aligned primitive onto this axis
    fn rotation(self) -> Quat {
        match self {
            Self::X => Quat::from_rotation_z(-std::f32::consts::FRAC_PI_2),
            Self::Y => Quat::IDENTITY,
            Self::Z => Quat::from_rotation_x(std::f32::consts::FRAC_PI_2),
        }
    }
}

/// Notification produced by the gizmo
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GizmoNotification {
    DraggingChanged(bool),
    Moved(Vec3),
}

impl From<GizmoNotification> for EditorEvent {
    fn from(notification: GizmoNotification) -> Self {
        match notification {
            GizmoNotification::DraggingChanged(value) => EditorEvent::DraggingChanged(value),
            GizmoNotification::Moved(translation) => EditorEvent::GizmoChanged(to_position(translation)),
        }
    }
}

/// Queue of gizmo notifications waiting to be routed
#[derive(Resource, Default, Deref, DerefMut)]
pub struct GizmoNotifications(pub Vec<GizmoNotification>);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveDrag {
    pub axis: GizmoAxis,
    pub start_translation: Vec3,
    /// Axis parameter under the cursor when the handle was grabbed
    pub start_param: f32,
}

/// Attach to an entity to make it draggable along the world axes
#[derive(Component, Debug, Default)]
pub struct TranslateGizmo {
    pub active: Option<ActiveDrag>,
}

/// Visual handle child of a [`TranslateGizmo`]
#[derive(Component)]
pub struct GizmoHandle {
    pub axis: GizmoAxis,
}

/// Shared meshes and materials for handles
#[derive(Resource)]
pub struct GizmoAssets {
    shaft: Handle<Mesh>,
    tip: Handle<Mesh>,
    materials: Vec<(GizmoAxis, Handle<StandardMaterial>)>,
    active_material: Handle<StandardMaterial>,
}

impl GizmoAssets {
    fn material(&self, axis: GizmoAxis) -> Handle<StandardMaterial> {
        self.materials
            .iter()
            .find(|(a, _)| *a == axis)
            .map(|(_, m)| m.clone())
            .unwrap_or_else(|| self.active_material.clone())
    }
}

pub struct GizmoPlugin;

impl Plugin for GizmoPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GizmoNotifications>()
            .add_systems(Startup, setup_gizmo_assets)
            .add_systems(Update, (
                drive_translate_gizmo,
                update_handle_materials,
            ).chain().in_set(BoxmarkSet::Gizmo));
    }
}

fn setup_gizmo_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let axis_materials = GizmoAxis::ALL
        .iter()
        .map(|axis| {
            let material = materials.add(StandardMaterial {
                base_color: axis.color(),
                unlit: true,
                ..default()
            });
            (*axis, material)
        })
        .collect();

    commands.insert_resource(GizmoAssets {
        shaft: meshes.add(Cylinder::new(HANDLE_RADIUS, HANDLE_LENGTH)),
        tip: meshes.add(Cone::new(CONE_RADIUS, CONE_HEIGHT)),
        materials: axis_materials,
        active_material: materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.85, 0.1),
            unlit: true,
            ..default()
        }),
    });
}

/// Spawn the three axis handles under `parent`
pub fn spawn_handles(commands: &mut Commands, parent: Entity, assets: &GizmoAssets) {
    commands.entity(parent).with_children(|children| {
        for axis in GizmoAxis::ALL {
            let dir = axis.direction();
            let material = assets.material(axis);
            children.spawn((
                Mesh3d(assets.shaft.clone()),
                MeshMaterial3d(material.clone()),
                Transform::from_translation(dir * HANDLE_LENGTH / 2.0).with_rotation(axis.rotation()),
                GizmoHandle { axis },
            ));
            children.spawn((
                Mesh3d(assets.tip.clone()),
                MeshMaterial3d(material),
                Transform::from_translation(dir * (HANDLE_LENGTH + CONE_HEIGHT / 2.0))
                    .with_rotation(axis.rotation()),
                GizmoHandle { axis },
            ));
        }
    });
}

/// Pick the handle under the cursor ray, nearest first
pub fn grab_axis(origin: Vec3, ray_origin: Vec3, ray_dir: Vec3) -> Option<(GizmoAxis, f32)> {
    GizmoAxis::ALL
        .iter()
        .filter_map(|axis| {
            let approach = closest_to_axis(origin, axis.direction(), ray_origin, ray_dir)?;
            let on_handle = (0.0..=HANDLE_LENGTH + CONE_HEIGHT).contains(&approach.along_axis);
            (on_handle && approach.along_ray > 0.0 && approach.distance < GRAB_RADIUS)
                .then_some((*axis, approach.along_ray, approach.along_axis))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(axis, _, param)| (axis, param))
}

fn drive_translate_gizmo(
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut gizmo_query: Query<(&mut TranslateGizmo, &mut Transform)>,
    mut notifications: ResMut<GizmoNotifications>,
    mut contexts: EguiContexts,
) {
    let Ok((mut gizmo, mut transform)) = gizmo_query.single_mut() else {
        return;
    };

    if mouse_button.just_released(MouseButton::Left) && gizmo.active.take().is_some() {
        notifications.push(GizmoNotification::DraggingChanged(false));
        return;
    }

    let Ok(window) = windows.single() else { return };
    let Ok((camera, camera_transform)) = camera_query.single() else { return };
    let Some(ray) = cursor_ray(window, camera, camera_transform) else { return };

    if mouse_button.just_pressed(MouseButton::Left) && gizmo.active.is_none() {
        let egui_wants_pointer = contexts
            .ctx_mut()
            .map(|ctx| ctx.wants_pointer_input() || ctx.is_pointer_over_area())
            .unwrap_or(false);
        if egui_wants_pointer {
            return;
        }

        if let Some((axis, start_param)) = grab_axis(transform.translation, ray.origin, *ray.direction) {
            gizmo.active = Some(ActiveDrag {
                axis,
                start_translation: transform.translation,
                start_param,
            });
            notifications.push(GizmoNotification::DraggingChanged(true));
        }
        return;
    }

    let Some(drag) = gizmo.active else { return };
    if !mouse_button.pressed(MouseButton::Left) {
        return;
    }

    let dir = drag.axis.direction();
    let Some(approach) = closest_to_axis(drag.start_translation, dir, ray.origin, *ray.direction) else {
        return;
    };
    let translation = drag.start_translation + dir * (approach.along_axis - drag.start_param);
    if translation != transform.translation {
        transform.translation = translation;
        notifications.push(GizmoNotification::Moved(translation));
    }
}

fn update_handle_materials(
    gizmo_query: Query<(&TranslateGizmo, &Children), Changed<TranslateGizmo>>,
    mut handles: Query<(&GizmoHandle, &mut MeshMaterial3d<StandardMaterial>)>,
    assets: Res<GizmoAssets>,
) {
    for (gizmo, children) in gizmo_query.iter() {
        let active_axis = gizmo.active.map(|drag| drag.axis);
        for child in children.iter() {
            if let Ok((handle, mut material)) = handles.get_mut(child) {
                material.0 = if active_axis == Some(handle.axis) {
                    assets.active_material.clone()
                } else {
                    assets.material(handle.axis)
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grab_x_handle_from_above() {
        // Looking straight down onto the middle of the X shaft
        let grabbed = grab_axis(Vec3::ZERO, Vec3::new(0.6, 10.0, 0.0), Vec3::NEG_Y);
        let (axis, param) = grabbed.unwrap();
        assert_eq!(axis, GizmoAxis::X);
        assert!((param - 0.6).abs() < 1e-4);
    }

    #[test]
    fn test_miss_beyond_handle_tip() {
        let grabbed = grab_axis(Vec3::ZERO, Vec3::new(3.0, 10.0, 0.0), Vec3::NEG_Y);
        assert!(grabbed.is_none());
    }

    #[test]
    fn test_grab_relative_to_gizmo_origin() {
        let origin = Vec3::new(5.0, 0.0, 5.0);
        let grabbed = grab_axis(origin, Vec3::new(5.0, 10.0, 5.5), Vec3::NEG_Y);
        assert_eq!(grabbed.map(|(axis, _)| axis), Some(GizmoAxis::Z));
    }

    #[test]
    fn test_notifications_map_to_editor_events() {
        let event: EditorEvent = GizmoNotification::Moved(Vec3::new(1.0, 2.0, 3.0)).into();
        assert_eq!(event, EditorEvent::GizmoChanged(boxmark_core::Position::new(1.0, 2.0, 3.0)));

        let event: EditorEvent = GizmoNotification::DraggingChanged(true).into();
        assert_eq!(event, EditorEvent::DraggingChanged(true));
    }
}
