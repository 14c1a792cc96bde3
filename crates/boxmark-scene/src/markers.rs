//! Marker boxes mirroring the registry, the placement box, and click selection

use bevy::prelude::*;
use bevy_egui::EguiContexts;
use boxmark_core::BoxId;
use std::collections::HashSet;

use crate::camera::MainCamera;
use crate::gizmo::{spawn_handles, GizmoAssets, TranslateGizmo};
use crate::picking::{cursor_ray, ray_aabb};
use crate::types::{srgb, to_vec3, BoxmarkSet, EditorSettings, EditorState};

/// Cursor travel (pixels) above which a press counts as a drag, not a click
const CLICK_SLOP: f32 = 5.0;

/// Component on each committed box
#[derive(Component)]
pub struct MarkerEntity {
    pub id: BoxId,
}

/// Component on the box currently being positioned
#[derive(Component)]
pub struct PlacementBox {
    pub epoch: u64,
}

#[derive(Resource)]
pub struct MarkerAssets {
    mesh: Handle<Mesh>,
    material: Handle<StandardMaterial>,
    selected_material: Handle<StandardMaterial>,
    half_extent: f32,
}

/// Press position of a pending click
#[derive(Resource, Default)]
pub struct ClickTracker {
    press_position: Option<Vec2>,
}

pub struct MarkersPlugin;

impl Plugin for MarkersPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ClickTracker>()
            .add_systems(Startup, setup_marker_assets)
            .add_systems(Update, pick_marker.in_set(BoxmarkSet::Route))
            .add_systems(Update, (
                sync_marker_entities,
                sync_placement_box,
                update_selection_highlight,
            ).chain().in_set(BoxmarkSet::Sync));
    }
}

fn setup_marker_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<EditorSettings>,
) {
    let extent = settings.markers.extent();
    let color = srgb(settings.markers.color);

    commands.insert_resource(MarkerAssets {
        mesh: meshes.add(Cuboid::new(extent, extent, extent)),
        material: materials.add(StandardMaterial {
            base_color: color,
            perceptual_roughness: 0.6,
            ..default()
        }),
        selected_material: materials.add(StandardMaterial {
            base_color: color,
            emissive: LinearRgba::rgb(0.6, 0.2, 0.4),
            perceptual_roughness: 0.6,
            ..default()
        }),
        half_extent: extent / 2.0,
    });
}

/// Spawn and despawn marker entities so they match the registry
fn sync_marker_entities(
    mut commands: Commands,
    editor: Res<EditorState>,
    assets: Res<MarkerAssets>,
    markers: Query<(Entity, &MarkerEntity)>,
) {
    if !editor.is_changed() {
        return;
    }

    let registry = editor.registry();
    let mut spawned: HashSet<BoxId> = HashSet::new();

    for (entity, marker) in markers.iter() {
        if registry.get(marker.id).is_some() {
            spawned.insert(marker.id);
        } else {
            tracing::debug!(id = %marker.id, "Despawning marker");
            commands.entity(entity).despawn();
        }
    }

    for placed in registry.all() {
        if spawned.contains(&placed.id) {
            continue;
        }
        tracing::debug!(id = %placed.id, position = %placed.position, "Spawning marker");
        commands.spawn((
            Mesh3d(assets.mesh.clone()),
            MeshMaterial3d(assets.material.clone()),
            Transform::from_translation(to_vec3(placed.position)),
            MarkerEntity { id: placed.id },
        ));
    }
}

/// Keep a single gizmo-carrying box in step with the placement session
fn sync_placement_box(
    mut commands: Commands,
    editor: Res<EditorState>,
    marker_assets: Res<MarkerAssets>,
    gizmo_assets: Res<GizmoAssets>,
    existing: Query<(Entity, &PlacementBox)>,
) {
    if !editor.is_changed() {
        return;
    }

    let wanted = editor.placement().map(|session| (session.epoch, session.origin));
    let mut current_epoch = None;

    for (entity, placement) in existing.iter() {
        match wanted {
            Some((epoch, _)) if epoch == placement.epoch => current_epoch = Some(epoch),
            _ => commands.entity(entity).despawn(),
        }
    }

    let Some((epoch, origin)) = wanted else { return };
    if current_epoch == Some(epoch) {
        return;
    }

    let entity = commands
        .spawn((
            Mesh3d(marker_assets.mesh.clone()),
            MeshMaterial3d(marker_assets.material.clone()),
            Transform::from_translation(to_vec3(origin)),
            PlacementBox { epoch },
            TranslateGizmo::default(),
        ))
        .id();
    spawn_handles(&mut commands, entity, &gizmo_assets);
}

fn update_selection_highlight(
    editor: Res<EditorState>,
    assets: Res<MarkerAssets>,
    mut markers: Query<(&MarkerEntity, &mut MeshMaterial3d<StandardMaterial>)>,
) {
    if !editor.is_changed() {
        return;
    }

    let target = editor.selection().target();
    for (marker, mut material) in markers.iter_mut() {
        let wanted = if Some(marker.id) == target {
            &assets.selected_material
        } else {
            &assets.material
        };
        if material.0 != *wanted {
            material.0 = wanted.clone();
        }
    }
}

/// Select the marker under the cursor on click (press and release without dragging)
fn pick_marker(
    mut editor: ResMut<EditorState>,
    mut tracker: ResMut<ClickTracker>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    markers: Query<(&MarkerEntity, &GlobalTransform)>,
    gizmos: Query<&TranslateGizmo>,
    assets: Res<MarkerAssets>,
    mut contexts: EguiContexts,
) {
    let Ok(window) = windows.single() else { return };

    if mouse_button.just_pressed(MouseButton::Left) {
        let egui_wants_pointer = contexts
            .ctx_mut()
            .map(|ctx| ctx.wants_pointer_input() || ctx.is_pointer_over_area())
            .unwrap_or(false);
        // A press that grabbed a gizmo handle is never a marker click
        let gizmo_grabbed = gizmos.iter().any(|gizmo| gizmo.active.is_some());
        tracker.press_position = if egui_wants_pointer || gizmo_grabbed {
            None
        } else {
            window.cursor_position()
        };
        return;
    }

    if !mouse_button.just_released(MouseButton::Left) {
        return;
    }
    let Some(pressed_at) = tracker.press_position.take() else { return };
    let Some(cursor) = window.cursor_position() else { return };
    if cursor.distance(pressed_at) > CLICK_SLOP {
        return;
    }

    let Ok((camera, camera_transform)) = camera_query.single() else { return };
    let Some(ray) = cursor_ray(window, camera, camera_transform) else { return };

    let half = Vec3::splat(assets.half_extent);
    let closest = markers
        .iter()
        .filter_map(|(marker, transform)| {
            let center = transform.translation();
            ray_aabb(ray.origin, *ray.direction, center - half, center + half).map(|t| (t, marker.id))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0));

    if let Some((_, id)) = closest {
        editor.click_box(id);
    }
}
