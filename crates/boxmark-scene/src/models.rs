//! glTF model loading with a placeholder while the asset is pending

use bevy::asset::LoadState;
use bevy::gltf::Gltf;
use bevy::prelude::*;

use crate::types::{BoxmarkSet, EditorSettings, EditorState};

/// Handle of the scene model being loaded
#[derive(Resource)]
pub struct SceneModel {
    pub path: String,
    pub handle: Handle<Gltf>,
}

/// Primitive shown until the model is ready
#[derive(Component)]
pub struct ModelPlaceholder;

/// Root entity of the spawned model scene
#[derive(Component)]
pub struct ModelRoot;

pub struct ModelsPlugin;

impl Plugin for ModelsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, start_model_load)
            .add_systems(Update, poll_model_load.in_set(BoxmarkSet::Sync));
    }
}

fn start_model_load(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    settings: Res<EditorSettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let path = settings.model.path.clone();
    tracing::info!("Starting to load scene model: {}", path);
    let handle: Handle<Gltf> = asset_server.load(&path);
    commands.insert_resource(SceneModel { path, handle });

    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(1.0, 1.0, 1.0))),
        MeshMaterial3d(materials.add(StandardMaterial::default())),
        Transform::default(),
        ModelPlaceholder,
    ));
}

/// Check loading state and swap the placeholder for the model scene
fn poll_model_load(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    gltf_assets: Res<Assets<Gltf>>,
    model: Res<SceneModel>,
    settings: Res<EditorSettings>,
    mut editor: ResMut<EditorState>,
    placeholders: Query<Entity, With<ModelPlaceholder>>,
) {
    if !editor.model().is_pending() {
        return;
    }

    let outcome = match asset_server.get_load_state(model.handle.id()) {
        Some(LoadState::Loaded) => {
            // Use the default scene, or the first one if the file has no default
            let scene = gltf_assets
                .get(&model.handle)
                .and_then(|gltf| gltf.default_scene.clone().or_else(|| gltf.scenes.first().cloned()));
            match scene {
                Some(scene_handle) => {
                    let config = &settings.model;
                    commands.spawn((
                        SceneRoot(scene_handle),
                        Transform::from_translation(Vec3::from_array(config.position))
                            .with_scale(Vec3::splat(config.scale)),
                        ModelRoot,
                    ));
                    for entity in placeholders.iter() {
                        commands.entity(entity).despawn();
                    }
                    tracing::info!("Model loaded: {}", model.path);
                    Ok(())
                }
                None => Err(format!("{} contains no scenes", model.path)),
            }
        }
        Some(LoadState::Failed(err)) => Err(err.to_string()),
        _ => return, // Still loading
    };

    if let Err(reason) = &outcome {
        tracing::warn!(path = %model.path, %reason, "Failed to load model, keeping placeholder");
    }
    editor.model_mut().resolve(outcome);
}
