//! Boxmark Scene - Bevy plugins for the marker box editor
//!
//! Wraps [`boxmark_core::Editor`] in a Bevy resource and drives it from the
//! 3D viewport: orbit camera, translate gizmo, glTF model with a loading
//! placeholder, marker boxes with click selection, and egui panels.

pub mod camera;
pub mod gizmo;
pub mod input;
pub mod markers;
pub mod models;
pub mod picking;
pub mod scene;
pub mod types;
pub mod ui;

use bevy::prelude::*;
use boxmark_core::{Editor, EditorConfig};

pub use types::{BoxmarkSet, EditorSettings, EditorState};

/// Plugin that sets up the editor scene
pub struct BoxmarkScenePlugin {
    pub config: EditorConfig,
}

impl BoxmarkScenePlugin {
    pub fn new(config: EditorConfig) -> Self {
        Self { config }
    }
}

impl Plugin for BoxmarkScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(EditorState(Editor::from_config(&self.config)))
            .insert_resource(EditorSettings(self.config.clone()))
            // Gizmo feedback must reach the editor before the scene mirrors it
            // and before the camera decides whether it may orbit
            .configure_sets(Update, (
                BoxmarkSet::Gizmo,
                BoxmarkSet::Route,
                BoxmarkSet::Sync,
                BoxmarkSet::Camera,
            ).chain())
            .add_plugins(scene::SceneSetupPlugin)
            .add_plugins(camera::CameraPlugin)
            .add_plugins(models::ModelsPlugin)
            .add_plugins(gizmo::GizmoPlugin)
            .add_plugins(markers::MarkersPlugin)
            .add_plugins(input::InputPlugin)
            .add_plugins(ui::UiPlugin);
    }
}
