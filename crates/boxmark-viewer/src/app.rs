//! Bevy application setup

use bevy::prelude::*;
use bevy::winit::WinitSettings;
use bevy_egui::EguiPlugin;
use bevy_picking::DefaultPickingPlugins;
use boxmark_core::EditorConfig;
use boxmark_scene::BoxmarkScenePlugin;

/// Run the Bevy application
pub fn run(config: EditorConfig) {
    tracing::info!(
        model = %config.model.path,
        commit_key = %config.editor.commit_key,
        policy = ?config.editor.commit_policy,
        "Starting editor"
    );

    App::new()
        .insert_resource(ClearColor(Color::srgb(0.1, 0.1, 0.15))) // Dark blue-gray background
        .insert_resource(WinitSettings::default())
        .add_plugins(DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Boxmark".to_string(),
                    canvas: Some("#boxmark-canvas".to_string()),
                    fit_canvas_to_parent: true,
                    prevent_default_event_handling: false,
                    ..default()
                }),
                ..default()
            })
            .set(AssetPlugin {
                // Model paths in the config are relative to the served root
                file_path: "".to_string(),
                // Don't look for .meta files - static hosts don't have them
                meta_check: bevy::asset::AssetMetaCheck::Never,
                ..default()
            })
        )
        // Must be added BEFORE EguiPlugin so it can detect PickingPlugin
        .add_plugins(DefaultPickingPlugins)
        .add_plugins(EguiPlugin::default())
        .add_plugins(BoxmarkScenePlugin::new(config))
        .run();
}
