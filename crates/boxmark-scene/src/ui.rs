//! UI overlays using bevy_egui

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};
use boxmark_core::ModelLoad;

use crate::input::key_label;
use crate::types::EditorState;

const CREATE_TOOLTIP: &str = "Click to create a BOX and then drag it to the desired location.";

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // Main UI system runs in EguiPrimaryContextPass for proper input handling (bevy_egui 0.38+)
        app.add_systems(EguiPrimaryContextPass, ui_system);
    }
}

fn ui_system(mut contexts: EguiContexts, mut editor: ResMut<EditorState>) {
    // Get the egui context - early return if not available
    let Ok(ctx) = contexts.ctx_mut() else { return };

    let commit_key = key_label(editor.router().commit_key()).to_string();

    egui::Area::new(egui::Id::new("create_box"))
        .anchor(egui::Align2::LEFT_TOP, [12.0, 12.0])
        .show(ctx, |ui| {
            let button = egui::Button::new(egui::RichText::new("Create BOX").size(16.0));
            if ui.add(button).on_hover_text(CREATE_TOOLTIP).clicked() {
                editor.begin_placement();
            }

            if let Some(session) = editor.placement() {
                let hint = if session.is_dragging() {
                    "Dragging…".to_string()
                } else {
                    format!("Drag the handles, then press '{}' to save (Esc cancels)", commit_key)
                };
                ui.label(egui::RichText::new(hint).color(egui::Color32::LIGHT_YELLOW));
            }

            match editor.model() {
                ModelLoad::Pending => {
                    ui.label(egui::RichText::new("Loading model…").small().color(egui::Color32::GRAY));
                }
                ModelLoad::Failed(reason) => {
                    ui.label(egui::RichText::new(format!("Model unavailable: {}", reason))
                        .small()
                        .color(egui::Color32::from_rgb(220, 120, 120)));
                }
                ModelLoad::Ready => {}
            }
        });

    egui::Window::new("How To Use?")
        .anchor(egui::Align2::LEFT_BOTTOM, [12.0, -12.0])
        .resizable(false)
        .default_width(320.0)
        .show(ctx, |ui| {
            ui.label("• Hold the left mouse button and drag the mouse to rotate the model.");
            ui.label("• Click CREATE BOX to create a BOX, then drag it to the desired location using the translation handles.");
            ui.label(format!("• After you have placed the BOX at the desired location, press the key '{}'.", commit_key));
            ui.label("• Click a BOX to see its location details; remove it with Delete BOX.");
        });

    egui::Window::new("BOX Position Details:")
        .anchor(egui::Align2::RIGHT_TOP, [-12.0, 12.0])
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui| {
            ui.label(editor.selection().readout());
            ui.separator();
            let can_delete = editor.selection().target().is_some();
            if ui.add_enabled(can_delete, egui::Button::new("Delete BOX")).clicked() {
                editor.delete_selected();
            }
            ui.label(egui::RichText::new(format!("{} boxes placed", editor.registry().len()))
                .small()
                .color(egui::Color32::GRAY));
        });
}
