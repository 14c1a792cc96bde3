//! Forwards keyboard presses and gizmo notifications to the editor

use bevy::prelude::*;
use bevy_egui::EguiContexts;
use boxmark_core::input::CANCEL_KEY;
use boxmark_core::{Editor, EditorEvent, EditorOutcome};

use crate::gizmo::GizmoNotifications;
use crate::types::{BoxmarkSet, EditorState};

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, route_editor_input.in_set(BoxmarkSet::Route))
            .add_systems(Last, shutdown_on_exit);
    }
}

/// DOM-style code for a key (`KeyCode::KeyS` -> `"KeyS"`)
///
/// Bevy's key codes follow the W3C `code` names, so the variant name is the code.
pub fn key_code_name(key: KeyCode) -> String {
    format!("{:?}", key)
}

/// Human-readable label for a key code (`"KeyS"` -> `"S"`)
pub fn key_label(code: &str) -> &str {
    code.strip_prefix("Key")
        .or_else(|| code.strip_prefix("Digit"))
        .unwrap_or(code)
}

/// Deliver a key press to the editor
///
/// Escape while idle has no bound listener, so it clears the selection instead.
pub fn press_key(editor: &mut Editor, code: &str) -> Option<EditorOutcome> {
    let outcome = editor.handle(EditorEvent::key(code));
    if outcome.is_none() && code == CANCEL_KEY && !editor.is_placing() {
        editor.clear_selection();
    }
    outcome
}

fn route_editor_input(
    mut editor: ResMut<EditorState>,
    mut notifications: ResMut<GizmoNotifications>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
) {
    for notification in notifications.drain(..) {
        editor.handle(notification.into());
    }

    // Typing into a text field is not a shortcut
    let egui_wants_keyboard = contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_keyboard_input())
        .unwrap_or(false);
    if egui_wants_keyboard {
        return;
    }

    for key in keyboard.get_just_pressed() {
        let code = key_code_name(*key);
        if let Some(EditorOutcome::Committed(placed)) = press_key(&mut editor.0, &code) {
            tracing::info!(id = %placed.id, "Box saved with {}", code);
        }
    }
}

fn shutdown_on_exit(mut exit: MessageReader<AppExit>, mut editor: ResMut<EditorState>) {
    if exit.read().next().is_some() {
        editor.shutdown();
        tracing::info!("Editor shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_code_names_match_dom_codes() {
        assert_eq!(key_code_name(KeyCode::KeyS), "KeyS");
        assert_eq!(key_code_name(KeyCode::Escape), "Escape");
        assert_eq!(key_code_name(KeyCode::Digit4), "Digit4");
    }

    #[test]
    fn test_key_label_strips_prefix() {
        assert_eq!(key_label("KeyS"), "S");
        assert_eq!(key_label("Digit1"), "1");
        assert_eq!(key_label("Enter"), "Enter");
    }

    fn editor_with_selected_box() -> Editor {
        let mut editor = Editor::default();
        editor.begin_placement();
        press_key(&mut editor, "KeyS");
        let id = editor.registry().all()[0].id;
        editor.click_box(id);
        editor
    }

    #[test]
    fn test_escape_while_idle_clears_selection() {
        let mut editor = editor_with_selected_box();
        assert!(editor.selection().target().is_some());

        assert_eq!(press_key(&mut editor, CANCEL_KEY), None);
        assert!(editor.selection().target().is_none());
        assert_eq!(editor.registry().len(), 1);
    }

    #[test]
    fn test_escape_while_placing_keeps_selection() {
        let mut editor = editor_with_selected_box();
        editor.begin_placement();

        assert_eq!(press_key(&mut editor, CANCEL_KEY), Some(EditorOutcome::Cancelled));
        assert!(!editor.is_placing());
        assert!(editor.selection().target().is_some());
    }

    #[test]
    fn test_other_keys_while_idle_keep_selection() {
        let mut editor = editor_with_selected_box();

        assert_eq!(press_key(&mut editor, "KeyS"), None);
        assert!(editor.selection().target().is_some());
    }
}
