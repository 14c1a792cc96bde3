//! Shared resources and schedule sets

use bevy::prelude::*;
use boxmark_core::{Editor, EditorConfig, Position};

/// The editor state, mutated only from `Update` systems and the UI pass
#[derive(Debug, Clone, Resource, Deref, DerefMut)]
pub struct EditorState(pub Editor);

/// Loaded configuration
#[derive(Debug, Clone, Resource, Deref)]
pub struct EditorSettings(pub EditorConfig);

/// Ordering of the editor's per-frame work
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxmarkSet {
    /// Gizmo grabs and drags
    Gizmo,
    /// Keyboard, gizmo notifications and clicks forwarded to the editor
    Route,
    /// Scene entities mirror the editor state
    Sync,
    /// Orbit camera
    Camera,
}

pub fn to_vec3(position: Position) -> Vec3 {
    Vec3::from_array(position.to_array())
}

pub fn to_position(v: Vec3) -> Position {
    Position::from(v.to_array())
}

pub fn srgb(color: [f32; 3]) -> Color {
    Color::srgb(color[0], color[1], color[2])
}
