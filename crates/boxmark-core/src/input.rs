//! Input routing between the scene and the placement session
//!
//! Listeners are attached and detached by placement transitions rather than
//! on every frame. An event whose listener is not bound is dropped here, so
//! a stale key press or gizmo notification can never reach an idle editor.

use std::collections::BTreeSet;

use crate::position::Position;

/// Key code that cancels an active placement
pub const CANCEL_KEY: &str = "Escape";

/// Raw notifications coming from the keyboard and the gizmo
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// Global key press, `code` uses DOM-style names (`"KeyS"`, `"Escape"`)
    KeyDown { code: String },
    /// Gizmo grab state changed
    DraggingChanged(bool),
    /// Gizmo moved its object
    GizmoChanged(Position),
}

impl EditorEvent {
    pub fn key(code: impl Into<String>) -> Self {
        Self::KeyDown { code: code.into() }
    }

    /// Listener responsible for this event
    pub fn listener(&self) -> Listener {
        match self {
            Self::KeyDown { .. } => Listener::KeyDown,
            Self::DraggingChanged(_) => Listener::DraggingChanged,
            Self::GizmoChanged(_) => Listener::GizmoChange,
        }
    }
}

/// Attachable listener kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Listener {
    KeyDown,
    DraggingChanged,
    GizmoChange,
}

impl Listener {
    pub const ALL: [Listener; 3] = [Listener::KeyDown, Listener::DraggingChanged, Listener::GizmoChange];
}

/// What the editor should do with a routed event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoutedAction {
    Commit,
    Cancel,
    SetDragging(bool),
    Record(Position),
}

/// Tracks bound listeners and translates events into actions
#[derive(Debug, Clone)]
pub struct InputRouter {
    commit_key: String,
    bound: BTreeSet<Listener>,
}

impl InputRouter {
    pub fn new(commit_key: impl Into<String>) -> Self {
        Self {
            commit_key: commit_key.into(),
            bound: BTreeSet::new(),
        }
    }

    /// Attach a listener; returns `false` if it was already attached
    pub fn bind(&mut self, listener: Listener) -> bool {
        self.bound.insert(listener)
    }

    /// Detach a listener; returns `false` if it was not attached
    pub fn unbind(&mut self, listener: Listener) -> bool {
        self.bound.remove(&listener)
    }

    /// Attach every listener used while a placement is active
    pub fn bind_placement(&mut self) {
        for listener in Listener::ALL {
            if self.bind(listener) {
                tracing::trace!(?listener, "Listener bound");
            }
        }
    }

    /// Detach everything
    pub fn unbind_all(&mut self) {
        for listener in Listener::ALL {
            if self.unbind(listener) {
                tracing::trace!(?listener, "Listener unbound");
            }
        }
    }

    pub fn is_bound(&self, listener: Listener) -> bool {
        self.bound.contains(&listener)
    }

    pub fn bound_count(&self) -> usize {
        self.bound.len()
    }

    pub fn commit_key(&self) -> &str {
        &self.commit_key
    }

    /// Translate `event` into an action, or drop it
    pub fn route(&self, event: &EditorEvent) -> Option<RoutedAction> {
        if !self.is_bound(event.listener()) {
            return None;
        }
        match event {
            EditorEvent::KeyDown { code } if *code == self.commit_key => Some(RoutedAction::Commit),
            EditorEvent::KeyDown { code } if code == CANCEL_KEY => Some(RoutedAction::Cancel),
            EditorEvent::KeyDown { .. } => None,
            EditorEvent::DraggingChanged(value) => Some(RoutedAction::SetDragging(*value)),
            EditorEvent::GizmoChanged(position) => Some(RoutedAction::Record(*position)),
        }
    }
}
