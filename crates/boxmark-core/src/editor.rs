//! Editor facade tying the registry, placement session, selection and router together

use tracing::{debug, info};

use crate::asset::ModelLoad;
use crate::config::EditorConfig;
use crate::input::{EditorEvent, InputRouter, RoutedAction};
use crate::placement::{CommitPolicy, Placement, PlacementSession};
use crate::position::Position;
use crate::registry::{BoxId, BoxRegistry, PlacedBox};
use crate::selection::{SelectedDetail, Selection};

/// Observable result of handling an event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorOutcome {
    Committed(PlacedBox),
    Cancelled,
    DragStateChanged(bool),
    Moved(Position),
}

/// All editor state, owned by the UI event loop
#[derive(Debug, Clone)]
pub struct Editor {
    registry: BoxRegistry,
    placement: Placement,
    selection: Selection,
    router: InputRouter,
    orbit_enabled: bool,
    model: ModelLoad,
}

impl Default for Editor {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl Editor {
    pub fn new(commit_key: impl Into<String>, policy: CommitPolicy, default_position: Position) -> Self {
        Self {
            registry: BoxRegistry::new(),
            placement: Placement::new(policy, default_position),
            selection: Selection::default(),
            router: InputRouter::new(commit_key),
            orbit_enabled: true,
            model: ModelLoad::default(),
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(
            config.editor.commit_key.clone(),
            config.editor.commit_policy,
            Position::from(config.editor.default_position),
        )
    }

    /// Enter creation mode, replacing any uncommitted session
    ///
    /// Returns the epoch of the new session.
    pub fn begin_placement(&mut self) -> u64 {
        if let Some(discarded) = self.placement.begin() {
            debug!(epoch = discarded.epoch, "Discarded uncommitted placement");
        }
        self.router.bind_placement();
        self.orbit_enabled = true;

        let epoch = self.placement.session().map(|s| s.epoch).unwrap_or_default();
        info!(epoch, policy = ?self.placement.policy(), "Placement started");
        epoch
    }

    /// Leave creation mode without committing
    pub fn cancel_placement(&mut self) -> bool {
        match self.placement.cancel() {
            Some(session) => {
                self.finish_placement();
                info!(epoch = session.epoch, "Placement cancelled");
                true
            }
            None => false,
        }
    }

    /// Route a raw event through the bound listeners
    pub fn handle(&mut self, event: EditorEvent) -> Option<EditorOutcome> {
        let Some(action) = self.router.route(&event) else {
            debug!(?event, "Event dropped, listener not bound");
            return None;
        };

        match action {
            RoutedAction::Commit => self.commit().map(EditorOutcome::Committed),
            RoutedAction::Cancel => self.cancel_placement().then_some(EditorOutcome::Cancelled),
            RoutedAction::SetDragging(dragging) => {
                self.set_dragging(dragging);
                Some(EditorOutcome::DragStateChanged(dragging))
            }
            RoutedAction::Record(position) => {
                self.placement.record(position).then_some(EditorOutcome::Moved(position))
            }
        }
    }

    /// Append the live position of the current session to the registry
    pub fn commit(&mut self) -> Option<PlacedBox> {
        let Some(position) = self.placement.commit() else {
            debug!(active = self.placement.is_active(), "Commit ignored, nothing to place");
            return None;
        };
        let id = self.registry.append(position);
        self.finish_placement();
        info!(%id, %position, "Box committed");
        Some(PlacedBox { id, position })
    }

    fn set_dragging(&mut self, dragging: bool) {
        self.orbit_enabled = !dragging;
        if self.placement.set_dragging(dragging) {
            debug!(dragging, "Gizmo drag state changed");
        }
    }

    fn finish_placement(&mut self) {
        self.router.unbind_all();
        self.orbit_enabled = true;
    }

    /// Select a committed box by ID
    pub fn click_box(&mut self, id: BoxId) -> Option<&SelectedDetail> {
        let Some(placed) = self.registry.get(id) else {
            debug!(%id, "Click on unknown box ignored");
            return None;
        };
        let detail = self.selection.on_box_clicked(placed);
        info!(%id, readout = %detail, "Box selected");
        Some(detail)
    }

    /// Delete the selected box, if any
    pub fn delete_selected(&mut self) -> Option<PlacedBox> {
        let removed = self.selection.delete_selected(&mut self.registry);
        match &removed {
            Some(placed) => info!(id = %placed.id, "Box deleted"),
            None => debug!("Delete ignored, no selection"),
        }
        removed
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Drop the active session and detach every listener
    pub fn shutdown(&mut self) {
        self.placement.cancel();
        self.finish_placement();
    }

    pub fn orbit_enabled(&self) -> bool {
        self.orbit_enabled
    }

    pub fn placement(&self) -> Option<&PlacementSession> {
        self.placement.session()
    }

    pub fn is_placing(&self) -> bool {
        self.placement.is_active()
    }

    pub fn registry(&self) -> &BoxRegistry {
        &self.registry
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn router(&self) -> &InputRouter {
        &self.router
    }

    pub fn model(&self) -> &ModelLoad {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut ModelLoad {
        &mut self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Listener;

    fn editor() -> Editor {
        Editor::new("KeyS", CommitPolicy::AllowDefault, Position::ORIGIN)
    }

    #[test]
    fn test_drag_commit_and_inspect() {
        let mut editor = editor();
        editor.begin_placement();
        editor.handle(EditorEvent::DraggingChanged(true));
        editor.handle(EditorEvent::GizmoChanged(Position::new(1.005, 2.0, -3.333)));
        editor.handle(EditorEvent::DraggingChanged(false));

        let outcome = editor.handle(EditorEvent::key("KeyS"));
        let Some(EditorOutcome::Committed(placed)) = outcome else {
            panic!("expected commit, got {:?}", outcome);
        };

        assert_eq!(editor.registry().len(), 1);
        let detail = editor.click_box(placed.id).unwrap().clone();
        assert_eq!(detail.to_string(), "X: 1.00 Y: 2.00 Z: -3.33");
        assert_eq!(editor.registry().index_of(detail.id), Some(0));
    }

    #[test]
    fn test_delete_selected_second_of_two() {
        let mut editor = editor();
        for x in [0.0, 1.0] {
            editor.begin_placement();
            editor.handle(EditorEvent::GizmoChanged(Position::new(x, 0.0, 0.0)));
            editor.handle(EditorEvent::key("KeyS"));
        }
        let first = editor.registry().all()[0];
        let second = editor.registry().all()[1];

        editor.click_box(second.id);
        assert_eq!(editor.delete_selected(), Some(second));

        assert_eq!(editor.registry().all(), &[first]);
        assert!(editor.selection().target().is_none());
    }

    #[test]
    fn test_commit_without_session_is_noop() {
        let mut editor = editor();
        assert_eq!(editor.handle(EditorEvent::key("KeyS")), None);
        assert_eq!(editor.commit(), None);
        assert!(editor.registry().is_empty());
    }

    #[test]
    fn test_reentry_commits_only_last_drag() {
        let mut editor = editor();
        editor.begin_placement();
        editor.handle(EditorEvent::GizmoChanged(Position::new(7.0, 7.0, 7.0)));

        editor.begin_placement();
        editor.handle(EditorEvent::DraggingChanged(true));
        editor.handle(EditorEvent::GizmoChanged(Position::new(1.0, 0.0, 0.0)));
        editor.handle(EditorEvent::GizmoChanged(Position::new(2.0, 0.5, 0.0)));
        editor.handle(EditorEvent::DraggingChanged(false));
        editor.handle(EditorEvent::key("KeyS"));

        let positions: Vec<Position> = editor.registry().positions().collect();
        assert_eq!(positions, vec![Position::new(2.0, 0.5, 0.0)]);
    }

    #[test]
    fn test_orbit_toggle_is_idempotent() {
        let mut editor = editor();
        editor.begin_placement();
        assert!(editor.orbit_enabled());

        editor.handle(EditorEvent::DraggingChanged(true));
        editor.handle(EditorEvent::DraggingChanged(true));
        assert!(!editor.orbit_enabled());

        editor.handle(EditorEvent::DraggingChanged(false));
        assert!(editor.orbit_enabled());

        editor.handle(EditorEvent::DraggingChanged(true));
        editor.handle(EditorEvent::DraggingChanged(false));
        assert!(editor.orbit_enabled());
    }

    #[test]
    fn test_commit_mid_drag_reenables_orbit() {
        let mut editor = editor();
        editor.begin_placement();
        editor.handle(EditorEvent::DraggingChanged(true));
        editor.handle(EditorEvent::key("KeyS"));

        assert!(editor.orbit_enabled());
        assert!(!editor.is_placing());
        assert_eq!(editor.registry().positions().next(), Some(Position::ORIGIN));
    }

    #[test]
    fn test_listeners_follow_session_lifecycle() {
        let mut editor = editor();
        assert_eq!(editor.router().bound_count(), 0);

        editor.begin_placement();
        editor.begin_placement();
        assert_eq!(editor.router().bound_count(), Listener::ALL.len());

        editor.handle(EditorEvent::key("Escape"));
        assert!(!editor.is_placing());
        assert_eq!(editor.router().bound_count(), 0);

        // Gizmo notifications after teardown never reach the session
        assert_eq!(editor.handle(EditorEvent::GizmoChanged(Position::ORIGIN)), None);
    }

    #[test]
    fn test_require_drag_policy() {
        let mut editor = Editor::new("KeyS", CommitPolicy::RequireDrag, Position::ORIGIN);
        editor.begin_placement();
        assert_eq!(editor.handle(EditorEvent::key("KeyS")), None);
        assert!(editor.is_placing());

        editor.handle(EditorEvent::GizmoChanged(Position::new(0.0, 1.0, 0.0)));
        assert!(matches!(editor.handle(EditorEvent::key("KeyS")), Some(EditorOutcome::Committed(_))));
    }

    #[test]
    fn test_selection_untouched_by_placement() {
        let mut editor = editor();
        editor.begin_placement();
        let placed = editor.commit().unwrap();
        editor.click_box(placed.id);

        editor.begin_placement();
        editor.delete_selected();
        assert!(editor.is_placing());
        assert!(editor.registry().is_empty());
    }
}
