//! Placement session state machine
//!
//! ```text
//! Idle --begin--> Creating --drag(true)--> Dragging
//!                    ^                        |
//!                    +-------drag(false)------+
//! Creating/Dragging --commit--> Idle   (position handed to the registry)
//! Creating/Dragging --cancel--> Idle   (nothing appended)
//! ```

use serde::{Deserialize, Serialize};

use crate::position::Position;

/// What a commit does when the gizmo never reported a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitPolicy {
    /// Seed the session with the default placement position, so an
    /// immediate commit places the box there
    #[default]
    AllowDefault,
    /// Reject commits until at least one gizmo change has been seen
    RequireDrag,
}

/// Phase of an active session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementPhase {
    /// Box is shown with the gizmo; camera orbit is available
    Creating,
    /// Gizmo handle is grabbed; camera orbit is suspended
    Dragging,
}

/// The box currently being positioned
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementSession {
    /// Counter identifying this activation
    pub epoch: u64,
    pub phase: PlacementPhase,
    /// Where the placeholder box spawns
    pub origin: Position,
    /// Last position reported by the gizmo (last write wins)
    pub live: Option<Position>,
}

impl PlacementSession {
    pub fn is_dragging(&self) -> bool {
        self.phase == PlacementPhase::Dragging
    }
}

/// Owner of the optional placement session
#[derive(Debug, Clone)]
pub struct Placement {
    session: Option<PlacementSession>,
    next_epoch: u64,
    policy: CommitPolicy,
    default_position: Position,
}

impl Placement {
    pub fn new(policy: CommitPolicy, default_position: Position) -> Self {
        Self {
            session: None,
            next_epoch: 0,
            policy,
            default_position,
        }
    }

    /// Enter `Creating` with a fresh session
    ///
    /// Any session already in progress is discarded without being committed.
    /// Returns the discarded session, if there was one.
    pub fn begin(&mut self) -> Option<PlacementSession> {
        let live = match self.policy {
            CommitPolicy::AllowDefault => Some(self.default_position),
            CommitPolicy::RequireDrag => None,
        };
        let session = PlacementSession {
            epoch: self.next_epoch,
            phase: PlacementPhase::Creating,
            origin: self.default_position,
            live,
        };
        self.next_epoch += 1;
        self.session.replace(session)
    }

    /// Apply a drag-state notification; returns whether the phase changed
    pub fn set_dragging(&mut self, dragging: bool) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let phase = if dragging {
            PlacementPhase::Dragging
        } else {
            PlacementPhase::Creating
        };
        if session.phase == phase {
            return false;
        }
        session.phase = phase;
        true
    }

    /// Overwrite the live position; ignored when idle
    pub fn record(&mut self, position: Position) -> bool {
        match self.session.as_mut() {
            Some(session) => {
                session.live = Some(position);
                true
            }
            None => false,
        }
    }

    /// Take the live position and clear the session
    ///
    /// With no session, or a session that has no live position yet, nothing
    /// happens and `None` is returned; the session (if any) stays active.
    pub fn commit(&mut self) -> Option<Position> {
        let position = self.session.as_ref()?.live?;
        self.session = None;
        Some(position)
    }

    /// Drop the session without committing
    pub fn cancel(&mut self) -> Option<PlacementSession> {
        self.session.take()
    }

    pub fn session(&self) -> Option<&PlacementSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn policy(&self) -> CommitPolicy {
        self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_seeds_default_position() {
        let mut placement = Placement::new(CommitPolicy::AllowDefault, Position::new(0.0, 1.0, 0.0));
        assert!(placement.begin().is_none());

        let session = placement.session().unwrap();
        assert_eq!(session.phase, PlacementPhase::Creating);
        assert_eq!(session.live, Some(Position::new(0.0, 1.0, 0.0)));
        assert_eq!(placement.commit(), Some(Position::new(0.0, 1.0, 0.0)));
        assert!(!placement.is_active());
    }

    #[test]
    fn test_require_drag_rejects_commit_without_change() {
        let mut placement = Placement::new(CommitPolicy::RequireDrag, Position::ORIGIN);
        assert_eq!(placement.policy(), CommitPolicy::RequireDrag);
        placement.begin();

        assert_eq!(placement.commit(), None);
        assert!(placement.is_active());

        placement.record(Position::new(3.0, 0.0, 0.0));
        assert_eq!(placement.commit(), Some(Position::new(3.0, 0.0, 0.0)));
        assert!(!placement.is_active());
    }

    #[test]
    fn test_drag_phase_toggles_are_idempotent() {
        let mut placement = Placement::new(CommitPolicy::AllowDefault, Position::ORIGIN);
        assert!(!placement.set_dragging(true));

        placement.begin();
        assert!(placement.set_dragging(true));
        assert!(!placement.set_dragging(true));
        assert!(placement.session().unwrap().is_dragging());
        assert!(placement.set_dragging(false));
        assert!(!placement.set_dragging(false));
    }

    #[test]
    fn test_record_is_last_write_wins() {
        let mut placement = Placement::new(CommitPolicy::AllowDefault, Position::ORIGIN);
        assert!(!placement.record(Position::new(9.0, 9.0, 9.0)));

        placement.begin();
        placement.record(Position::new(1.0, 0.0, 0.0));
        placement.record(Position::new(2.0, 0.0, 0.0));
        assert_eq!(placement.commit(), Some(Position::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_rebegin_discards_previous_session() {
        let mut placement = Placement::new(CommitPolicy::AllowDefault, Position::ORIGIN);
        placement.begin();
        placement.record(Position::new(5.0, 5.0, 5.0));

        let discarded = placement.begin().unwrap();
        assert_eq!(discarded.epoch, 0);
        let session = placement.session().unwrap();
        assert_eq!(session.epoch, 1);
        assert_eq!(session.live, Some(Position::ORIGIN));
    }
}
