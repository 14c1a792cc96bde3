//! Registry of committed marker boxes

use serde::{Deserialize, Serialize};

use crate::position::Position;

/// Stable identifier for a placed box
///
/// IDs are allocated in increasing order and never reused by the registry
/// that issued them, so a selection stays valid across unrelated inserts
/// and deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoxId(pub u64);

impl std::fmt::Display for BoxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "box-{}", self.0)
    }
}

/// A committed marker box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedBox {
    pub id: BoxId,
    pub position: Position,
}

/// Ordered list of committed boxes
#[derive(Debug, Clone, Default)]
pub struct BoxRegistry {
    boxes: Vec<PlacedBox>,
    next_id: u64,
}

impl BoxRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a box at the end of the registry
    pub fn append(&mut self, position: Position) -> BoxId {
        let id = BoxId(self.next_id);
        self.next_id += 1;
        self.boxes.push(PlacedBox { id, position });
        id
    }

    /// Remove the box at `index`, shifting later entries down by one
    ///
    /// Returns `None` and leaves the registry untouched when `index` is
    /// missing or out of bounds.
    pub fn remove_at(&mut self, index: Option<usize>) -> Option<PlacedBox> {
        let index = index?;
        if index >= self.boxes.len() {
            return None;
        }
        Some(self.boxes.remove(index))
    }

    /// Remove the box with the given ID
    pub fn remove(&mut self, id: BoxId) -> Option<PlacedBox> {
        let index = self.index_of(id);
        self.remove_at(index)
    }

    /// All boxes in insertion order
    pub fn all(&self) -> &[PlacedBox] {
        &self.boxes
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.boxes.iter().map(|b| b.position)
    }

    pub fn get(&self, id: BoxId) -> Option<&PlacedBox> {
        self.boxes.iter().find(|b| b.id == id)
    }

    /// Current position of `id` in the ordered list
    pub fn index_of(&self, id: BoxId) -> Option<usize> {
        self.boxes.iter().position(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}
