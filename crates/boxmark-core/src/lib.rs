//! Boxmark Core - Editor state for placing marker boxes in a 3D scene
//!
//! This crate holds everything the editor knows that does not depend on a
//! renderer:
//! - Box registry of committed marker positions with stable IDs
//! - Placement session state machine for the box being positioned
//! - Selection and coordinate readout for the last clicked box
//! - Input router that binds/unbinds listeners on session transitions
//! - Model load gate and editor configuration

pub mod asset;
pub mod config;
pub mod editor;
pub mod input;
pub mod placement;
pub mod position;
pub mod registry;
pub mod selection;

pub use asset::ModelLoad;
pub use config::{load_config, ConfigError, EditorConfig};
pub use editor::{Editor, EditorOutcome};
pub use input::{EditorEvent, InputRouter, Listener, RoutedAction};
pub use placement::{CommitPolicy, PlacementPhase, PlacementSession};
pub use position::Position;
pub use registry::{BoxId, BoxRegistry, PlacedBox};
pub use selection::{SelectedDetail, Selection};
