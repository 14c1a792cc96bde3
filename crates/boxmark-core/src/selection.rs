//! Single-box selection and coordinate readout

use crate::registry::{BoxId, BoxRegistry, PlacedBox};

/// Readout shown when nothing is selected
pub const NO_SELECTION: &str = "No Box Selected";

/// Formatted coordinates of the selected box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedDetail {
    /// Deletion target
    pub id: BoxId,
    pub x: String,
    pub y: String,
    pub z: String,
}

impl SelectedDetail {
    pub fn from_box(placed: &PlacedBox) -> Self {
        Self {
            id: placed.id,
            x: fixed2(placed.position.x),
            y: fixed2(placed.position.y),
            z: fixed2(placed.position.z),
        }
    }
}

/// Two-decimal rendering with halves rounded away from zero
///
/// `-0.0` prints as `0.00`, while small negatives keep their sign (`-0.00`).
fn fixed2(value: f32) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let hundredths = (f64::from(value).abs() * 100.0).round() as u64;
    format!("{}{}.{:02}", sign, hundredths / 100, hundredths % 100)
}

impl std::fmt::Display for SelectedDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "X: {} Y: {} Z: {}", self.x, self.y, self.z)
    }
}

/// Last clicked box
#[derive(Debug, Clone, Default)]
pub struct Selection {
    detail: Option<SelectedDetail>,
}

impl Selection {
    /// Select `placed`, replacing any previous selection
    pub fn on_box_clicked(&mut self, placed: &PlacedBox) -> &SelectedDetail {
        self.detail.insert(SelectedDetail::from_box(placed))
    }

    /// Remove the selected box from `registry` and clear the selection
    pub fn delete_selected(&mut self, registry: &mut BoxRegistry) -> Option<PlacedBox> {
        let detail = self.detail.take()?;
        registry.remove(detail.id)
    }

    pub fn detail(&self) -> Option<&SelectedDetail> {
        self.detail.as_ref()
    }

    pub fn target(&self) -> Option<BoxId> {
        self.detail.as_ref().map(|d| d.id)
    }

    pub fn clear(&mut self) {
        self.detail = None;
    }

    pub fn readout(&self) -> String {
        match &self.detail {
            Some(detail) => detail.to_string(),
            None => NO_SELECTION.to_string(),
        }
    }
}
