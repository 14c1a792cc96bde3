//! Load gate for the scene model

/// Result of loading the scene model
///
/// While `Pending` the scene shows a placeholder primitive. `Failed` keeps the
/// placeholder in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModelLoad {
    #[default]
    Pending,
    Ready,
    Failed(String),
}

impl ModelLoad {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Whether the placeholder should still be rendered
    pub fn shows_placeholder(&self) -> bool {
        !matches!(self, Self::Ready)
    }

    /// Resolve a pending load; returns `false` if already resolved
    pub fn resolve(&mut self, outcome: Result<(), String>) -> bool {
        if !self.is_pending() {
            return false;
        }
        *self = match outcome {
            Ok(()) => Self::Ready,
            Err(reason) => Self::Failed(reason),
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_only_once() {
        let mut load = ModelLoad::default();
        assert!(load.shows_placeholder());

        assert!(load.resolve(Ok(())));
        assert_eq!(load, ModelLoad::Ready);
        assert!(!load.shows_placeholder());

        assert!(!load.resolve(Err("late failure".to_string())));
        assert_eq!(load, ModelLoad::Ready);
    }

    #[test]
    fn test_failure_keeps_placeholder() {
        let mut load = ModelLoad::Pending;
        load.resolve(Err("missing file".to_string()));
        assert!(load.shows_placeholder());
        assert!(!load.is_pending());
    }
}
