//! User input events and replayable input scripts.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AppError, ScriptError};

/// One user action, as delivered by the host window or a script.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub enum InputEvent {
    /// Primary button pressed at window pixel `(x, y)`.
    PointerDown { x: f32, y: f32 },
    /// Pointer dragged by `(dx, dy)` pixels with the button held.
    Drag { dx: f32, dy: f32 },
    /// Wheel moved by `delta` lines; positive zooms in.
    Wheel { delta: f32 },
    Escape,
    Resize { width: u32, height: u32 },
    /// The journal panel's close control.
    CloseJournal,
    ContinueAsGuest,
    SignIn { email: String, password: String },
    SignOut,
}

/// An event scheduled `at` seconds after the script starts.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ScriptStep {
    pub at: f32,
    pub event: InputEvent,
}

/// A timed list of input events, sorted by time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputScript {
    steps: Vec<ScriptStep>,
    next: usize,
}

impl InputScript {
    /// Build a script from steps in any order. Every step time must be finite.
    pub fn new(mut steps: Vec<ScriptStep>) -> Result<Self, ScriptError> {
        if let Some((index, step)) = steps.iter().enumerate().find(|(_, s)| !s.at.is_finite()) {
            return Err(ScriptError::NonFiniteTime { index, at: step.at });
        }
        steps.sort_by(|a, b| a.at.total_cmp(&b.at));
        Ok(Self { steps, next: 0 })
    }

    pub fn from_ron(source: &str) -> Result<Self, ScriptError> {
        Self::new(ron::from_str(source)?)
    }

    pub async fn load(path: &Path) -> Result<Self, AppError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| AppError::ScriptRead {
                path: PathBuf::from(path),
                source,
            })?;
        Self::from_ron(&contents).map_err(|source| AppError::ScriptParse {
            path: PathBuf::from(path),
            source,
        })
    }

    /// Take every event due at or before `time`.
    pub fn due(&mut self, time: f32) -> impl Iterator<Item = &InputEvent> + '_ {
        let start = self.next;
        while self.next < self.steps.len() && self.steps[self.next].at <= time {
            self.next += 1;
        }
        self.steps[start..self.next].iter().map(|s| &s.event)
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.steps.len()
    }

    /// Time of the last scheduled event, or zero for an empty script.
    pub fn end_time(&self) -> f32 {
        self.steps.last().map_or(0.0, |s| s.at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"[
        (at: 2.0, event: Escape),
        (at: 0.0, event: ContinueAsGuest),
        (at: 0.5, event: PointerDown(x: 640.0, y: 360.0)),
        (at: 0.5, event: SignIn(email: "ada@example.com", password: "orbit")),
    ]"#;

    #[test]
    fn test_parses_and_sorts() {
        let script = InputScript::from_ron(SCRIPT).unwrap();
        assert_eq!(script.steps.len(), 4);
        assert_eq!(script.steps[0].event, InputEvent::ContinueAsGuest);
        assert_eq!(script.end_time(), 2.0);
    }

    #[test]
    fn test_due_releases_events_in_order() {
        let mut script = InputScript::from_ron(SCRIPT).unwrap();
        assert_eq!(script.due(0.1).count(), 1);
        assert_eq!(script.due(0.1).count(), 0);
        let batch: Vec<_> = script.due(1.0).cloned().collect();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], InputEvent::PointerDown { x: 640.0, y: 360.0 });
        assert!(!script.is_finished());
        assert_eq!(script.due(5.0).collect::<Vec<_>>(), vec![&InputEvent::Escape]);
        assert!(script.is_finished());
    }

    #[test]
    fn test_non_finite_times_are_rejected() {
        for at in [f32::INFINITY, f32::NEG_INFINITY, f32::NAN] {
            let steps = vec![
                ScriptStep {
                    at: 0.0,
                    event: InputEvent::ContinueAsGuest,
                },
                ScriptStep {
                    at,
                    event: InputEvent::Escape,
                },
            ];
            assert!(matches!(
                InputScript::new(steps),
                Err(ScriptError::NonFiniteTime { index: 1, .. })
            ));
        }
    }

    #[test]
    fn test_empty_script() {
        let mut script = InputScript::default();
        assert!(script.is_finished());
        assert_eq!(script.end_time(), 0.0);
        assert_eq!(script.due(10.0).count(), 0);
    }

    #[tokio::test]
    async fn test_load_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.ron");
        assert!(matches!(
            InputScript::load(&missing).await,
            Err(AppError::ScriptRead { .. })
        ));

        let bad = dir.path().join("bad.ron");
        std::fs::write(&bad, "[(at: 0.0, event: Teleport)]").unwrap();
        let err = InputScript::load(&bad).await.unwrap_err();
        assert!(matches!(err, AppError::ScriptParse { .. }));
        assert!(err.to_string().contains("bad.ron"));

        let never = dir.path().join("never.ron");
        std::fs::write(&never, "[(at: inf, event: Escape)]").unwrap();
        assert!(matches!(
            InputScript::load(&never).await,
            Err(AppError::ScriptParse {
                source: ScriptError::NonFiniteTime { index: 0, .. },
                ..
            })
        ));
    }
}
