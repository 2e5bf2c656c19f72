use serde::Serialize;

/// One committed word
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypedWord {
    pub typed: String,
    pub correct: bool,
}

impl TypedWord {
    /// Grades a submission against its target. The separator and any
    /// surrounding whitespace are trimmed; comparison is exact and
    /// case-sensitive.
    pub fn grade(submitted: &str, target: &str) -> Self {
        let typed = submitted.trim().to_string();
        let correct = typed == target;
        Self { typed, correct }
    }
}

/// Lifecycle of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Running,
    Paused,
    Finished,
}

/// Identity of a run; every reset hands out a new one
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(u64);

impl RunId {
    pub fn next(self) -> Self {
        RunId(self.0.wrapping_add(1))
    }
}
