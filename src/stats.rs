use serde::Serialize;
use std::fmt::{self, Display, Formatter};

use crate::difficulty::Difficulty;
use crate::session::TypedWord;
use crate::timer::MIN_ELAPSED_SECS;

/// Live or final figures for a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub accuracy: u32,
    pub wpm: u32,
    pub time: String,
}

/// Record handed to the results screen when a run finishes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestResult {
    pub accuracy: u32,
    pub wpm: u32,
    pub time: String,
    pub difficulty: Difficulty,
}

impl TestResult {
    pub fn from_stats(stats: Stats, difficulty: Difficulty) -> Self {
        Self {
            accuracy: stats.accuracy,
            wpm: stats.wpm,
            time: stats.time,
            difficulty,
        }
    }
}

impl Display for TestResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WPM: {} | Accuracy: {}% | Time: {}s | Difficulty: {}",
            self.wpm, self.accuracy, self.time, self.difficulty
        )
    }
}

/// Receives the single result of a finished run
pub trait ResultSink {
    fn deliver(&mut self, result: TestResult);
}

impl ResultSink for Vec<TestResult> {
    fn deliver(&mut self, result: TestResult) {
        self.push(result);
    }
}

impl ResultSink for Option<TestResult> {
    fn deliver(&mut self, result: TestResult) {
        *self = Some(result);
    }
}

/// Derives accuracy, wpm and the formatted time from the run's words alone.
///
/// The in-progress word counts as typed when it is non-blank, and as correct
/// only while it matches its target exactly.
pub fn compute_stats(
    typed_words: &[TypedWord],
    current_input: &str,
    target_words: &[String],
    elapsed_secs: f64,
) -> Stats {
    let pending = current_input.trim();
    let pending_typed = !pending.is_empty();
    let pending_correct = pending_typed
        && target_words
            .get(typed_words.len())
            .is_some_and(|target| target == pending);

    let typed_count = typed_words.len() + usize::from(pending_typed);
    let correct_count =
        typed_words.iter().filter(|w| w.correct).count() + usize::from(pending_correct);

    let accuracy = if typed_count > 0 {
        (100.0 * correct_count as f64 / typed_count as f64).round() as u32
    } else {
        100
    };

    Stats {
        accuracy,
        wpm: words_per_minute(typed_count, elapsed_secs),
        time: format_time(elapsed_secs),
    }
}

pub fn words_per_minute(words: usize, elapsed_secs: f64) -> u32 {
    let secs = if elapsed_secs > 0.0 {
        elapsed_secs
    } else {
        MIN_ELAPSED_SECS
    };
    (60.0 * words as f64 / secs).round() as u32
}

pub fn format_time(elapsed_secs: f64) -> String {
    format!("{:.1}", elapsed_secs.max(0.0))
}
