use std::mem;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::difficulty::Difficulty;
use crate::projection::{self, WordView};
use crate::session::{EngineState, RunId, TypedWord};
use crate::stats::{compute_stats, ResultSink, Stats, TestResult};
use crate::timer::{Clock, Stopwatch, SystemClock};
use crate::word_generator::WordGenerator;

/// Delay between finishing a run and handing out its result
pub const DEFAULT_GRACE: Duration = Duration::from_millis(50);

/// Typing this after a word commits it
pub const WORD_SEPARATOR: char = ' ';

#[derive(Debug, Clone, PartialEq)]
enum Completion {
    NotFinished,
    Scheduled { due: Instant, result: TestResult },
    Delivered,
}

/// Word-by-word typing test.
///
/// The cursor into the target words is the number of committed words, so the
/// two can never drift apart.
#[derive(Debug)]
pub struct TypingEngine<C: Clock = SystemClock> {
    difficulty: Difficulty,
    generator: WordGenerator,
    target_words: Vec<String>,
    typed_words: Vec<TypedWord>,
    current_input: String,
    stopwatch: Stopwatch<C>,
    displayed_secs: f64,
    run_id: RunId,
    grace: Duration,
    completion: Completion,
}

impl TypingEngine<SystemClock> {
    pub fn new(difficulty: Difficulty, generator: WordGenerator) -> Self {
        Self::with_clock(difficulty, generator, SystemClock)
    }
}

impl<C: Clock> TypingEngine<C> {
    pub fn with_clock(difficulty: Difficulty, mut generator: WordGenerator, clock: C) -> Self {
        let target_words = generator.generate_for(difficulty);
        Self {
            difficulty,
            generator,
            target_words,
            typed_words: Vec::new(),
            current_input: String::new(),
            stopwatch: Stopwatch::new(clock),
            displayed_secs: 0.0,
            run_id: RunId::default(),
            grace: DEFAULT_GRACE,
            completion: Completion::NotFinished,
        }
    }

    pub fn with_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn target_words(&self) -> &[String] {
        &self.target_words
    }

    pub fn typed_words(&self) -> &[TypedWord] {
        &self.typed_words
    }

    pub fn current_word_index(&self) -> usize {
        self.typed_words.len()
    }

    pub fn current_input(&self) -> &str {
        &self.current_input
    }

    pub fn current_target(&self) -> Option<&str> {
        self.target_words
            .get(self.current_word_index())
            .map(String::as_str)
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    pub fn has_started(&self) -> bool {
        self.stopwatch.has_started()
    }

    pub fn has_finished(&self) -> bool {
        self.current_word_index() >= self.target_words.len()
    }

    pub fn state(&self) -> EngineState {
        if self.has_finished() {
            EngineState::Finished
        } else if self.stopwatch.is_running() {
            EngineState::Running
        } else if self.stopwatch.has_started() {
            EngineState::Paused
        } else {
            EngineState::Idle
        }
    }

    /// Discards the current run and starts over with fresh words. Keeps the
    /// current difficulty when none is given.
    pub fn reset(&mut self, difficulty: Option<Difficulty>) {
        if let Some(difficulty) = difficulty {
            self.difficulty = difficulty;
        }
        self.target_words = self.generator.generate_for(self.difficulty);
        self.typed_words.clear();
        self.current_input.clear();
        self.stopwatch.reset();
        self.displayed_secs = 0.0;
        self.completion = Completion::NotFinished;
        self.run_id = self.run_id.next();

        info!(
            difficulty = %self.difficulty,
            words = self.target_words.len(),
            run = ?self.run_id,
            "test reset"
        );
    }

    pub fn on_focus_gained(&mut self) {
        if self.state() == EngineState::Paused && self.stopwatch.resume() {
            debug!(elapsed = self.elapsed_secs(), "focus regained, timer resumed");
        }
    }

    pub fn on_focus_lost(&mut self) {
        if self.state() == EngineState::Running && self.stopwatch.pause() {
            debug!(elapsed = self.elapsed_secs(), "focus lost, timer paused");
        }
    }

    /// Feeds the full contents of the input buffer. A trailing separator
    /// commits the word.
    pub fn on_input_changed(&mut self, text: &str) {
        if self.has_finished() {
            debug!("input after finish ignored");
            return;
        }

        if !text.is_empty() {
            if self.stopwatch.start() {
                info!(run = ?self.run_id, "test started");
            } else if self.stopwatch.resume() {
                debug!("typing resumed the timer");
            }
        }

        if text.ends_with(WORD_SEPARATOR) {
            self.commit(text);
        } else {
            self.current_input.clear();
            self.current_input.push_str(text);
        }
    }

    /// Commits whatever is in the buffer without needing a separator
    pub fn on_key_enter(&mut self) {
        if self.has_finished() {
            return;
        }
        let text = mem::take(&mut self.current_input);
        self.commit(&text);
    }

    pub fn type_char(&mut self, c: char) {
        if self.has_finished() {
            return;
        }
        let mut text = self.current_input.clone();
        text.push(c);
        self.on_input_changed(&text);
    }

    pub fn backspace(&mut self) {
        if self.has_finished() || self.current_input.is_empty() {
            return;
        }
        let mut text = self.current_input.clone();
        text.pop();
        self.on_input_changed(&text);
    }

    fn commit(&mut self, submitted: &str) {
        let index = self.current_word_index();
        let target = self.target_words.get(index).map_or("", String::as_str);
        let word = TypedWord::grade(submitted, target);
        debug!(index, typed = %word.typed, correct = word.correct, "word committed");

        self.typed_words.push(word);
        self.current_input.clear();

        if self.has_finished() {
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.stopwatch.stop();
        self.displayed_secs = self.elapsed_secs();
        let result = TestResult::from_stats(self.stats(), self.difficulty);
        let due = self.stopwatch.clock().now() + self.grace;
        info!(%result, "test finished");
        self.completion = Completion::Scheduled { due, result };
    }

    /// Hands the finished run's result to `sink` once its grace delay has
    /// passed. Returns true only for the call that delivered it.
    pub fn poll_result<S: ResultSink + ?Sized>(&mut self, sink: &mut S) -> bool {
        let due = match &self.completion {
            Completion::Scheduled { due, .. } => *due,
            _ => return false,
        };
        if self.stopwatch.clock().now() < due {
            return false;
        }
        match mem::replace(&mut self.completion, Completion::Delivered) {
            Completion::Scheduled { result, .. } => {
                sink.deliver(result);
                true
            }
            other => {
                self.completion = other;
                false
            }
        }
    }

    pub fn result_delivered(&self) -> bool {
        self.completion == Completion::Delivered
    }

    /// Refreshes the displayed time. Ticks scheduled for an earlier run are
    /// ignored.
    pub fn on_tick(&mut self, run_id: RunId) -> bool {
        if run_id != self.run_id {
            debug!(stale = ?run_id, current = ?self.run_id, "stale tick ignored");
            return false;
        }
        self.displayed_secs = self.elapsed_secs();
        true
    }

    /// Time sampled by the last tick, for display only
    pub fn displayed_secs(&self) -> f64 {
        self.displayed_secs
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.stopwatch.elapsed_secs()
    }

    pub fn stats(&self) -> Stats {
        compute_stats(
            &self.typed_words,
            &self.current_input,
            &self.target_words,
            self.elapsed_secs(),
        )
    }

    pub fn word_views(&self) -> Vec<WordView<'_>> {
        projection::word_views(&self.target_words, &self.typed_words, &self.current_input)
    }
}
