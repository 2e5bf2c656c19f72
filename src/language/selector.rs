use super::vocabulary::Language;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt::Debug;

/// Trait for different word selection strategies
pub trait WordSelector: Debug {
    /// Pick `count` words for a fresh run
    fn select_words(&mut self, language: &Language, count: usize) -> Vec<String>;
}

fn sample_with_replacement<R: Rng + ?Sized>(
    rng: &mut R,
    language: &Language,
    count: usize,
) -> Vec<String> {
    (0..count)
        .filter_map(|_| language.words.choose(rng).cloned())
        .collect()
}

/// Uniform random selection with replacement, so duplicates are expected
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSelector;

impl WordSelector for RandomSelector {
    fn select_words(&mut self, language: &Language, count: usize) -> Vec<String> {
        sample_with_replacement(&mut rand::thread_rng(), language, count)
    }
}

/// Same sampling as [`RandomSelector`] but reproducible from a seed
#[derive(Debug, Clone)]
pub struct SeededSelector {
    rng: StdRng,
}

impl SeededSelector {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl WordSelector for SeededSelector {
    fn select_words(&mut self, language: &Language, count: usize) -> Vec<String> {
        sample_with_replacement(&mut self.rng, language, count)
    }
}

/// Repeats a user supplied word list until the run is filled
#[derive(Debug, Clone)]
pub struct CustomSelector {
    words: Vec<String>,
}

impl CustomSelector {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }
}

impl WordSelector for CustomSelector {
    fn select_words(&mut self, language: &Language, count: usize) -> Vec<String> {
        let source = if self.words.is_empty() {
            &language.words
        } else {
            &self.words
        };
        source.iter().cycle().take(count).cloned().collect()
    }
}
