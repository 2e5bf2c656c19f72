use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Length of a test run, fixed for the lifetime of a run
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Short,
    #[default]
    Medium,
    Long,
}

impl Difficulty {
    /// All difficulties in the order they are offered to the user
    pub const ALL: [Difficulty; 3] = [Difficulty::Short, Difficulty::Medium, Difficulty::Long];

    pub fn word_count(self) -> usize {
        match self {
            Difficulty::Short => 20,
            Difficulty::Medium => 50,
            Difficulty::Long => 100,
        }
    }

    /// Cycles short -> medium -> long -> short
    pub fn next(self) -> Self {
        match self {
            Difficulty::Short => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Long,
            Difficulty::Long => Difficulty::Short,
        }
    }
}
