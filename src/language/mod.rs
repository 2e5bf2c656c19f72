pub mod vocabulary;
pub mod selector;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Result;

// Re-export the main types for convenience
pub use self::vocabulary::Language;
pub use self::selector::{CustomSelector, RandomSelector, SeededSelector, WordSelector};

/// Vocabularies embedded in the binary
#[derive(
    Debug, Default, Copy, Clone, PartialEq, Eq, ValueEnum, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SupportedLanguage {
    #[default]
    Common100,
    Common200,
}

impl SupportedLanguage {
    pub fn as_lang(&self) -> Result<Language> {
        Language::load(&self.to_string())
    }
}
