use crate::{
    difficulty::Difficulty,
    error::Result,
    language::{CustomSelector, Language, RandomSelector, SupportedLanguage, WordSelector},
};

/// Configuration for word generation
#[derive(Debug, Clone, Default)]
pub struct WordGenConfig {
    pub language: SupportedLanguage,
    pub custom_words: Option<Vec<String>>,
}

/// Produces the target words for each run
#[derive(Debug)]
pub struct WordGenerator {
    language: Language,
    selector: Box<dyn WordSelector>,
}

impl WordGenerator {
    pub fn new(language: Language, selector: Box<dyn WordSelector>) -> Self {
        Self { language, selector }
    }

    pub fn from_config(config: &WordGenConfig) -> Result<Self> {
        let language = config.language.as_lang()?;
        let selector: Box<dyn WordSelector> = match &config.custom_words {
            Some(words) if !words.is_empty() => Box::new(CustomSelector::new(words.clone())),
            _ => Box::new(RandomSelector),
        };
        Ok(Self::new(language, selector))
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    /// A fresh sequence of `count` words, independent of earlier calls
    pub fn generate(&mut self, count: usize) -> Vec<String> {
        self.selector.select_words(&self.language, count)
    }

    pub fn generate_for(&mut self, difficulty: Difficulty) -> Vec<String> {
        self.generate(difficulty.word_count())
    }
}
