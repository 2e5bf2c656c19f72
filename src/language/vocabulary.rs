use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;

use crate::error::{Error, Result};

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

/// A fixed vocabulary that target words are drawn from
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Language {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl Language {
    /// Load one of the vocabularies embedded in the binary
    pub fn load(name: &str) -> Result<Self> {
        read_language_from_file(&format!("{name}.json"))
    }

    /// Build a vocabulary from an in-memory word list
    pub fn from_words<S: Into<String>>(name: &str, words: Vec<S>) -> Result<Self> {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        let lang = Self {
            name: name.to_string(),
            size: words.len() as u32,
            words,
        };
        lang.validate()?;
        Ok(lang)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    fn validate(&self) -> Result<()> {
        if self.words.is_empty() {
            return Err(Error::InvalidLanguage {
                name: self.name.clone(),
                reason: "word list is empty".to_string(),
            });
        }
        if self.size as usize != self.words.len() {
            return Err(Error::InvalidLanguage {
                name: self.name.clone(),
                reason: format!(
                    "declared size {} does not match {} words",
                    self.size,
                    self.words.len()
                ),
            });
        }
        Ok(())
    }
}

fn read_language_from_file(file_name: &str) -> Result<Language> {
    let file = LANG_DIR
        .get_file(file_name)
        .ok_or_else(|| Error::LanguageNotFound(file_name.to_string()))?;

    let file_as_str = file.contents_utf8().ok_or_else(|| Error::InvalidLanguage {
        name: file_name.to_string(),
        reason: "file is not valid utf-8".to_string(),
    })?;

    let lang: Language = from_str(file_as_str)?;
    lang.validate()?;

    Ok(lang)
}
