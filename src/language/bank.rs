use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;

use crate::error::{Error, Result};

static LANG_DIR: Dir = include_dir!("src/lang");

const BUNDLED_BANK: &str = "english";

/// The static pool of candidate words a session is drawn from
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct WordBank {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl WordBank {
    /// The word bank compiled into the binary
    pub fn bundled() -> Result<Self> {
        Self::named(BUNDLED_BANK)
    }

    /// Load one of the banks shipped under `src/lang`
    pub fn named(name: &str) -> Result<Self> {
        read_bank_from_file(&format!("{name}.json"))
    }

    /// Build an ad-hoc bank from an explicit word list
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        Self {
            name: "custom".to_string(),
            size: words.len() as u32,
            words,
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }
}

fn read_bank_from_file(file_name: &str) -> Result<WordBank> {
    let file = LANG_DIR
        .get_file(file_name)
        .ok_or_else(|| Error::WordBank(format!("{file_name} not found")))?;

    let file_as_str = file
        .contents_utf8()
        .ok_or_else(|| Error::WordBank(format!("{file_name} is not valid utf-8")))?;

    let mut bank: WordBank =
        from_str(file_as_str).map_err(|e| Error::WordBank(format!("{file_name}: {e}")))?;

    // blank entries can never be completed
    bank.words.retain(|w| !w.trim().is_empty());
    bank.size = bank.words.len() as u32;

    Ok(bank)
}
