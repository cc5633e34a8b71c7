//! Translation index builder.
//!
//! A target file is only scanned for string-entry lines; everything else in it
//! is discarded because the source decides the layout of the merged output.

use std::{
    collections::{HashMap, hash_map},
    io::BufRead,
    path::Path,
};

use log::{debug, warn};

use crate::{
    classify::{ARRAY_OPEN, STRING_OPEN, extract_key},
    error::Error,
    traits::TextSource,
};

/// Maps an entry key to the full trimmed line a target already holds for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationIndex {
    entries: HashMap<String, String>,
}

impl TranslationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a line for `key`, replacing any earlier one.
    ///
    /// Returns the replaced line, if there was one.
    pub fn insert(&mut self, key: impl Into<String>, line: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), line.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> hash_map::Keys<'_, String, String> {
        self.entries.keys()
    }
}

impl TextSource for TranslationIndex {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut index = TranslationIndex::new();

        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if !trimmed.starts_with(STRING_OPEN) || trimmed.starts_with(ARRAY_OPEN) {
                continue;
            }

            let key = extract_key(trimmed).ok_or_else(|| Error::malformed(number + 1, trimmed))?;
            if index.insert(key, trimmed).is_some() {
                warn!("duplicate key `{}` on line {}; keeping the later line", key, number + 1);
            }
        }

        Ok(index)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TranslationIndex {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut index = TranslationIndex::new();
        for (key, line) in iter {
            index.insert(key, line);
        }
        index
    }
}

/// Builds the translation index of one target file.
pub fn build_index<P: AsRef<Path>>(target: P) -> Result<TranslationIndex, Error> {
    let target = target.as_ref();
    let index = TranslationIndex::read_from(target)?;
    debug!("indexed {} entries from {}", index.len(), target.display());
    Ok(index)
}
