//! Documents taking part in one synchronization run.
//! Both are read-only snapshots taken when the run starts.

use std::{
    io::BufRead,
    path::{Path, PathBuf},
};

use crate::{error::Error, index::TranslationIndex, traits::TextSource};

/// The canonical file whose layout and key set every target follows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceDocument {
    /// Where the lines were read from, if they came from a file.
    pub path: Option<PathBuf>,
    /// File name of the source (`strings.xml`), used to label outputs.
    pub name: String,
    /// Raw physical lines without terminators.
    pub lines: Vec<String>,
}

impl SourceDocument {
    /// Iterates over the raw lines in file order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl TextSource for SourceDocument {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
        Ok(SourceDocument {
            path: None,
            name: String::new(),
            lines,
        })
    }

    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let reader = crate::traits::open_text(path)?;
        let mut document = Self::from_reader(reader).map_err(|e| e.with_path(path))?;
        document.name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        document.path = Some(path.to_path_buf());
        Ok(document)
    }
}

/// One locale file being synchronized, paired with its existing translations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDocument {
    pub path: PathBuf,
    pub index: TranslationIndex,
}

impl TargetDocument {
    /// Reads the target and builds its translation index.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        Ok(TargetDocument {
            path: path.to_path_buf(),
            index: crate::index::build_index(path)?,
        })
    }
}
