//! Traits for loading line-oriented resource text in langsync.

use std::{
    fs::File,
    io::{BufRead, BufReader, Cursor},
    path::Path,
};

use encoding_rs_io::DecodeReaderBytesBuilder;

use crate::error::Error;

/// A value built by reading resource text one physical line at a time.
///
/// # Example
///
/// ```rust,no_run
/// use langsync::{TranslationIndex, traits::TextSource};
/// let index = TranslationIndex::read_from("res/values-fr/strings.xml")?;
/// println!("{} keys", index.len());
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait TextSource {
    /// Build from any buffered reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Build from a file path. Errors carry the path in their message.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let path = path.as_ref();
        let reader = open_text(path)?;
        Self::from_reader(reader).map_err(|e| e.with_path(path))
    }

    /// Build from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }
}

/// Opens a file for line reading with BOM-aware decoding.
///
/// A UTF-8 BOM is dropped and UTF-16 input with a BOM is transcoded; anything
/// else is passed through untouched and must already be UTF-8.
pub fn open_text<P: AsRef<Path>>(path: P) -> Result<impl BufRead, Error> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::io_at(path, e))?;
    let decoder = DecodeReaderBytesBuilder::new()
        .bom_override(true)
        .build(file);
    Ok(BufReader::new(decoder))
}
