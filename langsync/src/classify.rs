//! Line classifier for `strings.xml` resources.
//!
//! The classifier recognizes a small line-granular grammar and nothing else:
//! every localizable entry must sit on one physical line. Anything it does
//! not recognize is passed through as [`LineRecord::Other`].
//!
//! ```rust
//! use langsync::classify::{LineRecord, classify};
//!
//! let mut in_comment = false;
//! let record = classify(r#"<string name="app_name">My App</string>"#, &mut in_comment)?;
//! assert!(matches!(record, LineRecord::StringEntry { key: "app_name", .. }));
//! # Ok::<(), langsync::Error>(())
//! ```

use crate::error::Error;

pub const COMMENT_OPEN: &str = "<!--";
pub const COMMENT_CLOSE: &str = "-->";
pub const ARRAY_OPEN: &str = "<string-array";
pub const ARRAY_CLOSE: &str = "</string-array>";
pub const ITEM_OPEN: &str = "<item";
pub const ITEM_CLOSE: &str = "</item>";
pub const STRING_OPEN: &str = "<string";
pub const STRING_CLOSE: &str = "</string>";

/// One classified line. Borrowed payloads are the trimmed source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRecord<'a> {
    StringEntry { key: &'a str, raw: &'a str },
    ArrayBegin(&'a str),
    ArrayEnd(&'a str),
    ArrayItem(&'a str),
    Comment(&'a str),
    Blank,
    Other(&'a str),
}

/// Payload-free discriminant of a [`LineRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    StringEntry,
    ArrayBegin,
    ArrayEnd,
    ArrayItem,
    Comment,
    Blank,
    Other,
}

impl<'a> LineRecord<'a> {
    pub fn category(&self) -> Category {
        match self {
            LineRecord::StringEntry { .. } => Category::StringEntry,
            LineRecord::ArrayBegin(_) => Category::ArrayBegin,
            LineRecord::ArrayEnd(_) => Category::ArrayEnd,
            LineRecord::ArrayItem(_) => Category::ArrayItem,
            LineRecord::Comment(_) => Category::Comment,
            LineRecord::Blank => Category::Blank,
            LineRecord::Other(_) => Category::Other,
        }
    }

    /// The trimmed text of the line; empty for [`LineRecord::Blank`].
    pub fn raw(&self) -> &'a str {
        match *self {
            LineRecord::StringEntry { raw, .. } => raw,
            LineRecord::ArrayBegin(raw)
            | LineRecord::ArrayEnd(raw)
            | LineRecord::ArrayItem(raw)
            | LineRecord::Comment(raw)
            | LineRecord::Other(raw) => raw,
            LineRecord::Blank => "",
        }
    }
}

impl Category {
    /// Leading indentation the merge writer emits for this category.
    pub fn indent(self) -> &'static str {
        match self {
            Category::StringEntry | Category::ArrayEnd | Category::Comment => "\t",
            Category::ArrayItem => "\t\t",
            Category::ArrayBegin | Category::Blank | Category::Other => "",
        }
    }
}

/// Classifies one trimmed line.
///
/// `in_comment` carries the multi-line comment state between calls and must
/// start out `false` for each document. A string entry without a quoted key
/// yields [`Error::MalformedEntry`] with line number `0`; callers that know
/// the line number attach it with [`Error::at_line`].
pub fn classify<'a>(line: &'a str, in_comment: &mut bool) -> Result<LineRecord<'a>, Error> {
    if *in_comment {
        if line.ends_with(COMMENT_CLOSE) {
            *in_comment = false;
        }
        return Ok(LineRecord::Comment(line));
    }

    if line.starts_with(COMMENT_OPEN) {
        if !line.ends_with(COMMENT_CLOSE) {
            *in_comment = true;
        }
        return Ok(LineRecord::Comment(line));
    }

    if line.starts_with(ARRAY_OPEN) {
        Ok(LineRecord::ArrayBegin(line))
    } else if line.ends_with(ARRAY_CLOSE) {
        Ok(LineRecord::ArrayEnd(line))
    } else if line.starts_with(ITEM_OPEN) && line.ends_with(ITEM_CLOSE) {
        Ok(LineRecord::ArrayItem(line))
    } else if line.starts_with(STRING_OPEN) && line.ends_with(STRING_CLOSE) {
        let key = extract_key(line).ok_or_else(|| Error::malformed(0, line))?;
        Ok(LineRecord::StringEntry { key, raw: line })
    } else if line.is_empty() {
        Ok(LineRecord::Blank)
    } else {
        Ok(LineRecord::Other(line))
    }
}

/// Returns the first quoted attribute value on the line.
///
/// The value must be closed by a second quote and be non-empty.
pub fn extract_key(line: &str) -> Option<&str> {
    let mut fields = line.split('"');
    fields.next()?;
    let key = fields.next()?;
    // an unterminated quote leaves no third field
    fields.next()?;
    if key.is_empty() { None } else { Some(key) }
}

/// Threads comment state and line numbers through a whole document.
#[derive(Debug, Default, Clone)]
pub struct LineScanner {
    in_comment: bool,
    line: usize,
}

impl LineScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trims and classifies the next physical line.
    pub fn next_record<'a>(&mut self, raw_line: &'a str) -> Result<LineRecord<'a>, Error> {
        self.line += 1;
        classify(raw_line.trim(), &mut self.in_comment).map_err(|e| e.at_line(self.line))
    }

    /// Whether the last line left a comment open.
    pub fn in_comment(&self) -> bool {
        self.in_comment
    }

    /// 1-based number of the last line scanned.
    pub fn line(&self) -> usize {
        self.line
    }
}
