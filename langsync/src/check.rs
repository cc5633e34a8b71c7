//! Pre-flight checks on source files.

use std::{
    fmt::Display,
    fs::File,
    io::BufReader,
    path::Path,
};

use log::debug;
use quick_xml::{Reader, events::Event};
use serde::Serialize;

use crate::{
    classify::{LineRecord, LineScanner},
    error::Error,
    traits::TextSource,
    types::SourceDocument,
};

/// Result of [`check_source_format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceCheck {
    Valid,
    /// A `<string-array>` opens outside a comment on this 1-based line.
    ContainsStringArray { line: usize },
}

impl SourceCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, SourceCheck::Valid)
    }
}

impl Display for SourceCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceCheck::Valid => write!(f, "valid"),
            SourceCheck::ContainsStringArray { line } => write!(
                f,
                "contains a <string-array> element at line {}; move string arrays out of the file before syncing",
                line
            ),
        }
    }
}

/// Scans an already loaded source for elements the sync workflow refuses.
///
/// String arrays inside comments are fine.
pub fn check_source_document(source: &SourceDocument) -> Result<SourceCheck, Error> {
    let mut scanner = LineScanner::new();
    for raw_line in source.lines() {
        let record = scanner.next_record(raw_line).map_err(|e| match &source.path {
            Some(path) => e.with_path(path),
            None => e,
        })?;
        if let LineRecord::ArrayBegin(_) = record {
            return Ok(SourceCheck::ContainsStringArray {
                line: scanner.line(),
            });
        }
    }
    Ok(SourceCheck::Valid)
}

/// Reads `path` and runs [`check_source_document`] on it.
pub fn check_source_format<P: AsRef<Path>>(path: P) -> Result<SourceCheck, Error> {
    let source = SourceDocument::read_from(path)?;
    check_source_document(&source)
}

/// Whether the first element of the XML file at `path` is `<resources>`.
///
/// Files that are not well-formed enough to reach a first element are not
/// resource files.
pub fn is_resource_file<P: AsRef<Path>>(path: P) -> Result<bool, Error> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::io_at(path, e))?;
    let mut reader = Reader::from_reader(BufReader::new(file));
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                return Ok(e.name().as_ref() == b"resources");
            }
            Ok(Event::Eof) => return Ok(false),
            Ok(_) => {}
            Err(e) => {
                debug!("{} is not readable as XML: {}", path.display(), e);
                return Ok(false);
            }
        }
        buf.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_valid_source() {
        let source = SourceDocument::from_str(indoc! {r#"
            <resources>
                <string name="a">A</string>
            </resources>
        "#})
        .unwrap();
        assert_eq!(check_source_document(&source).unwrap(), SourceCheck::Valid);
    }

    #[test]
    fn test_string_array_is_reported() {
        let source = SourceDocument::from_str(indoc! {r#"
            <resources>
                <string name="a">A</string>
                <string-array name="planets">
                    <item>Mercury</item>
                </string-array>
            </resources>
        "#})
        .unwrap();
        let check = check_source_document(&source).unwrap();
        assert_eq!(check, SourceCheck::ContainsStringArray { line: 3 });
        assert!(!check.is_valid());
        assert!(check.to_string().contains("line 3"));
    }

    #[test]
    fn test_commented_string_array_is_allowed() {
        let source = SourceDocument::from_str(indoc! {r#"
            <resources>
                <!-- disabled
                <string-array name="planets">
                </string-array>
                -->
            </resources>
        "#})
        .unwrap();
        assert_eq!(check_source_document(&source).unwrap(), SourceCheck::Valid);
    }

    #[test]
    fn test_is_resource_file() {
        let dir = tempfile::tempdir().unwrap();
        let res = dir.path().join("strings.xml");
        std::fs::write(
            &res,
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!-- c -->\n<resources>\n</resources>\n",
        )
        .unwrap();
        assert!(is_resource_file(&res).unwrap());

        let layout = dir.path().join("layout.xml");
        std::fs::write(&layout, "<LinearLayout>\n</LinearLayout>\n").unwrap();
        assert!(!is_resource_file(&layout).unwrap());

        let empty = dir.path().join("empty.xml");
        std::fs::write(&empty, "").unwrap();
        assert!(!is_resource_file(&empty).unwrap());

        assert!(is_resource_file(dir.path().join("missing.xml")).is_err());
    }

    #[test]
    fn test_check_source_format_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strings.xml");
        std::fs::write(&path, "<resources>\n<string-array name=\"x\">\n</string-array>\n</resources>\n").unwrap();
        assert_eq!(
            check_source_format(&path).unwrap(),
            SourceCheck::ContainsStringArray { line: 2 }
        );
    }
}
