//! Merge writer.
//!
//! Streams a [`SourceDocument`] through the line classifier and writes the
//! merged target text: source layout, target translations where they exist,
//! source lines as placeholders where they do not.

use std::{
    collections::HashSet,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use log::{debug, warn};
use serde::Serialize;

use crate::{
    classify::{LineRecord, LineScanner},
    error::Error,
    index::TranslationIndex,
    types::SourceDocument,
};

/// Every emitted line ends with CRLF, whatever the host platform uses.
pub const LINE_TERMINATOR: &str = "\r\n";

/// What one merge did with the keys it saw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    /// Source keys whose existing target line was kept.
    pub preserved: usize,
    /// Source keys written with the source line because the target lacked them.
    pub placeholders: usize,
    /// Target keys the source no longer has; they are not written.
    pub dropped: usize,
    /// Physical lines written.
    pub lines: usize,
}

/// Writes the merge of `source` and `index` to `out`.
pub fn merge_into<W: Write>(
    source: &SourceDocument,
    index: &TranslationIndex,
    mut out: W,
) -> Result<MergeStats, Error> {
    let mut scanner = LineScanner::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut stats = MergeStats::default();

    for raw_line in source.lines() {
        let record = scanner.next_record(raw_line).map_err(|e| match &source.path {
            Some(path) => e.with_path(path),
            None => e,
        })?;

        let content = match record {
            LineRecord::StringEntry { key, raw } => {
                if !seen.insert(key) {
                    warn!("source repeats key `{}` on line {}", key, scanner.line());
                }
                match index.get(key) {
                    Some(existing) => {
                        stats.preserved += 1;
                        existing
                    }
                    None => {
                        stats.placeholders += 1;
                        raw
                    }
                }
            }
            other => other.raw(),
        };

        out.write_all(record.category().indent().as_bytes())?;
        out.write_all(content.as_bytes())?;
        out.write_all(LINE_TERMINATOR.as_bytes())?;
        stats.lines += 1;
    }
    out.flush()?;

    stats.dropped = index
        .keys()
        .filter(|key| !seen.contains(key.as_str()))
        .count();
    Ok(stats)
}

/// Merges into a freshly created (or truncated) file at `output`.
pub fn merge_to_file<P: AsRef<Path>>(
    source: &SourceDocument,
    index: &TranslationIndex,
    output: P,
) -> Result<MergeStats, Error> {
    let output = output.as_ref();
    let file = File::create(output).map_err(|e| Error::io_at(output, e))?;
    let stats = merge_into(source, index, BufWriter::new(file)).map_err(|e| match e {
        Error::Io(source) => Error::io_at(output, source),
        other => other,
    })?;
    debug!(
        "wrote {} lines to {} ({} preserved, {} placeholders, {} dropped)",
        stats.lines,
        output.display(),
        stats.preserved,
        stats.placeholders,
        stats.dropped
    );
    Ok(stats)
}

/// Merges into an in-memory string.
pub fn merge_to_string(
    source: &SourceDocument,
    index: &TranslationIndex,
) -> Result<(String, MergeStats), Error> {
    let mut buf = Vec::new();
    let stats = merge_into(source, index, &mut buf)?;
    // every piece written came from a `&str`
    let text = String::from_utf8(buf)
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
    Ok((text, stats))
}
