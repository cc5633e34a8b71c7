use std::io::{self, Write};

use langsync::{SourceDocument, TextSource, build_index, merge_into};

use crate::validation::validate_file_path;

/// Prints what `target` would look like after a sync, without writing it.
///
/// The merged file goes to stdout; the counts go to stderr so the output can
/// be redirected or diffed.
pub fn run_preview_command(source: &str, target: &str) -> Result<(), String> {
    validate_file_path(source)?;
    validate_file_path(target)?;

    let source_doc = SourceDocument::read_from(source).map_err(|e| e.to_string())?;
    let index = build_index(target).map_err(|e| e.to_string())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let stats = merge_into(&source_doc, &index, &mut out).map_err(|e| e.to_string())?;
    out.flush()
        .map_err(|e| format!("Failed to write preview: {}", e))?;

    eprintln!(
        "{}: {} preserved, {} placeholder(s), {} dropped",
        target, stats.preserved, stats.placeholders, stats.dropped
    );
    Ok(())
}
