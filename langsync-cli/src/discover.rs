use std::fs;
use std::path::{Path, PathBuf};

use langsync::locale::{is_locale_dir, locale_from_path};

/// Finds the locale files that sit beside `source`.
///
/// For `res/values/strings.xml` this is every `res/values-xx*/strings.xml`
/// that is a writable regular file, sorted by path.
pub fn discover_targets(source: &Path) -> Result<Vec<PathBuf>, String> {
    let file_name = source
        .file_name()
        .ok_or_else(|| format!("Source has no file name: {}", source.display()))?;
    let values_dir = match source.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let res_dir = match values_dir.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new(".."),
    };

    let entries = fs::read_dir(res_dir)
        .map_err(|e| format!("Cannot list resource directory {}: {}", res_dir.display(), e))?;

    let source_canonical = source.canonicalize().ok();
    let mut targets = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| format!("Cannot list {}: {}", res_dir.display(), e))?;
        let dir_name = entry.file_name();
        let Some(dir_name) = dir_name.to_str() else {
            continue;
        };
        if !is_locale_dir(dir_name) || !entry.path().is_dir() {
            continue;
        }

        let candidate = entry.path().join(file_name);
        let Ok(metadata) = fs::metadata(&candidate) else {
            continue;
        };
        if !metadata.is_file() {
            continue;
        }
        if metadata.permissions().readonly() {
            log::warn!("skipping read-only {}", candidate.display());
            continue;
        }
        if source_canonical.is_some() && candidate.canonicalize().ok() == source_canonical {
            continue;
        }
        targets.push(candidate);
    }
    targets.sort();
    log::debug!(
        "discovered {} target(s) next to {}",
        targets.len(),
        source.display()
    );
    Ok(targets)
}

pub fn run_discover_command(source: &str) -> Result<(), String> {
    crate::validation::validate_file_path(source)?;
    let targets = discover_targets(Path::new(source))?;
    if targets.is_empty() {
        println!("No locale files found next to {}", source);
        return Ok(());
    }
    for target in &targets {
        let locale = locale_from_path(target).unwrap_or_else(|| "-".to_string());
        println!("{:<10} {}", locale, target.display());
    }
    Ok(())
}
